//! Zone classification for a single metric.
//!
//! ```text
//!        Low      │     Optimal      │      High       │  Critical
//!  ───────────────┼──────────────────┼─────────────────┼────────────▶ value
//!            optimal_min        optimal_max      critical_high
//! ```
//!
//! A value sitting exactly on a threshold belongs to the zone on its left.
//! There is no hysteresis band: a reading jittering around `optimal_max`
//! will flip between `Optimal` and `High` on successive samples.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Qualitative position of a value relative to its [`Bounds`].
///
/// Ordered: `Low < Optimal < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Low,
    Optimal,
    High,
    /// Only reachable when the bounds carry a `critical_high` tier.
    Critical,
}

/// Operating band for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub optimal_min: f64,
    pub optimal_max: f64,
    /// Upper emergency tier.  Humidity bounds leave this unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical_high: Option<f64>,
}

impl Bounds {
    /// Bounds without a critical tier.
    pub const fn new(optimal_min: f64, optimal_max: f64) -> Self {
        Self {
            optimal_min,
            optimal_max,
            critical_high: None,
        }
    }

    /// Bounds with a critical tier above `optimal_max`.
    pub const fn with_critical(optimal_min: f64, optimal_max: f64, critical_high: f64) -> Self {
        Self {
            optimal_min,
            optimal_max,
            critical_high: Some(critical_high),
        }
    }

    /// Hot aerobic composting band: 55–65 °C, emergency above 70 °C.
    pub const fn default_temperature() -> Self {
        Self::with_critical(55.0, 65.0, 70.0)
    }

    /// Moisture band: 50–60 %.
    pub const fn default_humidity() -> Self {
        Self::new(50.0, 60.0)
    }

    /// Check `optimal_min < optimal_max <= critical_high`.
    pub fn validate(&self, what: &'static str) -> Result<(), ConfigError> {
        if !self.optimal_min.is_finite() || !self.optimal_max.is_finite() {
            return Err(ConfigError::ValidationFailed(what));
        }
        if self.optimal_min >= self.optimal_max {
            return Err(ConfigError::ValidationFailed(what));
        }
        if let Some(critical) = self.critical_high {
            if !critical.is_finite() || critical < self.optimal_max {
                return Err(ConfigError::ValidationFailed(what));
            }
        }
        Ok(())
    }

    /// Classify `value` against these bounds.
    pub fn classify(&self, value: f64) -> Zone {
        classify(value, self)
    }
}

/// Map `value` onto a [`Zone`].  Total: every input yields exactly one zone.
pub fn classify(value: f64, bounds: &Bounds) -> Zone {
    if value < bounds.optimal_min {
        return Zone::Low;
    }
    if value <= bounds.optimal_max {
        return Zone::Optimal;
    }
    match bounds.critical_high {
        Some(critical) if value > critical => Zone::Critical,
        _ => Zone::High,
    }
}
