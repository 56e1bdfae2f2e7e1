//! Controller configuration.
//!
//! All tunable parameters for the compost controller.  Loaded once at
//! process start through a [`ConfigPort`](crate::app::ports::ConfigPort)
//! and treated as immutable afterwards.

use serde::{Deserialize, Serialize};

use crate::control::Bounds;
use crate::error::ConfigError;
use crate::stirrer::DutyCycle;

/// MQTT-style command topics the dispatcher publishes on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandTopics {
    pub fan: String,
    pub lid: String,
    pub stirrer: String,
}

impl Default for CommandTopics {
    fn default() -> Self {
        Self {
            fan: "compost/cmd/fan".into(),
            lid: "compost/cmd/lid".into(),
            stirrer: "compost/cmd/stirrer".into(),
        }
    }
}

/// Core controller configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    // --- Thresholds ---
    /// Pile temperature band (°C).  Carries the critical tier.
    pub temperature: Bounds,
    /// Relative humidity band (%).  No critical tier.
    pub humidity: Bounds,

    // --- Stirrer ---
    pub stirrer: DutyCycle,

    // --- Timing ---
    /// Expected sensor sampling cadence (milliseconds).
    pub sample_interval_ms: u32,
    /// Stirrer loop tick interval (milliseconds).
    pub stirrer_tick_ms: u32,

    // --- Dispatch ---
    pub topics: CommandTopics,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            // Thresholds
            temperature: Bounds::default_temperature(),
            humidity: Bounds::default_humidity(),

            // Stirrer: 5 min on, 30 min off
            stirrer: DutyCycle::default(),

            // Timing
            sample_interval_ms: 5_000,
            stirrer_tick_ms: 5_000,

            topics: CommandTopics::default(),
        }
    }
}

impl ControllerConfig {
    /// Range-check every field.  Invalid values are rejected, not clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.temperature.validate("temperature bounds out of order")?;
        self.humidity.validate("humidity bounds out of order")?;
        if self.humidity.critical_high.is_some() {
            return Err(ConfigError::ValidationFailed(
                "humidity has no critical tier",
            ));
        }
        self.stirrer.validate()?;
        if self.sample_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("sample_interval_ms must be > 0"));
        }
        if self.stirrer_tick_ms == 0 {
            return Err(ConfigError::ValidationFailed("stirrer_tick_ms must be > 0"));
        }
        if u64::from(self.stirrer_tick_ms) >= u64::from(self.stirrer.shortest_phase_secs()) * 1000 {
            return Err(ConfigError::ValidationFailed(
                "stirrer_tick_ms must be finer than the shortest stirrer phase",
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON document.  Absent fields take defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text).map_err(|_| ConfigError::Corrupted)?;
        config.validate()?;
        Ok(config)
    }
}
