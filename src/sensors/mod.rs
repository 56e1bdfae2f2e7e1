//! Sensor readings as seen by the control path.
//!
//! Readings arrive from the ingestion edge ([`payload`]) already filtered
//! for non-finite values.  The core trusts them as-is.

pub mod payload;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One temperature/humidity sample.  Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Pile temperature (°C).
    pub temperature: f64,
    /// Relative humidity (%).
    pub humidity: f64,
    pub observed_at: DateTime<Utc>,
}

impl SensorReading {
    pub fn new(temperature: f64, humidity: f64, observed_at: DateTime<Utc>) -> Self {
        Self {
            temperature,
            humidity,
            observed_at,
        }
    }
}
