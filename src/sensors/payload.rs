//! Ingestion edge: device JSON message → [`SensorReading`].
//!
//! Expected shape (everything but the two metrics optional):
//!
//! ```json
//! {"temperature": 58.2, "humidity": 54.0, "timestamp": "2025-03-01T08:00:05Z",
//!  "relay": "ON", "lid": "CLOSED", "stirrer": "OFF"}
//! ```
//!
//! The device calls its fan output `relay`.  Status words are matched
//! case-insensitively and converted to closed enums here, once, so nothing
//! downstream compares strings.

use core::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use log::{debug, warn};
use serde::Deserialize;

use super::SensorReading;
use crate::control::{FanState, LidState};
use crate::error::PayloadError;

#[derive(Debug, Deserialize)]
struct RawMessage {
    temperature: Option<f64>,
    humidity: Option<f64>,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    relay: Option<String>,
    #[serde(default)]
    lid: Option<String>,
    #[serde(default)]
    stirrer: Option<String>,
}

/// Actuator positions the device says it is in.  Informational only: the
/// control path never feeds these back into its decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportedStates {
    pub fan: Option<FanState>,
    pub lid: Option<LidState>,
    pub stirrer_running: Option<bool>,
}

impl fmt::Display for ReportedStates {
    /// `Fan=ON, Lid=CLOSED, Stirrer=OFF`, with `?` for anything not reported.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fan = match self.fan {
            Some(FanState::On) => "ON",
            Some(FanState::Off) => "OFF",
            None => "?",
        };
        let lid = match self.lid {
            Some(LidState::Open) => "OPEN",
            Some(LidState::Closed) => "CLOSED",
            None => "?",
        };
        let stirrer = match self.stirrer_running {
            Some(true) => "ON",
            Some(false) => "OFF",
            None => "?",
        };
        write!(f, "Fan={fan}, Lid={lid}, Stirrer={stirrer}")
    }
}

/// A decoded device message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceMessage {
    pub reading: SensorReading,
    pub reported: ReportedStates,
}

/// Decode one message.  `received_at` stands in for a missing or
/// unparseable device timestamp.
pub fn decode(message: &str, received_at: DateTime<Utc>) -> Result<DeviceMessage, PayloadError> {
    let raw: RawMessage = serde_json::from_str(message).map_err(|e| {
        debug!("INGEST | JSON decode error: {e}");
        PayloadError::Malformed
    })?;

    let temperature = raw.temperature.ok_or(PayloadError::MissingTemperature)?;
    let humidity = raw.humidity.ok_or(PayloadError::MissingHumidity)?;
    if !temperature.is_finite() || !humidity.is_finite() {
        return Err(PayloadError::NonFinite);
    }

    let observed_at = match raw.timestamp.as_deref() {
        Some(ts) if !ts.is_empty() => parse_timestamp(ts).unwrap_or_else(|| {
            warn!("INGEST | invalid timestamp {ts:?}, using receive time");
            received_at
        }),
        _ => received_at,
    };

    let reported = ReportedStates {
        fan: raw.relay.as_deref().and_then(parse_fan),
        lid: raw.lid.as_deref().and_then(parse_lid),
        stirrer_running: raw.stirrer.as_deref().and_then(parse_on_off),
    };

    Ok(DeviceMessage {
        reading: SensorReading::new(temperature, humidity, observed_at),
        reported,
    })
}

/// RFC 3339 (`Z` or offset), or a naive ISO timestamp taken as UTC.
pub fn parse_timestamp(ts: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

fn parse_on_off(word: &str) -> Option<bool> {
    match word.trim().to_ascii_uppercase().as_str() {
        "ON" => Some(true),
        "OFF" => Some(false),
        _ => None,
    }
}

fn parse_fan(word: &str) -> Option<FanState> {
    parse_on_off(word).map(|on| if on { FanState::On } else { FanState::Off })
}

fn parse_lid(word: &str) -> Option<LidState> {
    match word.trim().to_ascii_uppercase().as_str() {
        "OPEN" => Some(LidState::Open),
        "CLOSED" | "CLOSE" => Some(LidState::Closed),
        _ => None,
    }
}
