//! Fan/lid decision table.
//!
//! Temperature is strictly dominant.  Humidity only gets a vote while the
//! temperature sits in its optimal band:
//!
//! ```text
//!  temp zone   │ fan │ lid    │ reason
//!  ────────────┼─────┼────────┼──────────────────────
//!  Low         │ Off │ Closed │ TemperatureLow
//!  Optimal     │  humidity rule below
//!  High        │ On  │ Open   │ TemperatureHigh
//!  Critical    │ On  │ Open   │ TemperatureCritical
//!
//!  humidity    │ fan │ lid    │ reason
//!  ────────────┼─────┼────────┼──────────────────────
//!  Low         │ Off │ Closed │ HumidityLow
//!  Optimal     │ Off │ Closed │ HumidityOptimal
//!  High        │ On  │ Open   │ HumidityHigh
//! ```
//!
//! The directive is level-triggered: it is recomputed from scratch on
//! every reading and carries no memory of the previous one.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::threshold::Zone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FanState {
    On,
    Off,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LidState {
    Open,
    Closed,
}

/// Which row of the decision table produced a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectiveReason {
    TemperatureLow,
    TemperatureHigh,
    TemperatureCritical,
    HumidityLow,
    HumidityOptimal,
    HumidityHigh,
}

impl DirectiveReason {
    /// Short operator-facing description.
    pub fn message(self) -> &'static str {
        match self {
            Self::TemperatureLow => "below optimal temperature, retaining heat",
            Self::TemperatureHigh => "above optimal temperature, cooling",
            Self::TemperatureCritical => "critical temperature, emergency cooling",
            Self::HumidityLow => "below optimal humidity, retaining moisture",
            Self::HumidityOptimal => "temperature and humidity optimal",
            Self::HumidityHigh => "above optimal humidity, dehumidifying",
        }
    }
}

/// Recommended fan and lid positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActuatorDirective {
    pub fan: FanState,
    pub lid: LidState,
    pub reason: DirectiveReason,
}

impl ActuatorDirective {
    const fn retain(reason: DirectiveReason) -> Self {
        Self {
            fan: FanState::Off,
            lid: LidState::Closed,
            reason,
        }
    }

    const fn vent(reason: DirectiveReason) -> Self {
        Self {
            fan: FanState::On,
            lid: LidState::Open,
            reason,
        }
    }

    /// True when the physical outputs match, whatever the reason.
    pub fn same_outputs(&self, other: &Self) -> bool {
        self.fan == other.fan && self.lid == other.lid
    }
}

impl fmt::Display for ActuatorDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fan={:?} lid={:?} ({:?})", self.fan, self.lid, self.reason)
    }
}

/// Combine the two zones into one directive.
///
/// Humidity bounds never produce [`Zone::Critical`]; if one is passed
/// anyway it is handled like `High`.
pub fn decide(temperature: Zone, humidity: Zone) -> ActuatorDirective {
    use DirectiveReason as R;

    match temperature {
        Zone::Low => ActuatorDirective::retain(R::TemperatureLow),
        Zone::High => ActuatorDirective::vent(R::TemperatureHigh),
        // Same outputs as High.  The reason is the only distinction.
        Zone::Critical => ActuatorDirective::vent(R::TemperatureCritical),
        Zone::Optimal => match humidity {
            Zone::Low => ActuatorDirective::retain(R::HumidityLow),
            Zone::Optimal => ActuatorDirective::retain(R::HumidityOptimal),
            Zone::High | Zone::Critical => ActuatorDirective::vent(R::HumidityHigh),
        },
    }
}
