//! Port traits: the hexagonal boundary between the control core and the
//! collaborators around it.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControlService / StirrerService
//! ```
//!
//! Driven adapters (actuator dispatch, event sinks, clocks, config
//! storage) implement these traits.  The services consume them via
//! generics, so the core never touches a transport directly.

use chrono::{DateTime, Utc};

use crate::config::ControllerConfig;
use crate::control::{FanState, LidState};
use crate::error::ConfigError;

// ───────────────────────────────────────────────────────────────
// Actuator port (domain → dispatch collaborator)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the services call this to command actuators.
///
/// Fan and lid commands are level-triggered and repeated on every
/// reading, so implementations must tolerate redundant calls.  Stirrer
/// commands are edge-triggered and only sent on a transition.
pub trait ActuatorPort {
    fn set_fan(&mut self, state: FanState);

    fn set_lid(&mut self, state: LidState);

    fn start_stirrer(&mut self);

    fn stop_stirrer(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The services emit structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Wall-clock source for the stirrer loop.  The scheduler itself never
/// reads time; the loop asks this port and passes the value in.
pub trait ClockPort {
    fn now(&self) -> DateTime<Utc>;
}

// ───────────────────────────────────────────────────────────────
// Configuration port
// ───────────────────────────────────────────────────────────────

/// Loads controller configuration once at startup.
///
/// Implementations MUST validate before returning.  Invalid ranges are
/// rejected with [`ConfigError::ValidationFailed`], not silently clamped.
pub trait ConfigPort {
    /// Returns [`ControllerConfig::default()`] if no stored config exists.
    fn load(&self) -> Result<ControllerConfig, ConfigError>;
}
