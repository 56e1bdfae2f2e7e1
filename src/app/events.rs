//! Outbound application events.
//!
//! The services emit these through the [`EventSink`](super::ports::EventSink)
//! port.  Adapters on the other side decide whether they are logged or
//! published as status.

use chrono::{DateTime, Utc};

use crate::control::{ActuatorDirective, Bounds, Zone};
use crate::stirrer::StirrerCommand;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The control service is ready (carries the active bounds).
    Started { temperature: Bounds, humidity: Bounds },

    /// A reading was evaluated and a directive dispatched.
    DirectiveIssued {
        observed_at: DateTime<Utc>,
        temperature_zone: Zone,
        humidity_zone: Zone,
        directive: ActuatorDirective,
    },

    /// The fan/lid outputs differ from the previous directive.
    /// `from` is `None` for the first directive after start.
    DirectiveChanged {
        from: Option<ActuatorDirective>,
        to: ActuatorDirective,
    },

    /// The stirrer duty cycle crossed a phase boundary.
    StirrerTransition {
        at: DateTime<Utc>,
        command: StirrerCommand,
    },

    /// A reading older than its predecessor was dropped.
    ReadingOutOfOrder {
        observed_at: DateTime<Utc>,
        last_observed_at: DateTime<Utc>,
    },
}
