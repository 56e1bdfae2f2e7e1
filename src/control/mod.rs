//! Reading-driven control path: threshold zones, then the fan/lid table.
//!
//! Both stages are pure functions, safe to call from any thread.

pub mod decision;
pub mod threshold;

pub use decision::{ActuatorDirective, DirectiveReason, FanState, LidState, decide};
pub use threshold::{Bounds, Zone, classify};

use crate::sensors::SensorReading;

/// Classify both metrics of `reading` and run the decision table.
///
/// Returns the two zones alongside the directive so callers can log them.
pub fn evaluate(
    reading: &SensorReading,
    temperature: &Bounds,
    humidity: &Bounds,
) -> (Zone, Zone, ActuatorDirective) {
    let t = classify(reading.temperature, temperature);
    let h = classify(reading.humidity, humidity);
    (t, h, decide(t, h))
}
