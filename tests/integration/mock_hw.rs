//! Mock adapters for integration tests.
//!
//! Records every actuator call and every emitted event so tests can
//! assert on the full history without a broker or a device.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use compostctl::app::events::AppEvent;
use compostctl::app::ports::{ActuatorPort, EventSink};
use compostctl::control::{FanState, LidState};

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    Fan(FanState),
    Lid(LidState),
    StirrerStart,
    StirrerStop,
}

// ── MockHardware ──────────────────────────────────────────────

#[derive(Default)]
pub struct MockHardware {
    pub calls: Vec<ActuatorCall>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_fan(&self) -> Option<FanState> {
        self.calls.iter().rev().find_map(|c| match c {
            ActuatorCall::Fan(state) => Some(*state),
            _ => None,
        })
    }

    pub fn last_lid(&self) -> Option<LidState> {
        self.calls.iter().rev().find_map(|c| match c {
            ActuatorCall::Lid(state) => Some(*state),
            _ => None,
        })
    }

    pub fn stirrer_calls(&self) -> Vec<ActuatorCall> {
        self.calls
            .iter()
            .copied()
            .filter(|c| matches!(c, ActuatorCall::StirrerStart | ActuatorCall::StirrerStop))
            .collect()
    }
}

impl ActuatorPort for MockHardware {
    fn set_fan(&mut self, state: FanState) {
        self.calls.push(ActuatorCall::Fan(state));
    }

    fn set_lid(&mut self, state: LidState) {
        self.calls.push(ActuatorCall::Lid(state));
    }

    fn start_stirrer(&mut self) {
        self.calls.push(ActuatorCall::StirrerStart);
    }

    fn stop_stirrer(&mut self) {
        self.calls.push(ActuatorCall::StirrerStop);
    }
}

// ── RecordingSink ────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Time helpers ─────────────────────────────────────────────

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap()
}

#[allow(dead_code)]
pub fn minutes(m: i64) -> DateTime<Utc> {
    t0() + TimeDelta::minutes(m)
}
