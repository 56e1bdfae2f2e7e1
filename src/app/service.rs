//! Application services: the hexagonal core.
//!
//! Two services, one per periodic loop, sharing nothing mutable:
//!
//! ```text
//!  SensorReading ──▶ ┌────────────────────┐ ──▶ EventSink
//!                    │   ControlService   │
//!  ActuatorPort  ◀── │ classify · decide  │
//!                    └────────────────────┘
//!
//!  ClockPort     ──▶ ┌────────────────────┐ ──▶ EventSink
//!                    │   StirrerService   │
//!  ActuatorPort  ◀── │ owns StirrerState  │
//!                    └────────────────────┘
//! ```
//!
//! All I/O flows through port traits injected at call sites, so both
//! services are testable with mock adapters.

use chrono::{DateTime, TimeDelta, Utc};
use log::{debug, info, warn};

use crate::config::ControllerConfig;
use crate::control::{self, ActuatorDirective, Bounds};
use crate::sensors::SensorReading;
use crate::stirrer::{DutyCycle, StirrerCommand, StirrerScheduler, StirrerState};

use super::events::AppEvent;
use super::ports::{ActuatorPort, EventSink};

// ───────────────────────────────────────────────────────────────
// ControlService
// ───────────────────────────────────────────────────────────────

/// Reading-driven fan/lid control.
pub struct ControlService {
    temperature: Bounds,
    humidity: Bounds,
    last_directive: Option<ActuatorDirective>,
    last_observed_at: Option<DateTime<Utc>>,
    processed: u64,
    dropped: u64,
}

impl ControlService {
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            temperature: config.temperature,
            humidity: config.humidity,
            last_directive: None,
            last_observed_at: None,
            processed: 0,
            dropped: 0,
        }
    }

    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started {
            temperature: self.temperature,
            humidity: self.humidity,
        });
        info!(
            "CTRL | started, temperature {:.1}..{:.1} (critical {:?}), humidity {:.1}..{:.1}",
            self.temperature.optimal_min,
            self.temperature.optimal_max,
            self.temperature.critical_high,
            self.humidity.optimal_min,
            self.humidity.optimal_max,
        );
    }

    /// Run one reading through classify → decide → dispatch.
    ///
    /// Every accepted reading dispatches its directive, even when nothing
    /// changed.  A reading older than the previous one is dropped and
    /// `None` returned.
    pub fn process(
        &mut self,
        reading: &SensorReading,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) -> Option<ActuatorDirective> {
        if let Some(last) = self.last_observed_at {
            if reading.observed_at < last {
                self.dropped += 1;
                warn!(
                    "CTRL | dropping out-of-order reading at {} (last {})",
                    reading.observed_at, last
                );
                sink.emit(&AppEvent::ReadingOutOfOrder {
                    observed_at: reading.observed_at,
                    last_observed_at: last,
                });
                return None;
            }
        }
        self.last_observed_at = Some(reading.observed_at);
        self.processed += 1;

        let (t_zone, h_zone, directive) =
            control::evaluate(reading, &self.temperature, &self.humidity);

        hw.set_fan(directive.fan);
        hw.set_lid(directive.lid);

        debug!(
            "CTRL | T={:.1}\u{00b0}C ({:?}) H={:.1}% ({:?}) -> {}",
            reading.temperature, t_zone, reading.humidity, h_zone, directive
        );
        sink.emit(&AppEvent::DirectiveIssued {
            observed_at: reading.observed_at,
            temperature_zone: t_zone,
            humidity_zone: h_zone,
            directive,
        });

        let changed = self
            .last_directive
            .is_none_or(|prev| !prev.same_outputs(&directive));
        if changed {
            info!("CTRL | {} : {}", directive, directive.reason.message());
            sink.emit(&AppEvent::DirectiveChanged {
                from: self.last_directive,
                to: directive,
            });
        }
        self.last_directive = Some(directive);

        Some(directive)
    }

    /// Most recent directive, if any reading has been processed.
    pub fn last_directive(&self) -> Option<ActuatorDirective> {
        self.last_directive
    }

    /// Readings accepted since start.
    pub fn processed(&self) -> u64 {
        self.processed
    }

    /// Readings dropped for arriving out of order.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

// ───────────────────────────────────────────────────────────────
// StirrerService
// ───────────────────────────────────────────────────────────────

/// Wall-clock-driven stirrer duty cycle.  Sole owner of [`StirrerState`].
pub struct StirrerService {
    scheduler: StirrerScheduler,
    state: StirrerState,
}

impl StirrerService {
    /// Start idle, with the idle phase beginning at `now`.
    pub fn new(duty: DutyCycle, now: DateTime<Utc>) -> Self {
        Self::resume(duty, StirrerState::idle_since(now))
    }

    /// Continue from a known state.
    pub fn resume(duty: DutyCycle, state: StirrerState) -> Self {
        Self {
            scheduler: StirrerScheduler::new(duty),
            state,
        }
    }

    /// Advance to `now`, commanding the stirrer on a phase boundary.
    pub fn tick(
        &mut self,
        now: DateTime<Utc>,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) -> Option<StirrerCommand> {
        let (next, command) = self.scheduler.tick(now, self.state);
        self.state = next;

        let command = command?;
        match command {
            StirrerCommand::Start => hw.start_stirrer(),
            StirrerCommand::Stop => hw.stop_stirrer(),
        }
        sink.emit(&AppEvent::StirrerTransition { at: now, command });
        Some(command)
    }

    pub fn state(&self) -> StirrerState {
        self.state
    }

    /// Time until the next phase boundary.
    pub fn remaining(&self, now: DateTime<Utc>) -> TimeDelta {
        self.scheduler.remaining(now, &self.state)
    }
}
