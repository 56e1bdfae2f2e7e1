//! Stirrer duty-cycle scheduler.
//!
//! Runs independently of the fan/lid control path.  The stirrer alternates
//! between a short run phase and a long idle phase, whatever the pile
//! temperature or humidity:
//!
//! ```text
//!   running ──[run elapsed]──▶ idle ──[idle elapsed]──▶ running ──▶ …
//!      5 min                    30 min
//! ```
//!
//! The scheduler is edge-triggered: a command is produced only on a
//! transition, never repeated while the phase holds.  It owns no state of
//! its own.  [`StirrerState`] is handed in and handed back on every tick,
//! so whoever drives the loop owns it outright.
//!
//! `now` is always injected.  Nothing here reads a clock.

use chrono::{DateTime, TimeDelta, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Phase lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyCycle {
    /// How long the stirrer runs once started (seconds).
    pub run_secs: u32,
    /// How long the stirrer rests between runs (seconds).
    pub idle_secs: u32,
}

impl Default for DutyCycle {
    fn default() -> Self {
        Self {
            run_secs: 5 * 60,
            idle_secs: 30 * 60,
        }
    }
}

impl DutyCycle {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.run_secs == 0 {
            return Err(ConfigError::ValidationFailed("stirrer.run_secs must be > 0"));
        }
        if self.idle_secs == 0 {
            return Err(ConfigError::ValidationFailed("stirrer.idle_secs must be > 0"));
        }
        Ok(())
    }

    /// The shorter of the two phases.  Ticks must come faster than this.
    pub fn shortest_phase_secs(&self) -> u32 {
        self.run_secs.min(self.idle_secs)
    }
}

/// Stirrer phase plus the moment it was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StirrerState {
    pub running: bool,
    pub last_transition_at: DateTime<Utc>,
}

impl StirrerState {
    /// Idle, with the idle phase considered to have begun at `at`.
    pub fn idle_since(at: DateTime<Utc>) -> Self {
        Self {
            running: false,
            last_transition_at: at,
        }
    }
}

/// Edge command for the stirrer motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StirrerCommand {
    Start,
    Stop,
}

/// Fixed duty-cycle timer.
#[derive(Debug, Clone, Copy)]
pub struct StirrerScheduler {
    run: TimeDelta,
    idle: TimeDelta,
}

impl Default for StirrerScheduler {
    fn default() -> Self {
        Self::new(DutyCycle::default())
    }
}

impl StirrerScheduler {
    pub fn new(duty: DutyCycle) -> Self {
        Self {
            run: TimeDelta::seconds(i64::from(duty.run_secs)),
            idle: TimeDelta::seconds(i64::from(duty.idle_secs)),
        }
    }

    /// Advance the duty cycle to `now`.
    ///
    /// Returns the (possibly unchanged) state and the command to send, if
    /// a phase boundary was crossed.  A `now` earlier than the last
    /// transition counts as zero elapsed time.
    pub fn tick(
        &self,
        now: DateTime<Utc>,
        state: StirrerState,
    ) -> (StirrerState, Option<StirrerCommand>) {
        let elapsed = now - state.last_transition_at;

        if state.running && elapsed >= self.run {
            info!("STIR | run phase over after {}s, stopping", elapsed.num_seconds());
            let next = StirrerState {
                running: false,
                last_transition_at: now,
            };
            return (next, Some(StirrerCommand::Stop));
        }

        if !state.running && elapsed >= self.idle {
            info!("STIR | idle phase over after {}s, starting", elapsed.num_seconds());
            let next = StirrerState {
                running: true,
                last_transition_at: now,
            };
            return (next, Some(StirrerCommand::Start));
        }

        (state, None)
    }

    /// Time left in the current phase, never negative.
    pub fn remaining(&self, now: DateTime<Utc>, state: &StirrerState) -> TimeDelta {
        let phase = if state.running { self.run } else { self.idle };
        let left = phase - (now - state.last_transition_at);
        left.max(TimeDelta::zero())
    }
}
