//! Clock adapters.
//!
//! - [`SystemClock`] reads the host wall clock, for the live stirrer loop.
//! - [`FixedClock`] always answers the same instant, for replays and tests.

use chrono::{DateTime, Utc};

use crate::app::ports::ClockPort;

/// Host wall clock (UTC).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stopped at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
