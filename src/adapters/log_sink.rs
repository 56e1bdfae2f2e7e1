//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade.  A status publisher or dashboard feed would
//! implement the same trait.

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started {
                temperature,
                humidity,
            } => {
                info!(
                    "START | temperature={:?} humidity={:?}",
                    temperature, humidity
                );
            }
            AppEvent::DirectiveIssued {
                observed_at,
                temperature_zone,
                humidity_zone,
                directive,
            } => {
                debug!(
                    "READ  | at={} | T={:?} H={:?} | {}",
                    observed_at, temperature_zone, humidity_zone, directive
                );
            }
            AppEvent::DirectiveChanged { from, to } => match from {
                Some(prev) => info!("DIRECTIVE | {} -> {}", prev, to),
                None => info!("DIRECTIVE | initial {}", to),
            },
            AppEvent::StirrerTransition { at, command } => {
                info!("STIR  | {:?} at {}", command, at);
            }
            AppEvent::ReadingOutOfOrder {
                observed_at,
                last_observed_at,
            } => {
                warn!(
                    "READ  | out of order: {} precedes {}",
                    observed_at, last_observed_at
                );
            }
        }
    }
}
