//! Inter-task channels for the `run` loop.
//!
//! Uses `embassy-sync` bounded MPMC channels to bridge the blocking
//! ingestion thread with the async control and stirrer loops, and those
//! loops with the dispatcher.
//!
//! ```text
//! ┌──────────────┐  Ingest   ┌──────────────┐  ActuatorCommand  ┌────────────┐
//! │ stdin thread │─────────▶│ control loop │─────────────────▶│ dispatcher │
//! │  (blocking)  │           └──────────────┘        ▲          └────────────┘
//! └──────────────┘           ┌──────────────┐        │
//!                            │ stirrer loop │────────┘
//!                            └──────────────┘
//! ```
//!
//! The channels are owned by one `run` call rather than being statics,
//! so several runs can share a process.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use log::warn;

use crate::adapters::topics::ActuatorCommand;
use crate::app::ports::ActuatorPort;
use crate::control::{FanState, LidState};
use crate::sensors::SensorReading;
use crate::stirrer::StirrerCommand;

/// Channel depth for inbound readings.
pub const READING_DEPTH: usize = 16;

/// Channel depth for outbound actuator commands.
pub const DISPATCH_DEPTH: usize = 32;

/// Commands a single service call can produce (fan + lid, or one stirrer edge).
const PENDING_DEPTH: usize = 4;

/// Inbound message for the control loop.
pub enum Ingest {
    Reading(SensorReading),
    /// The reading source is exhausted.  The control loop exits.
    Closed,
}

pub type ReadingChannel = Channel<CriticalSectionRawMutex, Ingest, READING_DEPTH>;
pub type ReadingSender<'a> = Sender<'a, CriticalSectionRawMutex, Ingest, READING_DEPTH>;
pub type ReadingReceiver<'a> = Receiver<'a, CriticalSectionRawMutex, Ingest, READING_DEPTH>;

pub type DispatchChannel = Channel<CriticalSectionRawMutex, ActuatorCommand, DISPATCH_DEPTH>;
pub type DispatchSender<'a> = Sender<'a, CriticalSectionRawMutex, ActuatorCommand, DISPATCH_DEPTH>;
pub type DispatchReceiver<'a> =
    Receiver<'a, CriticalSectionRawMutex, ActuatorCommand, DISPATCH_DEPTH>;

// ── Blocking producer side ───────────────────────────────────

/// Handle the ingestion thread pushes readings through.
///
/// Pushing blocks while the channel is full.  Dropping the feed, on
/// success or while unwinding, closes the stream so the control loop
/// never waits on a dead producer.
pub struct ReadingFeed<'a> {
    tx: ReadingSender<'a>,
}

impl<'a> ReadingFeed<'a> {
    pub(crate) fn new(tx: ReadingSender<'a>) -> Self {
        Self { tx }
    }

    pub fn push(&self, reading: SensorReading) {
        futures_lite::future::block_on(self.tx.send(Ingest::Reading(reading)));
    }
}

impl Drop for ReadingFeed<'_> {
    fn drop(&mut self) {
        futures_lite::future::block_on(self.tx.send(Ingest::Closed));
    }
}

// ── Async producer side ──────────────────────────────────────

/// [`ActuatorPort`] that queues commands for the dispatcher.
///
/// Port calls are synchronous, so commands collect in a small buffer
/// and [`flush`](Self::flush) forwards them with backpressure.
pub struct ChannelActuator<'a> {
    tx: DispatchSender<'a>,
    pending: heapless::Vec<ActuatorCommand, PENDING_DEPTH>,
}

impl<'a> ChannelActuator<'a> {
    pub fn new(tx: DispatchSender<'a>) -> Self {
        Self {
            tx,
            pending: heapless::Vec::new(),
        }
    }

    fn queue(&mut self, command: ActuatorCommand) {
        if self.pending.push(command).is_err() {
            warn!("DISPATCH | pending buffer full, dropping {:?}", command);
        }
    }

    /// Hand every queued command to the dispatcher, in order.
    pub async fn flush(&mut self) {
        for &command in &self.pending {
            self.tx.send(command).await;
        }
        self.pending.clear();
    }
}

impl ActuatorPort for ChannelActuator<'_> {
    fn set_fan(&mut self, state: FanState) {
        self.queue(ActuatorCommand::Fan(state));
    }

    fn set_lid(&mut self, state: LidState) {
        self.queue(ActuatorCommand::Lid(state));
    }

    fn start_stirrer(&mut self) {
        self.queue(ActuatorCommand::Stirrer(StirrerCommand::Start));
    }

    fn stop_stirrer(&mut self) {
        self.queue(ActuatorCommand::Stirrer(StirrerCommand::Stop));
    }
}
