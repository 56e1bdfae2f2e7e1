//! Async control runtime: reading-driven control, timer-driven stirrer.
//!
//! Runs on the calling thread using `edge-executor` for cooperative
//! scheduling and `async-io-mini` for reactor-driven timers.  Three
//! concurrent futures:
//!
//! 1. **Control**: wakes on every reading from the ingestion channel
//! 2. **Stirrer**: ticks on a reactor timer, independent of readings
//! 3. **Dispatch**: wakes on every queued actuator command
//!
//! The ingestion side runs on a scoped thread, since reading lines from
//! a pipe blocks.

use std::io::BufRead;
use std::time::Duration;

use log::{debug, info, warn};

use crate::adapters::log_sink::LogEventSink;
use crate::app::ports::{ActuatorPort, ClockPort};
use crate::app::service::{ControlService, StirrerService};
use crate::config::ControllerConfig;
use crate::control::ActuatorDirective;
use crate::sensors::payload;
use crate::stirrer::DutyCycle;

use super::channels::{
    ChannelActuator, DispatchChannel, DispatchReceiver, DispatchSender, Ingest, ReadingChannel,
    ReadingFeed, ReadingReceiver,
};

/// Outcome of one `run`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub processed: u64,
    pub dropped: u64,
    pub last_directive: Option<ActuatorDirective>,
}

/// Outcome of feeding one line stream.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestStats {
    pub accepted: u64,
    pub rejected: u64,
}

// ── Ingestion ────────────────────────────────────────────────

/// Decode device messages, one JSON object per line, into `feed`.
///
/// Blank lines are skipped.  Lines that fail to decode are logged and
/// counted, never fatal.  A read error ends the stream.
pub fn ingest_lines<R: BufRead>(
    reader: R,
    clock: &impl ClockPort,
    feed: &ReadingFeed<'_>,
) -> IngestStats {
    let mut stats = IngestStats::default();
    for (index, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("INGEST | read failed after {} lines: {e}", index);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match payload::decode(&line, clock.now()) {
            Ok(message) => {
                debug!(
                    "INGEST | T={:.1} H={:.1} | {}",
                    message.reading.temperature, message.reading.humidity, message.reported
                );
                feed.push(message.reading);
                stats.accepted += 1;
            }
            Err(e) => {
                warn!("INGEST | line {}: {e}", index + 1);
                stats.rejected += 1;
            }
        }
    }
    info!(
        "INGEST | stream closed ({} accepted, {} rejected)",
        stats.accepted, stats.rejected
    );
    stats
}

// ── Loops ────────────────────────────────────────────────────

/// Control task: one directive per reading until the stream closes.
async fn control_loop(
    config: &ControllerConfig,
    readings: ReadingReceiver<'_>,
    dispatch: DispatchSender<'_>,
) -> RunSummary {
    let mut service = ControlService::new(config);
    let mut sink = LogEventSink::new();
    let mut hw = ChannelActuator::new(dispatch);
    service.start(&mut sink);

    while let Ingest::Reading(reading) = readings.receive().await {
        service.process(&reading, &mut hw, &mut sink);
        hw.flush().await;
    }

    RunSummary {
        processed: service.processed(),
        dropped: service.dropped(),
        last_directive: service.last_directive(),
    }
}

/// Stirrer task: ticks the duty cycle against the wall clock forever.
async fn stirrer_loop(
    duty: DutyCycle,
    tick: Duration,
    clock: &impl ClockPort,
    dispatch: DispatchSender<'_>,
) {
    let mut service = StirrerService::new(duty, clock.now());
    let mut sink = LogEventSink::new();
    let mut hw = ChannelActuator::new(dispatch);
    loop {
        async_io_mini::Timer::after(tick).await;
        let now = clock.now();
        if service.tick(now, &mut hw, &mut sink).is_some() {
            debug!("STIR | next edge in {}s", service.remaining(now).num_seconds());
        }
        hw.flush().await;
    }
}

/// Dispatch task: wakes as soon as either loop queues a command.
async fn dispatch_loop(commands: DispatchReceiver<'_>, publisher: &mut impl ActuatorPort) {
    loop {
        commands.receive().await.apply(publisher);
    }
}

// ── Entry point ──────────────────────────────────────────────

/// Run the controller until `ingest` returns.
///
/// `ingest` runs on its own thread and pushes readings through the
/// [`ReadingFeed`] it is given.  Every command either loop issued is
/// handed to `publisher` before this returns.  A panic on the ingestion
/// thread is re-raised here once the control loop has drained.
pub fn run<C, P, F>(config: &ControllerConfig, clock: &C, publisher: &mut P, ingest: F) -> RunSummary
where
    C: ClockPort,
    P: ActuatorPort,
    F: FnOnce(&ReadingFeed<'_>) + Send,
{
    let readings: ReadingChannel = ReadingChannel::new();
    let dispatch: DispatchChannel = DispatchChannel::new();
    let tick = Duration::from_millis(u64::from(config.stirrer_tick_ms));

    std::thread::scope(|scope| {
        let tx = readings.sender();
        let feeder = scope.spawn(move || {
            let feed = ReadingFeed::new(tx);
            ingest(&feed);
        });

        let executor: edge_executor::LocalExecutor<'_, 8> = edge_executor::LocalExecutor::new();
        executor
            .spawn(stirrer_loop(config.stirrer, tick, clock, dispatch.sender()))
            .detach();
        executor
            .spawn(dispatch_loop(dispatch.receiver(), publisher))
            .detach();

        info!(
            "RUN | control loop started (sampling every {} ms, stirrer tick {} ms)",
            config.sample_interval_ms, config.stirrer_tick_ms
        );

        let summary = futures_lite::future::block_on(executor.run(async {
            let summary = control_loop(config, readings.receiver(), dispatch.sender()).await;
            // Let the dispatcher drain before the executor goes away.
            while !dispatch.is_empty() {
                futures_lite::future::yield_now().await;
            }
            summary
        }));

        if let Err(panic) = feeder.join() {
            warn!("RUN | ingestion thread panicked");
            std::panic::resume_unwind(panic);
        }
        info!(
            "RUN | stopped ({} processed, {} dropped)",
            summary.processed, summary.dropped
        );
        summary
    })
}
