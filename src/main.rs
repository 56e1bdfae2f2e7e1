//! compostctl: compost cycle controller.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                    │
//! │                                                              │
//! │  stdin JSON lines   TopicPublisher   LogEventSink   Clock    │
//! │  (ReadingFeed)      (ActuatorPort)   (EventSink)    (Clock)  │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ─────────────────      │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────┐      │
//! │  │  ControlService           StirrerService           │      │
//! │  │  thresholds · decisions   duty cycle               │      │
//! │  └────────────────────────────────────────────────────┘      │
//! │                                                              │
//! │  ratio · progress (one-shot calculations)                    │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use log::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use compostctl::adapters::config_file::JsonFileConfig;
use compostctl::adapters::time::SystemClock;
use compostctl::adapters::topics::TopicPublisher;
use compostctl::app::ports::ConfigPort;
use compostctl::cycle::{Cycle, CycleStatus};
use compostctl::progress;
use compostctl::ratio::WasteInput;
use compostctl::runtime;
use compostctl::sensors::{SensorReading, payload};

/// Compost cycle controller
#[derive(Debug, Parser)]
#[command(name = "compostctl", version)]
#[command(about = "Compost cycle controller", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the control loops.
    ///
    /// Reads device messages as JSON lines on stdin and writes one
    /// `topic payload` line per actuator command on stdout.  Stops when
    /// stdin closes.
    Run {
        /// Controller configuration (JSON).  Defaults apply when absent.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Compute the C:N ratio of a green/brown mix.
    Ratio {
        /// Green (nitrogen-rich) waste, kg.
        #[arg(long)]
        green: f64,
        /// Brown (carbon-rich) waste, kg.
        #[arg(long)]
        brown: f64,
    },

    /// Estimate completion of a cycle.
    Progress {
        /// Cycle start (RFC 3339 or YYYY-MM-DD).
        #[arg(long)]
        start: String,
        /// Projected end (RFC 3339 or YYYY-MM-DD).
        #[arg(long)]
        end: String,
        /// Recent device messages, one JSON object per line.
        #[arg(long)]
        readings: Option<PathBuf>,
        /// Cycle status as recorded by batch management.
        #[arg(long, default_value = "active")]
        status: String,
        /// Evaluate at this instant instead of now.
        #[arg(long)]
        now: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("compostctl=info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run { config } => run(config),
        Command::Ratio { green, brown } => ratio(green, brown),
        Command::Progress {
            start,
            end,
            readings,
            status,
            now,
        } => progress(&start, &end, readings, &status, now.as_deref()),
    }
}

fn run(config: Option<PathBuf>) -> Result<()> {
    info!("compostctl v{}", env!("CARGO_PKG_VERSION"));

    let config = JsonFileConfig::new(config)
        .load()
        .context("loading controller config")?;

    let mut publisher = TopicPublisher::new(config.topics.clone(), io::stdout().lock());
    let summary = runtime::run(&config, &SystemClock, &mut publisher, |feed| {
        runtime::ingest_lines(io::stdin().lock(), &SystemClock, feed);
    });

    info!(
        "Published {} commands, last directive {}",
        publisher.published(),
        summary
            .last_directive
            .map_or_else(|| "none".to_owned(), |d| d.to_string())
    );
    Ok(())
}

fn ratio(green: f64, brown: f64) -> Result<()> {
    let ratio = WasteInput {
        green_kg: green,
        brown_kg: brown,
    }
    .ratio()?;
    println!("{}", serde_json::to_string_pretty(&ratio)?);
    Ok(())
}

fn progress(
    start: &str,
    end: &str,
    readings: Option<PathBuf>,
    status: &str,
    now: Option<&str>,
) -> Result<()> {
    let mut cycle = Cycle::active(parse_instant(start)?, parse_instant(end)?);
    cycle.status = status.parse::<CycleStatus>()?;
    let now = now.map_or_else(|| Ok(Utc::now()), parse_instant)?;

    let history = match readings {
        Some(path) => load_readings(&path, now)?,
        None => Vec::new(),
    };

    let estimate = progress::estimate(&cycle, &history, now);
    println!("{}", serde_json::to_string_pretty(&estimate)?);
    Ok(())
}

fn parse_instant(s: &str) -> Result<DateTime<Utc>> {
    if let Some(ts) = payload::parse_timestamp(s) {
        return Ok(ts);
    }
    let date = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid date {s:?}"))?;
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .ok_or_else(|| anyhow!("invalid date {s:?}"))
}

/// Decode a JSON-lines history file, skipping lines that fail to decode.
fn load_readings(path: &Path, received_at: DateTime<Utc>) -> Result<Vec<SensorReading>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut out = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("reading {}", path.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        match payload::decode(&line, received_at) {
            Ok(message) => out.push(message.reading),
            Err(e) => warn!("{}:{}: {e}", path.display(), index + 1),
        }
    }
    info!("Loaded {} readings from {}", out.len(), path.display());
    Ok(out)
}
