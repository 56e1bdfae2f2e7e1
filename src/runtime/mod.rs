//! Live control runtime behind `compostctl run`.

pub mod channels;
pub mod tasks;

pub use channels::ReadingFeed;
pub use tasks::{IngestStats, RunSummary, ingest_lines, run};
