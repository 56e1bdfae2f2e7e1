//! Compost cycle controller library.
//!
//! Exposes the pure control core (ratio, thresholds, fan/lid decisions,
//! stirrer duty cycle, completion estimate) for the `compostctl` binary
//! and for integration testing.  Transport-facing code lives behind the
//! port traits in [`app::ports`].

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod control;
pub mod cycle;
pub mod progress;
pub mod ratio;
pub mod sensors;
pub mod stirrer;

pub mod adapters;
pub mod runtime;

mod error;

pub use error::{ConfigError, Error, InputError, PayloadError, Result};
