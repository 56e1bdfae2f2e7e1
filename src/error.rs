//! Unified error types for the compost controller.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! edge adapters' error handling uniform.  All variants are `Copy` so they
//! can be passed through the control service and the runtime loops
//! without allocation.
//!
//! The core itself is total apart from one validation failure: the ratio
//! calculator rejects non-positive masses with [`InputError`].

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Error {
    /// Caller supplied input outside the domain of a calculation.
    InvalidInput(InputError),
    /// An ingestion payload could not be turned into a reading.
    Payload(PayloadError),
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(e) => write!(f, "invalid input: {e}"),
            Self::Payload(e) => write!(f, "payload: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Input errors
// ---------------------------------------------------------------------------

/// Raised by the ratio calculator.  Never retried: the caller has to
/// supply corrected masses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputError {
    /// Green waste mass was zero, negative or not a number.
    NonPositiveGreen(f64),
    /// Brown waste mass was zero, negative or not a number.
    NonPositiveBrown(f64),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveGreen(kg) => {
                write!(f, "green waste must be positive (got {kg} kg)")
            }
            Self::NonPositiveBrown(kg) => {
                write!(f, "brown waste must be positive (got {kg} kg)")
            }
        }
    }
}

impl std::error::Error for InputError {}

impl From<InputError> for Error {
    fn from(e: InputError) -> Self {
        Self::InvalidInput(e)
    }
}

// ---------------------------------------------------------------------------
// Payload errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadError {
    /// Not valid JSON, or not a JSON object.
    Malformed,
    /// The `temperature` field is missing or not a number.
    MissingTemperature,
    /// The `humidity` field is missing or not a number.
    MissingHumidity,
    /// A metric was NaN or infinite.
    NonFinite,
}

impl fmt::Display for PayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "malformed JSON message"),
            Self::MissingTemperature => write!(f, "missing temperature"),
            Self::MissingHumidity => write!(f, "missing humidity"),
            Self::NonFinite => write!(f, "non-finite sensor value"),
        }
    }
}

impl std::error::Error for PayloadError {}

impl From<PayloadError> for Error {
    fn from(e: PayloadError) -> Self {
        Self::Payload(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Stored config could not be read.
    Io,
    /// Stored config failed deserialization.
    Corrupted,
    /// A field failed range validation.
    /// The `&'static str` names which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io => write!(f, "I/O error"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
