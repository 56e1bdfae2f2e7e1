//! The batch being composted, as far as the controller cares.
//!
//! Cycles are owned by the batch-management side.  The controller reads
//! them and never changes their status.

use core::fmt;
use core::str::FromStr;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ratio::{CnRatio, WasteInput};

/// Lifecycle of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleStatus {
    Planning,
    Active,
    Completed,
    Archived,
}

/// Unrecognised status word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown cycle status {:?}", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for CycleStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "planning" => Ok(Self::Planning),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "archived" => Ok(Self::Archived),
            _ => Err(UnknownStatus(s.to_owned())),
        }
    }
}

impl fmt::Display for CycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            Self::Planning => "planning",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Archived => "archived",
        };
        f.write_str(word)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cycle {
    pub start_date: DateTime<Utc>,
    pub projected_end_date: DateTime<Utc>,
    #[serde(default)]
    pub green_waste_kg: Option<f64>,
    #[serde(default)]
    pub brown_waste_kg: Option<f64>,
    pub status: CycleStatus,
}

impl Cycle {
    /// An active cycle with no waste masses recorded yet.
    pub fn active(start_date: DateTime<Utc>, projected_end_date: DateTime<Utc>) -> Self {
        Self {
            start_date,
            projected_end_date,
            green_waste_kg: None,
            brown_waste_kg: None,
            status: CycleStatus::Active,
        }
    }

    /// Planned length of the cycle.  May be zero or negative if the dates
    /// were entered inverted.
    pub fn planned_duration(&self) -> TimeDelta {
        self.projected_end_date - self.start_date
    }

    /// The recorded masses, if both are recorded.
    pub fn waste_input(&self) -> Option<WasteInput> {
        match (self.green_waste_kg, self.brown_waste_kg) {
            (Some(green_kg), Some(brown_kg)) => Some(WasteInput { green_kg, brown_kg }),
            _ => None,
        }
    }

    /// C:N ratio of the recorded masses, if both are recorded.
    pub fn waste_ratio(&self) -> Option<Result<CnRatio>> {
        self.waste_input().map(|input| input.ratio())
    }
}
