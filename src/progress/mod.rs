//! Completion estimate for the active cycle.
//!
//! Two signals are blended:
//!
//! - **time**: elapsed fraction of the planned duration, a hard constraint;
//! - **curve**: the temperature-curve heuristic from [`curve`], noisy.
//!
//! ```text
//!  combined = 0.6 · time + 0.4 · curve          (both in percent)
//!
//!  combined ≥ 100 or cycle completed ──▶ Complete
//!  combined ≥  90                    ──▶ Completing
//!  otherwise                         ──▶ Active
//! ```
//!
//! Nothing here fails.  Missing history degrades to pure time-based
//! progress and an unknown duration yields no days-remaining figure.

pub mod curve;

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::cycle::{Cycle, CycleStatus};
use crate::sensors::SensorReading;

/// Weight of elapsed time in the blend.
pub const TIME_WEIGHT: f64 = 0.6;
/// Weight of the temperature-curve heuristic in the blend.
pub const CURVE_WEIGHT: f64 = 0.4;
/// Combined percentage at which a cycle counts as completing.
pub const COMPLETING_PCT: f64 = 90.0;

const SECS_PER_DAY: f64 = 86_400.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    Active,
    Completing,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompletionEstimate {
    pub time_progress_pct: f64,
    /// The heuristic term that went into the blend.
    pub completion_pct: f64,
    pub combined_progress_pct: f64,
    pub qualitative_status: ProgressStatus,
    pub estimated_days_remaining: Option<u32>,
    /// Curve details behind `completion_pct`, when there was enough history.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curve: Option<curve::CurveAnalysis>,
}

/// Elapsed share of the planned duration, in `[0, 100]`.
///
/// A non-positive planned duration counts as fully elapsed; a start date
/// in the future counts as zero.
pub fn time_progress(cycle: &Cycle, now: DateTime<Utc>) -> f64 {
    let total_ms = cycle.planned_duration().num_milliseconds();
    if total_ms <= 0 {
        return 100.0;
    }
    let elapsed_ms = (now - cycle.start_date).num_milliseconds();
    (100.0 * elapsed_ms as f64 / total_ms as f64).clamp(0.0, 100.0)
}

/// Blend time progress with a completion percentage supplied by the caller.
pub fn combine(cycle: &Cycle, now: DateTime<Utc>, completion_pct: f64) -> CompletionEstimate {
    let time_progress_pct = time_progress(cycle, now);
    let completion_pct = if completion_pct.is_finite() {
        completion_pct.clamp(0.0, 100.0)
    } else {
        0.0
    };
    let combined_progress_pct =
        (TIME_WEIGHT * time_progress_pct + CURVE_WEIGHT * completion_pct).clamp(0.0, 100.0);

    let externally_complete = cycle.status == CycleStatus::Completed;
    let qualitative_status = if externally_complete || combined_progress_pct >= 100.0 {
        ProgressStatus::Complete
    } else if combined_progress_pct >= COMPLETING_PCT {
        ProgressStatus::Completing
    } else {
        ProgressStatus::Active
    };

    let total_ms = cycle.planned_duration().num_milliseconds();
    let estimated_days_remaining = if externally_complete {
        Some(0)
    } else if total_ms > 0 {
        let total_days = total_ms as f64 / 1000.0 / SECS_PER_DAY;
        let left = ((100.0 - combined_progress_pct) / 100.0 * total_days).round();
        Some(left.max(0.0) as u32)
    } else {
        None
    };

    CompletionEstimate {
        time_progress_pct,
        completion_pct,
        combined_progress_pct,
        qualitative_status,
        estimated_days_remaining,
        curve: None,
    }
}

/// Estimate completion from the cycle dates and its recent readings.
///
/// With too little history the curve term is 0 and the estimate is purely
/// time-based.
pub fn estimate(
    cycle: &Cycle,
    recent_readings: &[SensorReading],
    now: DateTime<Utc>,
) -> CompletionEstimate {
    let analysis = curve::analyze(recent_readings);
    if let Some(a) = analysis.filter(|a| !a.is_cooling()) {
        debug!(
            "PROGRESS | pile still heating ({:+.2} °C/sample, peak {:.1})",
            a.slope, a.peak_temperature
        );
    }
    let completion = analysis.map_or(0.0, |a| a.completion_pct);
    CompletionEstimate {
        curve: analysis,
        ..combine(cycle, now, completion)
    }
}
