//! Integration tests for cycle progress, from decoded history to the
//! combined estimate.

use chrono::{TimeDelta, Utc};
use compostctl::cycle::{Cycle, CycleStatus};
use compostctl::progress::{self, ProgressStatus};
use compostctl::sensors::{SensorReading, payload};

use crate::mock_hw::t0;

fn cooling_history(peak: f64, current: f64) -> Vec<SensorReading> {
    // Ten hourly readings falling linearly from `peak` to `current`.
    (0..10)
        .map(|i| {
            let temp = peak - (peak - current) * f64::from(i) / 9.0;
            let line = format!(
                r#"{{"temperature": {temp}, "humidity": 55.0, "timestamp": "{}"}}"#,
                (t0() + TimeDelta::hours(i64::from(i))).to_rfc3339()
            );
            payload::decode(&line, Utc::now()).unwrap().reading
        })
        .collect()
}

fn sixty_days() -> Cycle {
    Cycle::active(t0(), t0() + TimeDelta::days(60))
}

#[test]
fn mid_cycle_blend() {
    let history = cooling_history(60.0, 30.0);
    let e = progress::estimate(&sixty_days(), &history, t0() + TimeDelta::days(45));

    assert!((e.time_progress_pct - 75.0).abs() < 1e-9);
    assert!((e.completion_pct - 50.0).abs() < 1e-9);
    assert!((e.combined_progress_pct - 65.0).abs() < 1e-9);
    assert_eq!(e.qualitative_status, ProgressStatus::Active);
    assert_eq!(e.estimated_days_remaining, Some(21));

    let curve = e.curve.expect("ten readings are enough for the curve");
    assert!((curve.peak_temperature - 60.0).abs() < 1e-9);
    assert!((curve.current_temperature - 30.0).abs() < 1e-9);
    // Linear fall of 30 °C over nine steps.
    assert!((curve.slope + 30.0 / 9.0).abs() < 1e-9);
    assert!(curve.is_cooling());
}

#[test]
fn overdue_and_cool_is_completing() {
    let history = cooling_history(60.0, 12.0);
    let e = progress::estimate(&sixty_days(), &history, t0() + TimeDelta::days(70));

    assert!((e.time_progress_pct - 100.0).abs() < 1e-9);
    assert!((e.combined_progress_pct - 92.0).abs() < 1e-9);
    assert_eq!(e.qualitative_status, ProgressStatus::Completing);
    assert_eq!(e.estimated_days_remaining, Some(5));
}

#[test]
fn short_history_is_time_only() {
    let history: Vec<_> = cooling_history(60.0, 30.0).into_iter().take(9).collect();
    let e = progress::estimate(&sixty_days(), &history, t0() + TimeDelta::days(30));
    assert_eq!(e.completion_pct, 0.0);
    assert!(e.curve.is_none());
    assert!((e.combined_progress_pct - 30.0).abs() < 1e-9);
}

#[test]
fn recorded_completion_wins() {
    let mut cycle = sixty_days();
    cycle.status = "Completed".parse::<CycleStatus>().unwrap();
    let e = progress::estimate(&cycle, &[], t0() + TimeDelta::days(1));
    assert_eq!(e.qualitative_status, ProgressStatus::Complete);
    assert_eq!(e.estimated_days_remaining, Some(0));
}

#[test]
fn future_start_clamps_to_zero() {
    let e = progress::estimate(&sixty_days(), &[], t0() - TimeDelta::days(3));
    assert_eq!(e.time_progress_pct, 0.0);
    assert_eq!(e.combined_progress_pct, 0.0);
    assert_eq!(e.estimated_days_remaining, Some(60));
}
