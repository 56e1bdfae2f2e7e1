//! Integration tests for the reading → directive path.
//!
//! Device messages go through the payload decoder, then `ControlService`,
//! and land on the mock actuator.

use chrono::TimeDelta;
use compostctl::app::events::AppEvent;
use compostctl::app::service::ControlService;
use compostctl::config::ControllerConfig;
use compostctl::control::{self, Bounds, DirectiveReason, FanState, LidState, Zone};
use compostctl::ratio::{MixStatus, calculate_ratio};
use compostctl::sensors::{SensorReading, payload};

use crate::mock_hw::{ActuatorCall, MockHardware, RecordingSink, t0};

fn reading(temperature: f64, humidity: f64, secs: i64) -> SensorReading {
    SensorReading::new(temperature, humidity, t0() + TimeDelta::seconds(secs))
}

#[test]
fn cold_pile_retains_heat() {
    let (t, h, d) = control::evaluate(
        &reading(50.0, 55.0, 0),
        &Bounds::new(55.0, 65.0),
        &Bounds::new(50.0, 60.0),
    );
    assert_eq!((t, h), (Zone::Low, Zone::Optimal));
    assert_eq!((d.fan, d.lid), (FanState::Off, LidState::Closed));
    assert_eq!(d.reason, DirectiveReason::TemperatureLow);
}

#[test]
fn overheated_pile_is_critical_and_vents() {
    let config = ControllerConfig::default();
    let (t, _, d) = control::evaluate(&reading(72.0, 55.0, 0), &config.temperature, &config.humidity);
    assert_eq!(t, Zone::Critical);
    assert_eq!((d.fan, d.lid), (FanState::On, LidState::Open));
    assert_eq!(d.reason, DirectiveReason::TemperatureCritical);
}

#[test]
fn green_heavy_mix_suggests_brown() {
    let r = calculate_ratio(0.8, 0.15).unwrap();
    assert_eq!(r.status, MixStatus::TooMuchGreen);
    let suggested = r.suggested_brown_kg.unwrap();
    assert!((suggested - 0.185).abs() < 0.001, "got {suggested}");
}

#[test]
fn warm_up_then_cool_down_sequence() {
    let mut svc = ControlService::new(&ControllerConfig::default());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::default();
    svc.start(&mut sink);

    let steps = [
        (40.0, 55.0, FanState::Off, LidState::Closed),
        (58.0, 55.0, FanState::Off, LidState::Closed),
        (58.0, 75.0, FanState::On, LidState::Open),
        (67.0, 55.0, FanState::On, LidState::Open),
        (73.0, 55.0, FanState::On, LidState::Open),
        (60.0, 45.0, FanState::Off, LidState::Closed),
    ];
    for (i, (temperature, humidity, fan, lid)) in steps.into_iter().enumerate() {
        let d = svc
            .process(&reading(temperature, humidity, i as i64 * 5), &mut hw, &mut sink)
            .unwrap();
        assert_eq!((d.fan, d.lid), (fan, lid), "step {i}");
    }

    // Fan and lid are dispatched on every reading.
    assert_eq!(hw.calls.len(), steps.len() * 2);
    assert_eq!(hw.last_fan(), Some(FanState::Off));
    assert_eq!(hw.last_lid(), Some(LidState::Closed));

    // Output changes: initial, vent at step 2, retain at step 5.
    // Steps 3 and 4 only change the reason.
    let changes = sink.count(|e| matches!(e, AppEvent::DirectiveChanged { .. }));
    assert_eq!(changes, 3);
    assert_eq!(svc.processed(), steps.len() as u64);
}

#[test]
fn decoded_messages_drive_actuators() {
    let mut svc = ControlService::new(&ControllerConfig::default());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::default();

    let lines = [
        r#"{"temperature": 61.2, "humidity": 64.0, "timestamp": "2025-06-01T08:00:00Z", "relay": "OFF"}"#,
        r#"{"temperature": "hot", "humidity": 64.0}"#,
        r#"{"temperature": 52.0, "humidity": 64.0, "timestamp": "2025-06-01T08:00:05"}"#,
    ];
    for line in lines {
        if let Ok(msg) = payload::decode(line, t0()) {
            svc.process(&msg.reading, &mut hw, &mut sink);
        }
    }

    assert_eq!(
        hw.calls,
        vec![
            ActuatorCall::Fan(FanState::On),
            ActuatorCall::Lid(LidState::Open),
            ActuatorCall::Fan(FanState::Off),
            ActuatorCall::Lid(LidState::Closed),
        ]
    );
}

#[test]
fn stale_reading_does_not_reach_actuators() {
    let mut svc = ControlService::new(&ControllerConfig::default());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::default();

    svc.process(&reading(60.0, 55.0, 60), &mut hw, &mut sink);
    assert!(svc.process(&reading(75.0, 55.0, 30), &mut hw, &mut sink).is_none());

    assert_eq!(hw.calls.len(), 2);
    assert_eq!(hw.last_fan(), Some(FanState::Off));
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::ReadingOutOfOrder { .. })),
        1
    );
}
