//! Integration tests for the stirrer duty cycle, driven through
//! `StirrerService` with simulated wall-clock ticks.

use compostctl::app::events::AppEvent;
use compostctl::app::service::{ControlService, StirrerService};
use compostctl::config::ControllerConfig;
use compostctl::sensors::SensorReading;
use compostctl::stirrer::{DutyCycle, StirrerCommand, StirrerState};

use crate::mock_hw::{ActuatorCall, MockHardware, RecordingSink, minutes, t0};

#[test]
fn thirty_five_minutes_of_ticks() {
    let mut svc = StirrerService::new(DutyCycle::default(), t0());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::default();

    let mut fired = Vec::new();
    for m in 1..=35 {
        if let Some(cmd) = svc.tick(minutes(m), &mut hw, &mut sink) {
            fired.push((m, cmd));
        }
    }

    assert_eq!(
        fired,
        vec![(30, StirrerCommand::Start), (35, StirrerCommand::Stop)]
    );
    assert_eq!(
        hw.stirrer_calls(),
        vec![ActuatorCall::StirrerStart, ActuatorCall::StirrerStop]
    );
    assert!(!svc.state().running);
    assert_eq!(svc.state().last_transition_at, minutes(35));
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::StirrerTransition { .. })),
        2
    );
}

#[test]
fn resumed_running_state_stops_on_schedule() {
    let running = StirrerState {
        running: true,
        last_transition_at: t0(),
    };
    let mut svc = StirrerService::resume(DutyCycle::default(), running);
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::default();

    assert_eq!(svc.tick(minutes(4), &mut hw, &mut sink), None);
    assert_eq!(
        svc.tick(minutes(5), &mut hw, &mut sink),
        Some(StirrerCommand::Stop)
    );
}

#[test]
fn stirrer_ignores_pile_conditions() {
    let config = ControllerConfig::default();
    let mut control = ControlService::new(&config);
    let mut stirrer = StirrerService::new(config.stirrer, t0());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::default();

    // A critical reading mid-idle neither starts nor delays the stirrer.
    control.process(&SensorReading::new(75.0, 90.0, minutes(10)), &mut hw, &mut sink);
    assert_eq!(stirrer.tick(minutes(10), &mut hw, &mut sink), None);
    assert_eq!(
        stirrer.tick(minutes(30), &mut hw, &mut sink),
        Some(StirrerCommand::Start)
    );
    assert_eq!(hw.stirrer_calls(), vec![ActuatorCall::StirrerStart]);
}

#[test]
fn short_duty_cycle_from_config() {
    let config = ControllerConfig::from_json(
        r#"{"stirrer": {"run_secs": 60, "idle_secs": 120}, "stirrer_tick_ms": 1000}"#,
    )
    .unwrap();
    let mut svc = StirrerService::new(config.stirrer, t0());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::default();

    let commands: Vec<_> = (1..=5)
        .filter_map(|m| svc.tick(minutes(m), &mut hw, &mut sink))
        .collect();
    // Idle 2 min, run 1 min, idle 2 min, run.
    assert_eq!(
        commands,
        vec![
            StirrerCommand::Start,
            StirrerCommand::Stop,
            StirrerCommand::Start,
        ]
    );
}
