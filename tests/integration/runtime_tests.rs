//! End-to-end tests for the async runtime: JSON lines in, topic payload
//! lines out.

use std::io::Cursor;
use std::time::Duration;

use compostctl::adapters::time::{FixedClock, SystemClock};
use compostctl::adapters::topics::TopicPublisher;
use compostctl::config::{CommandTopics, ControllerConfig};
use compostctl::control::{FanState, LidState};
use compostctl::runtime;

use crate::mock_hw::{ActuatorCall, MockHardware, t0};

const STREAM: &str = r#"{"temperature": 50.0, "humidity": 55.0, "timestamp": "2025-06-01T08:00:00Z"}

{"temperature": 72.5, "humidity": 55.0, "timestamp": "2025-06-01T08:00:05Z"}
not json
{"temperature": 60.0, "humidity": 55.0, "timestamp": "2025-06-01T08:00:02Z"}
{"temperature": 60.0, "humidity": 55.0, "timestamp": "2025-06-01T08:00:10Z"}
"#;

#[test]
fn every_accepted_reading_is_dispatched() {
    let config = ControllerConfig::default();
    let mut hw = MockHardware::new();

    let summary = runtime::run(&config, &FixedClock(t0()), &mut hw, |feed| {
        let stats = runtime::ingest_lines(Cursor::new(STREAM), &FixedClock(t0()), feed);
        assert_eq!(stats.accepted, 4);
        assert_eq!(stats.rejected, 1);
    });

    assert_eq!(summary.processed, 3);
    assert_eq!(summary.dropped, 1);
    assert_eq!(
        hw.calls,
        vec![
            ActuatorCall::Fan(FanState::Off),
            ActuatorCall::Lid(LidState::Closed),
            ActuatorCall::Fan(FanState::On),
            ActuatorCall::Lid(LidState::Open),
            ActuatorCall::Fan(FanState::Off),
            ActuatorCall::Lid(LidState::Closed),
        ]
    );
    let last = summary.last_directive.unwrap();
    assert_eq!((last.fan, last.lid), (FanState::Off, LidState::Closed));
}

#[test]
fn publishes_on_configured_topics() {
    let mut config = ControllerConfig::default();
    config.topics = CommandTopics {
        fan: "site1/fan".into(),
        lid: "site1/lid".into(),
        stirrer: "site1/stirrer".into(),
    };
    let mut publisher = TopicPublisher::new(config.topics.clone(), Vec::new());

    runtime::run(&config, &FixedClock(t0()), &mut publisher, |feed| {
        runtime::ingest_lines(
            Cursor::new(r#"{"temperature": 68.0, "humidity": 55.0}"#),
            &FixedClock(t0()),
            feed,
        );
    });

    let out = String::from_utf8(publisher.into_inner()).unwrap();
    assert_eq!(
        out,
        "site1/fan {\"action\":\"ON\"}\nsite1/lid {\"action\":\"OPEN\"}\n"
    );
}

#[test]
fn empty_stream_stops_cleanly() {
    let config = ControllerConfig::default();
    let mut hw = MockHardware::new();
    let summary = runtime::run(&config, &FixedClock(t0()), &mut hw, |_feed| {});
    assert_eq!(summary.processed, 0);
    assert!(summary.last_directive.is_none());
    assert!(hw.calls.is_empty());
}

#[test]
fn stirrer_timer_fires_without_readings() {
    // One second each way, ticking every 100 ms.
    let config = ControllerConfig::from_json(
        r#"{"stirrer":{"run_secs":1,"idle_secs":1},"stirrer_tick_ms":100}"#,
    )
    .unwrap();
    let mut publisher = TopicPublisher::new(config.topics.clone(), Vec::new());

    let summary = runtime::run(&config, &SystemClock, &mut publisher, |_feed| {
        std::thread::sleep(Duration::from_millis(2_800));
    });
    assert_eq!(summary.processed, 0);

    let out = String::from_utf8(publisher.into_inner()).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert!(lines.len() >= 2, "stirrer never toggled: {out:?}");
    assert_eq!(
        &lines[..2],
        [
            r#"compost/cmd/stirrer {"action":"ON"}"#,
            r#"compost/cmd/stirrer {"action":"OFF"}"#,
        ]
    );
}
