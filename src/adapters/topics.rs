//! Command topic encoding and publishing.
//!
//! Every actuator command becomes one `(topic, payload)` pair:
//!
//! | Command          | Topic                 | Payload               |
//! |------------------|-----------------------|-----------------------|
//! | fan on / off     | `compost/cmd/fan`     | `{"action":"ON"}`     |
//! | lid open / close | `compost/cmd/lid`     | `{"action":"OPEN"}`   |
//! | stirrer start    | `compost/cmd/stirrer` | `{"action":"ON"}`     |
//!
//! Topic names come from [`CommandTopics`].  [`TopicPublisher`] writes one
//! `topic payload` line per command to any [`Write`] sink, which is what
//! the `run` command pipes into a broker bridge.

use std::io::Write;

use log::{debug, warn};

use crate::app::ports::ActuatorPort;
use crate::config::CommandTopics;
use crate::control::{FanState, LidState};
use crate::stirrer::StirrerCommand;

/// One outbound actuator command, independent of transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCommand {
    Fan(FanState),
    Lid(LidState),
    Stirrer(StirrerCommand),
}

impl ActuatorCommand {
    fn action(self) -> &'static str {
        match self {
            Self::Fan(FanState::On) | Self::Stirrer(StirrerCommand::Start) => "ON",
            Self::Fan(FanState::Off) | Self::Stirrer(StirrerCommand::Stop) => "OFF",
            Self::Lid(LidState::Open) => "OPEN",
            Self::Lid(LidState::Closed) => "CLOSED",
        }
    }

    /// Apply this command to any actuator port.
    pub fn apply(self, hw: &mut impl ActuatorPort) {
        match self {
            Self::Fan(state) => hw.set_fan(state),
            Self::Lid(state) => hw.set_lid(state),
            Self::Stirrer(StirrerCommand::Start) => hw.start_stirrer(),
            Self::Stirrer(StirrerCommand::Stop) => hw.stop_stirrer(),
        }
    }
}

/// Encoded command, ready for a broker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicMessage {
    pub topic: String,
    pub payload: String,
}

/// Encode `command` against the configured topics.
pub fn encode(topics: &CommandTopics, command: ActuatorCommand) -> TopicMessage {
    let topic = match command {
        ActuatorCommand::Fan(_) => &topics.fan,
        ActuatorCommand::Lid(_) => &topics.lid,
        ActuatorCommand::Stirrer(_) => &topics.stirrer,
    };
    let payload = serde_json::json!({ "action": command.action() }).to_string();
    TopicMessage {
        topic: topic.clone(),
        payload,
    }
}

/// [`ActuatorPort`] that writes encoded commands as lines.
pub struct TopicPublisher<W: Write> {
    topics: CommandTopics,
    out: W,
    published: u64,
}

impl<W: Write> TopicPublisher<W> {
    pub fn new(topics: CommandTopics, out: W) -> Self {
        Self {
            topics,
            out,
            published: 0,
        }
    }

    pub fn publish(&mut self, command: ActuatorCommand) {
        let msg = encode(&self.topics, command);
        debug!("DISPATCH | {} {}", msg.topic, msg.payload);
        let written = writeln!(self.out, "{} {}", msg.topic, msg.payload)
            .and_then(|()| self.out.flush());
        match written {
            Ok(()) => self.published += 1,
            Err(e) => warn!("DISPATCH | failed to write {}: {e}", msg.topic),
        }
    }

    /// Commands successfully written.
    pub fn published(&self) -> u64 {
        self.published
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ActuatorPort for TopicPublisher<W> {
    fn set_fan(&mut self, state: FanState) {
        self.publish(ActuatorCommand::Fan(state));
    }

    fn set_lid(&mut self, state: LidState) {
        self.publish(ActuatorCommand::Lid(state));
    }

    fn start_stirrer(&mut self) {
        self.publish(ActuatorCommand::Stirrer(StirrerCommand::Start));
    }

    fn stop_stirrer(&mut self) {
        self.publish(ActuatorCommand::Stirrer(StirrerCommand::Stop));
    }
}
