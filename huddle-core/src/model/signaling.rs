use crate::model::peer::PeerId;
use crate::model::room::{Member, RoomCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Frames a browser sends over the signaling socket.
///
/// `connect` and `disconnect` never travel as frames: the transport
/// synthesises them from the socket lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    CreateRoom {
        #[serde(default)]
        username: Option<String>,
    },
    JoinRoom {
        #[serde(default)]
        room_code: String,
        #[serde(default)]
        username: Option<String>,
    },
    /// SDP offer for `target`, relayed opaquely.
    Offer {
        #[serde(default)]
        target: Option<PeerId>,
        #[serde(default)]
        offer: Value,
    },
    Answer {
        #[serde(default)]
        target: Option<PeerId>,
        #[serde(default)]
        answer: Value,
    },
    IceCandidate {
        #[serde(default)]
        target: Option<PeerId>,
        #[serde(default)]
        candidate: Value,
    },
    MicMuted {},
    MicUnmuted {},
}

impl ClientEvent {
    /// Wire name of the event, used in logs and error replies.
    pub fn name(&self) -> &'static str {
        match self {
            ClientEvent::CreateRoom { .. } => "create-room",
            ClientEvent::JoinRoom { .. } => "join-room",
            ClientEvent::Offer { .. } => "offer",
            ClientEvent::Answer { .. } => "answer",
            ClientEvent::IceCandidate { .. } => "ice-candidate",
            ClientEvent::MicMuted {} => "mic-muted",
            ClientEvent::MicUnmuted {} => "mic-unmuted",
        }
    }

    /// Parses a text frame in two steps: the `{event, data}` envelope first,
    /// then the payload for that event.
    ///
    /// A missing or `null` `data` reads as `{}`. When the envelope is fine
    /// but the payload is not, the error still names the event so the
    /// caller can answer it.
    pub fn from_frame(text: &str) -> Result<Self, FrameError> {
        let Envelope { event, data } =
            serde_json::from_str(text).map_err(FrameError::Envelope)?;

        let data = match data {
            Value::Null => Value::Object(Map::new()),
            data => data,
        };

        let mut frame = Map::new();
        frame.insert("event".to_owned(), Value::String(event.clone()));
        frame.insert("data".to_owned(), data);

        serde_json::from_value(Value::Object(frame))
            .map_err(|source| FrameError::Payload { event, source })
    }
}

#[derive(Deserialize)]
struct Envelope {
    event: String,
    #[serde(default)]
    data: Value,
}

/// Why an inbound text frame could not become a `ClientEvent`.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("not an event envelope: {0}")]
    Envelope(#[source] serde_json::Error),

    #[error("bad {event} frame: {source}")]
    Payload {
        event: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FrameError {
    /// Event named by the frame, when the envelope could be read.
    pub fn event(&self) -> Option<&str> {
        match self {
            FrameError::Envelope(_) => None,
            FrameError::Payload { event, .. } => Some(event),
        }
    }
}

/// Frames the server pushes to a browser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// Sent by the transport right after the upgrade.
    Connected { socket_id: PeerId },
    RoomCreated { room_code: RoomCode },
    RoomJoined {
        room_code: RoomCode,
        users: Vec<Member>,
    },
    JoinError { message: String },
    UserJoined { socket_id: PeerId, username: String },
    UserLeft { sid: PeerId },
    Offer { offer: Value, from: PeerId },
    Answer { answer: Value, from: PeerId },
    IceCandidate { candidate: Value, from: PeerId },
    UserMicMuted { socket_id: PeerId, muted: bool },
    UserMicUnmuted { socket_id: PeerId, muted: bool },
    /// A relay request was rejected before reaching its target.
    SignalError { event: String, message: String },
}
