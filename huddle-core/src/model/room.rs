use crate::model::peer::PeerId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display name used when a client does not send one.
pub const DEFAULT_USERNAME: &str = "User";

/// Short, shareable room identifier. Always upper-case.
#[derive(Debug, Serialize, Deserialize, Clone, Hash, Eq, PartialEq)]
#[serde(transparent)]
pub struct RoomCode(String);

impl RoomCode {
    /// Trims and upper-cases user input. Returns `None` when nothing is left.
    pub fn normalize(raw: &str) -> Option<Self> {
        let code = raw.trim().to_uppercase();
        if code.is_empty() {
            return None;
        }
        Some(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for RoomCode {
    fn from(s: String) -> Self {
        Self(s.to_uppercase())
    }
}

impl From<&str> for RoomCode {
    fn from(s: &str) -> Self {
        Self(s.to_uppercase())
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A connection's presence record inside a room.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Member {
    pub socket_id: PeerId,
    pub username: String,
}

/// Answer to the room-existence query.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct RoomStatus {
    pub exists: bool,
    pub user_count: usize,
}

impl RoomStatus {
    pub const MISSING: Self = Self {
        exists: false,
        user_count: 0,
    };
}
