use huddle_core::RoomCode;
use thiserror::Error;

/// Outcome of a protocol handler that did not succeed.
///
/// Handlers only return these; the router decides which ones are
/// turned into events for the sender and which ones are only logged.
#[derive(Debug, Error)]
pub enum SignalingError {
    #[error("{0}")]
    Validation(String),

    #[error("room {0} not found")]
    RoomNotFound(RoomCode),

    #[error("server error: {0}")]
    Internal(String),
}

impl SignalingError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

/// Lookup of a room code that is not registered.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("room {0} not found")]
pub struct RoomNotFound(pub RoomCode);

impl From<RoomNotFound> for SignalingError {
    fn from(err: RoomNotFound) -> Self {
        Self::RoomNotFound(err.0)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("room code alphabet must not be empty")]
    EmptyAlphabet,

    #[error("room code alphabet may only contain ASCII letters and digits, found {0:?}")]
    InvalidAlphabet(char),

    #[error("room code length must be at least 1")]
    ZeroLength,

    #[error("room code length must be at most {max}, got {0}", max = crate::config::MAX_CODE_LENGTH)]
    TooLong(usize),

    #[error("room code generation needs at least one attempt")]
    ZeroAttempts,

    #[error("command buffer must hold at least one command")]
    ZeroBuffer,

    #[error("failed to read config: {0}")]
    Read(String),

    #[error("failed to parse config: {0}")]
    Parse(String),
}
