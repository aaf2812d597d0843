use crate::error::ConfigError;
use serde::Deserialize;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;
use tracing::info;

pub const DEFAULT_PORT: u16 = 8088;
pub const DEFAULT_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
pub const DEFAULT_CODE_LENGTH: usize = 6;
pub const MAX_CODE_LENGTH: usize = 32;

/// Shape of generated room codes.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RoomCodeConfig {
    pub alphabet: String,
    pub length: usize,
    /// Draws attempted before giving up on finding a free code.
    pub max_attempts: usize,
}

impl Default for RoomCodeConfig {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.to_owned(),
            length: DEFAULT_CODE_LENGTH,
            max_attempts: 10_000,
        }
    }
}

impl RoomCodeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.alphabet.is_empty() {
            return Err(ConfigError::EmptyAlphabet);
        }
        if let Some(bad) = self.alphabet.chars().find(|c| !c.is_ascii_alphanumeric()) {
            return Err(ConfigError::InvalidAlphabet(bad));
        }
        if self.length == 0 {
            return Err(ConfigError::ZeroLength);
        }
        if self.length > MAX_CODE_LENGTH {
            return Err(ConfigError::TooLong(self.length));
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub room_codes: RoomCodeConfig,
    /// Capacity of the channel feeding the router.
    pub command_buffer: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            room_codes: RoomCodeConfig::default(),
            command_buffer: 256,
        }
    }
}

impl ServerConfig {
    /// Parses a TOML document. Missing keys keep their defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(format!("{}: {e}", path.display())))?;
        let config = Self::from_toml(&content)?;

        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.room_codes.validate()?;
        if self.command_buffer == 0 {
            return Err(ConfigError::ZeroBuffer);
        }
        Ok(())
    }
}
