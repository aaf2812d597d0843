use crate::config::RoomCodeConfig;
use crate::error::{ConfigError, SignalingError};
use huddle_core::RoomCode;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Draws random room codes, one independent uniform pick per character.
pub struct RoomCodeGenerator {
    alphabet: Vec<char>,
    length: usize,
    max_attempts: usize,
    rng: StdRng,
}

impl RoomCodeGenerator {
    pub fn new(config: &RoomCodeConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic generator for tests.
    pub fn seeded(config: &RoomCodeConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &RoomCodeConfig, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;

        // Codes are matched after upper-casing, so lowercase input letters fold
        // into their uppercase form.
        let mut alphabet: Vec<char> = config
            .alphabet
            .chars()
            .map(|c| c.to_ascii_uppercase())
            .collect();
        alphabet.sort_unstable();
        alphabet.dedup();

        Ok(Self {
            alphabet,
            length: config.length,
            max_attempts: config.max_attempts,
            rng,
        })
    }

    /// Returns a code for which `taken` is false.
    pub fn generate(
        &mut self,
        taken: impl Fn(&RoomCode) -> bool,
    ) -> Result<RoomCode, SignalingError> {
        for _ in 0..self.max_attempts {
            let code = self.draw();
            if !taken(&code) {
                return Ok(code);
            }
        }

        Err(SignalingError::internal(format!(
            "no free room code after {} attempts",
            self.max_attempts
        )))
    }

    fn draw(&mut self) -> RoomCode {
        let code: String = (0..self.length)
            .map(|_| self.alphabet[self.rng.gen_range(0..self.alphabet.len())])
            .collect();
        RoomCode::from(code)
    }
}
