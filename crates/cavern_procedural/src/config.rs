//! # World Configuration
//!
//! The entire external configuration surface of the engine: seed,
//! noise threshold, smoothing steps, chunk size. Loaded once at
//! startup, either from code or from a TOML file, then validated and
//! handed to [`crate::CaveWorld`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CaveError, CaveResult};

/// Construction parameters for a cave world.
///
/// Missing fields take the documented defaults, so a config file only
/// needs to name what it overrides:
///
/// ```toml
/// seed = 4651
/// threshold = 0.11
/// steps = 5
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaveConfig {
    /// World seed. When absent, a fresh seed is drawn from OS entropy
    /// once at world construction.
    pub seed: Option<u64>,
    /// Noise cutoff; cells with noise above it start solid.
    pub threshold: f64,
    /// Smoothing passes per chunk. Zero skips smoothing entirely.
    pub steps: u32,
    /// Chunk side length in cells. Must be positive.
    pub chunk_size: u32,
}

impl CaveConfig {
    /// Default noise cutoff.
    pub const DEFAULT_THRESHOLD: f64 = -0.08;
    /// Default smoothing pass count.
    pub const DEFAULT_STEPS: u32 = 5;
    /// Default chunk side length.
    pub const DEFAULT_CHUNK_SIZE: u32 = 50;

    /// Pins the world seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the noise cutoff.
    #[must_use]
    pub const fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the smoothing pass count.
    #[must_use]
    pub const fn with_steps(mut self, steps: u32) -> Self {
        self.steps = steps;
        self
    }

    /// Sets the chunk side length.
    #[must_use]
    pub const fn with_chunk_size(mut self, chunk_size: u32) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Loads and validates a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`CaveError::Io`] if the file cannot be read,
    /// [`CaveError::Parse`] if it is not valid TOML for this shape,
    /// or [`CaveError::InvalidChunkSize`] if validation fails.
    pub fn from_toml(path: impl AsRef<Path>) -> CaveResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks construction-time invariants. Fails fast, never clamps.
    ///
    /// `steps` is unsigned, so the non-negativity invariant holds by
    /// type; the only checkable fault is a zero chunk size.
    ///
    /// # Errors
    ///
    /// Returns [`CaveError::InvalidChunkSize`] if `chunk_size` is zero.
    pub const fn validate(&self) -> CaveResult<()> {
        if self.chunk_size == 0 {
            return Err(CaveError::InvalidChunkSize);
        }
        Ok(())
    }
}

impl Default for CaveConfig {
    fn default() -> Self {
        Self {
            seed: None,
            threshold: Self::DEFAULT_THRESHOLD,
            steps: Self::DEFAULT_STEPS,
            chunk_size: Self::DEFAULT_CHUNK_SIZE,
        }
    }
}
