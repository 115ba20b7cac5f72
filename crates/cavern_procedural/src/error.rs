//! # Engine Error Types
//!
//! The engine has no recoverable-error taxonomy in normal operation:
//! every coordinate pair is valid in an unbounded world and every
//! world operation is total. The only faults are configuration-time.

use thiserror::Error;

/// Errors that can occur constructing or configuring a cave world.
#[derive(Error, Debug)]
pub enum CaveError {
    /// Chunk size must be positive; never silently clamped.
    #[error("chunk size must be positive")]
    InvalidChunkSize,

    /// A configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file could not be parsed.
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for engine configuration operations.
pub type CaveResult<T> = Result<T, CaveError>;
