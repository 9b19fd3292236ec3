//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid grid input, invalid tracer configuration, out-of-bounds interpolation,
//! and the defensive non-termination guard.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("interpolation out of bounds at ({x}, {y})")]
    OutOfBounds { x: f32, y: f32 },

    #[error("seeding loop failed to terminate after {seeds} seeds")]
    NonTermination { seeds: usize },

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}
