//! Error hierarchy for sieve queries, spiral parameters and configuration.

use thiserror::Error;

/// Root error type for all prime spiral failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpiralError {
    /// A sieve was queried beyond the bound it was built for.
    #[error("this sieve only goes up to number {max}, got {number}")]
    OutOfRange { number: u64, max: u64 },

    /// Sieve bound below 2.
    #[error("invalid bound: max number must be at least 2, got {0}")]
    InvalidBound(u64),

    /// Random sieve probability outside [0, 1].
    #[error("invalid threshold: probability must be within [0, 1], got {0}")]
    InvalidThreshold(f64),

    /// Arc-length spacing must be positive and finite.
    #[error("invalid step: spacing must be positive, got {0}")]
    InvalidStep(f64),

    /// Radius growth must be positive and finite.
    #[error("invalid radius factor: must be positive, got {0}")]
    InvalidRadiusFactor(f64),

    /// Spiral cursor with a non-positive or non-finite radius, or a
    /// non-finite angle; advancing it would divide by zero.
    #[error("invalid spiral state: theta {theta}, radius {radius}")]
    InvalidState { theta: f64, radius: f64 },

    /// Configuration could not be read, parsed or validated.
    #[error("config error: {0}")]
    Config(String),
}

pub type SpiralResult<T> = Result<T, SpiralError>;
