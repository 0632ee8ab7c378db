//! Error types shared by all gridpart crates.

use thiserror::Error;

/// Errors produced by the partitioning engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// The matrix handed to the principal axis solver is not symmetric.
    #[error("inertia tensor is not symmetric: m01={upper}, m10={lower} (tolerance {tolerance:e})")]
    AsymmetricTensor {
        /// Upper off-diagonal entry.
        upper: f64,
        /// Lower off-diagonal entry.
        lower: f64,
        /// Tolerance the difference was checked against.
        tolerance: f64,
    },

    /// The weighted grid contains invalid data.
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    /// A configuration or argument value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An internal invariant was violated.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result alias used throughout gridpart.
pub type Result<T> = std::result::Result<T, Error>;
