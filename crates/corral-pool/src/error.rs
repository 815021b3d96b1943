//! Error types for the worker pool.

use thiserror::Error;

/// Worker pool errors.
///
/// Ingestion and placement never fail; these cover wiring the pool up.
#[derive(Error, Debug)]
pub enum PoolError {
    /// Message bus error.
    #[error("message bus error: {0}")]
    Bus(#[from] corral_bus::BusError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for worker pool operations.
pub type Result<T> = std::result::Result<T, PoolError>;
