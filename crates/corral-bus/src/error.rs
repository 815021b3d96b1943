//! Error types for the message bus.

use thiserror::Error;

/// Message bus errors.
#[derive(Error, Debug)]
pub enum BusError {
    /// Subject is empty or whitespace.
    #[error("invalid subject: {0:?}")]
    InvalidSubject(String),

    /// The bus has been closed.
    #[error("message bus closed")]
    Closed,

    /// Payload could not be encoded or decoded.
    #[error("codec error: {0}")]
    Codec(#[from] serde_json::Error),
}

/// Result type for message bus operations.
pub type Result<T> = std::result::Result<T, BusError>;
