//! Message bus abstraction for the Corral worker pool.
//!
//! Workers announce their capacity by publishing advertisements to a subject on
//! a message bus. This crate provides:
//!
//! - **`MessageBus`**: the transport seam the pool subscribes through
//! - **`Message`**: a subject plus an opaque payload, with JSON helpers
//! - **`InMemoryBus`**: an in-process bus backed by broadcast channels
//!
//! Delivery is at-most-once. A subscriber that falls behind loses the oldest
//! messages rather than blocking publishers.

pub mod error;
pub mod memory;
pub mod message;

use async_trait::async_trait;

pub use error::{BusError, Result};
pub use memory::InMemoryBus;
pub use message::{Message, Subscription};

/// A publish/subscribe transport.
#[async_trait]
pub trait MessageBus: Send + Sync {
    /// Publishes a message to every current subscriber of its subject.
    ///
    /// Publishing to a subject with no subscribers succeeds and the message is dropped.
    async fn publish(&self, message: Message) -> Result<()>;

    /// Subscribes to a subject.
    ///
    /// Only messages published after this call are delivered.
    fn subscribe(&self, subject: &str) -> Result<Subscription>;
}

pub(crate) fn validate_subject(subject: &str) -> Result<()> {
    if subject.trim().is_empty() {
        return Err(BusError::InvalidSubject(subject.to_owned()));
    }
    Ok(())
}
