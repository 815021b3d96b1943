//! Messages and subscriptions.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::warn;

use crate::error::Result;

/// A message published on the bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Subject the message was published to.
    pub subject: String,
    /// Opaque payload.
    pub payload: Bytes,
}

impl Message {
    /// Creates a message with a raw payload.
    pub fn new(subject: impl Into<String>, payload: impl Into<Bytes>) -> Self {
        Self {
            subject: subject.into(),
            payload: payload.into(),
        }
    }

    /// Creates a message with a JSON-encoded payload.
    pub fn json<T: Serialize>(subject: impl Into<String>, value: &T) -> Result<Self> {
        let payload = serde_json::to_vec(value)?;
        Ok(Self::new(subject, payload))
    }

    /// Decodes the payload as JSON.
    pub fn decode_json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.payload)?)
    }
}

/// A stream of messages for one subject.
#[derive(Debug)]
pub struct Subscription {
    subject: String,
    receiver: broadcast::Receiver<Message>,
}

impl Subscription {
    /// Wraps a broadcast receiver for the given subject.
    pub fn new(subject: impl Into<String>, receiver: broadcast::Receiver<Message>) -> Self {
        Self {
            subject: subject.into(),
            receiver,
        }
    }

    /// Returns the subject this subscription listens on.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Waits for the next message.
    ///
    /// Returns `None` once the bus has closed and every buffered message has been
    /// read. Messages overwritten while this subscriber lagged are skipped.
    pub async fn next(&mut self) -> Option<Message> {
        loop {
            match self.receiver.recv().await {
                Ok(message) => return Some(message),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(subject = %self.subject, skipped, "Subscriber lagged, messages dropped");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}
