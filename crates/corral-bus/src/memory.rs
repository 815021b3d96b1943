//! In-process message bus.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::broadcast;
use tracing::{debug, trace};

use crate::error::{BusError, Result};
use crate::message::{Message, Subscription};
use crate::{validate_subject, MessageBus};

/// Default per-subject channel capacity.
pub const DEFAULT_CAPACITY: usize = 1024;

/// In-memory message bus for single-process deployments and tests.
///
/// Each subject gets its own broadcast channel, created on first subscription.
#[derive(Debug)]
pub struct InMemoryBus {
    subjects: DashMap<String, broadcast::Sender<Message>>,
    capacity: usize,
    closed: AtomicBool,
}

impl InMemoryBus {
    /// Creates a bus with the default channel capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a bus whose per-subject channels buffer `capacity` messages.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            subjects: DashMap::new(),
            capacity: capacity.max(1),
            closed: AtomicBool::new(false),
        }
    }

    /// Returns the number of live subscribers for a subject.
    pub fn subscriber_count(&self, subject: &str) -> usize {
        self.subjects
            .get(subject)
            .map_or(0, |sender| sender.receiver_count())
    }

    /// Returns the number of subjects with a live channel.
    pub fn subject_count(&self) -> usize {
        self.subjects.len()
    }

    /// Closes the bus.
    ///
    /// Every subscription ends after draining what it has already buffered.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        self.subjects.clear();
        debug!("In-memory bus closed");
    }

    /// Returns true once [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl Default for InMemoryBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageBus for InMemoryBus {
    async fn publish(&self, message: Message) -> Result<()> {
        if self.is_closed() {
            return Err(BusError::Closed);
        }
        validate_subject(&message.subject)?;

        let subject = message.subject.clone();
        let delivered = match self.subjects.get(&subject) {
            Some(sender) => sender.send(message).is_ok(),
            None => false,
        };

        if !delivered {
            // Every subscriber has gone, so the channel can go too.
            self.subjects
                .remove_if(&subject, |_, sender| sender.receiver_count() == 0);
            trace!(subject = %subject, "No subscribers, message dropped");
        }
        Ok(())
    }

    fn subscribe(&self, subject: &str) -> Result<Subscription> {
        if self.is_closed() {
            return Err(BusError::Closed);
        }
        validate_subject(subject)?;

        let receiver = self
            .subjects
            .entry(subject.to_owned())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .subscribe();

        // close() may have cleared the map between the check above and the insert.
        if self.is_closed() {
            self.subjects.remove(subject);
            return Err(BusError::Closed);
        }

        debug!(subject, "Subscribed");
        Ok(Subscription::new(subject, receiver))
    }
}
