//! Test fixtures for pool integration tests.

use corral_pool::AdvertiseMessage;
use serde_json::Value;

/// Builder for test advertisements.
pub struct AdvertisementBuilder {
    msg: AdvertiseMessage,
}

impl AdvertisementBuilder {
    /// Creates a builder for the given worker.
    pub fn new(id: &str) -> Self {
        Self {
            msg: AdvertiseMessage::new(id, 1024),
        }
    }

    /// Sets the available memory.
    pub fn with_memory(mut self, available_memory: i64) -> Self {
        self.msg.available_memory = available_memory;
        self
    }

    /// Adds a supported stack.
    pub fn with_stack(mut self, stack: &str) -> Self {
        self.msg.stacks.push(stack.to_string());
        self
    }

    /// Records a running instance count for an app.
    pub fn with_app(mut self, app_id: &str, count: u64) -> Self {
        self.msg.app_id_to_count.insert(app_id.to_string(), count);
        self
    }

    /// Adds an unrecognised field.
    pub fn with_extra(mut self, key: &str, value: Value) -> Self {
        self.msg.extra.insert(key.to_string(), value);
        self
    }

    /// Builds the advertisement.
    pub fn build(self) -> AdvertiseMessage {
        self.msg
    }
}

/// Creates advertisements with incrementing IDs and the same memory.
pub fn create_advertisements(prefix: &str, count: usize, available_memory: i64) -> Vec<AdvertiseMessage> {
    (0..count)
        .map(|i| {
            AdvertisementBuilder::new(&format!("{prefix}-{i}"))
                .with_memory(available_memory)
                .build()
        })
        .collect()
}
