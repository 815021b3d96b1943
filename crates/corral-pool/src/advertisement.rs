//! Worker advertisements.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Unique worker identifier.
pub type WorkerId = String;

/// Capacity announcement published by a worker.
///
/// Only `id` and `available_memory` drive placement. The other stats are kept
/// with the record so they can be inspected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvertiseMessage {
    /// Worker identifier, stable across advertisements.
    pub id: WorkerId,
    /// Memory the worker can still hand out, in MB.
    pub available_memory: i64,
    /// Runtime stacks the worker supports.
    #[serde(default)]
    pub stacks: Vec<String>,
    /// Running instance count per application.
    #[serde(default)]
    pub app_id_to_count: HashMap<String, u64>,
    /// Any other advertised fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AdvertiseMessage {
    /// Creates an advertisement carrying only the fields placement needs.
    pub fn new(id: impl Into<WorkerId>, available_memory: i64) -> Self {
        Self {
            id: id.into(),
            available_memory,
            stacks: Vec::new(),
            app_id_to_count: HashMap::new(),
            extra: Map::new(),
        }
    }

    /// Sets the supported stacks.
    #[must_use]
    pub fn with_stacks(mut self, stacks: Vec<String>) -> Self {
        self.stacks = stacks;
        self
    }
}

/// The pool's record of a worker's latest advertisement.
#[derive(Debug, Clone)]
pub struct WorkerAdvertisement {
    /// Most recent advertisement received.
    pub advertisement: AdvertiseMessage,
    /// When that advertisement arrived.
    pub last_update: Instant,
}

impl WorkerAdvertisement {
    /// Records an advertisement as received at `now`.
    #[must_use]
    pub const fn new(advertisement: AdvertiseMessage, now: Instant) -> Self {
        Self {
            advertisement,
            last_update: now,
        }
    }

    /// Returns the worker identifier.
    pub fn id(&self) -> &str {
        &self.advertisement.id
    }

    /// Returns the advertised available memory.
    #[must_use]
    pub const fn available_memory(&self) -> i64 {
        self.advertisement.available_memory
    }

    /// Returns true if more than `window` has passed since the last update.
    #[must_use]
    pub fn is_expired(&self, window: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.last_update) > window
    }

    /// Returns true if the worker advertised at least `required_memory`.
    #[must_use]
    pub const fn meets_needs(&self, required_memory: i64) -> bool {
        self.advertisement.available_memory >= required_memory
    }
}
