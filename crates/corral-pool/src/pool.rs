//! Worker pool for capacity-aware placement.

use parking_lot::Mutex;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use corral_bus::MessageBus;

use crate::advertisement::{AdvertiseMessage, WorkerAdvertisement, WorkerId};
use crate::config::PoolConfig;
use crate::error::Result;

/// Worker pool.
///
/// Every read and write goes through one mutex. Placement may evict while it
/// scans, so it needs the whole table to itself.
pub struct WorkerPool {
    config: PoolConfig,
    state: Mutex<PoolState>,
}

struct PoolState {
    workers: HashMap<WorkerId, WorkerAdvertisement>,
    rng: SmallRng,
}

impl WorkerPool {
    /// Creates an empty pool.
    #[must_use]
    pub fn new(config: PoolConfig) -> Self {
        Self::with_rng(config, SmallRng::from_entropy())
    }

    /// Creates an empty pool that shuffles with the given RNG.
    #[must_use]
    pub fn with_rng(config: PoolConfig, rng: SmallRng) -> Self {
        Self {
            config,
            state: Mutex::new(PoolState {
                workers: HashMap::new(),
                rng,
            }),
        }
    }

    /// Returns the pool configuration.
    pub const fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Records that `id` currently has `available_memory` free.
    pub fn advertise(&self, id: impl Into<WorkerId>, available_memory: i64) {
        self.process_advertise_message(AdvertiseMessage::new(id, available_memory));
    }

    /// Records an advertisement, replacing any earlier one from the same worker.
    pub fn process_advertise_message(&self, msg: AdvertiseMessage) {
        let id = msg.id.clone();
        let available_memory = msg.available_memory;
        let record = WorkerAdvertisement::new(msg, Instant::now());

        let previous = self.state.lock().workers.insert(id.clone(), record);

        if previous.is_none() {
            debug!(worker_id = %id, available_memory, "Worker joined pool");
        }
    }

    /// Finds a live worker with at least `required_memory` available.
    ///
    /// Workers are visited in a fresh random order on every call and the first
    /// one with enough memory wins. Expired workers met along the way are
    /// evicted. Returns `None` when no live worker qualifies.
    pub fn find_worker(&self, required_memory: i64) -> Option<WorkerId> {
        let window = self.config.advertisement_expiration;
        let mut evicted = Vec::new();

        let found = {
            let mut state = self.state.lock();
            let PoolState { workers, rng } = &mut *state;
            let now = Instant::now();

            let mut ids: Vec<WorkerId> = workers.keys().cloned().collect();
            ids.shuffle(rng);

            let mut found = None;
            for id in ids {
                let Some(worker) = workers.get(&id) else {
                    continue;
                };

                if worker.is_expired(window, now) {
                    workers.remove(&id);
                    evicted.push(id);
                } else if worker.meets_needs(required_memory) {
                    found = Some(id);
                    break;
                }
            }
            found
        };

        for worker_id in &evicted {
            info!(worker_id = %worker_id, "Worker advertisement expired, evicted");
        }
        if found.is_none() {
            debug!(required_memory, "No worker with enough memory");
        }

        found
    }

    /// Gets a copy of a worker's record.
    ///
    /// Does not check expiry.
    pub fn get(&self, worker_id: &str) -> Option<WorkerAdvertisement> {
        self.state.lock().workers.get(worker_id).cloned()
    }

    /// Returns the number of workers in the table, stale ones included.
    pub fn len(&self) -> usize {
        self.state.lock().workers.len()
    }

    /// Returns true if no workers are known.
    pub fn is_empty(&self) -> bool {
        self.state.lock().workers.is_empty()
    }

    /// Returns all known worker IDs.
    pub fn worker_ids(&self) -> Vec<WorkerId> {
        self.state.lock().workers.keys().cloned().collect()
    }

    /// Subscribes to worker advertisements on `bus`.
    ///
    /// Spawns a task on the current tokio runtime that feeds each decoded
    /// advertisement into the pool. Malformed payloads are logged and dropped.
    /// The task finishes when the bus closes the subscription.
    pub fn register_subscriptions(self: &Arc<Self>, bus: &dyn MessageBus) -> Result<JoinHandle<()>> {
        let mut subscription = bus.subscribe(&self.config.advertise_subject)?;
        info!(subject = %subscription.subject(), "Subscribed to worker advertisements");

        let pool = Arc::clone(self);
        Ok(tokio::spawn(async move {
            while let Some(message) = subscription.next().await {
                match message.decode_json::<AdvertiseMessage>() {
                    Ok(msg) => pool.process_advertise_message(msg),
                    Err(e) => {
                        warn!(subject = %message.subject, error = %e, "Dropping malformed advertisement");
                    }
                }
            }
            info!(subject = %subscription.subject(), "Advertisement subscription closed");
        }))
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("config", &self.config)
            .field("workers", &self.len())
            .finish_non_exhaustive()
    }
}
