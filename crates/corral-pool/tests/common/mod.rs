//! Common test utilities for pool integration tests.

pub mod fixtures;

use corral_bus::{InMemoryBus, Message, MessageBus};
use corral_pool::{AdvertiseMessage, PoolConfig, WorkerPool};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Pool subscribed to an in-memory bus.
pub struct TestPool {
    pub bus: Arc<InMemoryBus>,
    pub pool: Arc<WorkerPool>,
    pub subscription: JoinHandle<()>,
}

impl TestPool {
    /// Creates a subscribed pool with default configuration.
    pub fn new() -> Self {
        Self::with_config(PoolConfig::default())
    }

    /// Creates a subscribed pool with custom configuration.
    pub fn with_config(config: PoolConfig) -> Self {
        let bus = Arc::new(InMemoryBus::new());
        let pool = Arc::new(WorkerPool::new(config));
        let subscription = pool.register_subscriptions(bus.as_ref()).unwrap();

        Self {
            bus,
            pool,
            subscription,
        }
    }

    /// Creates a subscribed pool whose advertisements expire quickly.
    pub fn with_fast_expiry() -> Self {
        Self::with_config(PoolConfig::default().with_expiration(Duration::from_millis(100)))
    }

    /// Publishes an advertisement on the pool's subject.
    pub async fn publish(&self, msg: &AdvertiseMessage) {
        let subject = self.pool.config().advertise_subject.clone();
        self.bus
            .publish(Message::json(subject, msg).unwrap())
            .await
            .unwrap();
    }

    /// Publishes a raw payload on the pool's subject.
    pub async fn publish_raw(&self, payload: &'static [u8]) {
        let subject = self.pool.config().advertise_subject.clone();
        self.bus
            .publish(Message::new(subject, payload))
            .await
            .unwrap();
    }
}

/// Polls `condition` until it holds or two seconds pass.
pub async fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    for _ in 0..200 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}
