//! Corral worker pool - capacity-aware placement over advertised workers.
//!
//! The pool is responsible for:
//!
//! - **Advertisement ingestion**: Recording each worker's latest announced capacity
//! - **Expiration**: Evicting workers whose advertisements have gone stale
//! - **Placement**: Picking a random live worker with enough available memory
//!
//! # Architecture
//!
//! Workers publish advertisements on a message bus. The pool subscribes and
//! upserts each one into a single lock-guarded table. Placement callers query
//! the same table synchronously. Expiration is lazy: stale entries are removed
//! only when a placement scan visits them.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use corral_bus::InMemoryBus;
//! use corral_pool::{PoolConfig, WorkerPool};
//!
//! let bus = InMemoryBus::new();
//! let pool = Arc::new(WorkerPool::new(PoolConfig::load()?));
//! pool.register_subscriptions(&bus)?;
//!
//! if let Some(worker_id) = pool.find_worker(256) {
//!     // start the instance on `worker_id`
//! }
//! ```

pub mod advertisement;
pub mod config;
pub mod error;
pub mod pool;

pub use advertisement::{AdvertiseMessage, WorkerAdvertisement, WorkerId};
pub use config::{PoolConfig, ADVERTISE_SUBJECT, DEFAULT_ADVERTISEMENT_EXPIRATION};
pub use error::{PoolError, Result};
pub use pool::WorkerPool;
