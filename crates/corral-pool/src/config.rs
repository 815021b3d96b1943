//! Configuration for the worker pool.

use std::path::Path;
use std::time::Duration;

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::Deserialize;

use crate::error::{PoolError, Result};

/// Subject workers publish advertisements on.
///
/// DEA fleets announce on `dea.advertise`; set `advertise_subject` to match.
pub const ADVERTISE_SUBJECT: &str = "worker.advertise";

/// Age after which an advertisement no longer counts.
pub const DEFAULT_ADVERTISEMENT_EXPIRATION: Duration = Duration::from_secs(10);

const ENV_PREFIX: &str = "CORRAL_POOL_";

/// Worker pool configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Freshness window for advertisements, in seconds.
    #[serde(with = "serde_duration_secs")]
    pub advertisement_expiration: Duration,
    /// Bus subject to receive advertisements on.
    pub advertise_subject: String,
}

impl PoolConfig {
    /// Load configuration from the default sources.
    ///
    /// Later sources override earlier ones:
    /// 1. Default values
    /// 2. `pool.toml` in the current directory (if present)
    /// 3. Environment variables with the `CORRAL_POOL_` prefix
    pub fn load() -> Result<Self> {
        Self::from_file("pool.toml")
    }

    /// Load configuration from a specific TOML file, then the environment.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Figment::new()
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(|e| PoolError::Config(e.to_string()))
    }

    /// Sets the freshness window.
    #[must_use]
    pub const fn with_expiration(mut self, expiration: Duration) -> Self {
        self.advertisement_expiration = expiration;
        self
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            advertisement_expiration: DEFAULT_ADVERTISEMENT_EXPIRATION,
            advertise_subject: ADVERTISE_SUBJECT.to_owned(),
        }
    }
}

/// Serde helper for Duration as seconds.
mod serde_duration_secs {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
