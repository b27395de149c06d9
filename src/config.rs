use accounts::{HashingParams, PasswordHasher, UserManager};
use anyhow::Result;
use config::{Config, Environment};
use sea_orm::Database;
use serde::Deserialize;
use std::time::Duration;

use crate::cache::FollowCountsCache;
use crate::schemas::AppState;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://socialite.db?mode=rwc";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

/// Runtime settings.
///
/// Built from defaults, then `SOCIALITE_*` environment variables
/// (e.g. `SOCIALITE_CACHE_TTL_SECS=60`), then explicit overrides from the CLI.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub database_url: String,
    pub bind_address: String,
    /// Lifetime of cached follower/following counts
    pub cache_ttl_secs: u64,
    pub cache_max_capacity: u64,
    pub hash_memory_kib: u32,
    pub hash_iterations: u32,
    pub hash_parallelism: u32,
}

impl Settings {
    pub fn load(database_url: Option<&str>, bind_address: Option<&str>) -> Result<Self> {
        let defaults = HashingParams::default();
        let mut builder = Config::builder()
            .set_default("database_url", DEFAULT_DATABASE_URL)?
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("cache_ttl_secs", 300_i64)?
            .set_default("cache_max_capacity", 10_000_i64)?
            .set_default("hash_memory_kib", i64::from(defaults.memory_kib))?
            .set_default("hash_iterations", i64::from(defaults.iterations))?
            .set_default("hash_parallelism", i64::from(defaults.parallelism))?
            .add_source(Environment::with_prefix("SOCIALITE"));

        if let Some(url) = database_url {
            builder = builder.set_override("database_url", url)?;
        }
        if let Some(address) = bind_address {
            builder = builder.set_override("bind_address", address)?;
        }

        Ok(builder.build()?.try_deserialize()?)
    }

    pub fn hashing_params(&self) -> HashingParams {
        HashingParams {
            memory_kib: self.hash_memory_kib,
            iterations: self.hash_iterations,
            parallelism: self.hash_parallelism,
        }
    }
}

/// Initialize application state from settings
pub async fn initialize_app_state(settings: &Settings) -> Result<AppState> {
    tracing::info!("Connecting to database: {}", settings.database_url);
    let db = Database::connect(&settings.database_url).await?;

    let hasher = PasswordHasher::new(settings.hashing_params())?;
    let manager = UserManager::new(db.clone(), hasher);

    let cache = FollowCountsCache::new(
        settings.cache_max_capacity,
        Duration::from_secs(settings.cache_ttl_secs),
    );

    Ok(AppState { db, manager, cache })
}
