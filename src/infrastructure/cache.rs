// src/infrastructure/cache.rs
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::ports::cache::CacheInvalidator;
use async_trait::async_trait;
use deadpool_redis::{Config as DeadpoolConfig, Pool, Runtime};
use redis::AsyncCommands;

/// Publishes stale-path batches to a Redis channel the rendering layer
/// subscribes to. Publishing the same path repeatedly is harmless; the
/// consumer treats each entry as "recompute this page".
#[derive(Clone)]
pub struct RedisCacheInvalidator {
    pool: Pool,
    channel: String,
}

impl RedisCacheInvalidator {
    /// Build from a redis URL (e.g. redis://:password@host:6379/0) and the
    /// channel name the rendering layer listens on.
    pub fn from_url(url: &str, channel: impl Into<String>) -> ApplicationResult<Self> {
        let cfg = DeadpoolConfig::from_url(url);
        let pool = cfg
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

        Ok(Self {
            pool,
            channel: channel.into(),
        })
    }
}

#[async_trait]
impl CacheInvalidator for RedisCacheInvalidator {
    async fn invalidate(&self, paths: &[String]) -> ApplicationResult<()> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

        let payload = serde_json::to_string(paths)
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

        conn.publish::<_, _, ()>(&self.channel, payload)
            .await
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        Ok(())
    }
}

/// Sink for deployments without a cache tier; records the signal in the log
/// and drops it.
#[derive(Default, Clone)]
pub struct TracingCacheInvalidator;

#[async_trait]
impl CacheInvalidator for TracingCacheInvalidator {
    async fn invalidate(&self, paths: &[String]) -> ApplicationResult<()> {
        tracing::debug!(?paths, "cache invalidation (no sink configured)");
        Ok(())
    }
}
