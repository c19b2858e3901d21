// src/application/ports/cache.rs
use crate::application::error::ApplicationResult;
use async_trait::async_trait;

/// Sink for cache invalidation signals. Implementations must be idempotent:
/// the same path may arrive any number of times, in any grouping. Delivery
/// failure is the caller's to log and swallow, never to propagate into the
/// lifecycle operation that produced the signal.
#[async_trait]
pub trait CacheInvalidator: Send + Sync {
    async fn invalidate(&self, paths: &[String]) -> ApplicationResult<()>;
}
