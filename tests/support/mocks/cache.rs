// tests/support/mocks/cache.rs
use std::sync::Mutex;

use async_trait::async_trait;
use gazette_core::application::error::{ApplicationError, ApplicationResult};
use gazette_core::application::ports::cache::CacheInvalidator;

/// Records every invalidation batch in order of emission.
#[derive(Default)]
pub struct RecordingCacheInvalidator {
    batches: Mutex<Vec<Vec<String>>>,
}

impl RecordingCacheInvalidator {
    pub fn batches(&self) -> Vec<Vec<String>> {
        self.batches.lock().unwrap().clone()
    }

    pub fn all_paths(&self) -> Vec<String> {
        self.batches.lock().unwrap().concat()
    }
}

#[async_trait]
impl CacheInvalidator for RecordingCacheInvalidator {
    async fn invalidate(&self, paths: &[String]) -> ApplicationResult<()> {
        self.batches.lock().unwrap().push(paths.to_vec());
        Ok(())
    }
}

/// Always fails; used to prove that sink failures never fail the lifecycle
/// operation that produced the signal.
#[derive(Default)]
pub struct FailingCacheInvalidator;

#[async_trait]
impl CacheInvalidator for FailingCacheInvalidator {
    async fn invalidate(&self, _paths: &[String]) -> ApplicationResult<()> {
        Err(ApplicationError::infrastructure("cache sink unreachable"))
    }
}
