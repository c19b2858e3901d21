// src/application/commands/posts/service.rs
use std::sync::Arc;

use crate::application::invalidation::StalePaths;
use crate::application::ports::{cache::CacheInvalidator, time::Clock};
use crate::domain::post::{
    PostReadRepository, PostWriteRepository, services::PostSlugService,
};

/// The lifecycle manager. Owns every mutation of a post: creation with its
/// first version, versioned content edits, status transitions, deletion and
/// the bounded batch operations, plus the decision of which pages each
/// mutation makes stale.
pub struct PostCommandService {
    pub(super) write_repo: Arc<dyn PostWriteRepository>,
    pub(super) read_repo: Arc<dyn PostReadRepository>,
    pub(super) slug_service: Arc<PostSlugService>,
    pub(super) cache: Arc<dyn CacheInvalidator>,
    pub(super) clock: Arc<dyn Clock>,
}

impl PostCommandService {
    #[must_use]
    pub fn new(
        write_repo: Arc<dyn PostWriteRepository>,
        read_repo: Arc<dyn PostReadRepository>,
        slug_service: Arc<PostSlugService>,
        cache: Arc<dyn CacheInvalidator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            write_repo,
            read_repo,
            slug_service,
            cache,
            clock,
        }
    }

    /// Emit invalidation for a committed mutation. Runs strictly after the
    /// store transaction; a sink failure is logged and swallowed so a
    /// committed content change never fails over a cache signal.
    pub(super) async fn notify_stale(&self, stale: StalePaths) {
        if stale.is_empty() {
            return;
        }
        let paths = stale.into_vec();
        if let Err(err) = self.cache.invalidate(&paths).await {
            tracing::warn!(error = %err, ?paths, "cache invalidation failed");
        }
    }
}
