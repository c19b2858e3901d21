// src/application/services/mod.rs
use std::sync::Arc;

use crate::application::commands::posts::PostCommandService;
use crate::application::ports::{cache::CacheInvalidator, time::Clock};
use crate::application::queries::posts::PostQueryService;
use crate::domain::post::{
    PostReadRepository, PostVersionRepository, PostWriteRepository, services::PostSlugService,
};

/// Wiring of the application services over their repository and port
/// implementations.
pub struct ApplicationServices {
    pub post_commands: PostCommandService,
    pub post_queries: PostQueryService,
}

impl ApplicationServices {
    #[must_use]
    pub fn new(
        write_repo: Arc<dyn PostWriteRepository>,
        read_repo: Arc<dyn PostReadRepository>,
        version_repo: Arc<dyn PostVersionRepository>,
        cache: Arc<dyn CacheInvalidator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let slug_service = Arc::new(PostSlugService::new(Arc::clone(&read_repo)));

        let post_commands = PostCommandService::new(
            write_repo,
            Arc::clone(&read_repo),
            slug_service,
            cache,
            clock,
        );
        let post_queries = PostQueryService::new(read_repo, version_repo);

        Self {
            post_commands,
            post_queries,
        }
    }
}
