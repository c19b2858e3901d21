// src/application/queries/posts/service.rs
use std::sync::Arc;

use crate::domain::post::{PostReadRepository, PostVersionRepository};

pub struct PostQueryService {
    pub(super) read_repo: Arc<dyn PostReadRepository>,
    pub(super) version_repo: Arc<dyn PostVersionRepository>,
}

impl PostQueryService {
    #[must_use]
    pub fn new(
        read_repo: Arc<dyn PostReadRepository>,
        version_repo: Arc<dyn PostVersionRepository>,
    ) -> Self {
        Self {
            read_repo,
            version_repo,
        }
    }
}
