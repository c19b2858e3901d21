// src/domain/post/services/mod.rs
use std::sync::Arc;

use crate::domain::errors::DomainResult;
use crate::domain::post::repository::PostReadRepository;
use crate::domain::post::value_objects::{PostId, PostSlug, PostTitle};

/// Domain service producing unique slugs for posts whose caller did not
/// supply one.
pub struct PostSlugService {
    read_repo: Arc<dyn PostReadRepository>,
}

impl PostSlugService {
    #[must_use]
    pub fn new(read_repo: Arc<dyn PostReadRepository>) -> Self {
        Self { read_repo }
    }

    /// Slugify the title and append a counter until the result is unused.
    /// `ignore_id` lets an update keep its own current slug.
    pub async fn generate_unique_slug(
        &self,
        title: &PostTitle,
        ignore_id: Option<PostId>,
    ) -> DomainResult<PostSlug> {
        let base = PostSlug::from_title(title)?;
        let mut candidate = base.clone();
        let mut counter = 1u64;

        loop {
            match self.read_repo.find_by_slug(&candidate).await? {
                Some(existing) if ignore_id == Some(existing.id) => return Ok(candidate),
                Some(_) => {
                    candidate = PostSlug::new(format!("{base}-{counter}"))?;
                    counter += 1;
                }
                None => return Ok(candidate),
            }
        }
    }
}
