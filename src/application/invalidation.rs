// src/application/invalidation.rs
//! Logical page paths handed to the cache invalidation sink.

use crate::domain::post::value_objects::{CategoryId, PostSlug};

pub const HOME_PATH: &str = "/";

#[must_use]
pub fn post_path(slug: &PostSlug) -> String {
    format!("/posts/{slug}")
}

#[must_use]
pub fn category_path(category_id: CategoryId) -> String {
    format!("/categories/{}", i64::from(category_id))
}

/// Ordered, duplicate-free collection of stale paths for one emission.
/// Order is preserved so the sink sees the home listing first.
#[derive(Debug, Default)]
pub struct StalePaths {
    paths: Vec<String>,
}

impl StalePaths {
    #[must_use]
    pub const fn new() -> Self {
        Self { paths: Vec::new() }
    }

    pub fn push(&mut self, path: impl Into<String>) {
        let path = path.into();
        if !self.paths.contains(&path) {
            self.paths.push(path);
        }
    }

    /// The standard trio for a post whose visibility changed: home listing,
    /// the post's own page, and its category listing when it has one.
    pub fn mark_post(&mut self, slug: &PostSlug, category_id: Option<CategoryId>) {
        self.push(HOME_PATH);
        self.push(post_path(slug));
        if let Some(category_id) = category_id {
            self.push(category_path(category_id));
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.paths
    }
}
