// src/domain/post/version.rs
use crate::domain::post::value_objects::{PostBody, PostId, PostTitle};
use chrono::{DateTime, Utc};

/// Immutable snapshot of a post's title and body, numbered sequentially per
/// post starting at 1. Versions are only ever created or cascade-deleted
/// with their post, never edited.
#[derive(Debug, Clone)]
pub struct PostVersion {
    pub post_id: PostId,
    pub version: i32,
    pub title: PostTitle,
    pub body: PostBody,
    pub recorded_at: DateTime<Utc>,
}

impl PostVersion {
    #[must_use]
    pub const fn new(
        post_id: PostId,
        version: i32,
        title: PostTitle,
        body: PostBody,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            post_id,
            version,
            title,
            body,
            recorded_at,
        }
    }
}
