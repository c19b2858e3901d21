// src/domain/post/repository.rs
use crate::domain::errors::DomainResult;
use crate::domain::post::entity::{
    BatchAffectedPost, NewPost, Post, PostUpdate, PostUpdateOutcome, StatusChange,
};
use crate::domain::post::value_objects::{PostId, PostListCursor, PostSlug};
use crate::domain::post::version::PostVersion;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Write side of post persistence. Every method that touches more than one
/// row runs as a single transaction inside the implementation; version
/// snapshots and tag replacement commit or roll back with the post row.
#[async_trait]
pub trait PostWriteRepository: Send + Sync {
    /// Insert the post row, its version 1 snapshot and its tag associations
    /// atomically.
    async fn insert(&self, post: NewPost) -> DomainResult<Post>;

    /// Apply a partial update under a row lock held for the whole
    /// transaction. Appends the next version snapshot when title or body is
    /// part of the update, and replaces tag associations when a tag set is
    /// supplied. Returns the pre- and post-update images.
    async fn update(&self, update: PostUpdate) -> DomainResult<PostUpdateOutcome>;

    /// Hard-delete the post; versions and tag rows cascade in the store.
    /// Returns the deleted image.
    async fn delete(&self, id: PostId) -> DomainResult<Post>;

    /// Persist an already validated status transition, guarded by the
    /// `updated_at` the caller observed. A lost race yields `Conflict`.
    async fn apply_status(&self, change: StatusChange) -> DomainResult<Post>;

    async fn delete_many(&self, ids: &[PostId]) -> DomainResult<Vec<BatchAffectedPost>>;

    /// Set-based publish of eligible (draft or scheduled) posts.
    async fn publish_many(
        &self,
        ids: &[PostId],
        now: DateTime<Utc>,
    ) -> DomainResult<Vec<BatchAffectedPost>>;

    /// Set-based archive of eligible (draft, published or scheduled) posts.
    async fn archive_many(
        &self,
        ids: &[PostId],
        now: DateTime<Utc>,
    ) -> DomainResult<Vec<BatchAffectedPost>>;
}

#[async_trait]
pub trait PostReadRepository: Send + Sync {
    async fn find_by_id(&self, id: PostId) -> DomainResult<Option<Post>>;
    async fn find_by_slug(&self, slug: &PostSlug) -> DomainResult<Option<Post>>;
    async fn list_page(
        &self,
        include_drafts: bool,
        limit: u32,
        cursor: Option<PostListCursor>,
    ) -> DomainResult<(Vec<Post>, Option<PostListCursor>)>;
}

/// Read access to the append-only version log. Appending happens inside the
/// write repository's transactions.
#[async_trait]
pub trait PostVersionRepository: Send + Sync {
    async fn list_for_post(&self, post_id: PostId) -> DomainResult<Vec<PostVersion>>;
    async fn find(&self, post_id: PostId, version: i32) -> DomainResult<Option<PostVersion>>;
}
