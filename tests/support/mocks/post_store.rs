// tests/support/mocks/post_store.rs
use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gazette_core::domain::errors::{DomainError, DomainResult};
use gazette_core::domain::post::{
    BatchAffectedPost, NewPost, Post, PostId, PostListCursor, PostReadRepository, PostSlug,
    PostStatus, PostUpdate, PostUpdateOutcome, PostVersion, PostVersionRepository,
    PostWriteRepository, StatusChange,
};

#[derive(Default)]
struct StoreInner {
    posts: HashMap<i64, Post>,
    versions: HashMap<i64, Vec<PostVersion>>,
    next_id: i64,
}

/// In-memory stand-in for the Postgres repositories, mirroring their
/// observable semantics: slug uniqueness, gapless version numbering, tag
/// replacement, optimistic status writes, batch eligibility filtering and
/// cascade deletion.
#[derive(Default)]
pub struct InMemoryPostStore {
    inner: Mutex<StoreInner>,
}

impl InMemoryPostStore {
    /// Place a fully formed post (and its version 1 snapshot) in the store,
    /// bypassing create-time validation. Lets tests start from any status.
    pub fn seed(&self, post: Post) {
        let mut inner = self.inner.lock().unwrap();
        let id = i64::from(post.id);
        inner.next_id = inner.next_id.max(id);
        inner.versions.insert(
            id,
            vec![PostVersion::new(
                post.id,
                1,
                post.title.clone(),
                post.body.clone(),
                post.created_at,
            )],
        );
        inner.posts.insert(id, post);
    }

    pub fn post(&self, id: i64) -> Option<Post> {
        self.inner.lock().unwrap().posts.get(&id).cloned()
    }

    pub fn post_count(&self) -> usize {
        self.inner.lock().unwrap().posts.len()
    }

    pub fn version_numbers(&self, id: i64) -> Vec<i32> {
        let inner = self.inner.lock().unwrap();
        let mut numbers: Vec<i32> = inner
            .versions
            .get(&id)
            .map(|versions| versions.iter().map(|v| v.version).collect())
            .unwrap_or_default();
        numbers.sort_unstable();
        numbers
    }
}

fn slug_taken(inner: &StoreInner, slug: &PostSlug, ignore_id: Option<i64>) -> bool {
    inner
        .posts
        .values()
        .any(|post| post.slug == *slug && Some(i64::from(post.id)) != ignore_id)
}

fn next_version(inner: &StoreInner, id: i64) -> i32 {
    inner
        .versions
        .get(&id)
        .and_then(|versions| versions.iter().map(|v| v.version).max())
        .map_or(1, |max| max + 1)
}

#[async_trait]
impl PostWriteRepository for InMemoryPostStore {
    async fn insert(&self, post: NewPost) -> DomainResult<Post> {
        let mut inner = self.inner.lock().unwrap();

        if slug_taken(&inner, &post.slug, None) {
            return Err(DomainError::Conflict("slug already exists".into()));
        }

        inner.next_id += 1;
        let id = inner.next_id;

        let stored = Post {
            id: PostId::new(id)?,
            title: post.title,
            slug: post.slug,
            body: post.body,
            excerpt: post.excerpt,
            cover_image: post.cover_image,
            status: post.status,
            published_at: post.published_at,
            scheduled_at: post.scheduled_at,
            category_id: post.category_id,
            author_id: post.author_id,
            tag_ids: post.tag_ids,
            created_at: post.created_at,
            updated_at: post.updated_at,
        };

        inner.versions.insert(
            id,
            vec![PostVersion::new(
                stored.id,
                1,
                stored.title.clone(),
                stored.body.clone(),
                stored.created_at,
            )],
        );
        inner.posts.insert(id, stored.clone());

        Ok(stored)
    }

    async fn update(&self, update: PostUpdate) -> DomainResult<PostUpdateOutcome> {
        let mut inner = self.inner.lock().unwrap();
        let id = i64::from(update.id);

        if !inner.posts.contains_key(&id) {
            return Err(DomainError::NotFound("post not found".into()));
        }

        if let Some(slug) = &update.slug {
            if slug_taken(&inner, slug, Some(id)) {
                return Err(DomainError::Conflict("slug already exists".into()));
            }
        }

        let touches_content = update.touches_content();
        let version = next_version(&inner, id);

        let post = inner.posts.get_mut(&id).unwrap();
        let before = post.clone();

        if let Some(title) = update.title {
            post.title = title;
        }
        if let Some(slug) = update.slug {
            post.slug = slug;
        }
        if let Some(body) = update.body {
            post.body = body;
        }
        if let Some(excerpt) = update.excerpt {
            post.excerpt = excerpt;
        }
        if let Some(cover_image) = update.cover_image {
            post.cover_image = cover_image;
        }
        if let Some(category_id) = update.category_id {
            post.category_id = category_id;
        }
        if let Some(tag_ids) = update.tag_ids {
            post.tag_ids = tag_ids;
        }
        post.updated_at = update.updated_at;

        let after = post.clone();

        if touches_content {
            inner.versions.get_mut(&id).unwrap().push(PostVersion::new(
                after.id,
                version,
                after.title.clone(),
                after.body.clone(),
                after.updated_at,
            ));
        }

        Ok(PostUpdateOutcome { before, after })
    }

    async fn delete(&self, id: PostId) -> DomainResult<Post> {
        let mut inner = self.inner.lock().unwrap();
        let id = i64::from(id);
        let post = inner
            .posts
            .remove(&id)
            .ok_or_else(|| DomainError::NotFound("post not found".into()))?;
        inner.versions.remove(&id);
        Ok(post)
    }

    async fn apply_status(&self, change: StatusChange) -> DomainResult<Post> {
        let mut inner = self.inner.lock().unwrap();
        let id = i64::from(change.id);
        let post = inner
            .posts
            .get_mut(&id)
            .ok_or_else(|| DomainError::NotFound("post not found".into()))?;

        if post.updated_at != change.original_updated_at {
            return Err(DomainError::Conflict(
                "post changed concurrently, please retry".into(),
            ));
        }

        post.status = change.status;
        post.published_at = change.published_at;
        post.scheduled_at = change.scheduled_at;
        post.updated_at = change.updated_at;

        Ok(post.clone())
    }

    async fn delete_many(&self, ids: &[PostId]) -> DomainResult<Vec<BatchAffectedPost>> {
        let mut inner = self.inner.lock().unwrap();
        let mut affected = Vec::new();

        for id in ids {
            let id = i64::from(*id);
            if let Some(post) = inner.posts.remove(&id) {
                inner.versions.remove(&id);
                affected.push(BatchAffectedPost {
                    id: post.id,
                    slug: post.slug,
                    category_id: post.category_id,
                    prior_status: post.status,
                });
            }
        }

        Ok(affected)
    }

    async fn publish_many(
        &self,
        ids: &[PostId],
        now: DateTime<Utc>,
    ) -> DomainResult<Vec<BatchAffectedPost>> {
        let mut inner = self.inner.lock().unwrap();
        let mut affected = Vec::new();

        for id in ids {
            let id = i64::from(*id);
            if let Some(post) = inner.posts.get_mut(&id) {
                if !post.status.batch_publishable() {
                    continue;
                }
                affected.push(BatchAffectedPost {
                    id: post.id,
                    slug: post.slug.clone(),
                    category_id: post.category_id,
                    prior_status: post.status,
                });
                post.status = PostStatus::Published;
                post.published_at = post.published_at.or(Some(now));
                post.scheduled_at = None;
                post.updated_at = now;
            }
        }

        Ok(affected)
    }

    async fn archive_many(
        &self,
        ids: &[PostId],
        now: DateTime<Utc>,
    ) -> DomainResult<Vec<BatchAffectedPost>> {
        let mut inner = self.inner.lock().unwrap();
        let mut affected = Vec::new();

        for id in ids {
            let id = i64::from(*id);
            if let Some(post) = inner.posts.get_mut(&id) {
                if !post.status.batch_archivable() {
                    continue;
                }
                affected.push(BatchAffectedPost {
                    id: post.id,
                    slug: post.slug.clone(),
                    category_id: post.category_id,
                    prior_status: post.status,
                });
                post.status = PostStatus::Archived;
                post.scheduled_at = None;
                post.updated_at = now;
            }
        }

        Ok(affected)
    }
}

#[async_trait]
impl PostReadRepository for InMemoryPostStore {
    async fn find_by_id(&self, id: PostId) -> DomainResult<Option<Post>> {
        Ok(self.inner.lock().unwrap().posts.get(&i64::from(id)).cloned())
    }

    async fn find_by_slug(&self, slug: &PostSlug) -> DomainResult<Option<Post>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .posts
            .values()
            .find(|post| post.slug == *slug)
            .cloned())
    }

    async fn list_page(
        &self,
        include_drafts: bool,
        limit: u32,
        cursor: Option<PostListCursor>,
    ) -> DomainResult<(Vec<Post>, Option<PostListCursor>)> {
        let inner = self.inner.lock().unwrap();

        let mut posts: Vec<Post> = inner
            .posts
            .values()
            .filter(|post| include_drafts || post.status == PostStatus::Published)
            .filter(|post| {
                cursor.is_none_or(|cursor| {
                    (post.created_at, post.id) < (cursor.created_at, cursor.post_id)
                })
            })
            .cloned()
            .collect();
        posts.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));

        let limit = limit.clamp(1, 100) as usize;
        let mut next_cursor = None;
        if posts.len() > limit {
            posts.truncate(limit);
            if let Some(last) = posts.last() {
                next_cursor = Some(PostListCursor::from_parts(last.created_at, last.id));
            }
        }

        Ok((posts, next_cursor))
    }
}

#[async_trait]
impl PostVersionRepository for InMemoryPostStore {
    async fn list_for_post(&self, post_id: PostId) -> DomainResult<Vec<PostVersion>> {
        let inner = self.inner.lock().unwrap();
        let mut versions = inner
            .versions
            .get(&i64::from(post_id))
            .cloned()
            .unwrap_or_default();
        versions.sort_by(|a, b| b.version.cmp(&a.version));
        Ok(versions)
    }

    async fn find(&self, post_id: PostId, version: i32) -> DomainResult<Option<PostVersion>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .versions
            .get(&i64::from(post_id))
            .and_then(|versions| versions.iter().find(|v| v.version == version))
            .cloned())
    }
}
