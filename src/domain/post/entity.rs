// src/domain/post/entity.rs
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::post::status::PostStatus;
use crate::domain::post::value_objects::{
    AuthorId, CategoryId, PostBody, PostId, PostSlug, PostTitle, TagId,
};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Post {
    pub id: PostId,
    pub title: PostTitle,
    pub slug: PostSlug,
    pub body: PostBody,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub status: PostStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub category_id: Option<CategoryId>,
    pub author_id: AuthorId,
    pub tag_ids: Vec<TagId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    #[must_use]
    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }

    /// Move the post along a legal edge of the status graph and apply the
    /// transition's side effects on `published_at` and `scheduled_at`.
    ///
    /// `published_at` is written only on the first entry into published since
    /// creation or the last revert to draft; published -> draft clears it.
    /// `scheduled_at` survives only while the post stays scheduled.
    pub fn apply_transition(
        &mut self,
        to: PostStatus,
        scheduled_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        self.status.ensure_transition(to)?;

        match to {
            PostStatus::Published => {
                if self.published_at.is_none() {
                    self.published_at = Some(now);
                }
                self.scheduled_at = None;
            }
            PostStatus::Scheduled => {
                self.scheduled_at = Some(Self::validated_schedule(scheduled_at, now)?);
            }
            PostStatus::Draft => {
                if self.status == PostStatus::Published {
                    self.published_at = None;
                }
                self.scheduled_at = None;
            }
            PostStatus::Archived => {
                self.scheduled_at = None;
            }
        }

        self.status = to;
        self.updated_at = now;
        Ok(())
    }

    /// Replace the pending publication time of an already scheduled post.
    pub fn reschedule(
        &mut self,
        scheduled_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        if self.status != PostStatus::Scheduled {
            return Err(DomainError::Validation(
                "only scheduled posts can be rescheduled".into(),
            ));
        }
        self.scheduled_at = Some(Self::validated_schedule(scheduled_at, now)?);
        self.updated_at = now;
        Ok(())
    }

    fn validated_schedule(
        scheduled_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> DomainResult<DateTime<Utc>> {
        let at = scheduled_at.ok_or_else(|| {
            DomainError::Validation("scheduled_at is required for scheduled posts".into())
        })?;
        if at <= now {
            return Err(DomainError::Validation(
                "scheduled_at must be in the future".into(),
            ));
        }
        Ok(at)
    }
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: PostTitle,
    pub slug: PostSlug,
    pub body: PostBody,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub status: PostStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub category_id: Option<CategoryId>,
    pub author_id: AuthorId,
    pub tag_ids: Vec<TagId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial field set for an update. `Option<Option<_>>` distinguishes
/// "leave untouched" (outer `None`) from "set to null" (`Some(None)`).
/// An absent `tag_ids` leaves the existing associations as they are.
#[derive(Debug, Clone)]
pub struct PostUpdate {
    pub id: PostId,
    pub title: Option<PostTitle>,
    pub slug: Option<PostSlug>,
    pub body: Option<PostBody>,
    pub excerpt: Option<Option<String>>,
    pub cover_image: Option<Option<String>>,
    pub category_id: Option<Option<CategoryId>>,
    pub tag_ids: Option<Vec<TagId>>,
    pub updated_at: DateTime<Utc>,
}

impl PostUpdate {
    #[must_use]
    pub const fn new(id: PostId, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: None,
            slug: None,
            body: None,
            excerpt: None,
            cover_image: None,
            category_id: None,
            tag_ids: None,
            updated_at,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: PostTitle) -> Self {
        self.title = Some(title);
        self
    }

    #[must_use]
    pub fn with_slug(mut self, slug: PostSlug) -> Self {
        self.slug = Some(slug);
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: PostBody) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn with_excerpt(mut self, excerpt: Option<String>) -> Self {
        self.excerpt = Some(excerpt);
        self
    }

    #[must_use]
    pub fn with_cover_image(mut self, cover_image: Option<String>) -> Self {
        self.cover_image = Some(cover_image);
        self
    }

    #[must_use]
    pub fn with_category(mut self, category_id: Option<CategoryId>) -> Self {
        self.category_id = Some(category_id);
        self
    }

    #[must_use]
    pub fn with_tag_ids(mut self, tag_ids: Vec<TagId>) -> Self {
        self.tag_ids = Some(tag_ids);
        self
    }

    /// A new version snapshot is recorded exactly when this returns true.
    #[must_use]
    pub const fn touches_content(&self) -> bool {
        self.title.is_some() || self.body.is_some()
    }
}

/// Pre- and post-update images of a post, both read under the same row lock.
/// The caller needs the old slug and category to invalidate historical URLs.
#[derive(Debug, Clone)]
pub struct PostUpdateOutcome {
    pub before: Post,
    pub after: Post,
}

/// Persistable result of a status transition already validated against the
/// state machine. `original_updated_at` guards against a concurrent writer.
#[derive(Debug, Clone)]
pub struct StatusChange {
    pub id: PostId,
    pub status: PostStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub original_updated_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StatusChange {
    /// Capture the persistable fields of an already transitioned post.
    #[must_use]
    pub fn from_post(post: &Post, original_updated_at: DateTime<Utc>) -> Self {
        Self {
            id: post.id,
            status: post.status,
            published_at: post.published_at,
            scheduled_at: post.scheduled_at,
            original_updated_at,
            updated_at: post.updated_at,
        }
    }
}

/// Row image returned by the set-based batch statements, carrying what the
/// invalidation layer needs about each touched post.
#[derive(Debug, Clone)]
pub struct BatchAffectedPost {
    pub id: PostId,
    pub slug: PostSlug,
    pub category_id: Option<CategoryId>,
    pub prior_status: PostStatus,
}
