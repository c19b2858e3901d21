// src/application/commands/posts/create.rs
use super::PostCommandService;
use crate::{
    application::{
        dto::PostDto,
        error::{ApplicationError, ApplicationResult},
        invalidation::StalePaths,
    },
    domain::{
        errors::DomainResult,
        post::{AuthorId, CategoryId, NewPost, PostBody, PostSlug, PostStatus, PostTitle, TagId},
    },
};
use chrono::{DateTime, Utc};

pub struct CreatePostCommand {
    pub title: String,
    pub slug: Option<String>,
    pub body: String,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub category_id: Option<i64>,
    pub tag_ids: Vec<i64>,
    pub status: PostStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub author_id: i64,
}

impl CreatePostCommand {
    #[must_use]
    pub fn builder() -> CreatePostCommandBuilder {
        CreatePostCommandBuilder::default()
    }
}

#[derive(Default)]
pub struct CreatePostCommandBuilder {
    title: Option<String>,
    slug: Option<String>,
    body: Option<String>,
    excerpt: Option<String>,
    cover_image: Option<String>,
    category_id: Option<i64>,
    tag_ids: Vec<i64>,
    status: Option<PostStatus>,
    published_at: Option<DateTime<Utc>>,
    scheduled_at: Option<DateTime<Utc>>,
    author_id: Option<i64>,
}

impl CreatePostCommandBuilder {
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    #[must_use]
    pub fn excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }

    #[must_use]
    pub fn cover_image(mut self, cover_image: impl Into<String>) -> Self {
        self.cover_image = Some(cover_image.into());
        self
    }

    #[must_use]
    pub const fn category_id(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    #[must_use]
    pub fn tag_ids(mut self, tag_ids: Vec<i64>) -> Self {
        self.tag_ids = tag_ids;
        self
    }

    #[must_use]
    pub const fn status(mut self, status: PostStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub const fn published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = Some(published_at);
        self
    }

    #[must_use]
    pub const fn scheduled_at(mut self, scheduled_at: DateTime<Utc>) -> Self {
        self.scheduled_at = Some(scheduled_at);
        self
    }

    #[must_use]
    pub const fn author_id(mut self, author_id: i64) -> Self {
        self.author_id = Some(author_id);
        self
    }

    pub fn build(self) -> Result<CreatePostCommand, &'static str> {
        Ok(CreatePostCommand {
            title: self.title.ok_or("title is required")?,
            slug: self.slug,
            body: self.body.ok_or("body is required")?,
            excerpt: self.excerpt,
            cover_image: self.cover_image,
            category_id: self.category_id,
            tag_ids: self.tag_ids,
            status: self.status.unwrap_or(PostStatus::Draft),
            published_at: self.published_at,
            scheduled_at: self.scheduled_at,
            author_id: self.author_id.ok_or("author_id is required")?,
        })
    }
}

impl PostCommandService {
    /// Create a post together with its version 1 snapshot and tag rows in
    /// one transaction. A post born published makes its pages stale
    /// immediately.
    pub async fn create_post(&self, command: CreatePostCommand) -> ApplicationResult<PostDto> {
        let title = PostTitle::new(command.title)?;
        let body = PostBody::new(command.body)?;
        let author_id = AuthorId::new(command.author_id)?;
        let now = self.clock.now();

        let slug = match command.slug {
            Some(raw) => PostSlug::new(raw)?,
            None => self.slug_service.generate_unique_slug(&title, None).await?,
        };

        let status = command.status;
        let mut published_at = None;
        let mut scheduled_at = None;
        match status {
            PostStatus::Published => {
                published_at = Some(command.published_at.unwrap_or(now));
            }
            PostStatus::Scheduled => {
                let at = command.scheduled_at.ok_or_else(|| {
                    ApplicationError::validation("scheduled_at is required for scheduled posts")
                })?;
                if at <= now {
                    return Err(ApplicationError::validation(
                        "scheduled_at must be in the future",
                    ));
                }
                scheduled_at = Some(at);
            }
            PostStatus::Draft | PostStatus::Archived => {}
        }

        let category_id = command.category_id.map(CategoryId::new).transpose()?;
        let tag_ids = command
            .tag_ids
            .into_iter()
            .map(TagId::new)
            .collect::<DomainResult<Vec<_>>>()?;

        let new_post = NewPost {
            title,
            slug,
            body,
            excerpt: command.excerpt,
            cover_image: command.cover_image,
            status,
            published_at,
            scheduled_at,
            category_id,
            author_id,
            tag_ids,
            created_at: now,
            updated_at: now,
        };

        let created = self.write_repo.insert(new_post).await?;

        if created.is_published() {
            let mut stale = StalePaths::new();
            stale.mark_post(&created.slug, created.category_id);
            self.notify_stale(stale).await;
        }

        Ok(created.into())
    }
}
