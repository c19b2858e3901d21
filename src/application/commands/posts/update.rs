// src/application/commands/posts/update.rs
use super::PostCommandService;
use crate::{
    application::{
        dto::PostDto,
        error::ApplicationResult,
        invalidation::{StalePaths, category_path, post_path},
    },
    domain::{
        errors::DomainResult,
        post::{CategoryId, PostBody, PostId, PostSlug, PostTitle, PostUpdate, TagId},
    },
};

/// Partial update. Outer `None` leaves a field untouched; for the nullable
/// fields `Some(None)` clears the stored value.
#[derive(Debug, Default)]
pub struct UpdatePostCommand {
    pub id: i64,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub body: Option<String>,
    pub excerpt: Option<Option<String>>,
    pub cover_image: Option<Option<String>>,
    pub category_id: Option<Option<i64>>,
    pub tag_ids: Option<Vec<i64>>,
}

impl PostCommandService {
    /// Apply a partial edit in one transaction. A change to title or body
    /// appends the next version snapshotting the resulting content; a
    /// supplied tag set fully replaces the junction rows. When the post is
    /// live, both its old and new addresses are reported stale because each
    /// was a valid historical URL.
    pub async fn update_post(&self, command: UpdatePostCommand) -> ApplicationResult<PostDto> {
        let id = PostId::new(command.id)?;
        let mut update = PostUpdate::new(id, self.clock.now());

        if let Some(title) = command.title {
            update = update.with_title(PostTitle::new(title)?);
        }
        if let Some(slug) = command.slug {
            update = update.with_slug(PostSlug::new(slug)?);
        }
        if let Some(body) = command.body {
            update = update.with_body(PostBody::new(body)?);
        }
        if let Some(excerpt) = command.excerpt {
            update = update.with_excerpt(excerpt);
        }
        if let Some(cover_image) = command.cover_image {
            update = update.with_cover_image(cover_image);
        }
        if let Some(category_id) = command.category_id {
            update = update.with_category(category_id.map(CategoryId::new).transpose()?);
        }
        if let Some(tag_ids) = command.tag_ids {
            update = update.with_tag_ids(
                tag_ids
                    .into_iter()
                    .map(TagId::new)
                    .collect::<DomainResult<Vec<_>>>()?,
            );
        }

        let outcome = self.write_repo.update(update).await?;
        let (before, after) = (outcome.before, outcome.after);

        if before.is_published() {
            let mut stale = StalePaths::new();
            stale.mark_post(&before.slug, before.category_id);
            if after.slug != before.slug {
                stale.push(post_path(&after.slug));
            }
            if after.category_id != before.category_id {
                if let Some(category_id) = after.category_id {
                    stale.push(category_path(category_id));
                }
            }
            self.notify_stale(stale).await;
        }

        Ok(after.into())
    }
}
