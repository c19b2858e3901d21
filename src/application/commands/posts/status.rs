// src/application/commands/posts/status.rs
use super::PostCommandService;
use crate::{
    application::{
        dto::PostDto,
        error::{ApplicationError, ApplicationResult},
        invalidation::StalePaths,
    },
    domain::post::{Post, PostId, PostStatus, StatusChange},
};
use chrono::{DateTime, Utc};

pub struct ChangeStatusCommand {
    pub id: i64,
    pub status: PostStatus,
    pub scheduled_at: Option<DateTime<Utc>>,
}

impl PostCommandService {
    /// Move a post along the status graph. Invalidation fires whenever the
    /// transition enters or leaves published; a published -> published
    /// request is accepted as a refresh and still invalidates.
    pub async fn change_status(&self, command: ChangeStatusCommand) -> ApplicationResult<PostDto> {
        let id = PostId::new(command.id)?;
        let mut post = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("post not found"))?;

        let before_status = post.status;
        let now = self.clock.now();

        if command.status == before_status {
            return self
                .refresh_status(post, command.scheduled_at, now)
                .await;
        }

        let original_updated_at = post.updated_at;
        post.apply_transition(command.status, command.scheduled_at, now)?;

        let updated = self
            .write_repo
            .apply_status(StatusChange::from_post(&post, original_updated_at))
            .await?;

        if before_status == PostStatus::Published || updated.is_published() {
            let mut stale = StalePaths::new();
            stale.mark_post(&updated.slug, updated.category_id);
            self.notify_stale(stale).await;
        }

        Ok(updated.into())
    }

    /// Same-status request. Published posts get a content refresh (their
    /// pages are invalidated again), scheduled posts may be rescheduled,
    /// everything else is a pure no-op.
    async fn refresh_status(
        &self,
        mut post: Post,
        scheduled_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> ApplicationResult<PostDto> {
        match post.status {
            PostStatus::Published => {
                let mut stale = StalePaths::new();
                stale.mark_post(&post.slug, post.category_id);
                self.notify_stale(stale).await;
                Ok(post.into())
            }
            PostStatus::Scheduled => {
                let original_updated_at = post.updated_at;
                post.reschedule(scheduled_at, now)?;
                let updated = self
                    .write_repo
                    .apply_status(StatusChange::from_post(&post, original_updated_at))
                    .await?;
                Ok(updated.into())
            }
            PostStatus::Draft | PostStatus::Archived => Ok(post.into()),
        }
    }
}
