// src/application/commands/posts/batch.rs
use super::PostCommandService;
use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        invalidation::StalePaths,
    },
    domain::{
        errors::DomainResult,
        post::{BatchAffectedPost, PostId, PostStatus},
    },
};

/// Hard cap on ids per batch operation. Exceeding it fails before any
/// mutation runs.
pub const BATCH_LIMIT: usize = 100;

pub struct BatchDeleteCommand {
    pub ids: Vec<i64>,
}

pub struct BatchPublishCommand {
    pub ids: Vec<i64>,
}

pub struct BatchArchiveCommand {
    pub ids: Vec<i64>,
}

fn checked_ids(ids: Vec<i64>) -> ApplicationResult<Vec<PostId>> {
    if ids.len() > BATCH_LIMIT {
        return Err(ApplicationError::LimitExceeded {
            limit: BATCH_LIMIT,
            supplied: ids.len(),
        });
    }
    ids.into_iter()
        .map(PostId::new)
        .collect::<DomainResult<Vec<_>>>()
        .map_err(Into::into)
}

impl PostCommandService {
    /// Delete up to [`BATCH_LIMIT`] posts in one set-based statement.
    /// Returns the number of rows actually deleted; unknown ids are skipped.
    pub async fn batch_delete_posts(&self, command: BatchDeleteCommand) -> ApplicationResult<u64> {
        let ids = checked_ids(command.ids)?;
        if ids.is_empty() {
            return Ok(0);
        }

        let affected = self.write_repo.delete_many(&ids).await?;
        self.invalidate_previously_published(&affected).await;
        Ok(affected.len() as u64)
    }

    /// Publish every draft or scheduled post among the ids; others are
    /// silently skipped. All affected posts become visible, so every one of
    /// them is reported stale along with the home listing.
    pub async fn batch_publish_posts(
        &self,
        command: BatchPublishCommand,
    ) -> ApplicationResult<u64> {
        let ids = checked_ids(command.ids)?;
        if ids.is_empty() {
            return Ok(0);
        }

        let now = self.clock.now();
        let affected = self.write_repo.publish_many(&ids, now).await?;

        let mut stale = StalePaths::new();
        for post in &affected {
            stale.mark_post(&post.slug, post.category_id);
        }
        self.notify_stale(stale).await;

        Ok(affected.len() as u64)
    }

    /// Archive every draft, published or scheduled post among the ids.
    /// Only posts that were published lose public pages, so only those are
    /// reported stale.
    pub async fn batch_archive_posts(
        &self,
        command: BatchArchiveCommand,
    ) -> ApplicationResult<u64> {
        let ids = checked_ids(command.ids)?;
        if ids.is_empty() {
            return Ok(0);
        }

        let now = self.clock.now();
        let affected = self.write_repo.archive_many(&ids, now).await?;
        self.invalidate_previously_published(&affected).await;
        Ok(affected.len() as u64)
    }

    async fn invalidate_previously_published(&self, affected: &[BatchAffectedPost]) {
        let mut stale = StalePaths::new();
        for post in affected
            .iter()
            .filter(|post| post.prior_status == PostStatus::Published)
        {
            stale.mark_post(&post.slug, post.category_id);
        }
        self.notify_stale(stale).await;
    }
}
