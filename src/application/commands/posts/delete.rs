// src/application/commands/posts/delete.rs
use super::PostCommandService;
use crate::{
    application::{error::ApplicationResult, invalidation::StalePaths},
    domain::post::PostId,
};

pub struct DeletePostCommand {
    pub id: i64,
}

impl PostCommandService {
    /// Hard-delete a post; its versions and tag rows cascade in the store.
    /// Deleting a live post makes its pages stale.
    pub async fn delete_post(&self, command: DeletePostCommand) -> ApplicationResult<()> {
        let id = PostId::new(command.id)?;
        let deleted = self.write_repo.delete(id).await?;

        if deleted.is_published() {
            let mut stale = StalePaths::new();
            stale.mark_post(&deleted.slug, deleted.category_id);
            self.notify_stale(stale).await;
        }

        Ok(())
    }
}
