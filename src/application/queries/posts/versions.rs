// src/application/queries/posts/versions.rs
use super::PostQueryService;
use crate::{
    application::{
        dto::PostVersionDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::post::PostId,
};

pub struct ListVersionsQuery {
    pub post_id: i64,
}

pub struct GetVersionQuery {
    pub post_id: i64,
    pub version: i32,
}

impl PostQueryService {
    /// Version history of a post, newest first.
    pub async fn list_versions(
        &self,
        query: ListVersionsQuery,
    ) -> ApplicationResult<Vec<PostVersionDto>> {
        let post_id = PostId::new(query.post_id)?;
        self.read_repo
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("post not found"))?;

        let versions = self.version_repo.list_for_post(post_id).await?;
        Ok(versions.into_iter().map(Into::into).collect())
    }

    pub async fn get_version(&self, query: GetVersionQuery) -> ApplicationResult<PostVersionDto> {
        let post_id = PostId::new(query.post_id)?;
        if query.version < 1 {
            return Err(ApplicationError::validation(
                "version numbers start at 1",
            ));
        }
        self.version_repo
            .find(post_id, query.version)
            .await?
            .map(Into::into)
            .ok_or_else(|| ApplicationError::not_found("version not found"))
    }
}
