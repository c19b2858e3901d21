// src/application/queries/posts/list.rs
use super::PostQueryService;
use crate::{
    application::{
        dto::{CursorPage, PostDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{errors::DomainError, post::PostListCursor},
};

pub struct ListPostsQuery {
    pub include_drafts: bool,
    pub limit: u32,
    pub cursor: Option<String>,
}

impl PostQueryService {
    pub async fn list_posts(
        &self,
        query: ListPostsQuery,
    ) -> ApplicationResult<CursorPage<PostDto>> {
        let limit = Self::normalize_limit(query.limit);
        let cursor = Self::decode_cursor(query.cursor.as_deref())?;

        let (records, next_cursor) = self
            .read_repo
            .list_page(query.include_drafts, limit, cursor)
            .await?;

        let items = records.into_iter().map(Into::into).collect();
        Ok(CursorPage::new(
            items,
            next_cursor.map(|cursor| cursor.encode()),
        ))
    }

    fn normalize_limit(limit: u32) -> u32 {
        const DEFAULT_LIMIT: u32 = 20;
        const MAX_LIMIT: u32 = 100;

        if limit == 0 {
            DEFAULT_LIMIT
        } else {
            limit.min(MAX_LIMIT)
        }
    }

    fn decode_cursor(token: Option<&str>) -> ApplicationResult<Option<PostListCursor>> {
        match token {
            Some(value) => match PostListCursor::decode(value) {
                Ok(cursor) => Ok(Some(cursor)),
                Err(DomainError::Validation(msg)) => Err(ApplicationError::validation(msg)),
                Err(other) => Err(ApplicationError::from(other)),
            },
            None => Ok(None),
        }
    }
}
