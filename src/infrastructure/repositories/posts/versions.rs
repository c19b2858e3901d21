// src/infrastructure/repositories/posts/versions.rs
use super::super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::post::{PostBody, PostId, PostTitle, PostVersion, PostVersionRepository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

#[derive(Clone)]
pub struct PostgresPostVersionRepository {
    pool: PgPool,
}

impl PostgresPostVersionRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PostVersionRow {
    post_id: i64,
    version: i32,
    title: String,
    body: String,
    recorded_at: DateTime<Utc>,
}

impl TryFrom<PostVersionRow> for PostVersion {
    type Error = DomainError;

    fn try_from(row: PostVersionRow) -> Result<Self, Self::Error> {
        Ok(Self::new(
            PostId::new(row.post_id)?,
            row.version,
            PostTitle::new(row.title)?,
            PostBody::new(row.body)?,
            row.recorded_at,
        ))
    }
}

#[async_trait]
impl PostVersionRepository for PostgresPostVersionRepository {
    async fn list_for_post(&self, post_id: PostId) -> DomainResult<Vec<PostVersion>> {
        let rows = sqlx::query_as::<_, PostVersionRow>(
            "SELECT post_id, version, title, body, recorded_at
             FROM post_versions
             WHERE post_id = $1
             ORDER BY version DESC",
        )
        .bind(i64::from(post_id))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(PostVersion::try_from).collect()
    }

    async fn find(&self, post_id: PostId, version: i32) -> DomainResult<Option<PostVersion>> {
        let row = sqlx::query_as::<_, PostVersionRow>(
            "SELECT post_id, version, title, body, recorded_at
             FROM post_versions
             WHERE post_id = $1 AND version = $2",
        )
        .bind(i64::from(post_id))
        .bind(version)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(PostVersion::try_from).transpose()
    }
}
