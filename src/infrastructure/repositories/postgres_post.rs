// src/infrastructure/repositories/postgres_post.rs
use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::post::{
    BatchAffectedPost, CategoryId, NewPost, Post, PostBody, PostId, PostListCursor,
    PostReadRepository, PostSlug, PostStatus, PostTitle, PostUpdate, PostUpdateOutcome,
    PostWriteRepository, StatusChange, TagId,
};
use crate::domain::post::value_objects::AuthorId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool, Postgres, QueryBuilder};
use std::collections::HashMap;

const POST_COLUMNS: &str = "id, title, slug, body, excerpt, cover_image, status, published_at, \
                            scheduled_at, category_id, author_id, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresPostWriteRepository {
    pool: PgPool,
}

impl PostgresPostWriteRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct PostgresPostReadRepository {
    pool: PgPool,
}

impl PostgresPostReadRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PostRow {
    id: i64,
    title: String,
    slug: String,
    body: String,
    excerpt: Option<String>,
    cover_image: Option<String>,
    status: String,
    published_at: Option<DateTime<Utc>>,
    scheduled_at: Option<DateTime<Utc>>,
    category_id: Option<i64>,
    author_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn post_from_row(row: PostRow, tag_ids: Vec<i64>) -> DomainResult<Post> {
    Ok(Post {
        id: PostId::new(row.id)?,
        title: PostTitle::new(row.title)?,
        slug: PostSlug::new(row.slug)?,
        body: PostBody::new(row.body)?,
        excerpt: row.excerpt,
        cover_image: row.cover_image,
        status: row.status.parse::<PostStatus>()?,
        published_at: row.published_at,
        scheduled_at: row.scheduled_at,
        category_id: row.category_id.map(CategoryId::new).transpose()?,
        author_id: AuthorId::new(row.author_id)?,
        tag_ids: tag_ids
            .into_iter()
            .map(TagId::new)
            .collect::<DomainResult<Vec<_>>>()?,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[derive(Debug, FromRow)]
struct BatchAffectedRow {
    id: i64,
    slug: String,
    category_id: Option<i64>,
    prior_status: String,
}

impl TryFrom<BatchAffectedRow> for BatchAffectedPost {
    type Error = DomainError;

    fn try_from(row: BatchAffectedRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PostId::new(row.id)?,
            slug: PostSlug::new(row.slug)?,
            category_id: row.category_id.map(CategoryId::new).transpose()?,
            prior_status: row.prior_status.parse::<PostStatus>()?,
        })
    }
}

async fn fetch_tag_ids(conn: &mut PgConnection, post_id: i64) -> DomainResult<Vec<i64>> {
    sqlx::query_scalar::<_, i64>(
        "SELECT tag_id FROM post_tags WHERE post_id = $1 ORDER BY tag_id",
    )
    .bind(post_id)
    .fetch_all(conn)
    .await
    .map_err(map_sqlx)
}

async fn replace_tags(
    conn: &mut PgConnection,
    post_id: i64,
    tag_ids: &[i64],
) -> DomainResult<()> {
    sqlx::query("DELETE FROM post_tags WHERE post_id = $1")
        .bind(post_id)
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx)?;

    if !tag_ids.is_empty() {
        sqlx::query("INSERT INTO post_tags (post_id, tag_id) SELECT $1, unnest($2::bigint[])")
            .bind(post_id)
            .bind(tag_ids)
            .execute(conn)
            .await
            .map_err(map_sqlx)?;
    }
    Ok(())
}

/// Append the next version snapshot for a post. Safe only while the caller's
/// transaction holds the post's row lock.
async fn append_version(
    conn: &mut PgConnection,
    post_id: i64,
    title: &str,
    body: &str,
    recorded_at: DateTime<Utc>,
) -> DomainResult<()> {
    sqlx::query(
        r#"
        WITH next_version AS (
            SELECT COALESCE(MAX(version) + 1, 1) AS version
            FROM post_versions
            WHERE post_id = $1
        )
        INSERT INTO post_versions (post_id, version, title, body, recorded_at)
        SELECT $1, next_version.version, $2, $3, $4
        FROM next_version
        "#,
    )
    .bind(post_id)
    .bind(title)
    .bind(body)
    .bind(recorded_at)
    .execute(conn)
    .await
    .map_err(map_sqlx)?;

    Ok(())
}

#[async_trait]
impl PostWriteRepository for PostgresPostWriteRepository {
    async fn insert(&self, post: NewPost) -> DomainResult<Post> {
        let NewPost {
            title,
            slug,
            body,
            excerpt,
            cover_image,
            status,
            published_at,
            scheduled_at,
            category_id,
            author_id,
            tag_ids,
            created_at,
            updated_at,
        } = post;

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let row = sqlx::query_as::<_, PostRow>(
            "INSERT INTO posts (title, slug, body, excerpt, cover_image, status, published_at, \
             scheduled_at, category_id, author_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING id, title, slug, body, excerpt, cover_image, status, published_at, \
             scheduled_at, category_id, author_id, created_at, updated_at",
        )
        .bind(title.as_str())
        .bind(slug.as_str())
        .bind(body.as_str())
        .bind(&excerpt)
        .bind(&cover_image)
        .bind(status.as_str())
        .bind(published_at)
        .bind(scheduled_at)
        .bind(category_id.map(i64::from))
        .bind(i64::from(author_id))
        .bind(created_at)
        .bind(updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        sqlx::query(
            "INSERT INTO post_versions (post_id, version, title, body, recorded_at)
             VALUES ($1, 1, $2, $3, $4)",
        )
        .bind(row.id)
        .bind(&row.title)
        .bind(&row.body)
        .bind(created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        let tag_values: Vec<i64> = tag_ids.into_iter().map(i64::from).collect();
        if !tag_values.is_empty() {
            sqlx::query(
                "INSERT INTO post_tags (post_id, tag_id) SELECT $1, unnest($2::bigint[])",
            )
            .bind(row.id)
            .bind(&tag_values)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        }

        tx.commit().await.map_err(map_sqlx)?;

        post_from_row(row, tag_values)
    }

    async fn update(&self, update: PostUpdate) -> DomainResult<PostUpdateOutcome> {
        let PostUpdate {
            id,
            title,
            slug,
            body,
            excerpt,
            cover_image,
            category_id,
            tag_ids,
            updated_at,
        } = update;
        let post_id = i64::from(id);
        let touches_content = title.is_some() || body.is_some();

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        // The row lock is held until commit; it serialises the version
        // read-then-insert against concurrent editors of the same post.
        let before_row = sqlx::query_as::<_, PostRow>(
            "SELECT id, title, slug, body, excerpt, cover_image, status, published_at, \
             scheduled_at, category_id, author_id, created_at, updated_at
             FROM posts WHERE id = $1 FOR UPDATE",
        )
        .bind(post_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::NotFound("post not found".into()))?;

        let before_tags = fetch_tag_ids(&mut tx, post_id).await?;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE posts SET updated_at = ");
        builder.push_bind(updated_at);

        if let Some(title) = title {
            builder.push(", title = ");
            builder.push_bind(title.into_inner());
        }

        if let Some(slug) = slug {
            builder.push(", slug = ");
            builder.push_bind(slug.into_inner());
        }

        if let Some(body) = body {
            builder.push(", body = ");
            builder.push_bind(body.into_inner());
        }

        if let Some(excerpt) = excerpt {
            builder.push(", excerpt = ");
            builder.push_bind(excerpt);
        }

        if let Some(cover_image) = cover_image {
            builder.push(", cover_image = ");
            builder.push_bind(cover_image);
        }

        if let Some(category_id) = category_id {
            builder.push(", category_id = ");
            builder.push_bind(category_id.map(i64::from));
        }

        builder.push(" WHERE id = ");
        builder.push_bind(post_id);
        builder.push(" RETURNING ");
        builder.push(POST_COLUMNS);

        let after_row = builder
            .build_query_as::<PostRow>()
            .fetch_one(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        if touches_content {
            // the UPDATE already merged unsupplied fields, so the returned
            // row carries exactly the resulting title and body
            append_version(&mut tx, post_id, &after_row.title, &after_row.body, updated_at)
                .await?;
        }

        let after_tags = match tag_ids {
            Some(tag_ids) => {
                let tag_values: Vec<i64> = tag_ids.into_iter().map(i64::from).collect();
                replace_tags(&mut tx, post_id, &tag_values).await?;
                tag_values
            }
            None => before_tags.clone(),
        };

        tx.commit().await.map_err(map_sqlx)?;

        Ok(PostUpdateOutcome {
            before: post_from_row(before_row, before_tags)?,
            after: post_from_row(after_row, after_tags)?,
        })
    }

    async fn delete(&self, id: PostId) -> DomainResult<Post> {
        let post_id = i64::from(id);

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let tags = fetch_tag_ids(&mut tx, post_id).await?;

        // versions and tag rows go with the post via ON DELETE CASCADE
        let row = sqlx::query_as::<_, PostRow>(
            "DELETE FROM posts WHERE id = $1
             RETURNING id, title, slug, body, excerpt, cover_image, status, published_at, \
             scheduled_at, category_id, author_id, created_at, updated_at",
        )
        .bind(post_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::NotFound("post not found".into()))?;

        tx.commit().await.map_err(map_sqlx)?;

        post_from_row(row, tags)
    }

    async fn apply_status(&self, change: StatusChange) -> DomainResult<Post> {
        let StatusChange {
            id,
            status,
            published_at,
            scheduled_at,
            original_updated_at,
            updated_at,
        } = change;
        let post_id = i64::from(id);

        let maybe_row = sqlx::query_as::<_, PostRow>(
            "UPDATE posts
             SET status = $2, published_at = $3, scheduled_at = $4, updated_at = $5
             WHERE id = $1 AND updated_at = $6
             RETURNING id, title, slug, body, excerpt, cover_image, status, published_at, \
             scheduled_at, category_id, author_id, created_at, updated_at",
        )
        .bind(post_id)
        .bind(status.as_str())
        .bind(published_at)
        .bind(scheduled_at)
        .bind(updated_at)
        .bind(original_updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        let Some(row) = maybe_row else {
            let exists = sqlx::query_scalar::<_, i64>("SELECT id FROM posts WHERE id = $1")
                .bind(post_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx)?;
            return Err(if exists.is_some() {
                DomainError::Conflict("post changed concurrently, please retry".into())
            } else {
                DomainError::NotFound("post not found".into())
            });
        };

        let mut conn = self.pool.acquire().await.map_err(map_sqlx)?;
        let tags = fetch_tag_ids(&mut conn, post_id).await?;
        post_from_row(row, tags)
    }

    async fn delete_many(&self, ids: &[PostId]) -> DomainResult<Vec<BatchAffectedPost>> {
        let ids: Vec<i64> = ids.iter().copied().map(i64::from).collect();

        let rows = sqlx::query_as::<_, BatchAffectedRow>(
            "DELETE FROM posts WHERE id = ANY($1)
             RETURNING id, slug, category_id, status AS prior_status",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn publish_many(
        &self,
        ids: &[PostId],
        now: DateTime<Utc>,
    ) -> DomainResult<Vec<BatchAffectedPost>> {
        let ids: Vec<i64> = ids.iter().copied().map(i64::from).collect();

        let rows = sqlx::query_as::<_, BatchAffectedRow>(
            r#"
            WITH affected AS (
                SELECT id, slug, category_id, status
                FROM posts
                WHERE id = ANY($1) AND status IN ('draft', 'scheduled')
                FOR UPDATE
            )
            UPDATE posts AS p
            SET status = 'published',
                published_at = COALESCE(p.published_at, $2),
                scheduled_at = NULL,
                updated_at = $2
            FROM affected AS a
            WHERE p.id = a.id
            RETURNING a.id, a.slug, a.category_id, a.status AS prior_status
            "#,
        )
        .bind(&ids)
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn archive_many(
        &self,
        ids: &[PostId],
        now: DateTime<Utc>,
    ) -> DomainResult<Vec<BatchAffectedPost>> {
        let ids: Vec<i64> = ids.iter().copied().map(i64::from).collect();

        let rows = sqlx::query_as::<_, BatchAffectedRow>(
            r#"
            WITH affected AS (
                SELECT id, slug, category_id, status
                FROM posts
                WHERE id = ANY($1) AND status IN ('draft', 'published', 'scheduled')
                FOR UPDATE
            )
            UPDATE posts AS p
            SET status = 'archived',
                scheduled_at = NULL,
                updated_at = $2
            FROM affected AS a
            WHERE p.id = a.id
            RETURNING a.id, a.slug, a.category_id, a.status AS prior_status
            "#,
        )
        .bind(&ids)
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}

impl PostgresPostReadRepository {
    async fn attach_tags(&self, row: PostRow) -> DomainResult<Post> {
        let mut conn = self.pool.acquire().await.map_err(map_sqlx)?;
        let tags = fetch_tag_ids(&mut conn, row.id).await?;
        post_from_row(row, tags)
    }
}

#[async_trait]
impl PostReadRepository for PostgresPostReadRepository {
    async fn find_by_id(&self, id: PostId) -> DomainResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(
            "SELECT id, title, slug, body, excerpt, cover_image, status, published_at, \
             scheduled_at, category_id, author_id, created_at, updated_at
             FROM posts WHERE id = $1",
        )
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        match row {
            Some(row) => Ok(Some(self.attach_tags(row).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_slug(&self, slug: &PostSlug) -> DomainResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(
            "SELECT id, title, slug, body, excerpt, cover_image, status, published_at, \
             scheduled_at, category_id, author_id, created_at, updated_at
             FROM posts WHERE slug = $1",
        )
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        match row {
            Some(row) => Ok(Some(self.attach_tags(row).await?)),
            None => Ok(None),
        }
    }

    async fn list_page(
        &self,
        include_drafts: bool,
        limit: u32,
        cursor: Option<PostListCursor>,
    ) -> DomainResult<(Vec<Post>, Option<PostListCursor>)> {
        let limit = limit.clamp(1, 100);
        let fetch_limit = i64::from(limit) + 1;

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        builder.push(POST_COLUMNS);
        builder.push(" FROM posts");

        let mut has_where = false;
        if !include_drafts {
            builder.push(" WHERE status = 'published'");
            has_where = true;
        }

        if let Some(cursor) = cursor {
            if has_where {
                builder.push(" AND ");
            } else {
                builder.push(" WHERE ");
            }
            builder.push("(created_at, id) < (");
            builder.push_bind(cursor.created_at);
            builder.push(", ");
            builder.push_bind(i64::from(cursor.post_id));
            builder.push(")");
        }

        builder.push(" ORDER BY created_at DESC, id DESC LIMIT ");
        builder.push_bind(fetch_limit);

        let rows = builder
            .build_query_as::<PostRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let tag_rows: Vec<(i64, i64)> = sqlx::query_as(
            "SELECT post_id, tag_id FROM post_tags WHERE post_id = ANY($1) \
             ORDER BY post_id, tag_id",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        let mut tags_by_post: HashMap<i64, Vec<i64>> = HashMap::new();
        for (post_id, tag_id) in tag_rows {
            tags_by_post.entry(post_id).or_default().push(tag_id);
        }

        let mut posts = rows
            .into_iter()
            .map(|row| {
                let tags = tags_by_post.remove(&row.id).unwrap_or_default();
                post_from_row(row, tags)
            })
            .collect::<DomainResult<Vec<_>>>()?;

        let mut next_cursor = None;
        if posts.len() > limit as usize {
            posts.pop();
            if let Some(last) = posts.last() {
                next_cursor = Some(PostListCursor::from_parts(last.created_at, last.id));
            }
        }

        Ok((posts, next_cursor))
    }
}
