// src/application/dto/posts.rs
use crate::domain::post::{Post, PostStatus, PostVersion};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDto {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub body: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    pub status: PostStatus,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub category_id: Option<i64>,
    pub author_id: i64,
    pub tag_ids: Vec<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.into(),
            title: post.title.into_inner(),
            slug: post.slug.into_inner(),
            body: post.body.into_inner(),
            excerpt: post.excerpt,
            cover_image: post.cover_image,
            status: post.status,
            published_at: post.published_at,
            scheduled_at: post.scheduled_at,
            category_id: post.category_id.map(Into::into),
            author_id: post.author_id.into(),
            tag_ids: post.tag_ids.into_iter().map(Into::into).collect(),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostVersionDto {
    pub post_id: i64,
    pub version: i32,
    pub title: String,
    pub body: String,
    pub recorded_at: DateTime<Utc>,
}

impl From<PostVersion> for PostVersionDto {
    fn from(version: PostVersion) -> Self {
        Self {
            post_id: version.post_id.into(),
            version: version.version,
            title: version.title.into_inner(),
            body: version.body.into_inner(),
            recorded_at: version.recorded_at,
        }
    }
}
