// src/infrastructure/repositories/error.rs
use crate::domain::errors::DomainError;

const CNT_POST_SLUG: &str = "posts_slug_key";
const CNT_POST_AUTHOR: &str = "posts_author_id_fkey";
const CNT_POST_CATEGORY: &str = "posts_category_id_fkey";
const CNT_POST_TAG: &str = "post_tags_tag_id_fkey";
const CNT_VERSION_SEQUENCE: &str = "post_versions_post_id_version_key";
const CNT_POST_SCHEDULED_CHECK: &str = "posts_scheduled_requires_timestamp_chk";
const CNT_POST_PUBLISHED_CHECK: &str = "posts_published_requires_timestamp_chk";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_POST_SLUG => DomainError::Conflict("slug already exists".into()),
                    CNT_VERSION_SEQUENCE => {
                        DomainError::Conflict("version number already recorded".into())
                    }
                    CNT_POST_AUTHOR => DomainError::NotFound("author not found".into()),
                    CNT_POST_CATEGORY => DomainError::NotFound("category not found".into()),
                    CNT_POST_TAG => DomainError::NotFound("tag not found".into()),
                    CNT_POST_SCHEDULED_CHECK => {
                        DomainError::Validation("scheduled posts require scheduled_at".into())
                    }
                    CNT_POST_PUBLISHED_CHECK => {
                        DomainError::Validation("published posts require published_at".into())
                    }
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23503" => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            tracing::error!(error = %db_err, "unhandled database error");
            DomainError::Persistence(db_err.message().to_string())
        }
        _ => {
            tracing::error!(error = %err, "storage failure");
            DomainError::Persistence(err.to_string())
        }
    }
}
