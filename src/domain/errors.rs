// src/domain/errors.rs
use crate::domain::post::status::PostStatus;
use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition { from: PostStatus, to: PostStatus },
    #[error("persistence error: {0}")]
    Persistence(String),
}
