// src/infrastructure/repositories/mod.rs
mod error;
mod postgres_post;
mod posts;

pub(crate) use error::map_sqlx;
pub use postgres_post::{PostgresPostReadRepository, PostgresPostWriteRepository};
pub use posts::versions::PostgresPostVersionRepository;
