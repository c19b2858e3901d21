pub mod entity;
pub mod repository;
pub mod services;
pub mod status;
pub mod value_objects;
pub mod version;

pub use entity::{
    BatchAffectedPost, NewPost, Post, PostUpdate, PostUpdateOutcome, StatusChange,
};
pub use repository::{PostReadRepository, PostVersionRepository, PostWriteRepository};
pub use status::PostStatus;
pub use value_objects::{
    AuthorId, CategoryId, PostBody, PostId, PostListCursor, PostSlug, PostTitle, TagId,
};
pub use version::PostVersion;
