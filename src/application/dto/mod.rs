mod pagination;
mod posts;

pub use pagination::CursorPage;
pub use posts::{PostDto, PostVersionDto};
