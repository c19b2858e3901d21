// tests/support/builders.rs
use std::sync::Arc;

use chrono::Duration;
use gazette_core::application::commands::posts::CreatePostCommand;
use gazette_core::application::ports::{cache::CacheInvalidator, time::Clock};
use gazette_core::application::services::ApplicationServices;
use gazette_core::domain::post::{
    AuthorId, Post, PostBody, PostId, PostReadRepository, PostSlug, PostStatus, PostTitle,
    PostVersionRepository, PostWriteRepository,
};

use super::mocks::cache::RecordingCacheInvalidator;
use super::mocks::clock::{FixedClock, fixed_now};
use super::mocks::post_store::InMemoryPostStore;

/// Everything a service-level test needs: the wired services plus handles on
/// the store, the recording sink and the clock behind them.
pub struct TestHarness {
    pub services: ApplicationServices,
    pub store: Arc<InMemoryPostStore>,
    pub cache: Arc<RecordingCacheInvalidator>,
    pub clock: Arc<FixedClock>,
}

pub fn harness() -> TestHarness {
    let store = Arc::new(InMemoryPostStore::default());
    let cache = Arc::new(RecordingCacheInvalidator::default());
    let clock = Arc::new(FixedClock::default());

    let write_repo: Arc<dyn PostWriteRepository> = store.clone();
    let read_repo: Arc<dyn PostReadRepository> = store.clone();
    let version_repo: Arc<dyn PostVersionRepository> = store.clone();
    let cache_port: Arc<dyn CacheInvalidator> = cache.clone();
    let clock_port: Arc<dyn Clock> = clock.clone();

    let services =
        ApplicationServices::new(write_repo, read_repo, version_repo, cache_port, clock_port);

    TestHarness {
        services,
        store,
        cache,
        clock,
    }
}

pub fn draft_command(slug: &str) -> CreatePostCommand {
    CreatePostCommand::builder()
        .title("Hello, World!")
        .slug(slug)
        .body("first body")
        .author_id(1)
        .build()
        .unwrap()
}

pub fn published_command(slug: &str) -> CreatePostCommand {
    CreatePostCommand::builder()
        .title("Hello, World!")
        .slug(slug)
        .body("first body")
        .status(PostStatus::Published)
        .author_id(1)
        .build()
        .unwrap()
}

/// A fully formed post for seeding the store directly, letting a test start
/// from any status without replaying the lifecycle.
pub fn sample_post(id: i64, slug: &str, status: PostStatus) -> Post {
    let now = fixed_now() - Duration::hours(1);
    Post {
        id: PostId::new(id).unwrap(),
        title: PostTitle::new(format!("post {id}")).unwrap(),
        slug: PostSlug::new(slug).unwrap(),
        body: PostBody::new("seeded body").unwrap(),
        excerpt: None,
        cover_image: None,
        status,
        published_at: (status == PostStatus::Published).then_some(now),
        scheduled_at: (status == PostStatus::Scheduled)
            .then_some(fixed_now() + Duration::hours(2)),
        category_id: None,
        author_id: AuthorId::new(1).unwrap(),
        tag_ids: vec![],
        created_at: now,
        updated_at: now,
    }
}
