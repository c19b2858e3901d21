//! Post lifecycle engine for a blog publishing platform.
//!
//! The crate owns an article's full lifecycle: creation with an atomic first
//! content snapshot, monotonically numbered versions on every content edit,
//! a closed status state machine, bounded batch operations, and idempotent
//! cache-invalidation signals emitted after each committed change that can
//! affect publicly visible pages.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod telemetry;
