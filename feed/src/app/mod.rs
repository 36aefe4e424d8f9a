//! Application layer
//!
//! Orchestrates the feed startup: load the posts document through the
//! `PostSource` port, render it into the page, enhance the result.

pub mod community_service;
pub mod loader;

pub use community_service::{CommunityService, InitOutcome};
pub use loader::FeedLoader;
