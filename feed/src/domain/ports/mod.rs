//! Domain ports (traits)
//!
//! Port traits define what the feed needs from its host environment.
//! Adapters provide concrete implementations of these traits.

pub mod client_storage;
pub mod embed_hook;
pub mod post_source;

pub use client_storage::ClientStorage;
pub use embed_hook::{EmbedHook, EmbedProvider};
pub use post_source::PostSource;
