//! Ocean Graph community feed
//!
//! Loads the community posts document, renders one card per post into the
//! page's feed element and enhances the result for keyboard and screen
//! reader users. Uses hexagonal (ports & adapters) architecture: the page,
//! the posts source and the embed widgets are all reached through ports.

pub mod adapters;
pub mod app;
pub mod config;
pub mod dom;
pub mod domain;
pub mod error;
pub mod feed;
pub mod markup;

#[cfg(test)]
mod test_utils;

pub use app::{CommunityService, FeedLoader, InitOutcome};
pub use config::{FeedConfig, PageVariant};
pub use dom::{Environment, Page};
pub use domain::entities::{Post, PostKind, PostType};
pub use error::{ConfigError, LoadError};
pub use feed::{enhance, render, render_feed_html, render_post, render_post_html, EnhanceReport};
pub use reqwest::Url;
