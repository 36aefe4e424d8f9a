//! Domain entities
//!
//! Typed views over the untyped post records of the posts document.

pub mod post;

pub use post::{Post, PostImage, PostKind, PostMeta, PostType};
