//! Feed rendering and enhancement

pub mod enhancer;
pub mod renderer;

pub use enhancer::{enhance, preview_text, EnhanceReport, VISIBLE_CLASS};
pub use renderer::{render, render_feed_html, render_post, render_post_html};
