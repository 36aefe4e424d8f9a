//! Page model
//!
//! The browser surface the feed runs against: an in-memory document plus
//! the event and observation primitives the enhancer registers with.

pub mod events;
pub mod observer;
pub mod page;

pub use events::{KeyHandler, KeyboardEvent, LinkActivation, KEY_ENTER, KEY_SPACE};
pub use observer::{
    IntersectionCallback, IntersectionEntry, IntersectionObserver, Observation, ObserverOptions,
    Rect, RootMargin,
};
pub use page::{Environment, Page, POST_CLASS};
