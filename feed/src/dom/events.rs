//! Keyboard events and link activation

use serde::Serialize;

use crate::markup::Element;

pub const KEY_ENTER: &str = "Enter";
pub const KEY_SPACE: &str = " ";

/// A key press delivered to a post (DOM `KeyboardEvent.key` values)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardEvent {
    key: String,
    default_prevented: bool,
}

impl KeyboardEvent {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            default_prevented: false,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Result of clicking an anchor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkActivation {
    pub href: String,
    /// `target="_blank"` on the anchor
    pub new_tab: bool,
}

impl LinkActivation {
    /// Simulate a click on an `<a>` element
    pub fn click(anchor: &Element) -> Self {
        Self {
            href: anchor.get_attribute("href").unwrap_or_default().to_string(),
            new_tab: anchor.get_attribute("target") == Some("_blank"),
        }
    }
}

/// Key listener attached to one post; returns the link it activated, if any
pub type KeyHandler =
    Box<dyn Fn(&Element, &mut KeyboardEvent) -> Option<LinkActivation> + Send + Sync>;
