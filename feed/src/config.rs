//! Feed configuration
//!
//! One explicit value constructed at startup and passed to the loader,
//! renderer and enhancer.

use serde::{Deserialize, Serialize};

use crate::domain::ports::ClientStorage;
use crate::error::ConfigError;

/// Id of the feed container element
pub const FEED_ELEMENT_ID: &str = "community-feed";

/// Accessible label of the feed region
pub const FEED_LABEL: &str = "Timeline de la comunidad Ocean Graph";

/// Fallback handle for TikTok author links
pub const DEFAULT_TIKTOK_HANDLE: &str = "@oceangraficos";

/// Maximum length of a post's accessible label
pub const PREVIEW_MAX_CHARS: usize = 160;

/// Which deployment of the community page is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageVariant {
    #[default]
    Desktop,
    Mobile,
}

impl PageVariant {
    /// Posts document path relative to the page
    pub fn posts_path(&self) -> &'static str {
        match self {
            PageVariant::Desktop => "data/community-posts.json",
            PageVariant::Mobile => "../data/community-posts.json",
        }
    }
}

impl std::fmt::Display for PageVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageVariant::Desktop => write!(f, "desktop"),
            PageVariant::Mobile => write!(f, "mobile"),
        }
    }
}

impl std::str::FromStr for PageVariant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "desktop" => Ok(PageVariant::Desktop),
            "mobile" => Ok(PageVariant::Mobile),
            _ => Err(ConfigError::InvalidVariant(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    pub variant: PageVariant,
    /// Posts document path relative to the page URL
    pub posts_path: String,
    pub feed_element_id: String,
    pub feed_label: String,
    /// Verbose logging of load/render/enhance outcomes
    pub debug: bool,
    /// Mark posts tagged "fijado" with `data-pinned`
    pub pinned_detection: bool,
    /// Render the author link inside TikTok embeds
    pub tiktok_handle_link: bool,
    pub default_tiktok_handle: String,
    pub preview_max_chars: usize,
}

impl FeedConfig {
    /// Defaults for a deployment variant
    ///
    /// The mobile page neither renders the TikTok author link nor marks
    /// pinned posts.
    pub fn for_variant(variant: PageVariant) -> Self {
        let desktop = variant == PageVariant::Desktop;
        Self {
            variant,
            posts_path: variant.posts_path().to_string(),
            feed_element_id: FEED_ELEMENT_ID.to_string(),
            feed_label: FEED_LABEL.to_string(),
            debug: false,
            pinned_detection: desktop,
            tiktok_handle_link: desktop,
            default_tiktok_handle: DEFAULT_TIKTOK_HANDLE.to_string(),
            preview_max_chars: PREVIEW_MAX_CHARS,
        }
    }

    /// Read the debug flag from persisted client storage
    pub fn with_storage(mut self, storage: &dyn ClientStorage) -> Self {
        self.debug = storage.debug_enabled();
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_pinned_detection(mut self, enabled: bool) -> Self {
        self.pinned_detection = enabled;
        self
    }

    /// Prefix for log lines, matching the page the feed runs on
    pub fn log_scope(&self) -> &'static str {
        match self.variant {
            PageVariant::Desktop => "Community",
            PageVariant::Mobile => "Community (mobile)",
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self::for_variant(PageVariant::Desktop)
    }
}
