//! Prerender configuration
//!
//! Read from the environment (and `.env`, via dotenvy):
//! - COMMUNITY_SOURCE: URL or file path of the posts document
//! - COMMUNITY_BASE_URL: site base URL, used when COMMUNITY_SOURCE is unset
//! - COMMUNITY_VARIANT: `desktop` (default) or `mobile`
//! - COMMUNITY_DEBUG: `true` to log what the feed component does
//! - COMMUNITY_OUTPUT: file to write the feed markup to (stdout otherwise)

use std::path::PathBuf;

use anyhow::{Context, Result};
use community_feed::adapters::{HttpPostSource, MemoryStorage};
use community_feed::domain::ports::client_storage::DEBUG_KEY;
use community_feed::error::ConfigError;
use community_feed::{FeedConfig, PageVariant, Url};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/";

/// Log filter when RUST_LOG is unset and COMMUNITY_DEBUG is on
const DEBUG_LOG_DIRECTIVE: &str = "community_feed=debug,community_prerender=info";

/// Log filter when RUST_LOG is unset
const DEFAULT_LOG_DIRECTIVE: &str = "info";

/// Where the posts document is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    Url(Url),
    File(PathBuf),
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceLocation::Url(url) => write!(f, "{}", url),
            SourceLocation::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PrerenderConfig {
    pub source: SourceLocation,
    pub variant: PageVariant,
    pub debug: bool,
    pub output: Option<PathBuf>,
}

impl PrerenderConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from a variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let variant = match var("COMMUNITY_VARIANT") {
            Some(value) => value
                .parse::<PageVariant>()
                .context("COMMUNITY_VARIANT must be `desktop` or `mobile`")?,
            None => PageVariant::default(),
        };

        let source = match var("COMMUNITY_SOURCE") {
            Some(value) => parse_source(value.trim())?,
            None => {
                let base =
                    var("COMMUNITY_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
                let http = HttpPostSource::from_base(&base, variant.posts_path())
                    .context("COMMUNITY_BASE_URL is not a valid base URL")?;
                SourceLocation::Url(http.url().clone())
            }
        };

        Ok(Self {
            source,
            variant,
            debug: var("COMMUNITY_DEBUG").as_deref() == Some("true"),
            output: var("COMMUNITY_OUTPUT").map(PathBuf::from),
        })
    }

    /// Client storage as the page would see it
    pub fn storage(&self) -> MemoryStorage {
        let mut storage = MemoryStorage::new();
        if self.debug {
            storage.set_item(DEBUG_KEY, "true");
        }
        storage
    }

    pub fn feed_config(&self) -> FeedConfig {
        FeedConfig::for_variant(self.variant).with_storage(&self.storage())
    }

    /// Fallback tracing filter, so COMMUNITY_DEBUG alone makes the feed's
    /// debug lines visible
    pub fn default_log_directive(&self) -> &'static str {
        if self.debug {
            DEBUG_LOG_DIRECTIVE
        } else {
            DEFAULT_LOG_DIRECTIVE
        }
    }
}

fn parse_source(value: &str) -> Result<SourceLocation> {
    let lower = value.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        let url = Url::parse(value)
            .map_err(|e| ConfigError::InvalidSource(format!("{}: {}", value, e)))
            .context("COMMUNITY_SOURCE is not a valid URL")?;
        return Ok(SourceLocation::Url(url));
    }
    Ok(SourceLocation::File(PathBuf::from(value)))
}
