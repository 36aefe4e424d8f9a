//! HTTP posts source
//!
//! Fetches the posts document with caching disabled, the way the page
//! script requests it with `cache: 'no-cache'`.

use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::{Client, Url};
use serde_json::Value;

use crate::domain::ports::PostSource;
use crate::error::LoadError;

/// Implementation of `PostSource` over HTTP
#[derive(Debug, Clone)]
pub struct HttpPostSource {
    http: Client,
    url: Url,
}

impl HttpPostSource {
    pub fn new(url: Url) -> Self {
        Self {
            http: Client::new(),
            url,
        }
    }

    /// Resolve a relative posts path against the page's base URL
    ///
    /// `http://site/mobile/` + `../data/community-posts.json` resolves to
    /// `http://site/data/community-posts.json`.
    pub fn from_base(base_url: &str, posts_path: &str) -> Result<Self, LoadError> {
        let base = Url::parse(base_url)
            .map_err(|e| LoadError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        let url = base
            .join(posts_path)
            .map_err(|e| LoadError::InvalidUrl(format!("{}: {}", posts_path, e)))?;
        Ok(Self::new(url))
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl PostSource for HttpPostSource {
    async fn fetch_document(&self) -> Result<Value, LoadError> {
        let response = self
            .http
            .get(self.url.clone())
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn location(&self) -> String {
        self.url.to_string()
    }
}
