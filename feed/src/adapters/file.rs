//! Local file posts source
//!
//! Used by the prerender binary when the posts document sits next to the
//! site sources instead of behind a web server.

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::ports::PostSource;
use crate::error::LoadError;

/// Reads the posts document from disk on every fetch
#[derive(Debug, Clone)]
pub struct FilePostSource {
    path: PathBuf,
}

impl FilePostSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PostSource for FilePostSource {
    async fn fetch_document(&self) -> Result<Value, LoadError> {
        let bytes = tokio::fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
