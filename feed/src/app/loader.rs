//! Feed loader
//!
//! Fetches the posts document and checks that it is a list of records.
//! Failures never propagate: the caller gets `None` and, with debug logging
//! on, a log line saying what went wrong.

use std::sync::Arc;

use serde_json::Value;

use crate::config::FeedConfig;
use crate::domain::ports::PostSource;
use crate::error::LoadError;

pub struct FeedLoader<S>
where
    S: PostSource,
{
    source: Arc<S>,
    config: FeedConfig,
}

impl<S> FeedLoader<S>
where
    S: PostSource,
{
    pub fn new(source: Arc<S>, config: FeedConfig) -> Self {
        Self { source, config }
    }

    /// Load the post records, or `None` when they are unavailable
    ///
    /// Single attempt: no retry, no timeout beyond the source's own.
    pub async fn load_posts(&self) -> Option<Vec<Value>> {
        match self.fetch().await {
            Ok(posts) => {
                if self.config.debug {
                    tracing::debug!(
                        "{}: {} loaded ({} posts)",
                        self.config.log_scope(),
                        self.source.location(),
                        posts.len()
                    );
                }
                Some(posts)
            }
            Err(e) => {
                self.report(&e);
                None
            }
        }
    }

    /// Fetch the document and require a top-level array
    pub async fn fetch(&self) -> Result<Vec<Value>, LoadError> {
        match self.source.fetch_document().await? {
            Value::Array(posts) => Ok(posts),
            _ => Err(LoadError::NotAnArray),
        }
    }

    fn report(&self, error: &LoadError) {
        if !self.config.debug {
            return;
        }
        let scope = self.config.log_scope();
        let location = self.source.location();
        match error {
            LoadError::Status { status } => {
                tracing::warn!("{}: could not load {}. Status: {}", scope, location, status)
            }
            LoadError::NotAnArray => tracing::warn!("{}: {} is not an array", scope, location),
            other => tracing::error!("{}: error loading {}: {}", scope, location, other),
        }
    }
}
