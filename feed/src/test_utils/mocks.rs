//! Mock implementations of port traits
//!
//! In-memory implementations that can be configured for testing and count
//! how often they were used.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::ports::{EmbedHook, PostSource};
use crate::error::LoadError;

// ============================================================================
// In-Memory Post Source
// ============================================================================

enum Response {
    Document(Value),
    Status(u16),
    Malformed,
}

pub struct InMemoryPostSource {
    response: Response,
    fetches: AtomicUsize,
}

impl InMemoryPostSource {
    /// Source that returns `document` on every fetch
    pub fn with_document(document: Value) -> Self {
        Self {
            response: Response::Document(document),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Source that answers with a non-success HTTP status
    pub fn failing_with_status(status: u16) -> Self {
        Self {
            response: Response::Status(status),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Source whose body is not valid JSON
    pub fn malformed() -> Self {
        Self {
            response: Response::Malformed,
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PostSource for InMemoryPostSource {
    async fn fetch_document(&self) -> Result<Value, LoadError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            Response::Document(document) => Ok(document.clone()),
            Response::Status(status) => Err(LoadError::Status { status: *status }),
            Response::Malformed => Err(serde_json::from_str::<Value>("[{")
                .expect_err("truncated JSON must not parse")
                .into()),
        }
    }

    fn location(&self) -> String {
        "memory://community-posts.json".to_string()
    }
}

// ============================================================================
// Counting Embed Hook
// ============================================================================

#[derive(Default)]
pub struct CountingEmbedHook {
    calls: AtomicUsize,
}

impl CountingEmbedHook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl EmbedHook for CountingEmbedHook {
    fn process(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}
