//! Posts document source port
//!
//! Defines where the raw posts document comes from (HTTP, local file, ...).

use async_trait::async_trait;
use serde_json::Value;

use crate::error::LoadError;

/// Port trait for fetching the posts document
///
/// Implementations return the parsed JSON document as-is; checking that it
/// is an array of records is the loader's job.
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Fetch and parse the posts document
    async fn fetch_document(&self) -> Result<Value, LoadError>;

    /// Human-readable location, used in log lines
    fn location(&self) -> String;
}
