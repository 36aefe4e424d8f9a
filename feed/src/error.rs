//! Error types for the community feed
//!
//! - `LoadError`: failures while fetching the posts document
//! - `ConfigError`: invalid configuration values
//!
//! None of these escape the loader/renderer/enhancer boundary: the loader
//! turns every `LoadError` into an empty feed and only reports it through
//! debug logging.

use thiserror::Error;

/// Posts document loading errors
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected HTTP status: {status}")]
    Status { status: u16 },

    #[error("Malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Posts document is not an array")]
    NotAnArray,
}

impl LoadError {
    /// HTTP status code, when the failure came from a non-success response
    pub fn status(&self) -> Option<u16> {
        match self {
            LoadError::Status { status } => Some(*status),
            LoadError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown page variant: {0}")]
    InvalidVariant(String),

    #[error("Invalid posts source: {0}")]
    InvalidSource(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_exposes_code() {
        let err = LoadError::Status { status: 404 };
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "Unexpected HTTP status: 404");
    }

    #[test]
    fn non_http_errors_have_no_status() {
        assert_eq!(LoadError::NotAnArray.status(), None);
        assert_eq!(LoadError::InvalidUrl("::".to_string()).status(), None);
    }

    #[test]
    fn parse_error_converts() {
        let json_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err: LoadError = json_err.into();
        assert!(matches!(err, LoadError::Parse(_)));
        assert!(err.to_string().starts_with("Malformed JSON"));
    }

    #[test]
    fn config_error_messages() {
        assert_eq!(
            ConfigError::InvalidVariant("tablet".to_string()).to_string(),
            "Unknown page variant: tablet"
        );
    }
}
