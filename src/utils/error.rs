//! Error handling for tubelink

use thiserror::Error;

/// Failure of a single link resolution
///
/// Every variant is scoped to the link being resolved; none of them affect
/// other in-flight resolutions.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to load {url}: {reason}")]
    Navigation { url: String, reason: String },

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ResolveError {
    /// Wrap a page-level failure for `url`
    pub fn navigation(url: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Navigation {
            url: url.into(),
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_error_mentions_url() {
        let err = ResolveError::navigation("https://www.youtube.com/@x", "timeout");
        let msg = err.to_string();
        assert!(msg.contains("https://www.youtube.com/@x"));
        assert!(msg.contains("timeout"));
    }

    #[test]
    fn http_client_errors_convert() {
        let http_err = reqwest::Client::new().get("not a url").build().unwrap_err();
        let err: ResolveError = http_err.into();
        assert!(matches!(err, ResolveError::Network(_)));
        assert!(err.to_string().starts_with("Network error"));
    }
}
