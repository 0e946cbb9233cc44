//! Error types for the book fetcher.
//!
//! Non-200 responses are not errors: the fetcher reports them and returns no
//! book. Only failures below HTTP (connect, TLS, timeouts, body reads) and
//! client setup land here.

use thiserror::Error;

/// Hard failures while fetching a book.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error fetching {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout fetching {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// A download URL could not be built from the base URL.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The offending URL text.
        url: String,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl FetchError {
    /// Classifies a reqwest error into a timeout or network error.
    pub fn from_reqwest(url: impl Into<String>, source: reqwest::Error) -> Self {
        let url = url.into();
        if source.is_timeout() {
            Self::Timeout { url }
        } else {
            Self::Network { url, source }
        }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_timeout_display() {
        let error = FetchError::Timeout {
            url: "https://www.gutenberg.org/ebooks/1.kindle.images".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("timeout"), "Expected 'timeout' in: {msg}");
        assert!(msg.contains("1.kindle.images"), "Expected URL in: {msg}");
    }

    #[test]
    fn test_fetch_error_invalid_url_display() {
        let msg = FetchError::invalid_url("not a url").to_string();
        assert_eq!(msg, "invalid URL: not a url");
    }
}
