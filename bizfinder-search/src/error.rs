//! Error types for the bizfinder-search crate.
//!
//! Messages are stable, lower-case strings suitable for showing to the
//! user verbatim.

/// Errors that can occur while querying a search provider.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The provider rejected the request as automated traffic or throttled it.
    #[error("rate limited by {provider}: {detail}")]
    RateLimited {
        /// Provider name, e.g. `"DuckDuckGo"`.
        provider: String,
        /// What the provider answered (status code, block page).
        detail: String,
    },

    /// The provider did not answer within the configured timeout.
    #[error("search timed out: {0}")]
    Timeout(String),

    /// An HTTP request to a provider failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Failed to parse a provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl SearchError {
    /// Returns `true` if the provider is throttling or blocking requests.
    ///
    /// Callers use this to suggest waiting before the user retries.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// Classify a transport failure from `reqwest` for the named provider.
    pub(crate) fn from_reqwest(provider: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(format!("{provider}: {err}"))
        } else {
            Self::Http(format!("{provider} request failed: {err}"))
        }
    }
}

/// Convenience type alias for bizfinder-search results.
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_rate_limited() {
        let err = SearchError::RateLimited {
            provider: "DuckDuckGo".into(),
            detail: "HTTP 202".into(),
        };
        assert_eq!(err.to_string(), "rate limited by DuckDuckGo: HTTP 202");
        assert!(err.is_rate_limited());
    }

    #[test]
    fn display_timeout() {
        let err = SearchError::Timeout("exceeded 10s limit".into());
        assert_eq!(err.to_string(), "search timed out: exceeded 10s limit");
        assert!(!err.is_rate_limited());
    }

    #[test]
    fn display_http() {
        let err = SearchError::Http("connection refused".into());
        assert_eq!(err.to_string(), "HTTP error: connection refused");
    }

    #[test]
    fn display_parse() {
        let err = SearchError::Parse("unexpected HTML structure".into());
        assert_eq!(err.to_string(), "parse error: unexpected HTML structure");
    }

    #[test]
    fn display_config() {
        let err = SearchError::Config("max_results must be > 0".into());
        assert_eq!(err.to_string(), "config error: max_results must be > 0");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchError>();
    }
}
