//! Trait definition for pluggable search providers.
//!
//! Each provider (DuckDuckGo, Google) implements [`SearchProvider`] so the
//! calling pipeline never depends on a concrete backend.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::types::{SearchEngine, SearchResult};

/// A pluggable search provider.
///
/// Given a query, an implementation produces a bounded, finite list of
/// [`SearchResult`] values. Each provider handles its own:
///
/// - URL construction with query encoding
/// - HTTP requests with appropriate headers
/// - Paging until `config.max_results` items or the last page
/// - The politeness delay between page requests
/// - Reporting throttling as [`SearchError::RateLimited`]
///
/// Zero results is a successful outcome, not an error.
pub trait SearchProvider: Send + Sync {
    /// Run a query and return at most `config.max_results` results in
    /// provider order.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if a request fails, the response cannot be
    /// parsed, or the provider is rate limiting/blocking requests. Results
    /// from earlier pages are discarded on error.
    fn search(
        &self,
        query: &str,
        config: &SearchConfig,
    ) -> impl std::future::Future<Output = Result<Vec<SearchResult>, SearchError>> + Send;

    /// Returns which [`SearchEngine`] variant this implementation represents.
    fn engine_type(&self) -> SearchEngine;

    /// Tag stamped on records produced from this provider's results.
    fn provider_tag(&self) -> &'static str {
        self.engine_type().name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A mock provider for testing trait bounds and async execution.
    struct MockProvider {
        engine: SearchEngine,
        results: Vec<SearchResult>,
        fail: bool,
    }

    impl SearchProvider for MockProvider {
        async fn search(
            &self,
            _query: &str,
            config: &SearchConfig,
        ) -> Result<Vec<SearchResult>, SearchError> {
            if self.fail {
                return Err(SearchError::RateLimited {
                    provider: self.engine.name().into(),
                    detail: "mock".into(),
                });
            }
            Ok(self
                .results
                .iter()
                .take(config.max_results)
                .cloned()
                .collect())
        }

        fn engine_type(&self) -> SearchEngine {
            self.engine
        }
    }

    fn result(n: usize) -> SearchResult {
        SearchResult {
            title: format!("Shop {n}"),
            url: format!("https://instagram.com/shop{n}"),
            snippet: String::new(),
            engine: "DuckDuckGo".into(),
        }
    }

    #[test]
    fn mock_provider_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MockProvider>();
    }

    #[tokio::test]
    async fn mock_provider_caps_results() {
        let provider = MockProvider {
            engine: SearchEngine::DuckDuckGo,
            results: (0..5).map(result).collect(),
            fail: false,
        };
        let config = SearchConfig {
            max_results: 3,
            ..Default::default()
        };

        let results = provider.search("cafe", &config).await.expect("should succeed");
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].title, "Shop 0");
    }

    #[tokio::test]
    async fn mock_provider_propagates_errors() {
        let provider = MockProvider {
            engine: SearchEngine::Google,
            results: vec![],
            fail: true,
        };
        let err = provider
            .search("cafe", &SearchConfig::default())
            .await
            .unwrap_err();
        assert!(err.is_rate_limited());
        assert!(err.to_string().contains("Google"));
    }

    #[test]
    fn provider_tag_defaults_to_engine_name() {
        let provider = MockProvider {
            engine: SearchEngine::Google,
            results: vec![],
            fail: false,
        };
        assert_eq!(provider.provider_tag(), "Google");
    }
}
