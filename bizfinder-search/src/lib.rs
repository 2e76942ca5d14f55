//! # bizfinder-search
//!
//! Search provider adapters for bizfinder.
//!
//! This crate turns a query string into a bounded list of `(url, title)`
//! results by scraping public search engines directly, with no API keys or
//! external services.
//!
//! ## Design
//!
//! - Scrapes DuckDuckGo (HTML endpoint) and Google using CSS selectors
//! - One provider per call, pages fetched sequentially with a jittered
//!   politeness delay in between
//! - Throttling and block pages surface as [`SearchError::RateLimited`]
//! - Zero results is a successful, empty outcome
//!
//! ## Security
//!
//! - No API keys or secrets to leak
//! - Queries are logged only at trace level

pub mod config;
pub mod engine;
pub mod engines;
pub mod error;
pub mod http;
pub mod types;

pub use config::SearchConfig;
pub use engine::SearchProvider;
pub use error::{Result, SearchError};
pub use types::{SearchEngine, SearchResult};

/// Run `query` against `provider` after validating `config`.
///
/// # Errors
///
/// Returns [`SearchError::Config`] for an invalid configuration, otherwise
/// whatever the provider reports.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> bizfinder_search::Result<()> {
/// use bizfinder_search::{SearchConfig, SearchEngine};
///
/// let config = SearchConfig::default();
/// let query = r#"site:instagram.com "Kota Solok" "Cafe""#;
/// let results = bizfinder_search::search(&SearchEngine::DuckDuckGo, query, &config).await?;
/// for result in &results {
///     println!("{}: {}", result.title, result.url);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search<P: SearchProvider>(
    provider: &P,
    query: &str,
    config: &SearchConfig,
) -> Result<Vec<SearchResult>> {
    config.validate()?;
    provider.search(query, config).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn search_validates_config_zero_max_results() {
        let config = SearchConfig {
            max_results: 0,
            ..Default::default()
        };
        let result = search(&SearchEngine::DuckDuckGo, "test", &config).await;
        assert!(result.unwrap_err().to_string().contains("max_results"));
    }

    #[tokio::test]
    async fn search_validates_config_zero_timeout() {
        let config = SearchConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let result = search(&SearchEngine::Google, "test", &config).await;
        assert!(result.unwrap_err().to_string().contains("timeout"));
    }

    #[test]
    fn search_engine_dispatch_reports_itself() {
        assert_eq!(SearchEngine::Google.engine_type(), SearchEngine::Google);
        assert_eq!(SearchEngine::DuckDuckGo.provider_tag(), "DuckDuckGo");
    }
}
