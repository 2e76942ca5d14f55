//! Search provider implementations.
//!
//! Each module provides a struct implementing [`crate::engine::SearchProvider`]
//! that scrapes one engine's HTML results page. [`SearchEngine`] itself also
//! implements the trait by dispatching to the matching struct, so callers can
//! pick a provider at runtime without boxing.

pub mod duckduckgo;
pub mod google;

pub use duckduckgo::DuckDuckGoEngine;
pub use google::GoogleEngine;

use crate::config::SearchConfig;
use crate::engine::SearchProvider;
use crate::error::SearchError;
use crate::types::{SearchEngine, SearchResult};

impl SearchProvider for SearchEngine {
    async fn search(
        &self,
        query: &str,
        config: &SearchConfig,
    ) -> Result<Vec<SearchResult>, SearchError> {
        match self {
            SearchEngine::DuckDuckGo => DuckDuckGoEngine.search(query, config).await,
            SearchEngine::Google => GoogleEngine.search(query, config).await,
        }
    }

    fn engine_type(&self) -> SearchEngine {
        *self
    }
}
