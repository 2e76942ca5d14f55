//! Core types for provider results and provider identification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single item returned by a search provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Title of the result as displayed by the provider.
    pub title: String,
    /// Target URL, with provider redirect wrappers removed.
    pub url: String,
    /// Text snippet under the title. Empty when the provider shows none.
    pub snippet: String,
    /// Which provider returned this result.
    pub engine: String,
}

/// Supported search providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchEngine {
    /// DuckDuckGo HTML endpoint: generic web search, tolerant of automation.
    #[default]
    DuckDuckGo,
    /// Google web search: better coverage, aggressive bot detection.
    Google,
}

impl SearchEngine {
    /// Human-readable provider name, also used as the record source tag.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DuckDuckGo => "DuckDuckGo",
            Self::Google => "Google",
        }
    }

    /// All available providers.
    pub fn all() -> &'static [SearchEngine] {
        &[Self::DuckDuckGo, Self::Google]
    }
}

impl fmt::Display for SearchEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchEngine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "duckduckgo" | "ddg" => Ok(Self::DuckDuckGo),
            "google" => Ok(Self::Google),
            other => Err(format!(
                "unknown provider `{other}` (use duckduckgo|google)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_engine_display() {
        assert_eq!(SearchEngine::DuckDuckGo.to_string(), "DuckDuckGo");
        assert_eq!(SearchEngine::Google.to_string(), "Google");
    }

    #[test]
    fn search_engine_all() {
        let all = SearchEngine::all();
        assert_eq!(all.len(), 2);
        assert!(all.contains(&SearchEngine::DuckDuckGo));
        assert!(all.contains(&SearchEngine::Google));
    }

    #[test]
    fn default_is_duckduckgo() {
        assert_eq!(SearchEngine::default(), SearchEngine::DuckDuckGo);
    }

    #[test]
    fn parse_from_str_accepts_aliases() {
        assert_eq!("ddg".parse::<SearchEngine>(), Ok(SearchEngine::DuckDuckGo));
        assert_eq!(
            "DuckDuckGo".parse::<SearchEngine>(),
            Ok(SearchEngine::DuckDuckGo)
        );
        assert_eq!(" google ".parse::<SearchEngine>(), Ok(SearchEngine::Google));
    }

    #[test]
    fn parse_from_str_rejects_unknown() {
        let err = "bing".parse::<SearchEngine>().unwrap_err();
        assert!(err.contains("bing"));
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&SearchEngine::DuckDuckGo).expect("serialize");
        assert_eq!(json, "\"duckduckgo\"");
        let decoded: SearchEngine = serde_json::from_str("\"google\"").expect("deserialize");
        assert_eq!(decoded, SearchEngine::Google);
    }
}
