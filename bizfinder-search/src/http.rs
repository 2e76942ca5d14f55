//! Shared HTTP client with User-Agent rotation for provider requests.
//!
//! Provides a configured [`reqwest::Client`] with browser-like headers,
//! cookie support, and rotating User-Agent strings to avoid bot detection.

use crate::config::SearchConfig;
use crate::error::SearchError;
use rand::seq::SliceRandom;
use reqwest::StatusCode;
use std::time::Duration;

/// Realistic browser User-Agent strings, rotated per client.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:133.0) Gecko/20100101 Firefox/133.0",
];

/// Build a [`reqwest::Client`] configured for search engine scraping.
///
/// The client has:
/// - Cookie store enabled (Google consent cookies survive across pages)
/// - Timeout from config
/// - Random User-Agent from built-in rotation list (or custom if configured)
/// - Redirects disabled, so block-page redirects can be detected by the caller
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    let ua = match config.user_agent {
        Some(ref custom) => custom.clone(),
        None => random_user_agent().to_owned(),
    };

    reqwest::Client::builder()
        .cookie_store(true)
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}

/// Select a random User-Agent string from the rotation list.
pub fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS
        .choose(&mut rng)
        .copied()
        // SAFETY: USER_AGENTS is a non-empty const array, choose only returns None on empty slices
        .unwrap_or(USER_AGENTS[0])
}

/// `Accept-Language` header value for a language code such as `"id"`.
pub fn accept_language(language: &str) -> String {
    if language.is_empty() || language == "en" {
        "en-US,en;q=0.9".to_owned()
    } else {
        format!("{language},en-US;q=0.8,en;q=0.7")
    }
}

/// Returns `true` for status codes providers use to throttle automated clients.
pub fn is_throttle_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS | StatusCode::FORBIDDEN | StatusCode::SERVICE_UNAVAILABLE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_user_agent_returns_valid_ua() {
        let ua = random_user_agent();
        assert!(USER_AGENTS.contains(&ua));
        assert!(ua.contains("Mozilla/5.0"));
    }

    #[test]
    fn build_client_with_default_config() {
        let config = SearchConfig::default();
        assert!(build_client(&config).is_ok());
    }

    #[test]
    fn build_client_with_custom_ua() {
        let config = SearchConfig {
            user_agent: Some("CustomBot/1.0".into()),
            ..Default::default()
        };
        assert!(build_client(&config).is_ok());
    }

    #[test]
    fn accept_language_prefers_configured_language() {
        assert_eq!(accept_language("id"), "id,en-US;q=0.8,en;q=0.7");
        assert_eq!(accept_language("en"), "en-US,en;q=0.9");
        assert_eq!(accept_language(""), "en-US,en;q=0.9");
    }

    #[test]
    fn throttle_statuses() {
        assert!(is_throttle_status(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_throttle_status(StatusCode::FORBIDDEN));
        assert!(!is_throttle_status(StatusCode::OK));
        assert!(!is_throttle_status(StatusCode::NOT_FOUND));
    }
}
