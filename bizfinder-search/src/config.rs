//! Provider configuration with sensible defaults.
//!
//! [`SearchConfig`] controls how many results a provider collects, request
//! timeouts, locale hints, and the politeness delay between page requests.

use crate::error::SearchError;
use std::time::Duration;

/// Configuration for a single provider query.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Maximum number of results to collect. Providers may return fewer.
    pub max_results: usize,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// DuckDuckGo region code (`kl` parameter), e.g. `"id-id"`.
    pub region: String,
    /// Interface language (`hl` for Google, `Accept-Language` for both).
    pub language: String,
    /// Random delay range in milliseconds `(min, max)` slept between page
    /// requests to the same provider.
    pub request_delay_ms: (u64, u64),
    /// Custom User-Agent string. If `None`, rotates through a built-in list
    /// of realistic browser User-Agents.
    pub user_agent: Option<String>,
    /// Replaces the provider's base URL. Used to point adapters at a local
    /// mock server.
    pub endpoint: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: 20,
            timeout_seconds: 10,
            region: "id-id".into(),
            language: "id".into(),
            request_delay_ms: (500, 1000),
            user_agent: None,
            endpoint: None,
        }
    }
}

impl SearchConfig {
    /// Set the politeness delay from a single upper bound in seconds.
    ///
    /// The effective pause is drawn uniformly from `[delay / 2, delay]`.
    pub fn with_delay_seconds(mut self, delay: f64) -> Self {
        let max_ms = (delay.max(0.0) * 1000.0).round() as u64;
        self.request_delay_ms = (max_ms / 2, max_ms);
        self
    }

    /// Draw a jittered pause from `request_delay_ms`.
    pub fn jitter_delay(&self) -> Duration {
        use rand::Rng;

        let (min, max) = self.request_delay_ms;
        if max == 0 || min >= max {
            return Duration::from_millis(max);
        }
        Duration::from_millis(rand::thread_rng().gen_range(min..=max))
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `max_results` must be greater than 0
    /// - `timeout_seconds` must be greater than 0
    /// - `request_delay_ms.0` must be <= `request_delay_ms.1`
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_results == 0 {
            return Err(SearchError::Config(
                "max_results must be greater than 0".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.request_delay_ms.0 > self.request_delay_ms.1 {
            return Err(SearchError::Config(
                "request_delay_ms min must be <= max".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = SearchConfig::default();
        assert_eq!(config.max_results, 20);
        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.region, "id-id");
        assert_eq!(config.request_delay_ms, (500, 1000));
        assert!(config.user_agent.is_none());
        assert!(config.endpoint.is_none());
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(SearchConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_max_results_rejected() {
        let config = SearchConfig {
            max_results: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_results"));
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = SearchConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn invalid_delay_range_rejected() {
        let config = SearchConfig {
            request_delay_ms: (500, 100),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("delay"));
    }

    #[test]
    fn delay_seconds_maps_to_half_open_range() {
        let config = SearchConfig::default().with_delay_seconds(1.5);
        assert_eq!(config.request_delay_ms, (750, 1500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn negative_delay_clamps_to_zero() {
        let config = SearchConfig::default().with_delay_seconds(-2.0);
        assert_eq!(config.request_delay_ms, (0, 0));
        assert_eq!(config.jitter_delay(), Duration::ZERO);
    }

    #[test]
    fn jitter_stays_within_range() {
        let config = SearchConfig {
            request_delay_ms: (10, 20),
            ..Default::default()
        };
        for _ in 0..50 {
            let d = config.jitter_delay();
            assert!(d >= Duration::from_millis(10));
            assert!(d <= Duration::from_millis(20));
        }
    }
}
