//! Run configuration for the finder pipeline.
//!
//! Values come from an optional TOML file and are overridden by CLI flags.
//! The resulting [`FinderConfig`] is passed to the pipeline at run start;
//! nothing reads configuration from global state.

use crate::error::{FinderError, Result};
use crate::export::ExportFormat;
use crate::query::MAX_BATCH_SIZE;
use bizfinder_search::{SearchConfig, SearchEngine};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Inclusive bounds for `provider.max_results`.
pub const MAX_RESULTS_RANGE: (usize, usize) = (1, 100);

/// Inclusive upper bound for `provider.delay_seconds`.
pub const MAX_DELAY_SECONDS: f64 = 10.0;

/// Top-level configuration for a finder run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FinderConfig {
    /// Categories searched when no category flag is given.
    pub categories: Vec<String>,
    /// How query strings are built.
    pub query: QueryConfig,
    /// Which provider to call and how politely.
    pub provider: ProviderConfig,
    /// Where and how the result table is written.
    pub export: ExportConfig,
}

/// Query builder settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct QueryConfig {
    /// Domain passed to the `site:` operator.
    pub domain: String,
    /// Location literal quoted into every query.
    pub location: String,
    /// OR-combine several categories into one query.
    pub batch: bool,
    /// Terms per batched query (1..=5).
    pub batch_size: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            domain: "instagram.com".into(),
            location: "Kota Solok".into(),
            batch: false,
            batch_size: MAX_BATCH_SIZE,
        }
    }
}

/// Search provider settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProviderConfig {
    /// Backend to query.
    pub engine: SearchEngine,
    /// Results requested per query.
    pub max_results: usize,
    /// Politeness delay upper bound in seconds; pauses are drawn from
    /// `[delay / 2, delay]`.
    pub delay_seconds: f64,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// DuckDuckGo region code.
    pub region: String,
    /// Interface language hint.
    pub language: String,
    /// Fixed User-Agent instead of the built-in rotation.
    pub user_agent: Option<String>,
    /// Replacement base URL for the provider (testing against a mock server).
    pub endpoint: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            engine: SearchEngine::DuckDuckGo,
            max_results: 20,
            delay_seconds: 1.0,
            timeout_seconds: 10,
            region: "id-id".into(),
            language: "id".into(),
            user_agent: None,
            endpoint: None,
        }
    }
}

/// Export settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory the export file is written to.
    pub output_dir: PathBuf,
    /// File name prefix, e.g. `solok` for `solok_cafe.csv`.
    pub file_prefix: String,
    /// File format.
    pub format: ExportFormat,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            file_prefix: "solok".into(),
            format: ExportFormat::Csv,
        }
    }
}

impl FinderConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| FinderError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Serialize to pretty TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| FinderError::Config(e.to_string()))
    }

    /// Returns the default config file path: `<config dir>/bizfinder/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("bizfinder").join("config.toml")
        } else if let Some(dir) = dirs::config_dir() {
            dir.join("bizfinder").join("config.toml")
        } else {
            PathBuf::from("/tmp/bizfinder-config/config.toml")
        }
    }

    /// Load the default config file if it exists, otherwise use defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load_or_default() -> Result<Self> {
        let path = Self::default_config_path();
        if path.is_file() {
            tracing::debug!(path = %path.display(), "loading config");
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Provider settings in the form the search crate expects.
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            max_results: self.provider.max_results,
            timeout_seconds: self.provider.timeout_seconds,
            region: self.provider.region.clone(),
            language: self.provider.language.clone(),
            user_agent: self.provider.user_agent.clone(),
            endpoint: self.provider.endpoint.clone(),
            ..SearchConfig::default()
        }
        .with_delay_seconds(self.provider.delay_seconds)
    }

    /// Validates this configuration.
    ///
    /// Checks:
    /// - `query.domain` and `query.location` are not blank
    /// - `query.batch_size` is within `1..=5`
    /// - `provider.max_results` is within [`MAX_RESULTS_RANGE`]
    /// - `provider.delay_seconds` is within `0..=10`
    /// - `provider.timeout_seconds` is greater than 0
    /// - `export.file_prefix` is not blank
    pub fn validate(&self) -> Result<()> {
        if self.query.domain.trim().is_empty() {
            return Err(FinderError::Config("query.domain must not be empty".into()));
        }
        if self.query.location.trim().is_empty() {
            return Err(FinderError::Config(
                "query.location must not be empty".into(),
            ));
        }
        if !(1..=MAX_BATCH_SIZE).contains(&self.query.batch_size) {
            return Err(FinderError::Config(format!(
                "query.batch_size must be between 1 and {MAX_BATCH_SIZE}"
            )));
        }
        let (min, max) = MAX_RESULTS_RANGE;
        if !(min..=max).contains(&self.provider.max_results) {
            return Err(FinderError::Config(format!(
                "provider.max_results must be between {min} and {max}"
            )));
        }
        if !(0.0..=MAX_DELAY_SECONDS).contains(&self.provider.delay_seconds) {
            return Err(FinderError::Config(format!(
                "provider.delay_seconds must be between 0 and {MAX_DELAY_SECONDS}"
            )));
        }
        if self.provider.timeout_seconds == 0 {
            return Err(FinderError::Config(
                "provider.timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.export.file_prefix.trim().is_empty() {
            return Err(FinderError::Config(
                "export.file_prefix must not be empty".into(),
            ));
        }
        self.search_config().validate()?;
        Ok(())
    }
}
