//! Error types for the bizfinder pipeline.

use bizfinder_search::SearchError;

/// Top-level error type for a finder run.
#[derive(Debug, thiserror::Error)]
pub enum FinderError {
    /// The search provider failed (network, parse, or rate limit).
    #[error(transparent)]
    Search(#[from] SearchError),

    /// Configuration or selection error.
    #[error("config error: {0}")]
    Config(String),

    /// Writing the result table failed.
    #[error("export error: {0}")]
    Export(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FinderError {
    /// Returns `true` if the provider throttled or blocked the run.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::Search(e) if e.is_rate_limited())
    }

    /// A suggested next step to show alongside the error, if any.
    pub fn hint(&self) -> Option<&'static str> {
        if self.is_rate_limited() {
            Some("the provider is rate limiting requests; wait 1-2 minutes and try again")
        } else {
            None
        }
    }
}

impl From<csv::Error> for FinderError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, FinderError>;
