//! Progress event types for a finder run.
//!
//! Provides callback-based progress reporting that decouples the pipeline
//! from presentation (the CLI renders an `indicatif` bar, tests collect
//! events into a `Vec`).

/// Progress events emitted while a run executes.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// A provider query is about to be sent.
    QueryStarted {
        /// Zero-based position in the query plan.
        index: usize,
        /// Number of queries in the plan.
        total: usize,
        /// The query string.
        query: String,
    },

    /// One provider result was examined.
    ItemProcessed {
        /// Fraction of the current query's results processed, in `0.0..=1.0`.
        fraction: f64,
        /// Short status line for display.
        status: String,
    },

    /// A new profile was added to the result table.
    RecordAccepted {
        /// The accepted handle, with `@`.
        handle: String,
    },

    /// A provider query finished.
    QueryFinished {
        /// Zero-based position in the query plan.
        index: usize,
        /// Results the provider returned.
        returned: usize,
        /// Records added from those results.
        accepted: usize,
    },
}

/// Callback type for receiving progress events.
pub type ProgressCallback = Box<dyn Fn(ProgressEvent) + Send + Sync>;

/// `min(processed / expected, 1.0)`; zero when nothing is expected.
pub fn progress_fraction(processed: usize, expected: usize) -> f64 {
    if expected == 0 {
        return 0.0;
    }
    (processed as f64 / expected as f64).min(1.0)
}
