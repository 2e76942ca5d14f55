//! bizfinder: find business profiles on social media by category and city.
//!
//! A run builds site-restricted search queries from a category selection,
//! sends them to one search provider, and keeps the results that look like
//! profile pages:
//! Selection → Query plan → Provider → Filter → Records → Export
//!
//! # Architecture
//!
//! - **Query builder** ([`query`]): single-term or OR-batched queries
//! - **Provider** ([`bizfinder_search`]): DuckDuckGo or Google, behind one trait
//! - **Filter** ([`filter`]): drops posts/reels/tags, extracts and dedups handles
//! - **Records** ([`record`]): flat rows, append-only, one per handle
//! - **Pipeline** ([`pipeline`]): sequential run with politeness delays and
//!   progress events
//! - **Export** ([`export`]): CSV or JSON file, terminal table

pub mod categories;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod pipeline;
pub mod progress;
pub mod query;
pub mod record;

pub use bizfinder_search::{SearchEngine, SearchProvider};
pub use config::FinderConfig;
pub use error::{FinderError, Result};
pub use pipeline::{RunOutcome, RunReport, run};
pub use progress::{ProgressCallback, ProgressEvent};
pub use query::{QueryPlan, Selection};
pub use record::ResultRecord;
