//! Query construction from a category selection.
//!
//! Single-term queries look like
//! `site:instagram.com "Kota Solok" "Cafe"`; batched queries OR-combine up to
//! [`MAX_BATCH_SIZE`] quoted terms:
//! `site:instagram.com "Kota Solok" ("Cafe" OR "Bakery")`.
//!
//! Terms are quoted as-is. A term containing `"` yields a malformed query;
//! nothing is escaped.

use crate::config::QueryConfig;
use crate::error::{FinderError, Result};

/// Largest number of terms OR-combined into one query.
pub const MAX_BATCH_SIZE: usize = 5;

/// What the user asked to search for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// One category from the catalog.
    Single(String),
    /// Several categories, searched one by one or in batches.
    Multi(Vec<String>),
    /// A free-text keyword, searched as a single term.
    Keyword(String),
}

impl Selection {
    /// Build a selection from a list of category terms.
    ///
    /// One term becomes [`Selection::Single`], more become [`Selection::Multi`].
    pub fn from_terms(mut terms: Vec<String>) -> Self {
        if terms.len() == 1 {
            Self::Single(terms.remove(0))
        } else {
            Self::Multi(terms)
        }
    }

    /// Non-blank terms in selection order, trimmed.
    pub fn terms(&self) -> Vec<&str> {
        let raw: Vec<&str> = match self {
            Self::Single(term) | Self::Keyword(term) => vec![term.as_str()],
            Self::Multi(terms) => terms.iter().map(String::as_str).collect(),
        };
        raw.into_iter()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Label used to name the export file: the term itself for a single
    /// term, `multi` otherwise.
    pub fn label(&self) -> String {
        match self.terms().as_slice() {
            [only] => (*only).to_owned(),
            _ => "multi".to_owned(),
        }
    }
}

/// One query to send to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedQuery {
    /// Full query string.
    pub query: String,
    /// Terms this query covers.
    pub terms: Vec<String>,
    /// Category label stamped on every record from this query.
    pub category_label: String,
}

/// Ordered list of queries for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPlan {
    queries: Vec<PlannedQuery>,
}

impl QueryPlan {
    /// Build the plan for `selection`.
    ///
    /// Without batching every term gets its own query. With batching the
    /// terms are split into consecutive groups of `config.batch_size`,
    /// preserving order.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::Config`] if the selection has no usable terms
    /// or the batch size is out of range.
    pub fn build(selection: &Selection, config: &QueryConfig) -> Result<Self> {
        let terms = selection.terms();
        if terms.is_empty() {
            return Err(FinderError::Config(
                "no category or keyword selected".into(),
            ));
        }

        let group_size = if config.batch && matches!(selection, Selection::Multi(_)) {
            if !(1..=MAX_BATCH_SIZE).contains(&config.batch_size) {
                return Err(FinderError::Config(format!(
                    "batch size must be between 1 and {MAX_BATCH_SIZE}"
                )));
            }
            config.batch_size
        } else {
            1
        };

        let queries = terms
            .chunks(group_size)
            .map(|group| PlannedQuery {
                query: batch_query(&config.domain, &config.location, group),
                terms: group.iter().map(|t| (*t).to_owned()).collect(),
                category_label: group.join(", "),
            })
            .collect();

        Ok(Self { queries })
    }

    /// Number of queries in the plan.
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    /// Returns `true` if the plan has no queries.
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    /// Iterate over the queries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, PlannedQuery> {
        self.queries.iter()
    }
}

impl<'a> IntoIterator for &'a QueryPlan {
    type Item = &'a PlannedQuery;
    type IntoIter = std::slice::Iter<'a, PlannedQuery>;

    fn into_iter(self) -> Self::IntoIter {
        self.queries.iter()
    }
}

/// `site:<domain> "<location>" "<term>"`
pub fn single_query(domain: &str, location: &str, term: &str) -> String {
    format!(r#"site:{domain} "{location}" "{term}""#)
}

/// `site:<domain> "<location>" ("<t1>" OR "<t2>" ...)`.
///
/// A group of one term falls back to [`single_query`], so single-category
/// queries never carry parentheses or `OR`.
pub fn batch_query<S: AsRef<str>>(domain: &str, location: &str, terms: &[S]) -> String {
    if let [only] = terms {
        return single_query(domain, location, only.as_ref());
    }
    let alternatives = terms
        .iter()
        .map(|t| format!(r#""{}""#, t.as_ref()))
        .collect::<Vec<_>>()
        .join(" OR ");
    format!(r#"site:{domain} "{location}" ({alternatives})"#)
}
