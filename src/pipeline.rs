//! The finder pipeline: plan → provider → filter → records.
//!
//! A run is strictly sequential. Queries go out one at a time in plan
//! order, with a jittered politeness pause between them, and every result
//! passes through one run-scoped [`RecordAssembler`] so a handle found by
//! an earlier query is never repeated.

use crate::config::FinderConfig;
use crate::error::Result;
use crate::progress::{ProgressCallback, ProgressEvent, progress_fraction};
use crate::query::QueryPlan;
use crate::record::{RecordAssembler, ResultRecord};
use bizfinder_search::SearchProvider;

/// Outcome of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Accepted records in provider order.
    pub records: Vec<ResultRecord>,
    /// Queries sent to the provider.
    pub queries_issued: usize,
    /// Results the provider returned across all queries.
    pub results_seen: usize,
    /// Results skipped by the filter.
    pub rejected: usize,
}

/// How a successful run should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The provider returned nothing at all.
    NoResults,
    /// The provider returned results but none were profiles.
    AllFiltered,
    /// At least one profile was found.
    Found(usize),
}

impl RunReport {
    /// Classify the run for user-facing messages.
    pub fn outcome(&self) -> RunOutcome {
        if !self.records.is_empty() {
            RunOutcome::Found(self.records.len())
        } else if self.results_seen == 0 {
            RunOutcome::NoResults
        } else {
            RunOutcome::AllFiltered
        }
    }

    /// One-line summary for the user.
    pub fn summary(&self) -> String {
        match self.outcome() {
            RunOutcome::Found(n) => format!(
                "done: found {n} unique accounts ({} results from {} queries)",
                self.results_seen, self.queries_issued
            ),
            RunOutcome::NoResults => {
                "the provider returned no results; try another category".to_owned()
            }
            RunOutcome::AllFiltered => format!(
                "{} results found but all were filtered out (probably not profile links)",
                self.results_seen
            ),
        }
    }
}

/// Execute every query in `plan` against `provider`.
///
/// Progress events go to `progress` if given. Zero results is a successful,
/// empty report.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or any provider call
/// fails. Records gathered before the failure are discarded.
pub async fn run<P: SearchProvider>(
    provider: &P,
    plan: &QueryPlan,
    config: &FinderConfig,
    progress: Option<&ProgressCallback>,
) -> Result<RunReport> {
    config.validate()?;
    let search_config = config.search_config();
    let emit = |event: ProgressEvent| {
        if let Some(cb) = progress {
            cb(event);
        }
    };

    let mut assembler = RecordAssembler::new(&config.query.domain, provider.provider_tag());
    let mut report = RunReport::default();

    tracing::info!(
        provider = provider.provider_tag(),
        queries = plan.len(),
        "starting run"
    );

    for (index, planned) in plan.iter().enumerate() {
        if index > 0 {
            tokio::time::sleep(search_config.jitter_delay()).await;
        }

        emit(ProgressEvent::QueryStarted {
            index,
            total: plan.len(),
            query: planned.query.clone(),
        });
        tracing::debug!(query = %planned.query, "querying provider");

        let results = provider
            .search(&planned.query, &search_config)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "provider query failed"))?;
        report.queries_issued += 1;
        report.results_seen += results.len();

        let expected = results.len();
        let before = assembler.records().len();

        for (i, result) in results.iter().enumerate() {
            let status = match assembler.push(result, &planned.category_label) {
                Ok(record) => {
                    let handle = record.handle.clone();
                    emit(ProgressEvent::RecordAccepted {
                        handle: handle.clone(),
                    });
                    format!("found: {handle}")
                }
                Err(reason) => format!("skipped ({reason:?}): {}", result.url),
            };
            emit(ProgressEvent::ItemProcessed {
                fraction: progress_fraction(i + 1, expected),
                status,
            });
        }

        let accepted = assembler.records().len() - before;
        tracing::info!(
            query = index + 1,
            returned = expected,
            accepted,
            "query finished"
        );
        emit(ProgressEvent::QueryFinished {
            index,
            returned: expected,
            accepted,
        });
    }

    report.rejected = assembler.rejected();
    report.records = assembler.into_records();
    Ok(report)
}
