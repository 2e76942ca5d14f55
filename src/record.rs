//! Result records and the assembler that builds them.

use crate::filter::{Profile, ProfileFilter, Rejection};
use bizfinder_search::SearchResult;
use serde::{Deserialize, Serialize};

/// One row of the result table.
///
/// Records are created once and never modified; field names double as the
/// export header row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Business name cleaned from the provider title.
    pub display_name: String,
    /// Profile handle with a leading `@`.
    pub handle: String,
    /// Category term(s) of the query that found this profile. For a batched
    /// query this is the whole batch, not a per-profile classification.
    pub category_label: String,
    /// Normalized profile URL.
    pub source_url: String,
    /// Provider that returned the result.
    pub provider_tag: String,
}

impl ResultRecord {
    /// Export header row, in field order.
    pub const HEADERS: [&'static str; 5] = [
        "display_name",
        "handle",
        "category_label",
        "source_url",
        "provider_tag",
    ];

    /// Build a record from a filtered profile.
    pub fn from_profile(profile: Profile, category_label: &str, provider_tag: &str) -> Self {
        Self {
            display_name: profile.display_name,
            handle: format!("@{}", profile.handle),
            category_label: category_label.to_owned(),
            source_url: profile.url,
            provider_tag: provider_tag.to_owned(),
        }
    }
}

/// Turns provider results into records, deduplicating across the whole run.
#[derive(Debug)]
pub struct RecordAssembler {
    filter: ProfileFilter,
    provider_tag: String,
    records: Vec<ResultRecord>,
    rejected: usize,
}

impl RecordAssembler {
    /// Create an assembler for profiles on `domain` found by `provider_tag`.
    pub fn new(domain: &str, provider_tag: &str) -> Self {
        Self {
            filter: ProfileFilter::new(domain),
            provider_tag: provider_tag.to_owned(),
            records: Vec::new(),
            rejected: 0,
        }
    }

    /// Filter one result and append a record if it is accepted.
    ///
    /// Returns the new record, or the rejection reason.
    pub fn push(
        &mut self,
        result: &SearchResult,
        category_label: &str,
    ) -> Result<&ResultRecord, Rejection> {
        match self.filter.accept(&result.url, &result.title) {
            Ok(profile) => {
                let record = ResultRecord::from_profile(profile, category_label, &self.provider_tag);
                tracing::trace!(handle = %record.handle, "profile accepted");
                self.records.push(record);
                let last = self.records.len() - 1;
                Ok(&self.records[last])
            }
            Err(reason) => {
                tracing::trace!(url = %result.url, ?reason, "result skipped");
                self.rejected += 1;
                Err(reason)
            }
        }
    }

    /// Records accepted so far, in provider order.
    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }

    /// Number of results rejected so far.
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    /// Consume the assembler, returning the records.
    pub fn into_records(self) -> Vec<ResultRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(url: &str, title: &str) -> SearchResult {
        SearchResult {
            title: title.into(),
            url: url.into(),
            snippet: String::new(),
            engine: "DuckDuckGo".into(),
        }
    }

    #[test]
    fn builds_record_with_at_handle() {
        let mut asm = RecordAssembler::new("platform.com", "DuckDuckGo");
        let record = asm
            .push(
                &result(
                    "https://platform.com/cafeku123/",
                    "Cafe Ku (@cafeku123) • Instagram photos",
                ),
                "Cafe",
            )
            .expect("accepted")
            .clone();

        assert_eq!(
            record,
            ResultRecord {
                display_name: "Cafe Ku".into(),
                handle: "@cafeku123".into(),
                category_label: "Cafe".into(),
                source_url: "https://platform.com/cafeku123".into(),
                provider_tag: "DuckDuckGo".into(),
            }
        );
    }

    #[test]
    fn preserves_provider_order_and_counts_rejections() {
        let mut asm = RecordAssembler::new("platform.com", "Google");
        let inputs = [
            result("https://platform.com/zeta", "Zeta"),
            result("https://platform.com/p/xyz", "A Post"),
            result("https://platform.com/alpha/", "Alpha"),
            result("https://platform.com/zeta?hl=en", "Zeta again"),
        ];
        for r in &inputs {
            let _ = asm.push(r, "Cafe, Spa");
        }

        let handles: Vec<&str> = asm.records().iter().map(|r| r.handle.as_str()).collect();
        assert_eq!(handles, vec!["@zeta", "@alpha"]);
        assert_eq!(asm.rejected(), 2);
        assert!(asm.records().iter().all(|r| r.category_label == "Cafe, Spa"));
        assert_eq!(asm.into_records().len(), 2);
    }

    #[test]
    fn headers_match_serialized_field_names() {
        let record = ResultRecord {
            display_name: "A".into(),
            handle: "@a".into(),
            category_label: "Cafe".into(),
            source_url: "https://platform.com/a".into(),
            provider_tag: "Google".into(),
        };
        let json = serde_json::to_value(&record).expect("serialize");
        let obj = json.as_object().expect("object");
        assert_eq!(obj.len(), ResultRecord::HEADERS.len());
        for header in ResultRecord::HEADERS {
            assert!(obj.contains_key(header), "missing {header}");
        }
    }
}
