//! Profile URL filtering, normalization and handle extraction.
//!
//! Provider results are mostly noise for our purpose: posts, reels, tag
//! pages. [`ProfileFilter`] keeps only URLs that look like a profile root,
//! derives the handle from the last path segment, and drops handles already
//! seen in the current run.

use std::collections::HashSet;

/// Path fragments marking non-profile content.
pub const EXCLUDED_PATH_MARKERS: &[&str] =
    &["/p/", "/reel/", "/reels/", "/stories/", "/explore/", "/tags/"];

/// Title suffixes the platform appends to profile pages, longest first.
const TITLE_ANNOTATIONS: &[&str] = &["• Instagram photos and videos", "• Instagram photos"];

const ELLIPSES: &[&str] = &["...", "…"];

/// Why a provider result was not turned into a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The result had no URL or no title.
    Malformed,
    /// The URL points at a post, reel, story, or tag page.
    NotProfile,
    /// The URL has no path segment to use as a handle.
    EmptyHandle,
    /// The handle is the platform's own domain.
    RootToken,
    /// The handle was already accepted earlier in this run.
    Duplicate,
}

/// A result that passed the filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Lowercase handle without the leading `@`.
    pub handle: String,
    /// Display name derived from the result title.
    pub display_name: String,
    /// Normalized profile URL.
    pub url: String,
}

/// Run-scoped filter holding the set of handles already accepted.
#[derive(Debug, Clone)]
pub struct ProfileFilter {
    domain: String,
    seen: HashSet<String>,
}

impl ProfileFilter {
    /// Create a filter for profiles on `domain` (e.g. `instagram.com`).
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into().to_ascii_lowercase(),
            seen: HashSet::new(),
        }
    }

    /// Check one provider result, recording its handle on success.
    ///
    /// # Errors
    ///
    /// Returns the [`Rejection`] reason when the result is skipped. A
    /// rejection is not a failure of the run.
    pub fn accept(&mut self, url: &str, title: &str) -> Result<Profile, Rejection> {
        let url = url.trim();
        let title = title.trim();
        if url.is_empty() || title.is_empty() {
            return Err(Rejection::Malformed);
        }
        if !is_profile_url(url) {
            return Err(Rejection::NotProfile);
        }

        let normalized = normalize_url(url);
        let handle = extract_handle(normalized);
        if handle.is_empty() {
            return Err(Rejection::EmptyHandle);
        }
        if self.is_root_token(&handle) {
            return Err(Rejection::RootToken);
        }
        if !self.seen.insert(handle.clone()) {
            return Err(Rejection::Duplicate);
        }

        Ok(Profile {
            display_name: display_name(title, &handle),
            url: normalized.to_owned(),
            handle,
        })
    }

    /// Number of distinct handles accepted so far.
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    fn is_root_token(&self, handle: &str) -> bool {
        handle == self.domain || handle.strip_prefix("www.") == Some(self.domain.as_str())
    }
}

/// Returns `false` if the URL (ignoring its query string) contains any
/// [`EXCLUDED_PATH_MARKERS`].
pub fn is_profile_url(url: &str) -> bool {
    let without_query = url.split('?').next().unwrap_or(url);
    !EXCLUDED_PATH_MARKERS
        .iter()
        .any(|marker| without_query.contains(marker))
}

/// Drop the query string and every trailing `/`.
///
/// Idempotent: normalizing a normalized URL returns it unchanged.
pub fn normalize_url(url: &str) -> &str {
    let without_query = url.split('?').next().unwrap_or(url);
    without_query.trim_end_matches('/')
}

/// Last `/`-delimited segment of a normalized URL, lowercased.
pub fn extract_handle(normalized: &str) -> String {
    normalized
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Clean a provider title into a business name.
///
/// Cuts the title at the first `(@`, removes the platform's suffix, and
/// trims. Titles the provider truncated (containing an ellipsis), and
/// titles left empty, fall back to `"<handle> (verify link)"`.
pub fn display_name(title: &str, handle: &str) -> String {
    let mut name = title.split("(@").next().unwrap_or_default().to_owned();
    for annotation in TITLE_ANNOTATIONS {
        name = name.replace(annotation, "");
    }
    let name = name.trim();

    if name.is_empty() || ELLIPSES.iter().any(|e| name.contains(e)) {
        format!("{handle} (verify link)")
    } else {
        name.to_owned()
    }
}
