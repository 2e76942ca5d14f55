//! Google search provider with the best coverage but aggressive bot detection.
//!
//! Requests the plain HTML results page and pages through it with the
//! `start` parameter. Google signals throttling with `429` or a redirect to
//! its `/sorry/` interstitial, both of which surface as
//! [`SearchError::RateLimited`].

use crate::config::SearchConfig;
use crate::engine::SearchProvider;
use crate::error::SearchError;
use crate::http;
use crate::types::{SearchEngine, SearchResult};
use reqwest::header::LOCATION;
use reqwest::StatusCode;
use scraper::{Html, Selector};
use url::Url;

const DEFAULT_ENDPOINT: &str = "https://www.google.com/search";

/// Google serves at most this many results per page.
const PAGE_SIZE: usize = 10;

/// Upper bound on pages fetched for one query.
const MAX_PAGES: usize = 10;

/// Google HTML search scraper.
pub struct GoogleEngine;

impl GoogleEngine {
    /// Unwrap Google's `/url?q=<target>&sa=...` redirect links.
    ///
    /// Returns `None` for internal links (`/search?...`, `#`) that do not
    /// point to an external page.
    fn extract_url(href: &str) -> Option<String> {
        if href.starts_with("/url?") {
            let parsed = Url::parse(&format!("https://www.google.com{href}")).ok()?;
            return parsed
                .query_pairs()
                .find(|(key, _)| key == "q" || key == "url")
                .map(|(_, value)| value.into_owned())
                .filter(|target| target.starts_with("http"));
        }
        if href.starts_with("http://") || href.starts_with("https://") {
            return Some(href.to_owned());
        }
        None
    }
}

impl SearchProvider for GoogleEngine {
    async fn search(
        &self,
        query: &str,
        config: &SearchConfig,
    ) -> Result<Vec<SearchResult>, SearchError> {
        tracing::trace!(query, "Google search");

        let client = http::build_client(config)?;
        let endpoint = config.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT);

        let mut results: Vec<SearchResult> = Vec::new();

        for page in 0..MAX_PAGES {
            if page > 0 {
                tokio::time::sleep(config.jitter_delay()).await;
            }

            let remaining = config.max_results.saturating_sub(results.len());
            let num = remaining.min(PAGE_SIZE).to_string();
            let start = (page * PAGE_SIZE).to_string();

            let response = client
                .get(endpoint)
                .query(&[
                    ("q", query),
                    ("num", num.as_str()),
                    ("hl", config.language.as_str()),
                    ("start", start.as_str()),
                    ("safe", "off"),
                ])
                .header("Accept", "text/html,application/xhtml+xml")
                .header("Accept-Language", http::accept_language(&config.language))
                .send()
                .await
                .map_err(|e| SearchError::from_reqwest("Google", e))?;

            let location = response
                .headers()
                .get(LOCATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);
            check_status(response.status(), location.as_deref())?;

            let html = response
                .text()
                .await
                .map_err(|e| SearchError::Http(format!("Google response read failed: {e}")))?;

            tracing::trace!(page, bytes = html.len(), "Google response received");

            if is_block_page(&html) {
                return Err(SearchError::RateLimited {
                    provider: SearchEngine::Google.name().into(),
                    detail: "unusual traffic interstitial".into(),
                });
            }

            let page_results = parse_google_html(&html, remaining)?;
            if page_results.is_empty() {
                break;
            }
            results.extend(page_results);

            if results.len() >= config.max_results {
                break;
            }
        }

        tracing::debug!(count = results.len(), "Google search complete");
        Ok(results)
    }

    fn engine_type(&self) -> SearchEngine {
        SearchEngine::Google
    }
}

/// Map Google status codes and redirects to errors.
fn check_status(status: StatusCode, location: Option<&str>) -> Result<(), SearchError> {
    if http::is_throttle_status(status) {
        return Err(SearchError::RateLimited {
            provider: SearchEngine::Google.name().into(),
            detail: format!("HTTP {}", status.as_u16()),
        });
    }
    if status.is_redirection() {
        let target = location.unwrap_or_default();
        if target.contains("/sorry/") {
            return Err(SearchError::RateLimited {
                provider: SearchEngine::Google.name().into(),
                detail: "redirected to /sorry/".into(),
            });
        }
        return Err(SearchError::Http(format!(
            "Google redirected to {target:?} (consent page?)"
        )));
    }
    if !status.is_success() {
        return Err(SearchError::Http(format!("Google HTTP error: {status}")));
    }
    Ok(())
}

fn is_block_page(html: &str) -> bool {
    html.contains("/sorry/index") || html.contains("unusual traffic from your computer network")
}

/// Parse a Google results page into search results.
///
/// Handles both the full layout (`div.g` blocks with an `h3` title) and the
/// basic layout served to non-JavaScript clients (`div.ezO2md` blocks).
pub(crate) fn parse_google_html(
    html: &str,
    max_results: usize,
) -> Result<Vec<SearchResult>, SearchError> {
    let document = Html::parse_document(html);

    let block_sel = Selector::parse("div.g, div.ezO2md")
        .map_err(|e| SearchError::Parse(format!("invalid result selector: {e:?}")))?;
    let link_sel = Selector::parse("a[href]")
        .map_err(|e| SearchError::Parse(format!("invalid link selector: {e:?}")))?;
    let title_sel = Selector::parse("h3, span.CVA68e")
        .map_err(|e| SearchError::Parse(format!("invalid title selector: {e:?}")))?;
    let snippet_sel = Selector::parse(".VwiC3b, span.FrIlee")
        .map_err(|e| SearchError::Parse(format!("invalid snippet selector: {e:?}")))?;

    let mut results = Vec::new();

    for block in document.select(&block_sel) {
        if results.len() >= max_results {
            break;
        }

        let Some(url) = block
            .select(&link_sel)
            .filter_map(|a| a.value().attr("href"))
            .find_map(GoogleEngine::extract_url)
        else {
            continue;
        };

        let title = block
            .select(&title_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        let snippet = block
            .select(&snippet_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        results.push(SearchResult {
            title,
            url,
            snippet,
            engine: SearchEngine::Google.name().to_string(),
        });
    }

    tracing::debug!(count = results.len(), "Google results parsed");
    Ok(results)
}
