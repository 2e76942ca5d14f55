//! DuckDuckGo search  provider: generic web search, tolerant of automation.
//!
//! Uses the HTML-only version at `https://html.duckduckgo.com/html/`
//! which requires no JavaScript. Further pages are requested by replaying
//! the hidden fields of the "Next" form.

use crate::config::SearchConfig;
use crate::engine::SearchProvider;
use crate::error::SearchError;
use crate::http;
use crate::types::{SearchEngine, SearchResult};
use reqwest::StatusCode;
use scraper::{Html, Selector};
use url::Url;

const DEFAULT_ENDPOINT: &str = "https://html.duckduckgo.com/html/";

/// Upper bound on pages fetched for one query.
const MAX_PAGES: usize = 10;

/// Markers of the anomaly page served instead of results to suspected bots.
const BLOCK_MARKERS: &[&str] = &["anomaly-modal", "Unfortunately, bots use DuckDuckGo too"];

/// DuckDuckGo HTML search scraper.
pub struct DuckDuckGoEngine;

impl DuckDuckGoEngine {
    /// Extract the actual URL from DuckDuckGo's redirect wrapper.
    ///
    /// DDG wraps URLs like: `//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com&rut=...`
    /// We parse out the `uddg` query parameter and URL-decode it.
    fn extract_url(href: &str) -> Option<String> {
        let full_href = if href.starts_with("//") {
            format!("https:{href}")
        } else {
            href.to_string()
        };

        let parsed = Url::parse(&full_href).ok()?;

        if parsed.host_str() == Some("duckduckgo.com") && parsed.path().starts_with("/l/") {
            parsed
                .query_pairs()
                .find(|(key, _)| key == "uddg")
                .map(|(_, value)| value.into_owned())
        } else {
            Some(full_href)
        }
    }
}

impl SearchProvider for DuckDuckGoEngine {
    async fn search(
        &self,
        query: &str,
        config: &SearchConfig,
    ) -> Result<Vec<SearchResult>, SearchError> {
        tracing::trace!(query, "DuckDuckGo search");

        let client = http::build_client(config)?;
        let endpoint = config.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT);

        let mut form: Vec<(String, String)> = vec![
            ("q".into(), query.to_owned()),
            ("kl".into(), config.region.clone()),
        ];
        let mut results: Vec<SearchResult> = Vec::new();

        for page in 0..MAX_PAGES {
            if page > 0 {
                tokio::time::sleep(config.jitter_delay()).await;
            }

            let response = client
                .post(endpoint)
                .form(&form)
                .header("Accept-Language", http::accept_language(&config.language))
                .send()
                .await
                .map_err(|e| SearchError::from_reqwest("DuckDuckGo", e))?;

            check_status(response.status())?;

            let html = response
                .text()
                .await
                .map_err(|e| SearchError::Http(format!("DuckDuckGo response read failed: {e}")))?;

            tracing::trace!(page, bytes = html.len(), "DuckDuckGo response received");

            if BLOCK_MARKERS.iter().any(|m| html.contains(m)) {
                return Err(SearchError::RateLimited {
                    provider: SearchEngine::DuckDuckGo.name().into(),
                    detail: "anomaly page served instead of results".into(),
                });
            }

            let remaining = config.max_results.saturating_sub(results.len());
            let page_results = parse_duckduckgo_html(&html, remaining)?;
            if page_results.is_empty() {
                break;
            }
            results.extend(page_results);

            if results.len() >= config.max_results {
                break;
            }

            match parse_next_page_form(&html)? {
                Some(next) => form = next,
                None => break,
            }
        }

        tracing::debug!(count = results.len(), "DuckDuckGo search complete");
        Ok(results)
    }

    fn engine_type(&self) -> SearchEngine {
        SearchEngine::DuckDuckGo
    }
}

/// Map DuckDuckGo status codes to errors.
///
/// DDG answers throttled clients with `202 Accepted` and an empty page.
fn check_status(status: StatusCode) -> Result<(), SearchError> {
    if status == StatusCode::ACCEPTED || http::is_throttle_status(status) {
        return Err(SearchError::RateLimited {
            provider: SearchEngine::DuckDuckGo.name().into(),
            detail: format!("HTTP {}", status.as_u16()),
        });
    }
    if !status.is_success() {
        return Err(SearchError::Http(format!(
            "DuckDuckGo HTTP error: {status}"
        )));
    }
    Ok(())
}

/// Parse DuckDuckGo HTML response into search results.
///
/// Extracted as a separate function for testability with mock HTML.
pub(crate) fn parse_duckduckgo_html(
    html: &str,
    max_results: usize,
) -> Result<Vec<SearchResult>, SearchError> {
    let document = Html::parse_document(html);

    let result_sel = Selector::parse(
        ".result.results_links.results_links_deep:not(.result--ad), .web-result:not(.result--ad)",
    )
    .map_err(|e| SearchError::Parse(format!("invalid result selector: {e:?}")))?;
    let title_sel = Selector::parse(".result__a")
        .map_err(|e| SearchError::Parse(format!("invalid title selector: {e:?}")))?;
    let snippet_sel = Selector::parse(".result__snippet")
        .map_err(|e| SearchError::Parse(format!("invalid snippet selector: {e:?}")))?;

    let mut results = Vec::new();

    for element in document.select(&result_sel) {
        if results.len() >= max_results {
            break;
        }

        let Some(title_el) = element.select(&title_sel).next() else {
            continue;
        };

        let title = title_el.text().collect::<String>().trim().to_string();
        let Some(url) = title_el
            .value()
            .attr("href")
            .and_then(DuckDuckGoEngine::extract_url)
        else {
            continue;
        };

        let snippet = element
            .select(&snippet_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        results.push(SearchResult {
            title,
            url,
            snippet,
            engine: SearchEngine::DuckDuckGo.name().to_string(),
        });
    }

    tracing::debug!(count = results.len(), "DuckDuckGo results parsed");
    Ok(results)
}

/// Hidden form fields of the "Next" page button, if the page has one.
fn parse_next_page_form(html: &str) -> Result<Option<Vec<(String, String)>>, SearchError> {
    let document = Html::parse_document(html);

    let form_sel = Selector::parse(".nav-link form")
        .map_err(|e| SearchError::Parse(format!("invalid form selector: {e:?}")))?;
    let submit_sel = Selector::parse("input[type=submit]")
        .map_err(|e| SearchError::Parse(format!("invalid submit selector: {e:?}")))?;
    let hidden_sel = Selector::parse("input[type=hidden]")
        .map_err(|e| SearchError::Parse(format!("invalid input selector: {e:?}")))?;

    for form in document.select(&form_sel) {
        let is_next = form
            .select(&submit_sel)
            .any(|input| input.value().attr("value") == Some("Next"));
        if !is_next {
            continue;
        }

        let fields: Vec<(String, String)> = form
            .select(&hidden_sel)
            .filter_map(|input| {
                let name = input.value().attr("name")?;
                let value = input.value().attr("value").unwrap_or_default();
                Some((name.to_owned(), value.to_owned()))
            })
            .collect();

        if !fields.is_empty() {
            return Ok(Some(fields));
        }
    }

    Ok(None)
}
