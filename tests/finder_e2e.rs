//! End-to-end runs of the finder against a mocked DuckDuckGo endpoint.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use bizfinder::export::{self, ExportFormat};
use bizfinder::{FinderConfig, QueryPlan, RunOutcome, SearchEngine, Selection};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> FinderConfig {
    let mut config = FinderConfig::default();
    config.provider.engine = SearchEngine::DuckDuckGo;
    config.provider.delay_seconds = 0.0;
    config.provider.timeout_seconds = 5;
    config.provider.user_agent = Some("TestBot/1.0".into());
    config.provider.endpoint = Some(format!("{}/html/", server.uri()));
    config
}

fn result_block(href: &str, title: &str) -> String {
    format!(
        r#"<div class="result results_links web-result">
  <a class="result__a" href="{href}">{title}</a>
  <div class="result__snippet">Kota Solok</div>
</div>"#
    )
}

fn page(blocks: &[(&str, &str)]) -> String {
    let body: String = blocks.iter().map(|(h, t)| result_block(h, t)).collect();
    format!("<html><body>{body}</body></html>")
}

async fn mount_page(server: &MockServer, html: String) {
    Mock::given(method("POST"))
        .and(path("/html/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(server)
        .await;
}

#[tokio::test]
async fn single_category_run_filters_and_exports() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        page(&[
            (
                "https://www.instagram.com/cafeku123/?hl=id",
                "Cafe Ku Solok (@cafeku123) • Instagram photos and videos",
            ),
            ("https://www.instagram.com/p/Cx1abc/", "Post by cafeku123"),
            ("https://www.instagram.com/explore/tags/cafe/", "#cafe"),
            ("https://www.instagram.com/kopikita/", "Kopi Kita dan ..."),
        ]),
    )
    .await;

    let config = config_for(&server);
    let selection = Selection::Single("Cafe".into());
    let plan = QueryPlan::build(&selection, &config.query).unwrap();
    let provider = config.provider.engine;

    let report = bizfinder::run(&provider, &plan, &config, None)
        .await
        .expect("mocked run should succeed");

    assert_eq!(report.outcome(), RunOutcome::Found(2));
    assert_eq!(report.results_seen, 4);
    assert_eq!(report.rejected, 2);

    let first = &report.records[0];
    assert_eq!(first.display_name, "Cafe Ku Solok");
    assert_eq!(first.handle, "@cafeku123");
    assert_eq!(first.category_label, "Cafe");
    assert_eq!(first.source_url, "https://www.instagram.com/cafeku123");
    assert_eq!(first.provider_tag, "DuckDuckGo");
    assert_eq!(report.records[1].display_name, "kopikita (verify link)");

    let dir = tempfile::tempdir().unwrap();
    let name = export::export_filename(
        &config.export.file_prefix,
        &selection.label(),
        ExportFormat::Csv,
    );
    let path =
        export::export_records(&report.records, dir.path(), &name, ExportFormat::Csv).unwrap();

    assert!(path.ends_with("solok_cafe.csv"));
    let text = std::fs::read_to_string(path).unwrap();
    assert_eq!(text.lines().count(), 3);
    assert!(text.contains("@kopikita"));
}

#[tokio::test]
async fn repeated_handles_across_queries_keep_first_category() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        page(&[(
            "https://www.instagram.com/barbersolok/",
            "Barber Solok (@barbersolok)",
        )]),
    )
    .await;

    let config = config_for(&server);
    let selection = Selection::Multi(vec!["Barbershop".into(), "Salon".into()]);
    let plan = QueryPlan::build(&selection, &config.query).unwrap();
    assert_eq!(plan.len(), 2);

    let report = bizfinder::run(&SearchEngine::DuckDuckGo, &plan, &config, None)
        .await
        .unwrap();

    assert_eq!(report.queries_issued, 2);
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].category_label, "Barbershop");
    assert_eq!(report.rejected, 1);
}

#[tokio::test]
async fn throttled_run_reports_rate_limit_with_hint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/html/"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let plan = QueryPlan::build(&Selection::Single("Cafe".into()), &config.query).unwrap();

    let err = bizfinder::run(&SearchEngine::DuckDuckGo, &plan, &config, None)
        .await
        .expect_err("429 should abort the run");

    assert!(err.is_rate_limited());
    assert!(err.hint().is_some_and(|h| h.contains("1-2 minutes")));
}

#[tokio::test]
async fn empty_provider_page_is_a_successful_empty_run() {
    let server = MockServer::start().await;
    mount_page(&server, page(&[])).await;

    let config = config_for(&server);
    let plan = QueryPlan::build(&Selection::Keyword("kopi".into()), &config.query).unwrap();

    let report = bizfinder::run(&SearchEngine::DuckDuckGo, &plan, &config, None)
        .await
        .unwrap();

    assert_eq!(report.outcome(), RunOutcome::NoResults);
    assert!(report.records.is_empty());
}
