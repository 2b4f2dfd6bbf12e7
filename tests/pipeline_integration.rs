//! End-to-end pipeline tests against mocked catalogue and rate services.

use price_lens::catalogue::Parser;
use price_lens::commands::ScrapeCommand;
use price_lens::config::Config;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LISTING_FIXTURE: &str = include_str!("fixtures/listing_page.html");

fn make_config(catalogue: &MockServer, rates: &MockServer, dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.catalogue_url = catalogue.uri();
    config.rates_url = format!("{}/v4/latest/GBP", rates.uri());
    config.delay_ms = 0;
    config.delay_jitter_ms = 0;
    config.error_pause_ms = 0;
    config.output = dir.path().join("converted_prices.csv");
    config.chart_output = dir.path().join("price_comparison.svg");
    config
}

#[test]
fn test_parse_listing_fixture() {
    let parser = Parser::new("£");
    let items = parser.parse_listing(LISTING_FIXTURE).unwrap();

    assert_eq!(items.len(), 3);
    assert_eq!(items[0].name, "A Light in the Attic");
    assert_eq!(items[0].price_gbp, 51.77);
    assert_eq!(items[1].name, "Tipping the Velvet");
    assert_eq!(items[1].price_gbp, 53.74);
    assert_eq!(items[2].name, "Soumission");
    assert_eq!(items[2].price_gbp, 50.10);
}

#[tokio::test]
async fn test_pipeline_end_to_end() {
    let catalogue = MockServer::start().await;
    let rates = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/catalogue/page-1.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LISTING_FIXTURE))
        .mount(&catalogue)
        .await;

    Mock::given(method("GET"))
        .and(path("/v4/latest/GBP"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"base":"GBP","date":"2026-08-05","rates":{"KES":150.0,"USD":1.27,"EUR":1.17}}"#,
        ))
        .mount(&rates)
        .await;

    let dir = TempDir::new().unwrap();
    let mut config = make_config(&catalogue, &rates, &dir);
    config.count = 3;
    let output_path = config.output.clone();

    let cmd = ScrapeCommand::new(config.normalized());
    let output = cmd.execute().await.unwrap();

    // Console view carries all three items at the live rate
    assert!(output.contains("A Light in the Attic"));
    assert!(output.contains("7765.50")); // 51.77 * 150
    assert!(output.contains("Total: 3 items"));
    assert!(!output.contains("Warning"));

    // Persisted file: one header row plus one row per record
    let csv = std::fs::read_to_string(&output_path).unwrap();
    let lines: Vec<&str> = csv.trim_end().lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "name,price_gbp,price_target,currency,captured_at");
    assert!(lines[1].starts_with("A Light in the Attic,51.77,7765.50,KES,"));

    // Every row shares the batch capture timestamp
    let stamps: Vec<&str> =
        lines[1..].iter().map(|l| l.rsplit(',').next().unwrap()).collect();
    assert!(stamps.windows(2).all(|w| w[0] == w[1]));
}

#[tokio::test]
async fn test_pipeline_single_item_scenario() {
    let catalogue = MockServer::start().await;
    let rates = MockServer::start().await;

    let page = r#"<html><body>
        <article class="product_pod">
            <h3><a title="Book A">Book A</a></h3>
            <p class="price_color">£10.00</p>
        </article>
    </body></html>"#;

    Mock::given(method("GET"))
        .and(path("/catalogue/page-1.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .mount(&catalogue)
        .await;

    Mock::given(method("GET"))
        .and(path("/v4/latest/GBP"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"base":"GBP","rates":{"KES":150.0}}"#),
        )
        .mount(&rates)
        .await;

    let dir = TempDir::new().unwrap();
    let mut config = make_config(&catalogue, &rates, &dir);
    config.count = 1;
    let output_path = config.output.clone();

    let cmd = ScrapeCommand::new(config.normalized());
    let output = cmd.execute().await.unwrap();
    assert!(output.contains("Book A"));
    assert!(output.contains("1500.00"));

    let csv = std::fs::read_to_string(&output_path).unwrap();
    let lines: Vec<&str> = csv.trim_end().lines().collect();
    assert_eq!(lines.len(), 2);

    let fields: Vec<&str> = lines[1].split(',').collect();
    assert_eq!(fields.len(), 5);
    assert_eq!(fields[0], "Book A");
    assert_eq!(fields[1], "10.00");
    assert_eq!(fields[2], "1500.00");
    assert_eq!(fields[3], "KES");
}

#[tokio::test]
async fn test_pipeline_rate_service_down_uses_fallback() {
    let catalogue = MockServer::start().await;
    let rates = MockServer::start().await;

    let page = r#"<html><body>
        <article class="product_pod">
            <h3><a title="Book A">Book A</a></h3>
            <p class="price_color">£10.00</p>
        </article>
    </body></html>"#;

    Mock::given(method("GET"))
        .and(path("/catalogue/page-1.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .mount(&catalogue)
        .await;

    Mock::given(method("GET"))
        .and(path("/v4/latest/GBP"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&rates)
        .await;

    let dir = TempDir::new().unwrap();
    let mut config = make_config(&catalogue, &rates, &dir);
    config.count = 1;

    let cmd = ScrapeCommand::new(config.normalized());
    let output = cmd.execute().await.unwrap();

    // The run continues at the fallback rate, visibly flagged
    assert!(output.contains("1800.00")); // 10.00 * 180.0
    assert!(output.contains("Warning: approximate conversion"));
}

#[tokio::test]
async fn test_pipeline_catalogue_down_ends_early() {
    let catalogue = MockServer::start().await;
    let rates = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/catalogue/page-1.html"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&catalogue)
        .await;

    let dir = TempDir::new().unwrap();
    let mut config = make_config(&catalogue, &rates, &dir);
    config.count = 5;
    let output_path = config.output.clone();

    let cmd = ScrapeCommand::new(config.normalized());
    let output = cmd.execute().await.unwrap();

    assert_eq!(output, "No items collected.");
    assert!(!output_path.exists());
}

#[tokio::test]
async fn test_pipeline_count_spans_pages_and_trims() {
    let catalogue = MockServer::start().await;
    let rates = MockServer::start().await;

    for page_no in 1..=2 {
        let page = format!(
            r#"<html><body>
                <article class="product_pod">
                    <h3><a title="Page {n} Book 1">Page {n} Book 1</a></h3>
                    <p class="price_color">£10.00</p>
                </article>
                <article class="product_pod">
                    <h3><a title="Page {n} Book 2">Page {n} Book 2</a></h3>
                    <p class="price_color">£20.00</p>
                </article>
            </body></html>"#,
            n = page_no
        );

        Mock::given(method("GET"))
            .and(path(format!("/catalogue/page-{}.html", page_no)))
            .respond_with(ResponseTemplate::new(200).set_body_string(page))
            .mount(&catalogue)
            .await;
    }

    Mock::given(method("GET"))
        .and(path("/v4/latest/GBP"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"base":"GBP","rates":{"KES":150.0}}"#),
        )
        .mount(&rates)
        .await;

    let dir = TempDir::new().unwrap();
    let mut config = make_config(&catalogue, &rates, &dir);
    config.count = 3;
    let output_path = config.output.clone();

    let cmd = ScrapeCommand::new(config.normalized());
    let output = cmd.execute().await.unwrap();

    assert!(output.contains("Total: 3 items"));
    assert!(output.contains("Page 2 Book 1"));
    assert!(!output.contains("Page 2 Book 2"));

    let csv = std::fs::read_to_string(&output_path).unwrap();
    assert_eq!(csv.trim_end().lines().count(), 4);
}
