// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::integration::helpers::{test_session, RecordingSleeper};
use currency_scraper::application::use_cases::scrape_currencies::ScrapeCurrenciesUseCase;
use currency_scraper::config::settings::LayoutSettings;
use currency_scraper::domain::services::crawl_service::CrawlService;
use currency_scraper::infrastructure::csv_writer::CsvWriter;
use std::collections::HashMap;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LISTING: &str = r#"
<html><body>
  <section class="Container__Content-sc-1skoo0z-1">
    <ul>
      <li><div></div><div>Currency</div><div>Code</div><div>Symbol</div></li>
      <li><a href="/currency/all-albanian-lek/">
        <div>flag</div><div>Albanian Lek</div><div>ALL</div><div>Lek</div>
      </a></li>
      <li><a href="/currency/xxx-missing/">
        <div>flag</div><div>Missing Unit</div><div>XXX</div><div>¤</div>
      </a></li>
      <li><a href="/currency/usd-us-dollar/">
        <div>flag</div><div>US Dollar</div><div>USD</div><div>$</div>
      </a></li>
    </ul>
  </section>
</body></html>
"#;

fn detail(name: &str, coins: &str, notes: &str, bank: &str, bank_url: &str, users: &str) -> String {
    format!(
        r#"<html><body>
          <table class="currency__InfoTable-sc-4472af-2">
            <tr><th>Name</th><td>{name}</td></tr>
          </table>
          <table class="currency__InfoTable-sc-4472af-2">
            <tr><th>Coins</th><td>{coins}</td></tr>
            <tr><th>Bank notes</th><td>{notes}</td></tr>
            <tr><th>Central bank</th><td><a href="{bank_url}">{bank}</a></td></tr>
            <tr><th>Users</th><td><span>{users}</span></td></tr>
          </table>
        </body></html>"#
    )
}

async fn mount_page(server: &MockServer, page: &str, status: u16, body: String) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

async fn start_site() -> MockServer {
    let server = MockServer::start().await;
    mount_page(&server, "/symbols/", 200, LISTING.to_string()).await;
    mount_page(
        &server,
        "/currency/all-albanian-lek/",
        200,
        detail(
            "Albanian Lek",
            "Freq used: Lek, Rarely used: 1 Lek, 5 Lek",
            "Freq used: 200, 500, 1000 Lek",
            "Bank of Albania",
            "https://www.bankofalbania.org/",
            "Albania",
        ),
    )
    .await;
    mount_page(&server, "/currency/xxx-missing/", 404, String::new()).await;
    mount_page(
        &server,
        "/currency/usd-us-dollar/",
        200,
        detail(
            "US Dollar",
            "Freq used: 1¢, 5¢, 10¢, 25¢",
            "Freq used: $1, $5, $10, $20, $50, $100",
            "Federal Reserve",
            "https://www.federalreserve.gov/",
            "United States, Ecuador",
        ),
    )
    .await;
    server
}

fn read_rows(path: &std::path::Path) -> Vec<HashMap<String, String>> {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let headers = reader.headers().unwrap().clone();
    reader
        .records()
        .map(|row| {
            let row = row.unwrap();
            headers
                .iter()
                .zip(row.iter())
                .map(|(h, v)| (h.to_string(), v.to_string()))
                .collect()
        })
        .collect()
}

#[tokio::test]
async fn test_crawl_with_one_failing_detail_page() {
    let server = start_site().await;
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("scraped_currencies.csv");

    let sleeper = RecordingSleeper::default();
    let crawler = CrawlService::new(
        Arc::new(test_session(sleeper.clone())),
        LayoutSettings::default(),
    );
    let use_case = ScrapeCurrenciesUseCase::new(
        crawler,
        CsvWriter::new(&output),
        format!("{}/symbols/", server.uri()),
    );

    let report = use_case.execute().await.unwrap();

    assert_eq!(report.entities, 3);
    assert!(report.written);
    assert!(sleeper.delays().is_empty());

    let rows = read_rows(&output);
    assert_eq!(rows.len(), 3);

    let lek = &rows[0];
    assert_eq!(lek["currency"], "Albanian Lek");
    assert_eq!(lek["code"], "ALL");
    assert_eq!(lek["symbol"], "Lek");
    assert_eq!(lek["coins"], "Lek, 1 Lek, 5 Lek");
    assert_eq!(lek["bank_notes"], "200, 500, 1000 Lek");
    assert_eq!(lek["central_bank"], "Bank of Albania");
    assert_eq!(lek["central_bank_url"], "https://www.bankofalbania.org/");
    assert_eq!(lek["users"], "Albania");

    let missing = &rows[1];
    assert_eq!(missing["code"], "XXX");
    assert_eq!(missing["symbol"], "¤");
    for column in [
        "currency",
        "coins",
        "bank_notes",
        "central_bank",
        "central_bank_url",
        "users",
    ] {
        assert_eq!(missing[column], "", "column {} should be empty", column);
    }

    let usd = &rows[2];
    assert_eq!(usd["currency"], "US Dollar");
    assert_eq!(usd["code"], "USD");
    assert_eq!(usd["users"], "United States, Ecuador");
    assert_eq!(usd["central_bank_url"], "https://www.federalreserve.gov/");
}

#[tokio::test]
async fn test_unreachable_listing_writes_nothing() {
    let server = MockServer::start().await;
    mount_page(&server, "/symbols/", 404, String::new()).await;
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("scraped_currencies.csv");

    let crawler = CrawlService::new(
        Arc::new(test_session(RecordingSleeper::default())),
        LayoutSettings::default(),
    );
    let use_case = ScrapeCurrenciesUseCase::new(
        crawler,
        CsvWriter::new(&output),
        format!("{}/symbols/", server.uri()),
    );

    let report = use_case.execute().await.unwrap();

    assert_eq!(report.entities, 0);
    assert!(!report.written);
    assert!(!output.exists());
}
