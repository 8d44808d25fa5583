// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{test_session, RecordingSleeper};
use currency_scraper::config::settings::Settings;
use currency_scraper::engines::reqwest_engine::Session;
use currency_scraper::engines::traits::{FetchError, Fetcher};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_two_retryable_failures_then_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/symbols/"))
        .respond_with(ResponseTemplate::new(504))
        .up_to_n_times(2)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/symbols/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<ul></ul>"))
        .expect(1)
        .mount(&server)
        .await;

    let sleeper = RecordingSleeper::default();
    let session = test_session(sleeper.clone());

    let response = session
        .fetch(&format!("{}/symbols/", server.uri()))
        .await
        .expect("third attempt succeeds");

    assert_eq!(response.status_code, 200);
    assert_eq!(response.content, "<ul></ul>");
    assert_eq!(sleeper.delays().len(), 2);
    assert_eq!(
        sleeper.delays(),
        vec![Duration::from_millis(300), Duration::from_millis(600)]
    );
}

#[tokio::test]
async fn test_not_found_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let sleeper = RecordingSleeper::default();
    let result = test_session(sleeper.clone())
        .fetch(&format!("{}/currency/none/", server.uri()))
        .await;

    assert!(matches!(result, Err(FetchError::Status { status: 404, .. })));
    assert!(sleeper.delays().is_empty());
}

#[tokio::test]
async fn test_session_from_settings_uses_configured_forcelist() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let mut settings = Settings::new(None).unwrap();
    settings.http.status_forcelist = vec![503];
    settings.http.backoff_factor = 0.0;
    let session = Session::new(&settings.http).unwrap();

    let response = session
        .fetch(&format!("{}/symbols/", server.uri()))
        .await
        .unwrap();

    assert_eq!(response.content, "ok");
    assert_eq!(session.policy().status_forcelist, vec![503]);
}
