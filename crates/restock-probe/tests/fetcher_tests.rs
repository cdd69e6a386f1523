// SPDX-FileCopyrightText: 2026 Restock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP fetcher behavior against a local mock server.

use std::time::Duration;

use restock_core::{PageFetcher, RestockError};
use restock_probe::HttpFetcher;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher() -> HttpFetcher {
    HttpFetcher::new(Duration::from_secs(5), "restock-test/1.0").expect("client should build")
}

#[tokio::test]
async fn fetch_returns_body_and_sends_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/p/list"))
        .and(header("user-agent", "restock-test/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>listing</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let html = fetcher()
        .fetch(&format!("{}/p/list", server.uri()))
        .await
        .expect("fetch should succeed");
    assert_eq!(html, "<html>listing</html>");
}

#[tokio::test]
async fn http_error_status_is_a_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = fetcher()
        .fetch(&server.uri())
        .await
        .expect_err("503 should fail");
    assert!(matches!(err, RestockError::Fetch { .. }), "got {err:?}");
    assert!(err.is_transient());
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("late")
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let fetcher =
        HttpFetcher::new(Duration::from_millis(100), "restock-test/1.0").expect("client");
    let err = fetcher
        .fetch(&server.uri())
        .await
        .expect_err("should time out");
    assert!(matches!(err, RestockError::Timeout { .. }), "got {err:?}");
}
