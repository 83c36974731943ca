//! Fetcher tests: status handling, retry budget and request headers

use crate::common::test_config;
use casa_scraper::crawler::Fetcher;
use casa_scraper::FetchError;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher_for(server: &MockServer) -> Fetcher {
    let config = test_config(server.uri());
    Fetcher::new(&config.http, &config.retry).unwrap()
}

#[tokio::test]
async fn test_server_error_is_returned_as_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/annunci/1/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>Errore</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/annunci/1/", server.uri());
    let page = fetcher_for(&server).fetch(&url).await.unwrap();

    assert_eq!(page.status_code, 500);
    assert_eq!(page.url, url);
    assert_eq!(page.body, "<html>Errore</html>");
}

#[tokio::test]
async fn test_not_found_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/annunci/gone/"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/annunci/gone/", server.uri());
    let result = fetcher_for(&server).fetch(&url).await;

    match result {
        Err(FetchError::NotFound { url: failed }) => assert_eq!(failed, url),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_timeout_exhausts_retries() {
    let server = MockServer::start().await;

    // Slower than the one second client timeout
    Mock::given(method("GET"))
        .and(path("/slow/"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .expect(3)
        .mount(&server)
        .await;

    let url = format!("{}/slow/", server.uri());
    let result = fetcher_for(&server).fetch(&url).await;

    match result {
        Err(FetchError::RetriesExhausted { attempts, .. }) => assert_eq!(attempts, 3),
        other => panic!("expected RetriesExhausted, got {:?}", other),
    }
}

#[tokio::test]
async fn test_user_agent_is_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("user-agent", "TestAgent/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let page = fetcher_for(&server)
        .fetch(&format!("{}/", server.uri()))
        .await
        .unwrap();
    assert_eq!(page.status_code, 200);
}

#[tokio::test]
async fn test_connection_refused_exhausts_retries() {
    let config = test_config("http://127.0.0.1:1/".to_string());
    let fetcher = Fetcher::new(&config.http, &config.retry).unwrap();

    let result = fetcher.fetch("http://127.0.0.1:1/annunci/1/").await;

    match result {
        Err(e @ FetchError::RetriesExhausted { .. }) => {
            assert_eq!(e.url(), "http://127.0.0.1:1/annunci/1/");
        }
        other => panic!("expected RetriesExhausted, got {:?}", other),
    }
}
