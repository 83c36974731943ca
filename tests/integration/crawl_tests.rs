//! End-to-end crawl tests against a mock listing site

use crate::common::{
    catalog_page, listing_page, listing_page_without_title, test_config, NoQuery, CATALOG_PATH,
};
use casa_scraper::crawler::CrawlSession;
use casa_scraper::record::{AttributeValue, PriceQuantity};
use casa_scraper::storage::{CheckpointStore, JsonStore};
use casa_scraper::ProductUrlEntry;
use tempfile::tempdir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html; charset=utf-8")
}

async fn mount_listing(server: &MockServer, listing_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(listing_path))
        .respond_with(html(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl() {
    let server = MockServer::start().await;
    let base = format!("{}{}", server.uri(), CATALOG_PATH);
    let listing = |n: u32| format!("{}/annunci/{}/", server.uri(), n);

    Mock::given(method("GET"))
        .and(path(CATALOG_PATH))
        .and(NoQuery)
        .respond_with(html(catalog_page(3, &[listing(1), listing(2)])))
        .mount(&server)
        .await;
    // Relative hrefs resolve against the catalog page
    Mock::given(method("GET"))
        .and(path(CATALOG_PATH))
        .and(query_param("pag", "2"))
        .respond_with(html(catalog_page(3, &["/annunci/3/".to_string()])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(CATALOG_PATH))
        .and(query_param("pag", "3"))
        .respond_with(html(catalog_page(3, &[listing(4)])))
        .mount(&server)
        .await;

    mount_listing(&server, "/annunci/1/", listing_page("Trilocale Prati")).await;
    mount_listing(&server, "/annunci/2/", listing_page("Bilocale Monti")).await;
    mount_listing(&server, "/annunci/3/", listing_page("Attico Parioli")).await;
    mount_listing(&server, "/annunci/4/", listing_page_without_title()).await;

    let dir = tempdir().unwrap();
    let mut session =
        CrawlSession::with_store(test_config(base.clone()), JsonStore::in_dir(dir.path())).unwrap();

    let summary = session.run().await.unwrap();

    assert_eq!(summary.scraped, 3);
    assert_eq!(summary.dropped, 1);
    assert_eq!(summary.total_records, 3);
    assert!(session.queue().is_empty());

    let store = JsonStore::in_dir(dir.path());
    assert_eq!(
        store.load_catalog_pages().unwrap(),
        vec![base.clone(), format!("{}?pag=2", base), format!("{}?pag=3", base)]
    );

    let urls: Vec<String> = store
        .load_product_urls()
        .unwrap()
        .into_iter()
        .map(|entry| entry.url)
        .collect();
    assert_eq!(urls, vec![listing(1), listing(2), listing(3), listing(4)]);

    let records = store.load_products().unwrap();
    let mut scraped: Vec<&str> = records.iter().map(|r| r.url.as_str()).collect();
    scraped.sort();
    assert_eq!(scraped, vec![listing(1), listing(2), listing(3)]);

    let record = records.iter().find(|r| r.url == listing(1)).unwrap();
    assert_eq!(record.title, "Trilocale Prati");
    assert_eq!(record.description, "Descrizione di Trilocale Prati");
    assert_eq!(record.price.quantity, PriceQuantity::Amount(315000.0));
    assert_eq!(record.price.currency.as_deref(), Some("€"));
    assert_eq!(record.photos.len(), 4);
    assert_eq!(record.photos[0], format!("{}#foto1", listing(1)));
    assert_eq!(record.attributes["locals"], AttributeValue::Integer(3));

    let seller = record.seller.as_ref().unwrap();
    assert_eq!(seller.name, "Agenzia Test");
    assert_eq!(seller.phone.as_deref(), Some("tel:+390600000"));
}

#[tokio::test]
async fn test_saved_urls_skip_discovery() {
    let server = MockServer::start().await;
    let base = format!("{}{}", server.uri(), CATALOG_PATH);
    let listing = format!("{}/annunci/7/", server.uri());

    Mock::given(method("GET"))
        .and(path(CATALOG_PATH))
        .respond_with(html(catalog_page(1, &[])))
        .expect(0)
        .mount(&server)
        .await;
    mount_listing(&server, "/annunci/7/", listing_page("Monolocale")).await;

    let dir = tempdir().unwrap();
    let store = JsonStore::in_dir(dir.path());
    store
        .save_product_urls(&[ProductUrlEntry::new(listing.clone())])
        .unwrap();

    let mut session = CrawlSession::with_store(test_config(base), store).unwrap();
    let summary = session.run().await.unwrap();

    assert_eq!(summary.scraped, 1);
    assert_eq!(session.records().records()[0].url, listing);
    // Page discovery never ran
    assert!(session.store().load_catalog_pages().unwrap().is_empty());
}

#[tokio::test]
async fn test_existing_records_are_kept() {
    let server = MockServer::start().await;
    let base = format!("{}{}", server.uri(), CATALOG_PATH);
    let first = format!("{}/annunci/1/", server.uri());
    let second = format!("{}/annunci/2/", server.uri());

    mount_listing(&server, "/annunci/1/", listing_page("Primo")).await;
    mount_listing(&server, "/annunci/2/", listing_page("Secondo")).await;

    let dir = tempdir().unwrap();

    // First run scrapes a single listing
    let store = JsonStore::in_dir(dir.path());
    store
        .save_product_urls(&[ProductUrlEntry::new(first.clone())])
        .unwrap();
    let mut session = CrawlSession::with_store(test_config(base.clone()), store).unwrap();
    session.run().await.unwrap();

    // Second run appends to the saved records
    let store = JsonStore::in_dir(dir.path());
    store
        .save_product_urls(&[ProductUrlEntry::new(second.clone())])
        .unwrap();
    let mut session = CrawlSession::with_store(test_config(base), store).unwrap();
    let summary = session.run().await.unwrap();

    assert_eq!(summary.scraped, 1);
    assert_eq!(summary.total_records, 2);

    let titles: Vec<String> = JsonStore::in_dir(dir.path())
        .load_products()
        .unwrap()
        .into_iter()
        .map(|r| r.title)
        .collect();
    assert_eq!(titles, vec!["Primo", "Secondo"]);
}

#[tokio::test]
async fn test_missing_listing_is_dropped() {
    let server = MockServer::start().await;
    let base = format!("{}{}", server.uri(), CATALOG_PATH);
    let gone = format!("{}/annunci/404/", server.uri());
    let live = format!("{}/annunci/200/", server.uri());

    Mock::given(method("GET"))
        .and(path("/annunci/404/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    mount_listing(&server, "/annunci/200/", listing_page("Villa")).await;

    let dir = tempdir().unwrap();
    let store = JsonStore::in_dir(dir.path());
    store
        .save_product_urls(&[ProductUrlEntry::new(gone), ProductUrlEntry::new(live.clone())])
        .unwrap();

    let mut session = CrawlSession::with_store(test_config(base), store).unwrap();
    let summary = session.run().await.unwrap();

    assert_eq!(summary.scraped, 1);
    assert_eq!(summary.dropped, 1);
    assert!(session.queue().is_empty());
    assert_eq!(session.records().records()[0].url, live);

    // The 404 answer hands the fetch over to the other queued listing
    let requested: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|request| request.url.path().to_string())
        .collect();
    assert_eq!(&requested[..2], ["/annunci/404/", "/annunci/200/"]);
}

#[tokio::test]
async fn test_not_found_budget_per_fetch() {
    let server = MockServer::start().await;
    let base = format!("{}{}", server.uri(), CATALOG_PATH);

    // max-not-found = 3 in the test config: three answers, then the listing is dropped
    Mock::given(method("GET"))
        .and(path("/annunci/404/"))
        .respond_with(ResponseTemplate::new(404))
        .expect(3)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let store = JsonStore::in_dir(dir.path());
    store
        .save_product_urls(&[ProductUrlEntry::new(format!("{}/annunci/404/", server.uri()))])
        .unwrap();

    let mut session = CrawlSession::with_store(test_config(base), store).unwrap();
    let summary = session.run().await.unwrap();

    assert_eq!(summary.scraped, 0);
    assert_eq!(summary.dropped, 1);
    assert!(session.queue().is_empty());
}

#[tokio::test]
async fn test_single_page_catalog() {
    let server = MockServer::start().await;
    let base = format!("{}{}", server.uri(), CATALOG_PATH);

    // No pagination list at all
    Mock::given(method("GET"))
        .and(path(CATALOG_PATH))
        .respond_with(html(
            r#"<html><body><div class="in-card"><span>Senza link</span></div></body></html>"#
                .to_string(),
        ))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let mut session =
        CrawlSession::with_store(test_config(base.clone()), JsonStore::in_dir(dir.path())).unwrap();

    let pages = session.discover_catalog_pages().await.unwrap();
    assert_eq!(pages, vec![base]);

    let entries = session.discover_product_urls(&pages).await.unwrap();
    assert!(entries.is_empty());
}
