//! Shared fixtures: test configuration and page markup

use casa_scraper::config::{Config, RetryConfig};
use wiremock::{Match, Request};

pub const CATALOG_PATH: &str = "/vendita-appartamenti/roma/";

/// Configuration with no pacing and a tiny retry budget
pub fn test_config(catalog_url: String) -> Config {
    let mut config = Config::default();
    config.site.catalog_url = catalog_url;
    config.http.user_agent = "TestAgent/1.0".to_string();
    config.http.request_delay_ms = 0;
    config.http.not_found_cooldown_ms = 0;
    config.http.timeout_secs = 1;
    config.retry = RetryConfig {
        max_attempts: 3,
        initial_backoff_ms: 1,
        max_backoff_ms: 5,
        max_not_found: 3,
    };
    config.crawl.shuffle_seed = Some(42);
    config
}

/// Matches requests without a query string (the first catalog page)
pub struct NoQuery;

impl Match for NoQuery {
    fn matches(&self, request: &Request) -> bool {
        request.url.query().is_none()
    }
}

/// A catalog page listing `listing_urls`, with pagination up to `last_page`
pub fn catalog_page(last_page: u32, listing_urls: &[String]) -> String {
    let pagination: String = (1..=last_page)
        .map(|n| format!(r#"<div class="in-pagination__item">{}</div>"#, n))
        .collect();
    let cards: String = listing_urls
        .iter()
        .map(|url| {
            format!(
                r#"<div class="in-card"><a class="in-card__title" href="{}">Appartamento</a></div>"#,
                url
            )
        })
        .collect();

    format!(
        r#"<html><body>
            <div class="in-results">{}</div>
            <div class="in-pagination__list">{}</div>
        </body></html>"#,
        cards, pagination
    )
}

/// A complete listing page
pub fn listing_page(title: &str) -> String {
    format!(
        r#"<html><body>
            <span class="im-titleBlock__title">{title}</span>
            <div class="im-description__text js-readAllText">Descrizione di {title}</div>
            <div class="im-lead__supervisor">
                <p>Agenzia Test</p>
                <a class="im-lead__phone">Mostra telefono</a>
                <a href="tel:+390600000">06 00000</a>
            </div>
            <a id="foto-tab">4 foto</a>
            <div class="im-mainFeatures__title">€ 315.000</div>
            <ul>
                <li class="nd-list__item"><span class="im-mainFeatures__label">locali</span><span class="im-mainFeatures__value">3</span></li>
                <li class="nd-list__item"><span class="im-mainFeatures__label">superficie</span><span class="im-mainFeatures__value">85 m²</span></li>
            </ul>
            <footer><ul><li class="nd-list__item">© 2022 Immobiliare.it</li></ul></footer>
        </body></html>"#
    )
}

/// A listing page whose title block is missing
pub fn listing_page_without_title() -> String {
    r#"<html><body>
        <div class="im-description__text js-readAllText">Annuncio rimosso</div>
        <div class="im-mainFeatures__title">€ 1</div>
    </body></html>"#
        .to_string()
}
