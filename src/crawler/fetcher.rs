//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper, including:
//! - Building one HTTP client per configured proxy
//! - Picking a random proxy for every attempt
//! - Pacing every attempt with a fixed delay
//! - Bounded retry with exponential backoff on transport failures
//! - Classifying 404 answers for the caller's recovery policy

use crate::config::{HttpConfig, RetryConfig};
use crate::FetchError;
use reqwest::{Client, Proxy, StatusCode};
use std::time::Duration;
use tokio::time::sleep;

/// A fetched page body with its HTTP status
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// The URL that was requested
    pub url: String,
    /// Final URL after redirects
    pub final_url: String,
    /// HTTP status code; anything but 404
    pub status_code: u16,
    /// Page body content
    pub body: String,
}

/// Outcome of a single request attempt
#[derive(Debug)]
enum Attempt {
    Page(FetchedPage),
    NotFound,
    Transport(String),
}

/// Paced, retrying GET client
pub struct Fetcher {
    clients: Vec<Client>,
    request_delay: Duration,
    retry: RetryConfig,
}

impl Fetcher {
    /// Builds the fetcher and one HTTP client per proxy
    ///
    /// Without proxies a single direct client is used.
    ///
    /// # Returns
    ///
    /// * `Ok(Fetcher)` - Ready to fetch
    /// * `Err(reqwest::Error)` - A proxy URL was rejected or a client failed to build
    pub fn new(http: &HttpConfig, retry: &RetryConfig) -> Result<Self, reqwest::Error> {
        let clients = if http.proxies.is_empty() {
            vec![build_http_client(http, None)?]
        } else {
            http.proxies
                .iter()
                .map(|proxy| build_http_client(http, Some(proxy)))
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(Self {
            clients,
            request_delay: Duration::from_millis(http.request_delay_ms),
            retry: retry.clone(),
        })
    }

    /// Number of clients, one per proxy
    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    /// Fetches a URL, retrying transport failures
    ///
    /// # Retry Logic
    ///
    /// | Condition | Action |
    /// |-----------|--------|
    /// | Any attempt | Sleep `request-delay-ms` first, pick a random proxy |
    /// | HTTP 404 | Immediate → `FetchError::NotFound` |
    /// | Other status (2xx, 5xx, ...) | Return the page |
    /// | Timeout / connection / body error | Back off, retry up to `max-attempts` |
    ///
    /// # Returns
    ///
    /// The fetched page, or the reason this URL could not be fetched
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let mut attempts = 0;

        loop {
            attempts += 1;
            sleep(self.request_delay).await;
            tracing::debug!("Get html from {} (attempt {})", url, attempts);

            match self.attempt(url).await {
                Attempt::Page(page) => {
                    tracing::debug!("Fetched {} with status {}", url, page.status_code);
                    return Ok(page);
                }
                Attempt::NotFound => {
                    return Err(FetchError::NotFound {
                        url: url.to_string(),
                    });
                }
                Attempt::Transport(error) => {
                    if attempts >= self.retry.max_attempts {
                        return Err(FetchError::RetriesExhausted {
                            url: url.to_string(),
                            attempts,
                            last_error: error,
                        });
                    }

                    let delay = backoff_delay(&self.retry, attempts);
                    tracing::warn!(
                        "Request to {} failed: {}. Retrying in {:?}",
                        url,
                        error,
                        delay
                    );
                    sleep(delay).await;
                }
            }
        }
    }

    async fn attempt(&self, url: &str) -> Attempt {
        let client = &self.clients[fastrand::usize(..self.clients.len())];

        let response = match client.get(url).send().await {
            Ok(response) => response,
            Err(e) => return Attempt::Transport(classify_error(&e)),
        };

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Attempt::NotFound;
        }

        let final_url = response.url().to_string();
        match response.text().await {
            Ok(body) => Attempt::Page(FetchedPage {
                url: url.to_string(),
                final_url,
                status_code: status.as_u16(),
                body,
            }),
            Err(e) => Attempt::Transport(classify_error(&e)),
        }
    }
}

/// Builds an HTTP client sending the configured User-Agent
///
/// # Arguments
///
/// * `config` - The request configuration
/// * `proxy` - HTTPS proxy to route requests through, if any
pub fn build_http_client(config: &HttpConfig, proxy: Option<&str>) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true);

    if let Some(proxy) = proxy {
        builder = builder.proxy(Proxy::https(proxy)?);
    }

    builder.build()
}

/// Delay after the `failed_attempts`-th consecutive failure
///
/// Doubles from `initial-backoff-ms`, capped at `max-backoff-ms`.
pub fn backoff_delay(retry: &RetryConfig, failed_attempts: u32) -> Duration {
    let exponent = failed_attempts.saturating_sub(1).min(31);
    let millis = retry
        .initial_backoff_ms
        .saturating_mul(1u64 << exponent)
        .min(retry.max_backoff_ms);
    Duration::from_millis(millis)
}

fn classify_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "Request timeout".to_string()
    } else if error.is_connect() {
        format!("Connection failed: {}", error)
    } else {
        error.to_string()
    }
}
