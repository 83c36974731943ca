use serde::Deserialize;

const DEFAULT_CATALOG_URL: &str = "https://www.immobiliare.it/vendita-appartamenti/roma/";

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/99.0.4844.84 Safari/537.36";

/// Main configuration structure for Casa-Scraper
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub http: HttpConfig,
    pub retry: RetryConfig,
    pub crawl: CrawlConfig,
    pub output: OutputConfig,
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// First page of the catalog; further pages are `?pag=N` on this URL
    #[serde(rename = "catalog-url")]
    pub catalog_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
        }
    }
}

/// Request configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// HTTPS proxy endpoints; one is picked at random per attempt
    pub proxies: Vec<String>,

    /// Pause before every request attempt (milliseconds)
    #[serde(rename = "request-delay-ms")]
    pub request_delay_ms: u64,

    /// Extra pause after a listing answered 404 (milliseconds)
    #[serde(rename = "not-found-cooldown-ms")]
    pub not_found_cooldown_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            proxies: Vec::new(),
            request_delay_ms: 15_000,
            not_found_cooldown_ms: 60_000,
            timeout_secs: 30,
        }
    }
}

/// Retry policy for transport failures and 404 recovery
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Attempts per URL before a transport failure is surfaced
    #[serde(rename = "max-attempts")]
    pub max_attempts: u32,

    /// Backoff after the first failed attempt (milliseconds)
    #[serde(rename = "initial-backoff-ms")]
    pub initial_backoff_ms: u64,

    /// Upper bound for the exponential backoff (milliseconds)
    #[serde(rename = "max-backoff-ms")]
    pub max_backoff_ms: u64,

    /// 404 answers a single fetch may receive before it gives up
    #[serde(rename = "max-not-found")]
    pub max_not_found: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_backoff_ms: 1_000,
            max_backoff_ms: 60_000,
            max_not_found: 5,
        }
    }
}

/// Crawl session tuning
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Fixed seed for queue shuffling; random when absent
    #[serde(rename = "shuffle-seed")]
    pub shuffle_seed: Option<u64>,
}

/// Checkpoint file locations
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    #[serde(rename = "catalog-pages-path")]
    pub catalog_pages_path: String,

    #[serde(rename = "product-urls-path")]
    pub product_urls_path: String,

    #[serde(rename = "products-path")]
    pub products_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            catalog_pages_path: "catalog_pages.json".to_string(),
            product_urls_path: "product_urls.json".to_string(),
            products_path: "products.json".to_string(),
        }
    }
}
