//! HTTP client for Amazon product pages using wreq for TLS fingerprint emulation.

use crate::amazon::models::Product;
use crate::amazon::parser;
use crate::config::{Config, RequestHeaders};
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use wreq::Client;
use wreq_util::Emulation;

/// Page-level failures. None of these produce a product record.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Invalid product link: {0}")]
    InvalidLink(String),

    #[error("Request error at url {link}: {source}")]
    Request {
        link: String,
        #[source]
        source: wreq::Error,
    },

    #[error("Rate limited by Amazon at url {0}. Try increasing --delay or using a proxy.")]
    RateLimited(String),

    #[error("Product not found at url {link} (status {status})")]
    Status { link: String, status: u16 },

    #[error("Failed to read response body from {link}: {source}")]
    Body {
        link: String,
        #[source]
        source: wreq::Error,
    },

    #[error("Crawl cancelled before parsing {0}")]
    Cancelled(String),

    #[error("{0}")]
    Blocked(String),
}

/// Trait for fetching product pages - enables mocking for tests.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetches the page at the given link and returns the HTML body.
    async fn page(&self, link: &str) -> Result<String, CrawlError>;
}

/// Fetches and parses one product.
///
/// The cancellation token is checked exactly once, after the page arrives and
/// before parsing. Extraction itself is not interruptible.
pub async fn fetch_product(
    source: &(impl ProductSource + ?Sized),
    link: &str,
    cancel: &CancellationToken,
) -> Result<Product, CrawlError> {
    let html = source.page(link).await?;

    if cancel.is_cancelled() {
        debug!("Dropping {} after cancellation", link);
        return Err(CrawlError::Cancelled(link.to_string()));
    }

    parser::parse_product_page(&html, link)
}

/// Amazon HTTP client with browser impersonation and anti-bot measures.
pub struct AmazonClient {
    client: Client,
    headers: RequestHeaders,
    delay_ms: u64,
    delay_jitter_ms: u64,
}

impl AmazonClient {
    /// Creates a new Amazon client with the given configuration.
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        use anyhow::Context;

        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10));

        // Configure proxy if specified
        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            headers: config.headers.clone(),
            delay_ms: config.delay_ms,
            delay_jitter_ms: config.delay_jitter_ms,
        })
    }

    /// Performs a GET request with all anti-bot measures.
    async fn get(&self, link: &str) -> Result<String, CrawlError> {
        if !link.starts_with("http://") && !link.starts_with("https://") {
            return Err(CrawlError::InvalidLink(link.to_string()));
        }

        // Add human-like delay with jitter
        self.delay().await;

        debug!("GET {}", link);

        let response = self
            .client
            .get(link)
            .emulation(Emulation::Chrome131)
            .header("Accept", self.headers.accept.as_str())
            .header("Accept-Encoding", self.headers.accept_encoding.as_str())
            .header("Accept-Language", self.headers.accept_language.as_str())
            .header("User-Agent", self.headers.user_agent.as_str())
            .header("Cache-Control", "no-cache")
            .header("Upgrade-Insecure-Requests", "1")
            .send()
            .await
            .map_err(|source| CrawlError::Request { link: link.to_string(), source })?;

        let status = response.status();
        debug!("Response status: {}", status);

        if status == 503 {
            warn!("Rate limited (503). Consider using a proxy or increasing delay.");
            return Err(CrawlError::RateLimited(link.to_string()));
        }

        if !status.is_success() {
            return Err(CrawlError::Status { link: link.to_string(), status: status.as_u16() });
        }

        response.text().await.map_err(|source| CrawlError::Body { link: link.to_string(), source })
    }

    /// Adds a random delay to mimic human behavior.
    async fn delay(&self) {
        if self.delay_ms == 0 {
            return;
        }

        let jitter = if self.delay_jitter_ms > 0 {
            rand::rng().random_range(0..=self.delay_jitter_ms)
        } else {
            0
        };

        let total_delay = self.delay_ms + jitter;
        debug!("Delaying {}ms", total_delay);
        tokio::time::sleep(Duration::from_millis(total_delay)).await;
    }
}

#[async_trait]
impl ProductSource for AmazonClient {
    async fn page(&self, link: &str) -> Result<String, CrawlError> {
        info!("Fetching product: {}", link);
        self.get(link).await
    }
}
