//! Check command: fetch product links and keep the ones that meet the criteria.

use crate::amazon::{fetch_product, AmazonClient, CrawlError, Product, ProductSource};
use crate::config::Config;
use crate::filters::Filter;
use crate::format::Formatter;
use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Fetches product pages and filters them against the configured criteria.
pub struct CheckCommand {
    config: Config,
}

impl CheckCommand {
    /// Creates a new check command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Checks every link and returns the accepted products as formatted output.
    pub async fn execute(&self, links: &[String], cancel: &CancellationToken) -> Result<String> {
        let client =
            AmazonClient::new(&self.config).await.context("Failed to create HTTP client")?;

        self.execute_with_client(&client, links, cancel).await
    }

    /// Checks links with a provided client (for testing).
    pub async fn execute_with_client(
        &self,
        client: &impl ProductSource,
        links: &[String],
        cancel: &CancellationToken,
    ) -> Result<String> {
        let accepted = self.collect(client, links, cancel).await;

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_products(&accepted))
    }

    /// Returns the accepted products in link order.
    ///
    /// Links that fail to fetch are logged and skipped. Cancellation stops the
    /// crawl but keeps what was already accepted.
    pub async fn collect(
        &self,
        client: &impl ProductSource,
        links: &[String],
        cancel: &CancellationToken,
    ) -> Vec<Product> {
        let criteria = &self.config.criteria;
        debug!("Active criteria: {}", criteria.description());

        let mut accepted = Vec::new();

        for (checked, link) in links.iter().enumerate() {
            let link = link.trim();
            if link.is_empty() {
                continue;
            }

            if cancel.is_cancelled() {
                warn!("Crawl cancelled, skipping {} remaining links", links.len() - checked);
                break;
            }

            match fetch_product(client, link, cancel).await {
                Ok(product) => match criteria.evaluate(&product) {
                    Ok(()) => {
                        info!("Accepted {}", link);
                        accepted.push(product);
                    }
                    Err(rejection) => info!("Rejected {}: {}", link, rejection),
                },
                Err(CrawlError::Cancelled(_)) => {
                    warn!("Crawl cancelled while fetching {}", link);
                    break;
                }
                Err(e) => warn!("Skipping {}: {}", link, e),
            }
        }

        info!("{} of {} products accepted", accepted.len(), links.len());
        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::filters::Criteria;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Mock product source for testing.
    struct MockSource {
        pages: HashMap<String, String>,
        calls: AtomicU32,
        cancel_after: Option<(u32, CancellationToken)>,
    }

    impl MockSource {
        fn new(pages: &[(&str, String)]) -> Self {
            Self {
                pages: pages.iter().map(|(l, h)| (l.to_string(), h.clone())).collect(),
                calls: AtomicU32::new(0),
                cancel_after: None,
            }
        }

        /// Fires the token once the given number of pages have been served.
        fn cancelling_after(mut self, calls: u32, token: CancellationToken) -> Self {
            self.cancel_after = Some((calls, token));
            self
        }
    }

    #[async_trait]
    impl ProductSource for MockSource {
        async fn page(&self, link: &str) -> Result<String, CrawlError> {
            let calls = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if let Some((after, token)) = &self.cancel_after {
                if calls >= *after {
                    token.cancel();
                }
            }

            self.pages
                .get(link)
                .cloned()
                .ok_or_else(|| CrawlError::Status { link: link.to_string(), status: 404 })
        }
    }

    fn make_page(name: &str, price: &str, weight: &str) -> String {
        format!(
            r#"<html><body>
                <span id="productTitle">{}</span>
                <span id="priceblock_ourprice">{}</span>
                <div id="dp-container">Shipping Weight: {} pounds</div>
            </body></html>"#,
            name, price, weight
        )
    }

    fn make_test_config() -> Config {
        Config {
            delay_ms: 0,
            delay_jitter_ms: 0,
            format: OutputFormat::Json,
            criteria: Criteria {
                min_price: 10.0,
                max_price: 20.0,
                max_weight: 5.0,
                tolerance: 10.0,
                ..Criteria::default()
            },
            ..Config::default()
        }
    }

    fn links(links: &[&str]) -> Vec<String> {
        links.iter().map(|l| l.to_string()).collect()
    }

    #[tokio::test]
    async fn test_collect_filters_products() {
        let source = MockSource::new(&[
            ("https://a", make_page("Cheap", "$5.00", "1")),
            ("https://b", make_page("Near Min", "$9.50", "1")),
            ("https://c", make_page("Heavy", "$15.00", "9")),
            ("https://d", make_page("Range", "$10.00 - $15.99", "2")),
        ]);
        let cmd = CheckCommand::new(make_test_config());

        let accepted = cmd
            .collect(
                &source,
                &links(&["https://a", "https://b", "https://c", "https://d"]),
                &CancellationToken::new(),
            )
            .await;

        let names: Vec<_> = accepted.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Near Min", "Range"]);
    }

    #[tokio::test]
    async fn test_collect_skips_failed_links() {
        let source = MockSource::new(&[("https://ok", make_page("Fine", "$12.00", "1"))]);
        let cmd = CheckCommand::new(make_test_config());

        let accepted = cmd
            .collect(&source, &links(&["https://missing", "https://ok"]), &CancellationToken::new())
            .await;

        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].link, "https://ok");
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_collect_stops_when_cancelled_before_start() {
        let source = MockSource::new(&[("https://a", make_page("Fine", "$12.00", "1"))]);
        let cmd = CheckCommand::new(make_test_config());

        let cancel = CancellationToken::new();
        cancel.cancel();

        let accepted = cmd.collect(&source, &links(&["https://a"]), &cancel).await;
        assert!(accepted.is_empty());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_collect_discards_page_fetched_after_cancel() {
        let cancel = CancellationToken::new();
        let source = MockSource::new(&[
            ("https://a", make_page("First", "$12.00", "1")),
            ("https://b", make_page("Second", "$12.00", "1")),
            ("https://c", make_page("Third", "$12.00", "1")),
        ])
        .cancelling_after(2, cancel.clone());
        let cmd = CheckCommand::new(make_test_config());

        let accepted =
            cmd.collect(&source, &links(&["https://a", "https://b", "https://c"]), &cancel).await;

        // Second page arrived after the signal fired, so it is never parsed
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].name, "First");
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_execute_json_output() {
        let source = MockSource::new(&[("https://a", make_page("Kettle", "$12.00", "1"))]);
        let cmd = CheckCommand::new(make_test_config());

        let output = cmd
            .execute_with_client(&source, &links(&["https://a"]), &CancellationToken::new())
            .await
            .unwrap();

        let products: Vec<Product> = serde_json::from_str(&output).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Kettle");
        assert_eq!(products[0].weight, 1.0);
    }

    #[tokio::test]
    async fn test_execute_nothing_accepted() {
        let source = MockSource::new(&[]);
        let mut config = make_test_config();
        config.format = OutputFormat::Table;
        let cmd = CheckCommand::new(config);

        let output = cmd
            .execute_with_client(&source, &links(&["https://gone"]), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(output, "No products found.");
    }

    #[tokio::test]
    async fn test_collect_ignores_blank_links() {
        let source = MockSource::new(&[]);
        let cmd = CheckCommand::new(make_test_config());

        let accepted =
            cmd.collect(&source, &links(&["", "   "]), &CancellationToken::new()).await;
        assert!(accepted.is_empty());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }
}
