//! Inspect command: parse a saved product page offline.

use crate::amazon::parse_product_page;
use crate::config::Config;
use crate::format::Formatter;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Parses a saved product page and reports the record with its verdict.
pub struct InspectCommand {
    config: Config,
}

impl InspectCommand {
    /// Creates a new inspect command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Reads the HTML file and returns formatted output.
    ///
    /// The file path stands in for the link unless one is given.
    pub fn execute(&self, path: &Path, link: Option<&str>) -> Result<String> {
        let html = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read page: {}", path.display()))?;

        let link = link.map(String::from).unwrap_or_else(|| path.display().to_string());
        self.execute_html(&html, &link)
    }

    /// Parses already-loaded HTML.
    pub fn execute_html(&self, html: &str, link: &str) -> Result<String> {
        info!("Inspecting {}", link);

        let product = parse_product_page(html, link)?;
        let verdict = self.config.criteria.evaluate(&product);

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_verdict(&product, &verdict))
    }
}
