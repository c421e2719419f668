//! Output formatting for products (table, JSON, markdown, CSV).

use crate::amazon::Product;
use crate::config::OutputFormat;
use crate::filters::Rejection;

/// Formats products for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a single product.
    pub fn format_product(&self, product: &Product) -> String {
        match self.format {
            OutputFormat::Json => self.json_single(product),
            OutputFormat::Table => self.table_single(product),
            OutputFormat::Markdown => self.markdown_single(product),
            OutputFormat::Csv => self.csv_products(std::slice::from_ref(product)),
        }
    }

    /// Formats multiple products.
    pub fn format_products(&self, products: &[Product]) -> String {
        if products.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => self.csv_header(),
                _ => "No products found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_products(products),
            OutputFormat::Table => self.table_products(products),
            OutputFormat::Markdown => self.markdown_products(products),
            OutputFormat::Csv => self.csv_products(products),
        }
    }

    /// Formats a product together with its acceptance verdict.
    pub fn format_verdict(&self, product: &Product, verdict: &Result<(), Rejection>) -> String {
        match self.format {
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "product": product,
                    "accepted": verdict.is_ok(),
                    "rejection": verdict.as_ref().err().map(|r| r.to_string()),
                });
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
            }
            OutputFormat::Csv => self.format_product(product),
            OutputFormat::Table => {
                format!("{}\nVerdict: {}", self.table_single(product), verdict_text(verdict))
            }
            OutputFormat::Markdown => format!(
                "{}\n- **Verdict:** {}",
                self.markdown_single(product),
                verdict_text(verdict)
            ),
        }
    }

    // JSON formatting

    fn json_single(&self, product: &Product) -> String {
        serde_json::to_string_pretty(product).unwrap_or_else(|_| "{}".to_string())
    }

    fn json_products(&self, products: &[Product]) -> String {
        serde_json::to_string_pretty(products).unwrap_or_else(|_| "[]".to_string())
    }

    // Table formatting

    fn table_single(&self, product: &Product) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Name:    {}", display_name(product)));
        lines.push(format!("Link:    {}", product.link));
        lines.push(format!("Price:   {}", price_text(product)));
        lines.push(format!("Rank:    {}", rank_text(product)));
        lines.push(format!("Reviews: {}", count_text(product.reviews)));
        lines.push(format!("Size:    {}", size_text(product)));
        lines.push(format!("Weight:  {}", decimal_text(product.weight)));

        lines.join("\n")
    }

    fn table_products(&self, products: &[Product]) -> String {
        // Calculate column widths
        let price_width = 10;
        let rank_width = 9;
        let reviews_width = 8;
        let size_width = 20;
        let weight_width = 7;
        let name_width = 50;

        let mut lines = Vec::new();

        // Header
        lines.push(format!(
            "{:<price_width$}  {:<rank_width$}  {:<reviews_width$}  {:<size_width$}  {:<weight_width$}  {}",
            "Price", "Rank", "Reviews", "Size (in)", "Weight", "Name"
        ));
        lines.push(format!(
            "{:-<price_width$}  {:-<rank_width$}  {:-<reviews_width$}  {:-<size_width$}  {:-<weight_width$}  {:-<name_width$}",
            "", "", "", "", "", ""
        ));

        // Rows
        for product in products {
            lines.push(format!(
                "{:>price_width$}  {:>rank_width$}  {:>reviews_width$}  {:<size_width$}  {:>weight_width$}  {}",
                price_text(product),
                rank_text(product),
                count_text(product.reviews),
                size_text(product).trim_end_matches(" in"),
                decimal_text(product.weight),
                truncate(display_name(product), name_width)
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} products", products.len()));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_single(&self, product: &Product) -> String {
        let mut lines = Vec::new();

        lines.push(format!("## {}", display_name(product)));
        lines.push(String::new());

        lines.push(format!("- **Link:** [View on Amazon]({})", product.link));
        lines.push(format!("- **Price:** {}", price_text(product)));
        lines.push(format!("- **Rank:** {}", rank_text(product)));
        lines.push(format!("- **Reviews:** {}", count_text(product.reviews)));
        lines.push(format!("- **Size:** {}", size_text(product)));
        lines.push(format!("- **Weight:** {}", decimal_text(product.weight)));

        lines.join("\n")
    }

    fn markdown_products(&self, products: &[Product]) -> String {
        let mut lines = Vec::new();

        lines.push("| Price | Rank | Reviews | Size (in) | Weight | Name |".to_string());
        lines.push("|-------|------|---------|-----------|--------|------|".to_string());

        for product in products {
            lines.push(format!(
                "| {} | {} | {} | {} | {} | [{}]({}) |",
                price_text(product),
                rank_text(product),
                count_text(product.reviews),
                size_text(product).trim_end_matches(" in"),
                decimal_text(product.weight),
                truncate(display_name(product), 40),
                product.link
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} products accepted*", products.len()));

        lines.join("\n")
    }

    // CSV formatting

    fn csv_header(&self) -> String {
        "name,price,rank,reviews,length,width,height,weight,link".to_string()
    }

    fn csv_products(&self, products: &[Product]) -> String {
        let mut lines = Vec::new();
        lines.push(self.csv_header());

        for product in products {
            lines.push(format!(
                "{},{},{},{},{},{},{},{},{}",
                Self::csv_escape(&product.name),
                product.price,
                product.rank,
                product.reviews,
                product.length,
                product.width,
                product.height,
                product.weight,
                Self::csv_escape(&product.link)
            ));
        }

        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}

// Zero means the field could not be read, so it renders as N/A

fn display_name(product: &Product) -> &str {
    if product.name.is_empty() {
        "(untitled)"
    } else {
        &product.name
    }
}

fn price_text(product: &Product) -> String {
    if product.price == 0.0 {
        "N/A".to_string()
    } else {
        format!("${:.2}", product.price)
    }
}

fn rank_text(product: &Product) -> String {
    if product.rank == 0 {
        "N/A".to_string()
    } else {
        format!("#{}", product.rank)
    }
}

fn count_text(count: u64) -> String {
    if count == 0 {
        "N/A".to_string()
    } else {
        count.to_string()
    }
}

fn decimal_text(value: f64) -> String {
    if value == 0.0 {
        "N/A".to_string()
    } else {
        value.to_string()
    }
}

fn size_text(product: &Product) -> String {
    if product.dimensions().is_zero() {
        "N/A".to_string()
    } else {
        format!("{} x {} x {} in", product.length, product.width, product.height)
    }
}

fn verdict_text(verdict: &Result<(), Rejection>) -> String {
    match verdict {
        Ok(()) => "accepted".to_string(),
        Err(rejection) => format!("rejected ({})", rejection),
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let head: String = text.chars().take(width - 3).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
