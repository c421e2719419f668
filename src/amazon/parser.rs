//! Assembles product records from parsed detail pages.

use crate::amazon::client::CrawlError;
use crate::amazon::extract;
use crate::amazon::models::Product;
use crate::amazon::page::{PageText, ProductPage};
use crate::amazon::selectors::PageRegion;
use tracing::{debug, trace};

/// Parses a product detail page into a record.
///
/// Only error pages fail here; unrecognized fields come back as zero.
pub fn parse_product_page(html: &str, link: &str) -> Result<Product, CrawlError> {
    let page = ProductPage::parse(html)?;
    Ok(assemble(&page, link))
}

/// Runs every field extractor against the page.
pub fn assemble(page: &impl PageText, link: &str) -> Product {
    let name = extract::find_name(&page.region_text(PageRegion::Title));
    let price = extract::find_price(
        &page.region_text(PageRegion::SalePrice),
        &page.region_text(PageRegion::RegularPrice),
    );
    let reviews = extract::find_reviews(&page.region_text(PageRegion::ReviewCount));

    let container = page.detail_text();
    trace!("Detail container: {} chars", container.len());

    let dimensions = extract::find_dimensions(&container);
    let weight = extract::find_weight(&container);
    let rank = extract::find_rank(&container);

    let product = Product {
        name,
        link: link.to_string(),
        price,
        rank,
        reviews,
        length: dimensions.length,
        width: dimensions.width,
        height: dimensions.height,
        weight,
    };

    debug!("Parsed product: {} - {}", product.link, product.name);
    product
}
