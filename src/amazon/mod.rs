//! Amazon-specific modules for fetching, page access, field extraction, and data models.

pub mod client;
pub mod extract;
pub mod models;
pub mod page;
pub mod parser;
pub mod selectors;

pub use client::{fetch_product, AmazonClient, CrawlError, ProductSource};
pub use models::{Dimensions, Product};
pub use page::{PageText, ProductPage};
pub use parser::{assemble, parse_product_page};
pub use selectors::PageRegion;
