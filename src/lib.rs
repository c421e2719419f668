//! amz-vetter - Scrape Amazon product pages and vet them against acceptance criteria
//!
//! Fault-tolerant field extraction from product detail pages, followed by a
//! tolerance-aware bounds filter.

pub mod amazon;
pub mod commands;
pub mod config;
pub mod filters;
pub mod format;

pub use amazon::models::{Dimensions, Product};
pub use config::Config;
pub use filters::Criteria;
