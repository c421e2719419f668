//! Data models for scraped product records.

use serde::{Deserialize, Serialize};

/// A product record scraped from a single Amazon detail page.
///
/// Every numeric field is either a successfully parsed value or exactly zero.
/// Zero means "absent or unparseable"; a record cannot tell a free item apart
/// from a price that failed to parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product title, possibly empty
    pub name: String,
    /// Link the page was fetched from, attached verbatim
    pub link: String,
    /// Price in dollars (mean of both ends for a price range)
    pub price: f64,
    /// Best Sellers Rank within its category
    pub rank: u64,
    /// Number of customer reviews
    pub reviews: u64,
    /// Length in inches
    pub length: f64,
    /// Width in inches
    pub width: f64,
    /// Height in inches
    pub height: f64,
    /// Shipping weight, in pounds or ounces as listed on the page
    pub weight: f64,
}

impl Product {
    /// Returns the physical dimensions as a single value.
    pub fn dimensions(&self) -> Dimensions {
        Dimensions { length: self.length, width: self.width, height: self.height }
    }

    /// Returns true if no field beyond the link could be extracted.
    pub fn is_blank(&self) -> bool {
        self.name.is_empty()
            && self.price == 0.0
            && self.rank == 0
            && self.reviews == 0
            && self.dimensions().is_zero()
            && self.weight == 0.0
    }
}

/// Length, width and height in inches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn new(length: f64, width: f64, height: f64) -> Self {
        Self { length, width, height }
    }

    /// All three sides zeroed, the sentinel for an unparsed triple.
    pub fn is_zero(&self) -> bool {
        self.length == 0.0 && self.width == 0.0 && self.height == 0.0
    }
}
