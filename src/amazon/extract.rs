//! Field extractors for product detail pages.
//!
//! Each field has a `parse_*` function that reports failure as `None` and a
//! `find_*` wrapper that logs the failure and falls back to the zero value.
//! Extractors never look at each other's output.

use crate::amazon::models::Dimensions;
use regex_lite::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Every price on the US store starts with this marker.
pub const CURRENCY: char = '$';

/// Marker text of the review count link ("1 customer review", "15 customer reviews").
const REVIEW_MARKER: &str = "customer review";

/// `12.3 x 14 x 23 inches`
static DIMENSIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9]+\.?[0-9]*\s+x\s+[0-9]+\.?[0-9]*\s+x\s+[0-9]+\.?[0-9]*\s+inches").unwrap()
});

/// `23.45 ounces` or `1.2 pounds`
static WEIGHT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+\.?[0-9]*\s+(?:ounces|pounds)").unwrap());

/// `#45 in Kitchen (See Top 100 Kitchen) `
static RANK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#[0-9]+\.?[0-9]*\s+in\s+.+\s+").unwrap());

// Name

/// Extracts the product name from the title text.
pub fn find_name(text: &str) -> String {
    text.trim().to_string()
}

// Price

/// Parses a price like `$1,234.56` or a range like `$10.00 - $15.99`.
///
/// A range resolves to the mean of its two ends. Either end failing to parse
/// fails the whole price.
pub fn parse_price(text: &str) -> Option<f64> {
    let text = text.trim();
    if !text.starts_with(CURRENCY) {
        return None;
    }

    let text = text.replace(',', "");

    if text.contains('-') {
        let parts: Vec<&str> = text.split('-').collect();
        let [low, high] = parts.as_slice() else {
            debug!("Price range has {} parts: {}", parts.len(), text);
            return None;
        };

        let low = parse_amount(low)?;
        let high = parse_amount(high)?;
        return Some((low + high) / 2.0);
    }

    parse_amount(&text)
}

/// Parses one side of a price, with or without the currency marker.
fn parse_amount(text: &str) -> Option<f64> {
    let amount = text.trim().trim_start_matches(CURRENCY).trim();
    match amount.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Some(value),
        Ok(value) => {
            debug!("Price out of range: {}", value);
            None
        }
        Err(e) => {
            debug!("Error parsing price amount {:?}: {}", amount, e);
            None
        }
    }
}

/// Extracts the price, preferring the sale price over the regular price.
pub fn find_price(sale: &str, regular: &str) -> f64 {
    let text = if sale.trim().is_empty() { regular } else { sale };

    if text.trim().is_empty() {
        warn!("No price found on page");
        return 0.0;
    }

    parse_price(text).unwrap_or_else(|| {
        warn!("Error parsing price {:?}", text.trim());
        0.0
    })
}

// Reviews

/// Parses a review count like `1,234 customer reviews`.
pub fn parse_reviews(text: &str) -> Option<u64> {
    // Anything without the marker is some other widget, e.g. "Be the first to review"
    if !text.contains(REVIEW_MARKER) {
        return None;
    }

    let text = text.replace(',', "");
    let count = text.split_whitespace().next()?;

    count.parse().map_err(|e| debug!("Error parsing review count {:?}: {}", count, e)).ok()
}

/// Extracts the review count.
pub fn find_reviews(text: &str) -> u64 {
    parse_reviews(text).unwrap_or_else(|| {
        warn!("Error parsing reviews {:?}", text.trim());
        0
    })
}

// Dimensions

/// Parses the first `L x W x H inches` triple in the detail text.
///
/// The triple is atomic: one unparseable side fails all three.
pub fn parse_dimensions(container: &str) -> Option<Dimensions> {
    let found = DIMENSIONS.find(container)?.as_str();

    let sides: Vec<&str> = found.split('x').collect();
    let [length, width, height] = sides.as_slice() else {
        debug!("Dimensions have {} sides: {}", sides.len(), found);
        return None;
    };

    let height = height.replace("inches", "");

    Some(Dimensions::new(parse_decimal(length)?, parse_decimal(width)?, parse_decimal(&height)?))
}

/// Extracts length, width and height in inches.
pub fn find_dimensions(container: &str) -> Dimensions {
    parse_dimensions(container).unwrap_or_else(|| {
        warn!("Error parsing dimensions from detail container");
        Dimensions::default()
    })
}

// Weight

/// Parses the shipping weight from the detail text.
///
/// Pages list the item weight first and the shipping weight second, so the
/// last of the first two matches wins. The unit is not normalized.
pub fn parse_weight(container: &str) -> Option<f64> {
    let found = WEIGHT.find_iter(container).take(2).last()?.as_str();
    let number = found.split_whitespace().next()?;

    parse_decimal(number)
}

/// Extracts the shipping weight.
pub fn find_weight(container: &str) -> f64 {
    parse_weight(container).unwrap_or_else(|| {
        warn!("Error parsing weight from detail container");
        0.0
    })
}

// Rank

/// Parses the first `#N in Category` sales rank in the detail text.
pub fn parse_rank(container: &str) -> Option<u64> {
    let found = RANK.find(container)?.as_str();
    let token = found.split_whitespace().next()?;

    let Some(number) = token.strip_prefix('#') else {
        debug!("Rank token without marker: {}", token);
        return None;
    };

    let number = number.replace(',', "");
    number.parse().map_err(|e| debug!("Error parsing rank {:?}: {}", number, e)).ok()
}

/// Extracts the sales rank.
pub fn find_rank(container: &str) -> u64 {
    parse_rank(container).unwrap_or_else(|| {
        warn!("Error parsing rank from detail container");
        0
    })
}

fn parse_decimal(text: &str) -> Option<f64> {
    let cleaned = text.trim().replace(',', "");
    cleaned.parse().map_err(|e| debug!("Error parsing number {:?}: {}", cleaned, e)).ok()
}
