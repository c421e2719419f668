//! Tolerance-aware acceptance bounds.

use super::Filter;
use crate::amazon::Product;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric acceptance bounds with a symmetric tolerance.
///
/// Tolerance is a percentage that moves every lower bound down and every
/// upper bound up. It is not clamped, so a tolerance above 100 turns lower
/// bounds negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Criteria {
    pub min_price: f64,
    pub max_price: f64,
    pub min_rank: u64,
    pub max_rank: u64,
    pub min_reviews: u64,
    pub max_reviews: u64,
    pub max_length: f64,
    pub max_width: f64,
    pub max_height: f64,
    pub max_weight: f64,
    /// Percentage applied to all bounds
    pub tolerance: f64,
}

impl Default for Criteria {
    fn default() -> Self {
        Self {
            min_price: 0.0,
            max_price: f64::MAX,
            min_rank: 0,
            max_rank: u64::MAX,
            min_reviews: 0,
            max_reviews: u64::MAX,
            max_length: f64::MAX,
            max_width: f64::MAX,
            max_height: f64::MAX,
            max_weight: f64::MAX,
            tolerance: 0.0,
        }
    }
}

impl Criteria {
    /// Lowers a declared minimum by the tolerance.
    pub fn lowered(&self, min: f64) -> f64 {
        (1.0 - self.tolerance / 100.0) * min
    }

    /// Raises a declared maximum by the tolerance.
    pub fn raised(&self, max: f64) -> f64 {
        (1.0 + self.tolerance / 100.0) * max
    }

    /// Checks every dimension in a fixed order, stopping at the first violation.
    ///
    /// Order: price, rank, reviews, length, width, height, weight.
    pub fn evaluate(&self, product: &Product) -> Result<(), Rejection> {
        self.check_range(Dimension::Price, product.price, self.min_price, self.max_price)?;
        self.check_range(
            Dimension::Rank,
            product.rank as f64,
            self.min_rank as f64,
            self.max_rank as f64,
        )?;
        self.check_range(
            Dimension::Reviews,
            product.reviews as f64,
            self.min_reviews as f64,
            self.max_reviews as f64,
        )?;
        self.check_max(Dimension::Length, product.length, self.max_length)?;
        self.check_max(Dimension::Width, product.width, self.max_width)?;
        self.check_max(Dimension::Height, product.height, self.max_height)?;
        self.check_max(Dimension::Weight, product.weight, self.max_weight)?;
        Ok(())
    }

    /// Returns true if the product is within every bound.
    pub fn accepts(&self, product: &Product) -> bool {
        self.evaluate(product).is_ok()
    }

    fn check_range(
        &self,
        dimension: Dimension,
        value: f64,
        min: f64,
        max: f64,
    ) -> Result<(), Rejection> {
        let min = self.lowered(min);
        if value < min {
            return Err(Rejection { dimension, value, bound: Bound::Min(min) });
        }
        self.check_max(dimension, value, max)
    }

    fn check_max(&self, dimension: Dimension, value: f64, max: f64) -> Result<(), Rejection> {
        let max = self.raised(max);
        if value > max {
            return Err(Rejection { dimension, value, bound: Bound::Max(max) });
        }
        Ok(())
    }
}

impl Filter for Criteria {
    fn matches(&self, product: &Product) -> bool {
        self.accepts(product)
    }

    fn description(&self) -> String {
        let mut parts = Vec::new();

        if self.min_price > 0.0 || self.max_price < f64::MAX {
            parts.push(format!("Price: {}", describe_range(self.min_price, self.max_price)));
        }
        if self.min_rank > 0 || self.max_rank < u64::MAX {
            parts.push(format!(
                "Rank: {}",
                describe_range(self.min_rank as f64, self.max_rank as f64)
            ));
        }
        if self.min_reviews > 0 || self.max_reviews < u64::MAX {
            parts.push(format!(
                "Reviews: {}",
                describe_range(self.min_reviews as f64, self.max_reviews as f64)
            ));
        }
        for (label, max) in [
            ("Length", self.max_length),
            ("Width", self.max_width),
            ("Height", self.max_height),
            ("Weight", self.max_weight),
        ] {
            if max < f64::MAX {
                parts.push(format!("{}: <= {}", label, max));
            }
        }

        if parts.is_empty() {
            return "Any product".to_string();
        }

        let mut description = parts.join(", ");
        if self.tolerance != 0.0 {
            description.push_str(&format!(" (±{}%)", self.tolerance));
        }
        description
    }
}

fn describe_range(min: f64, max: f64) -> String {
    let upper_open = max >= u64::MAX as f64 || max >= f64::MAX;
    match (min > 0.0, upper_open) {
        (true, false) => format!("{} - {}", min, max),
        (true, true) => format!(">= {}", min),
        (false, _) => format!("<= {}", max),
    }
}

/// The numeric fields the criteria bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Price,
    Rank,
    Reviews,
    Length,
    Width,
    Height,
    Weight,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dimension::Price => "price",
            Dimension::Rank => "rank",
            Dimension::Reviews => "reviews",
            Dimension::Length => "length",
            Dimension::Width => "width",
            Dimension::Height => "height",
            Dimension::Weight => "weight",
        };
        write!(f, "{}", name)
    }
}

/// Tolerance-adjusted bound that was crossed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Min(f64),
    Max(f64),
}

/// First bound a product failed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rejection {
    pub dimension: Dimension,
    pub value: f64,
    pub bound: Bound,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bound {
            Bound::Min(min) => write!(f, "{} {} below minimum {}", self.dimension, self.value, min),
            Bound::Max(max) => write!(f, "{} {} above maximum {}", self.dimension, self.value, max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_product() -> Product {
        Product {
            name: "Test".to_string(),
            link: "https://www.amazon.com/dp/TEST".to_string(),
            price: 15.0,
            rank: 500,
            reviews: 100,
            length: 10.0,
            width: 8.0,
            height: 4.0,
            weight: 2.0,
        }
    }

    fn make_criteria() -> Criteria {
        Criteria {
            min_price: 10.0,
            max_price: 20.0,
            min_rank: 100,
            max_rank: 1000,
            min_reviews: 50,
            max_reviews: 500,
            max_length: 12.0,
            max_width: 10.0,
            max_height: 6.0,
            max_weight: 3.0,
            tolerance: 0.0,
        }
    }

    #[test]
    fn test_default_accepts_everything() {
        let criteria = Criteria::default();
        assert!(criteria.accepts(&make_product()));
        assert!(criteria.accepts(&Product::default()));

        let huge = Product { rank: u64::MAX, reviews: u64::MAX, price: 1e300, ..make_product() };
        assert!(criteria.accepts(&huge));
    }

    #[test]
    fn test_within_bounds() {
        assert_eq!(make_criteria().evaluate(&make_product()), Ok(()));
    }

    #[test]
    fn test_tolerance_lowers_min_price() {
        let criteria = Criteria { tolerance: 10.0, ..make_criteria() };
        assert!((criteria.lowered(10.0) - 9.0).abs() < 1e-9);

        let product = Product { price: 9.5, ..make_product() };
        assert!(criteria.accepts(&product));

        let product = Product { price: 8.0, ..make_product() };
        let rejection = criteria.evaluate(&product).unwrap_err();
        assert_eq!(rejection.dimension, Dimension::Price);
        assert!(matches!(rejection.bound, Bound::Min(min) if (min - 9.0).abs() < 1e-9));
    }

    #[test]
    fn test_tolerance_raises_max() {
        let criteria = Criteria { tolerance: 10.0, ..make_criteria() };

        // 20 * 1.1 = 22
        assert!(criteria.accepts(&Product { price: 21.5, ..make_product() }));
        assert!(!criteria.accepts(&Product { price: 22.5, ..make_product() }));

        // 12 * 1.1 = 13.2
        assert!(criteria.accepts(&Product { length: 13.0, ..make_product() }));
        assert!(!criteria.accepts(&Product { length: 13.5, ..make_product() }));
    }

    #[test]
    fn test_zero_tolerance_is_exact() {
        let criteria = make_criteria();
        assert!(criteria.accepts(&Product { price: 10.0, ..make_product() }));
        assert!(criteria.accepts(&Product { price: 20.0, ..make_product() }));
        assert!(!criteria.accepts(&Product { price: 9.99, ..make_product() }));
        assert!(!criteria.accepts(&Product { price: 20.01, ..make_product() }));
    }

    #[test]
    fn test_full_tolerance_doubles_max_and_zeroes_min() {
        let criteria = Criteria { tolerance: 100.0, ..make_criteria() };
        assert_eq!(criteria.raised(20.0), 40.0);
        assert_eq!(criteria.lowered(10.0), 0.0);
        assert!(criteria.accepts(&Product { price: 0.0, ..make_product() }));
        assert!(criteria.accepts(&Product { price: 40.0, ..make_product() }));
    }

    #[test]
    fn test_negative_lowered_min_is_not_clamped() {
        let criteria = Criteria { tolerance: 150.0, ..make_criteria() };
        assert_eq!(criteria.lowered(10.0), -5.0);
        assert!(criteria.accepts(&Product { price: 0.0, rank: 0, reviews: 0, ..make_product() }));
    }

    #[test]
    fn test_rank_and_reviews_bounds() {
        let criteria = make_criteria();

        let rejection = criteria.evaluate(&Product { rank: 50, ..make_product() }).unwrap_err();
        assert_eq!(rejection.dimension, Dimension::Rank);

        let rejection = criteria.evaluate(&Product { rank: 1001, ..make_product() }).unwrap_err();
        assert_eq!(rejection.dimension, Dimension::Rank);
        assert_eq!(rejection.bound, Bound::Max(1000.0));

        let rejection = criteria.evaluate(&Product { reviews: 10, ..make_product() }).unwrap_err();
        assert_eq!(rejection.dimension, Dimension::Reviews);
    }

    #[test]
    fn test_physical_bounds() {
        let criteria = make_criteria();

        for (product, dimension) in [
            (Product { length: 12.5, ..make_product() }, Dimension::Length),
            (Product { width: 10.5, ..make_product() }, Dimension::Width),
            (Product { height: 6.5, ..make_product() }, Dimension::Height),
            (Product { weight: 3.5, ..make_product() }, Dimension::Weight),
        ] {
            assert_eq!(criteria.evaluate(&product).unwrap_err().dimension, dimension);
        }
    }

    #[test]
    fn test_zero_sentinel_fields_pass_upper_bounds() {
        let criteria = Criteria { min_price: 0.0, min_rank: 0, min_reviews: 0, ..make_criteria() };
        assert!(criteria.accepts(&Product::default()));
    }

    #[test]
    fn test_first_violation_reported() {
        let criteria = make_criteria();
        let product = Product { price: 100.0, rank: 1, weight: 50.0, ..make_product() };

        let rejection = criteria.evaluate(&product).unwrap_err();
        assert_eq!(rejection.dimension, Dimension::Price);
        assert_eq!(rejection.value, 100.0);

        let product = Product { rank: 1, weight: 50.0, ..make_product() };
        assert_eq!(criteria.evaluate(&product).unwrap_err().dimension, Dimension::Rank);
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let criteria = Criteria { tolerance: 5.0, ..make_criteria() };
        let product = Product { height: 6.2, ..make_product() };
        assert_eq!(criteria.evaluate(&product), criteria.evaluate(&product));
    }

    #[test]
    fn test_rejection_display() {
        let rejection =
            Rejection { dimension: Dimension::Weight, value: 3.5, bound: Bound::Max(3.3) };
        assert_eq!(rejection.to_string(), "weight 3.5 above maximum 3.3");

        let rejection =
            Rejection { dimension: Dimension::Price, value: 8.0, bound: Bound::Min(9.0) };
        assert_eq!(rejection.to_string(), "price 8 below minimum 9");
    }

    #[test]
    fn test_filter_impl() {
        let criteria = make_criteria();
        assert!(criteria.matches(&make_product()));
        assert!(!criteria.matches(&Product { price: 1.0, ..make_product() }));
    }

    #[test]
    fn test_description() {
        assert_eq!(Criteria::default().description(), "Any product");

        let criteria = Criteria { min_price: 10.0, max_price: 20.0, ..Criteria::default() };
        assert_eq!(criteria.description(), "Price: 10 - 20");

        let criteria =
            Criteria { max_rank: 5000, max_weight: 2.5, tolerance: 10.0, ..Criteria::default() };
        assert_eq!(criteria.description(), "Rank: <= 5000, Weight: <= 2.5 (±10%)");

        let criteria = Criteria { min_reviews: 100, ..Criteria::default() };
        assert_eq!(criteria.description(), "Reviews: >= 100");
    }
}
