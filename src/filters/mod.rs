//! Product acceptance filtering.

pub mod criteria;

use crate::amazon::Product;

pub use criteria::{Bound, Criteria, Dimension, Rejection};

/// Trait for filtering products.
pub trait Filter: Send + Sync {
    /// Returns true if the product passes the filter.
    fn matches(&self, product: &Product) -> bool;

    /// Returns a description of this filter.
    fn description(&self) -> String;

    /// Keeps the products that pass the filter.
    fn apply(&self, products: Vec<Product>) -> Vec<Product> {
        products.into_iter().filter(|p| self.matches(p)).collect()
    }
}
