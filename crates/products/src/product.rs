use serde::{Deserialize, Serialize};

use invex_core::{DomainError, DomainResult, ProductId};

/// A catalog record. Immutable once the catalog is loaded.
///
/// Field names match the catalog file and the CSV header: `id`, `name`,
/// `price`, `quantity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub quantity: u64,
}

impl Product {
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: f64, quantity: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            quantity,
        }
    }

    /// Price as shown on documents: currency symbol and two decimals.
    pub fn display_price(&self) -> String {
        format!("${:.2}", self.price)
    }

    /// Check record-level invariants.
    pub fn validate(&self) -> DomainResult<()> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DomainError::validation(format!(
                "product {}: price must be a non-negative number, got {}",
                self.id, self.price
            )));
        }
        Ok(())
    }
}
