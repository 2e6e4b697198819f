//! Inventory Records

use jiff::Timestamp;

use crate::domain::products::records::ProductId;

/// Stock held for one product at one location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryRecord {
    pub product_id: ProductId,
    pub location: String,
    pub quantity: i32,

    /// `None` for a record that has never been written.
    pub updated_at: Option<Timestamp>,
}

impl InventoryRecord {
    /// The zero-quantity record standing in for a location the product has
    /// never been stocked at.
    #[must_use]
    pub fn empty(product_id: ProductId, location: impl Into<String>) -> Self {
        Self {
            product_id,
            location: location.into(),
            quantity: 0,
            updated_at: None,
        }
    }

    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.updated_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_record_has_no_stock_and_is_not_persisted() {
        let record = InventoryRecord::empty(ProductId::new(7), "Store 1");

        assert_eq!(record.quantity, 0);
        assert_eq!(record.location, "Store 1");
        assert!(!record.is_persisted(), "virtual records are never stored");
    }
}
