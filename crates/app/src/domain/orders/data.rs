//! Orders Data

use rust_decimal::Decimal;

use crate::domain::{orders::OrdersServiceError, products::records::ProductId};

/// Order totals are stored as `NUMERIC(12, 2)`.
const MAX_TOTAL_CENTS: i64 = 999_999_999_999;

/// New Order Data
///
/// A `location` of `None` draws from the primary location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub product_id: ProductId,
    pub quantity: i32,
    pub location: Option<String>,
}

/// Price `quantity` units at `unit_price`.
///
/// # Errors
///
/// Returns [`OrdersServiceError::InvalidArgument`] when the total can't be
/// stored.
pub fn order_total(unit_price: Decimal, quantity: i32) -> Result<Decimal, OrdersServiceError> {
    unit_price
        .checked_mul(Decimal::from(quantity))
        .filter(|total| *total <= Decimal::new(MAX_TOTAL_CENTS, 2))
        .ok_or(OrdersServiceError::InvalidArgument("order total is too large"))
}
