//! Order Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::products::records::{ProductId, ProductRecord},
    ids::TypedId,
};

/// Order ID
pub type OrderId = TypedId<OrderRecord>;

/// Order Record
///
/// `total_price` is fixed when the order is placed.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub id: OrderId,
    pub product_id: ProductId,
    pub location: String,
    pub quantity: i32,
    pub total_price: Decimal,
    pub ordered_at: Timestamp,
}

/// A freshly placed order with the product snapshot it was priced from.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedOrder {
    pub order: OrderRecord,
    pub product: ProductRecord,
}
