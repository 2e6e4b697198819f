//! Report Rows

use rust_decimal::Decimal;

use crate::domain::products::records::{Category, ProductId};

/// Stock level below which a record is reported as low.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i32 = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LowStockRow {
    pub product_id: ProductId,
    pub name: String,
    pub category: Category,
    pub location: String,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRevenueRow {
    pub category: Category,
    pub total_revenue: Decimal,
    pub order_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationStockRow {
    pub location: String,
    pub total_stock: i64,
    pub product_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopSellingRow {
    pub product_id: ProductId,
    pub name: String,
    pub total_sold: i64,
    pub total_revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryValueRow {
    pub category: Category,
    pub total_value: Decimal,
}
