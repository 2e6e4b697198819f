//! Test Helpers

use rust_decimal::Decimal;
use sqlx::query_scalar;

use crate::{
    domain::{
        inventory::{
            InventoryService, InventoryServiceError,
            data::{StockAction, StockAdjustment},
            records::InventoryRecord,
        },
        products::{
            ProductsService, ProductsServiceError,
            data::NewProduct,
            records::{Category, ProductId, ProductRecord},
        },
    },
    test::TestContext,
};

pub(crate) async fn create_product(
    ctx: &TestContext,
    category: Category,
    price: Decimal,
) -> Result<ProductRecord, ProductsServiceError> {
    ctx.products
        .create_product(NewProduct {
            name: format!("{category} item"),
            description: String::new(),
            price,
            category,
        })
        .await
}

pub(crate) async fn adjust(
    ctx: &TestContext,
    product: ProductId,
    location: &str,
    action: StockAction,
    value: i32,
) -> Result<InventoryRecord, InventoryServiceError> {
    ctx.inventory
        .adjust_stock(StockAdjustment {
            product_id: product,
            location: Some(location.to_string()),
            action,
            value,
        })
        .await
}

pub(crate) async fn stock_at(
    ctx: &TestContext,
    product: ProductId,
    location: &str,
) -> Result<i32, InventoryServiceError> {
    let record = ctx
        .inventory
        .get_stock(product, Some(location.to_string()))
        .await?;

    Ok(record.quantity)
}

pub(crate) async fn order_count(ctx: &TestContext) -> Result<i64, sqlx::Error> {
    query_scalar::<_, i64>("SELECT COUNT(*) FROM orders")
        .fetch_one(ctx.db.pool())
        .await
}
