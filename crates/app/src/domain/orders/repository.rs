//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    orders::records::{OrderId, OrderRecord},
    products::records::ProductId,
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
        location: &str,
        quantity: i32,
        total_price: Decimal,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(product.into_inner())
            .bind(location)
            .bind(quantity)
            .bind(total_price)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_inner())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: OrderId::new(row.try_get("id")?),
            product_id: ProductId::new(row.try_get("product_id")?),
            location: row.try_get("location")?,
            quantity: row.try_get("quantity")?,
            total_price: row.try_get("total_price")?,
            ordered_at: row.try_get::<SqlxTimestamp, _>("ordered_at")?.to_jiff(),
        })
    }
}
