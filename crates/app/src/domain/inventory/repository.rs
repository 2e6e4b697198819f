//! Inventory Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::domain::{inventory::records::InventoryRecord, products::records::ProductId};

const LIST_INVENTORY_SQL: &str = include_str!("sql/list_inventory.sql");
const GET_INVENTORY_SQL: &str = include_str!("sql/get_inventory.sql");
const LOCK_INVENTORY_SQL: &str = include_str!("sql/lock_inventory.sql");
const INCREMENT_INVENTORY_SQL: &str = include_str!("sql/increment_inventory.sql");
const DECREMENT_INVENTORY_SQL: &str = include_str!("sql/decrement_inventory.sql");
const PRODUCT_EXISTS_SQL: &str = include_str!("sql/product_exists.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgInventoryRepository;

impl PgInventoryRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_inventory(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: Option<ProductId>,
    ) -> Result<Vec<InventoryRecord>, sqlx::Error> {
        query_as::<Postgres, InventoryRecord>(LIST_INVENTORY_SQL)
            .bind(product.map(ProductId::into_inner))
            .fetch_all(&mut **tx)
            .await
    }

    /// The stored record, or an unsaved zero-quantity record when the product
    /// has never been stocked at `location`.
    pub(crate) async fn get_or_create(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
        location: &str,
    ) -> Result<InventoryRecord, sqlx::Error> {
        let record = query_as::<Postgres, InventoryRecord>(GET_INVENTORY_SQL)
            .bind(product.into_inner())
            .bind(location)
            .fetch_optional(&mut **tx)
            .await?;

        Ok(record.unwrap_or_else(|| InventoryRecord::empty(product, location)))
    }

    /// Row-lock the record until the transaction ends.
    pub(crate) async fn lock_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
        location: &str,
    ) -> Result<Option<InventoryRecord>, sqlx::Error> {
        query_as::<Postgres, InventoryRecord>(LOCK_INVENTORY_SQL)
            .bind(product.into_inner())
            .bind(location)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Add `delta` units, creating the record at `delta` when absent.
    pub(crate) async fn increment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
        location: &str,
        delta: i32,
    ) -> Result<InventoryRecord, sqlx::Error> {
        query_as::<Postgres, InventoryRecord>(INCREMENT_INVENTORY_SQL)
            .bind(product.into_inner())
            .bind(location)
            .bind(delta)
            .fetch_one(&mut **tx)
            .await
    }

    /// Remove `delta` units only if at least that many are held. Returns
    /// `None`, leaving the row untouched, when the record is missing or short.
    pub(crate) async fn compare_and_decrement(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
        location: &str,
        delta: i32,
    ) -> Result<Option<InventoryRecord>, sqlx::Error> {
        query_as::<Postgres, InventoryRecord>(DECREMENT_INVENTORY_SQL)
            .bind(product.into_inner())
            .bind(location)
            .bind(delta)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn product_exists(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(PRODUCT_EXISTS_SQL)
            .bind(product.into_inner())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for InventoryRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            product_id: ProductId::new(row.try_get("product_id")?),
            location: row.try_get("location")?,
            quantity: row.try_get("quantity")?,
            updated_at: Some(row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff()),
        })
    }
}
