//! Reports Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    products::{records::ProductId, repository::try_get_category},
    reports::records::{
        CategoryRevenueRow, CategoryValueRow, LocationStockRow, LowStockRow, TopSellingRow,
    },
};

const LOW_STOCK_SQL: &str = include_str!("sql/low_stock.sql");
const REVENUE_BY_CATEGORY_SQL: &str = include_str!("sql/revenue_by_category.sql");
const STOCK_BY_LOCATION_SQL: &str = include_str!("sql/stock_by_location.sql");
const TOP_SELLING_SQL: &str = include_str!("sql/top_selling.sql");
const INVENTORY_VALUE_BY_CATEGORY_SQL: &str = include_str!("sql/inventory_value_by_category.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgReportsRepository;

impl PgReportsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn low_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        threshold: i32,
    ) -> Result<Vec<LowStockRow>, sqlx::Error> {
        query_as::<Postgres, LowStockRow>(LOW_STOCK_SQL)
            .bind(threshold)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn revenue_by_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<CategoryRevenueRow>, sqlx::Error> {
        query_as::<Postgres, CategoryRevenueRow>(REVENUE_BY_CATEGORY_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn stock_by_location(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<LocationStockRow>, sqlx::Error> {
        query_as::<Postgres, LocationStockRow>(STOCK_BY_LOCATION_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn top_selling(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        limit: i64,
    ) -> Result<Vec<TopSellingRow>, sqlx::Error> {
        query_as::<Postgres, TopSellingRow>(TOP_SELLING_SQL)
            .bind(limit)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn inventory_value_by_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<CategoryValueRow>, sqlx::Error> {
        query_as::<Postgres, CategoryValueRow>(INVENTORY_VALUE_BY_CATEGORY_SQL)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for LowStockRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            product_id: ProductId::new(row.try_get("product_id")?),
            name: row.try_get("name")?,
            category: try_get_category(row, "category")?,
            location: row.try_get("location")?,
            quantity: row.try_get("quantity")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CategoryRevenueRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            category: try_get_category(row, "category")?,
            total_revenue: row.try_get("total_revenue")?,
            order_count: row.try_get("order_count")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for LocationStockRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            location: row.try_get("location")?,
            total_stock: row.try_get("total_stock")?,
            product_count: row.try_get("product_count")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for TopSellingRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            product_id: ProductId::new(row.try_get("product_id")?),
            name: row.try_get("name")?,
            total_sold: row.try_get("total_sold")?,
            total_revenue: row.try_get("total_revenue")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CategoryValueRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            category: try_get_category(row, "category")?,
            total_value: row.try_get("total_value")?,
        })
    }
}
