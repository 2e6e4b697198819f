//! Reports service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::{Db, settle},
    domain::reports::{
        errors::ReportsServiceError,
        records::{
            CategoryRevenueRow, CategoryValueRow, LocationStockRow, LowStockRow, TopSellingRow,
        },
        repository::PgReportsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgReportsService {
    db: Db,
    repository: PgReportsRepository,
}

impl PgReportsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgReportsRepository::new(),
        }
    }
}

#[async_trait]
impl ReportsService for PgReportsService {
    #[tracing::instrument(name = "reports.service.low_stock", skip(self), err)]
    async fn low_stock(&self, threshold: i32) -> Result<Vec<LowStockRow>, ReportsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let result = self
            .repository
            .low_stock(&mut tx, threshold)
            .await
            .map_err(ReportsServiceError::from);

        settle(tx, result).await
    }

    #[tracing::instrument(name = "reports.service.revenue_by_category", skip(self), err)]
    async fn revenue_by_category(&self) -> Result<Vec<CategoryRevenueRow>, ReportsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let result = self
            .repository
            .revenue_by_category(&mut tx)
            .await
            .map_err(ReportsServiceError::from);

        settle(tx, result).await
    }

    #[tracing::instrument(name = "reports.service.stock_distribution", skip(self), err)]
    async fn stock_distribution(&self) -> Result<Vec<LocationStockRow>, ReportsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let result = self
            .repository
            .stock_by_location(&mut tx)
            .await
            .map_err(ReportsServiceError::from);

        settle(tx, result).await
    }

    #[tracing::instrument(name = "reports.service.top_selling", skip(self), err)]
    async fn top_selling(&self, limit: i64) -> Result<Vec<TopSellingRow>, ReportsServiceError> {
        if limit <= 0 {
            return Err(ReportsServiceError::InvalidArgument(
                "limit must be a positive integer",
            ));
        }

        let mut tx = self.db.begin_transaction().await?;

        let result = self
            .repository
            .top_selling(&mut tx, limit)
            .await
            .map_err(ReportsServiceError::from);

        settle(tx, result).await
    }

    #[tracing::instrument(name = "reports.service.inventory_value", skip(self), err)]
    async fn inventory_value_by_category(
        &self,
    ) -> Result<Vec<CategoryValueRow>, ReportsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let result = self
            .repository
            .inventory_value_by_category(&mut tx)
            .await
            .map_err(ReportsServiceError::from);

        settle(tx, result).await
    }
}

#[automock]
#[async_trait]
pub trait ReportsService: Send + Sync {
    /// Stock records holding strictly fewer than `threshold` units, lowest
    /// first.
    async fn low_stock(&self, threshold: i32) -> Result<Vec<LowStockRow>, ReportsServiceError>;

    /// Order revenue per category, highest first.
    async fn revenue_by_category(&self) -> Result<Vec<CategoryRevenueRow>, ReportsServiceError>;

    /// Units and distinct products held at each location.
    async fn stock_distribution(&self) -> Result<Vec<LocationStockRow>, ReportsServiceError>;

    /// The `limit` best-selling products by units sold.
    async fn top_selling(&self, limit: i64) -> Result<Vec<TopSellingRow>, ReportsServiceError>;

    /// Value of held stock at current prices, per category.
    async fn inventory_value_by_category(
        &self,
    ) -> Result<Vec<CategoryValueRow>, ReportsServiceError>;
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rust_decimal::Decimal;
    use sqlx::PgPool;
    use testresult::TestResult;

    use crate::{
        domain::{
            inventory::data::StockAction,
            orders::{OrdersService, data::NewOrder},
            products::records::Category,
            reports::records::DEFAULT_LOW_STOCK_THRESHOLD,
        },
        test::{
            TestContext,
            helpers::{adjust, create_product},
        },
    };

    use super::*;

    #[tokio::test]
    async fn non_positive_limit_is_rejected_before_storage() {
        let pool = PgPool::connect_lazy("postgres://localhost/unused")
            .expect("lazy pools don't connect until first use");
        let service = PgReportsService::new(Db::new(pool, Duration::from_secs(1)));

        let result = service.top_selling(0).await;

        assert!(
            matches!(result, Err(ReportsServiceError::InvalidArgument(_))),
            "expected InvalidArgument, got {result:?}"
        );
    }

    #[tokio::test]
    #[ignore = "requires Docker for the Postgres test container"]
    async fn low_stock_excludes_records_at_the_threshold() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, Category::Apparel, Decimal::new(1000, 2)).await?;

        adjust(&ctx, product.id, "Warehouse A", StockAction::Add, 20).await?;
        adjust(&ctx, product.id, "Store 1", StockAction::Add, 19).await?;
        adjust(&ctx, product.id, "Store 2", StockAction::Add, 3).await?;

        let rows = ctx.reports.low_stock(DEFAULT_LOW_STOCK_THRESHOLD).await?;
        let levels: Vec<_> = rows
            .iter()
            .map(|r| (r.location.as_str(), r.quantity))
            .collect();

        assert_eq!(levels, vec![("Store 2", 3), ("Store 1", 19)]);
        assert!(
            rows.iter().all(|r| r.category == Category::Apparel),
            "rows carry the product category"
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires Docker for the Postgres test container"]
    async fn sales_reports_aggregate_orders() -> TestResult {
        let ctx = TestContext::new().await;
        let phone = create_product(&ctx, Category::Electronics, Decimal::new(50_000, 2)).await?;
        let shirt = create_product(&ctx, Category::Apparel, Decimal::new(2000, 2)).await?;

        adjust(&ctx, phone.id, "Warehouse A", StockAction::Add, 10).await?;
        adjust(&ctx, shirt.id, "Warehouse A", StockAction::Add, 10).await?;

        for (product, quantity) in [(phone.id, 1), (shirt.id, 3), (shirt.id, 2)] {
            ctx.orders
                .create_order(NewOrder {
                    product_id: product,
                    quantity,
                    location: None,
                })
                .await?;
        }

        let revenue = ctx.reports.revenue_by_category().await?;
        assert_eq!(
            revenue,
            vec![
                CategoryRevenueRow {
                    category: Category::Electronics,
                    total_revenue: Decimal::new(50_000, 2),
                    order_count: 1,
                },
                CategoryRevenueRow {
                    category: Category::Apparel,
                    total_revenue: Decimal::new(10_000, 2),
                    order_count: 2,
                },
            ]
        );

        let top = ctx.reports.top_selling(1).await?;
        assert_eq!(top.len(), 1, "limit caps the rows");
        assert_eq!(top.first().map(|r| (r.product_id, r.total_sold)), Some((shirt.id, 5)));

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires Docker for the Postgres test container"]
    async fn stock_reports_aggregate_inventory() -> TestResult {
        let ctx = TestContext::new().await;
        let chair = create_product(&ctx, Category::Furniture, Decimal::new(4000, 2)).await?;
        let desk = create_product(&ctx, Category::Furniture, Decimal::new(15_000, 2)).await?;

        adjust(&ctx, chair.id, "Warehouse A", StockAction::Add, 10).await?;
        adjust(&ctx, desk.id, "Warehouse A", StockAction::Add, 2).await?;
        adjust(&ctx, desk.id, "Store 1", StockAction::Add, 1).await?;

        let distribution = ctx.reports.stock_distribution().await?;
        assert_eq!(
            distribution,
            vec![
                LocationStockRow {
                    location: "Store 1".to_string(),
                    total_stock: 1,
                    product_count: 1,
                },
                LocationStockRow {
                    location: "Warehouse A".to_string(),
                    total_stock: 12,
                    product_count: 2,
                },
            ]
        );

        let value = ctx.reports.inventory_value_by_category().await?;
        assert_eq!(
            value,
            vec![CategoryValueRow {
                category: Category::Furniture,
                total_value: Decimal::new(85_000, 2),
            }]
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires Docker for the Postgres test container"]
    async fn money_reports_hold_the_largest_storable_values() -> TestResult {
        const ORDERS: i64 = 150;

        let ctx = TestContext::new().await;
        let max_price = Decimal::new(9_999_999_999, 2);
        let max_total = Decimal::new(999_999_999_999, 2);
        let product = create_product(&ctx, Category::Electronics, max_price).await?;

        adjust(&ctx, product.id, "Warehouse A", StockAction::Add, i32::MAX - 1).await?;

        sqlx::query(
            "INSERT INTO orders (product_id, location, quantity, total_price) \
             SELECT $1, 'Warehouse A', 1, $2 FROM generate_series(1, $3)",
        )
        .bind(product.id.into_inner())
        .bind(max_total)
        .bind(ORDERS)
        .execute(ctx.db.pool())
        .await?;

        let value = ctx.reports.inventory_value_by_category().await?;
        assert_eq!(
            value.first().map(|row| row.total_value),
            Some(max_price * Decimal::from(i32::MAX - 1))
        );

        let expected_revenue = max_total * Decimal::from(ORDERS);

        let revenue = ctx.reports.revenue_by_category().await?;
        assert_eq!(
            revenue.first().map(|row| row.total_revenue),
            Some(expected_revenue)
        );

        let top = ctx.reports.top_selling(1).await?;
        assert_eq!(
            top.first().map(|row| (row.total_sold, row.total_revenue)),
            Some((ORDERS, expected_revenue))
        );

        Ok(())
    }
}
