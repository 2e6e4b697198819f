//! App Router

use salvo::{Router, size_limiter::max_size};

use crate::{inventory, orders, products, reports};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .get(products::get::handler)
                        .put(products::update::handler)
                        .push(
                            Router::with_path("image")
                                .get(products::image::get_handler)
                                .push(
                                    Router::new()
                                        .hoop(max_size(upload_limit()))
                                        .post(products::image::upload_handler),
                                ),
                        ),
                ),
        )
        .push(
            Router::with_path("inventory")
                .get(inventory::index::handler)
                .push(Router::with_path("locations").get(inventory::locations::handler))
                .push(Router::with_path("low-stock").get(inventory::low_stock::handler))
                .push(Router::with_path("{product}").patch(inventory::adjust::handler)),
        )
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .post(orders::create::handler)
                .push(Router::with_path("revenue").get(orders::revenue::handler))
                .push(Router::with_path("{order}").get(orders::get::handler)),
        )
        .push(
            Router::with_path("reports")
                .push(Router::with_path("top-selling").get(reports::top_selling::handler))
                .push(
                    Router::with_path("inventory-value").get(reports::inventory_value::handler),
                ),
        )
}

fn upload_limit() -> u64 {
    u64::try_from(products::image::MAX_UPLOAD_BYTES).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use salvo::{
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use stockroom_app::domain::{
        orders::MockOrdersService,
        reports::{MockReportsService, records::CategoryRevenueRow},
    };

    use crate::test_helpers::TestServices;

    use super::*;

    #[tokio::test]
    async fn test_revenue_route_is_not_taken_for_an_order_id() -> TestResult {
        let mut orders = MockOrdersService::new();
        let mut reports = MockReportsService::new();

        orders.expect_get_order().never();
        reports
            .expect_revenue_by_category()
            .once()
            .return_once(|| Ok(Vec::<CategoryRevenueRow>::new()));

        let service = TestServices {
            orders,
            reports,
            ..TestServices::default()
        }
        .into_service(app_router());

        let body: serde_json::Value = TestClient::get("http://example.com/orders/revenue")
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(body["categories"], serde_json::json!([]));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_route_returns_404() {
        let res = TestClient::get("http://example.com/warehouses")
            .send(&Service::new(app_router()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }
}
