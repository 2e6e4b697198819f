//! Get Order Handler

use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use stockroom_app::domain::orders::records::{OrderId, OrderRecord};

use crate::{errors::into_status_error, extensions::*};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub id: i64,
    pub product_id: i64,

    /// Location the stock was drawn from
    pub location: String,

    pub quantity: i32,

    /// Quantity times the unit price when the order was placed
    #[salvo(schema(value_type = String))]
    pub total_price: Decimal,

    pub ordered_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        OrderResponse {
            id: order.id.into_inner(),
            product_id: order.product_id.into_inner(),
            location: order.location,
            quantity: order.quantity,
            total_price: order.total_price,
            ordered_at: order.ordered_at.to_string(),
        }
    }
}

/// Get Order Handler
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    responses(
        (status_code = StatusCode::OK, description = "Order found"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let order = state
        .app
        .orders
        .get_order(OrderId::new(order.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}

#[cfg(test)]
pub(crate) mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use stockroom_app::domain::{
        orders::{MockOrdersService, OrdersServiceError},
        products::records::ProductId,
    };

    use crate::test_helpers::TestServices;

    use super::*;

    pub(crate) fn make_order(id: i64, quantity: i32, total_cents: i64) -> OrderRecord {
        OrderRecord {
            id: OrderId::new(id),
            product_id: ProductId::new(1),
            location: "Warehouse A".to_string(),
            quantity,
            total_price: Decimal::new(total_cents, 2),
            ordered_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn make_service(orders: MockOrdersService) -> Service {
        TestServices::with_orders(orders)
            .into_service(Router::with_path("orders/{order}").get(handler))
    }

    #[tokio::test]
    async fn test_get_order_success() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .withf(|id| *id == OrderId::new(8))
            .return_once(|_| Ok(make_order(8, 3, 5997)));

        let mut res = TestClient::get("http://example.com/orders/8")
            .send(&make_service(orders))
            .await;

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.id, 8);
        assert_eq!(body.total_price, Decimal::new(5997, 2));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_order_not_found_returns_404() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .return_once(|_| Err(OrdersServiceError::NotFound));

        let res = TestClient::get("http://example.com/orders/8")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
