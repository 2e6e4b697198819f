//! Create Order Handler

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use stockroom_app::domain::{
    orders::{data::NewOrder, records::PlacedOrder},
    products::records::ProductId,
};

use crate::{
    errors::into_status_error, extensions::*, orders::get::OrderResponse,
    products::get::ProductResponse,
};

/// Create Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    pub product_id: i64,

    /// Units to order; must be positive
    pub quantity: i32,

    /// Location to draw stock from; the primary location when omitted
    #[serde(default)]
    pub location: Option<String>,
}

impl From<CreateOrderRequest> for NewOrder {
    fn from(request: CreateOrderRequest) -> Self {
        NewOrder {
            product_id: ProductId::new(request.product_id),
            quantity: request.quantity,
            location: request.location,
        }
    }
}

/// Order Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderCreatedResponse {
    pub order: OrderResponse,

    /// The product as priced when the order was placed
    pub product: ProductResponse,
}

impl From<PlacedOrder> for OrderCreatedResponse {
    fn from(placed: PlacedOrder) -> Self {
        OrderCreatedResponse {
            order: placed.order.into(),
            product: placed.product.into(),
        }
    }
}

/// Create Order Handler
///
/// Places an order and takes its units from stock in one step. Nothing is
/// recorded when the location holds too few units.
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "Insufficient stock or concurrent update"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.create",
    skip(json, depot, res),
    fields(product_id = tracing::field::Empty, quantity = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderCreatedResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let request = json.into_inner();

    let span = tracing::Span::current();
    span.record("product_id", request.product_id);
    span.record("quantity", request.quantity);

    let placed = state
        .app
        .orders
        .create_order(request.into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/orders/{}", placed.order.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(placed.into()))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use stockroom_app::domain::orders::{MockOrdersService, OrdersServiceError};

    use crate::{
        orders::get::tests::make_order,
        test_helpers::{TestServices, make_product},
    };

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        TestServices::with_orders(orders).into_service(Router::with_path("orders").post(handler))
    }

    #[tokio::test]
    async fn test_create_order_success() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_create_order()
            .once()
            .withf(|order| {
                *order
                    == NewOrder {
                        product_id: ProductId::new(1),
                        quantity: 3,
                        location: None,
                    }
            })
            .return_once(|_| {
                let mut product = make_product(1);
                product.price = Decimal::new(1999, 2);

                Ok(PlacedOrder {
                    order: make_order(21, 3, 5997),
                    product,
                })
            });

        orders.expect_get_order().never();
        orders.expect_list_orders().never();

        let mut res = TestClient::post("http://example.com/orders")
            .json(&json!({ "product_id": 1, "quantity": 3 }))
            .send(&make_service(orders))
            .await;

        let body: OrderCreatedResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some("/orders/21"));
        assert_eq!(body.order.total_price, Decimal::new(5997, 2));
        assert_eq!(body.product.price, Decimal::new(1999, 2));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_order_forwards_location() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_create_order()
            .once()
            .withf(|order| order.location.as_deref() == Some("Store 2"))
            .return_once(|_| {
                Ok(PlacedOrder {
                    order: make_order(22, 1, 1999),
                    product: make_product(1),
                })
            });

        let res = TestClient::post("http://example.com/orders")
            .json(&json!({ "product_id": 1, "quantity": 1, "location": "Store 2" }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_order_insufficient_stock_returns_409() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_create_order()
            .once()
            .return_once(|_| Err(OrdersServiceError::InsufficientStock));

        let res = TestClient::post("http://example.com/orders")
            .json(&json!({ "product_id": 1, "quantity": 1000 }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));
        assert!(
            res.headers().get("location").is_none(),
            "no order should be linked"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_create_order_unknown_product_returns_404() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_create_order()
            .once()
            .return_once(|_| Err(OrdersServiceError::ProductNotFound));

        let res = TestClient::post("http://example.com/orders")
            .json(&json!({ "product_id": 404, "quantity": 1 }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_order_zero_quantity_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_create_order()
            .once()
            .withf(|order| order.quantity == 0)
            .return_once(|_| {
                Err(OrdersServiceError::InvalidArgument(
                    "quantity must be greater than zero",
                ))
            });

        let res = TestClient::post("http://example.com/orders")
            .json(&json!({ "product_id": 1, "quantity": 0 }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_order_lock_timeout_returns_409() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_create_order()
            .once()
            .return_once(|_| Err(OrdersServiceError::Conflict));

        let res = TestClient::post("http://example.com/orders")
            .json(&json!({ "product_id": 1, "quantity": 1 }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
