//! Adjust Stock Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam, QueryParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use stockroom_app::domain::{
    inventory::data::{StockAction, StockAdjustment},
    products::records::ProductId,
};

use crate::{errors::into_status_error, extensions::*, inventory::index::InventoryRecordResponse};

/// Adjust Stock Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AdjustStockRequest {
    /// `add` or `remove`
    pub action: String,

    /// Units to add or remove; must be positive
    pub value: i32,
}

/// Adjust Stock Handler
///
/// Adds or removes stock at `location` (the primary location when omitted).
/// A removal never takes the quantity below zero.
#[endpoint(
    tags("inventory"),
    summary = "Adjust Stock",
    responses(
        (status_code = StatusCode::OK, description = "Stock adjusted"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "Insufficient stock or concurrent update"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "inventory.adjust",
    skip(product, location, json, depot),
    fields(product_id = tracing::field::Empty, action = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    product: PathParam<i64>,
    location: QueryParam<String, false>,
    json: JsonBody<AdjustStockRequest>,
    depot: &mut Depot,
) -> Result<Json<InventoryRecordResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let request = json.into_inner();
    let product = product.into_inner();

    let span = tracing::Span::current();
    span.record("product_id", product);
    span.record("action", request.action.as_str());

    let action = request
        .action
        .parse::<StockAction>()
        .or_400("invalid action")?;

    let record = state
        .app
        .inventory
        .adjust_stock(StockAdjustment {
            product_id: ProductId::new(product),
            location: location.into_inner(),
            action,
            value: request.value,
        })
        .await
        .map_err(into_status_error)?;

    Ok(Json(record.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use stockroom_app::domain::inventory::{
        InventoryServiceError, MockInventoryService, records::InventoryRecord,
    };

    use crate::test_helpers::TestServices;

    use super::*;

    fn make_service(inventory: MockInventoryService) -> Service {
        TestServices::with_inventory(inventory)
            .into_service(Router::with_path("inventory/{product}").patch(handler))
    }

    #[tokio::test]
    async fn test_adjust_adds_stock_at_default_location() -> TestResult {
        let mut inventory = MockInventoryService::new();

        inventory
            .expect_adjust_stock()
            .once()
            .withf(|adjustment| {
                *adjustment
                    == StockAdjustment {
                        product_id: ProductId::new(3),
                        location: None,
                        action: StockAction::Add,
                        value: 10,
                    }
            })
            .return_once(|_| {
                Ok(InventoryRecord {
                    product_id: ProductId::new(3),
                    location: "Warehouse A".to_string(),
                    quantity: 25,
                    updated_at: Some(Timestamp::UNIX_EPOCH),
                })
            });

        let mut res = TestClient::patch("http://example.com/inventory/3")
            .json(&json!({ "action": "add", "value": 10 }))
            .send(&make_service(inventory))
            .await;

        let body: InventoryRecordResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.location, "Warehouse A");
        assert_eq!(body.quantity, 25);

        Ok(())
    }

    #[tokio::test]
    async fn test_adjust_forwards_location() -> TestResult {
        let mut inventory = MockInventoryService::new();

        inventory
            .expect_adjust_stock()
            .once()
            .withf(|adjustment| {
                adjustment.location.as_deref() == Some("Store 1")
                    && adjustment.action == StockAction::Remove
            })
            .return_once(|_| {
                Ok(InventoryRecord {
                    product_id: ProductId::new(3),
                    location: "Store 1".to_string(),
                    quantity: 0,
                    updated_at: Some(Timestamp::UNIX_EPOCH),
                })
            });

        let res = TestClient::patch("http://example.com/inventory/3?location=Store%201")
            .json(&json!({ "action": "remove", "value": 4 }))
            .send(&make_service(inventory))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_adjust_insufficient_stock_returns_409() -> TestResult {
        let mut inventory = MockInventoryService::new();

        inventory
            .expect_adjust_stock()
            .once()
            .return_once(|_| Err(InventoryServiceError::InsufficientStock));

        let mut res = TestClient::patch("http://example.com/inventory/3")
            .add_header("accept", "application/json", true)
            .json(&json!({ "action": "remove", "value": 500 }))
            .send(&make_service(inventory))
            .await;

        let body = res.take_string().await?;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));
        assert!(
            body.contains("insufficient stock"),
            "expected the error message in {body}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_adjust_unknown_action_returns_400() -> TestResult {
        let mut inventory = MockInventoryService::new();

        inventory.expect_adjust_stock().never();

        let res = TestClient::patch("http://example.com/inventory/3")
            .json(&json!({ "action": "set", "value": 5 }))
            .send(&make_service(inventory))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_adjust_unknown_product_returns_404() -> TestResult {
        let mut inventory = MockInventoryService::new();

        inventory
            .expect_adjust_stock()
            .once()
            .return_once(|_| Err(InventoryServiceError::NotFound));

        let res = TestClient::patch("http://example.com/inventory/999")
            .json(&json!({ "action": "add", "value": 1 }))
            .send(&make_service(inventory))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_adjust_non_positive_value_returns_400() -> TestResult {
        let mut inventory = MockInventoryService::new();

        inventory
            .expect_adjust_stock()
            .once()
            .withf(|adjustment| adjustment.value == 0)
            .return_once(|_| {
                Err(InventoryServiceError::InvalidArgument(
                    "value must be greater than zero",
                ))
            });

        let res = TestClient::patch("http://example.com/inventory/3")
            .json(&json!({ "action": "add", "value": 0 }))
            .send(&make_service(inventory))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
