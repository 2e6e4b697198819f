//! Order Index Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{errors::into_status_error, extensions::*, orders::get::OrderResponse};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    /// Orders, newest first
    pub orders: Vec<OrderResponse>,
}

/// Order Index Handler
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    responses(
        (status_code = StatusCode::OK, description = "All orders"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let orders = state
        .app
        .orders
        .list_orders()
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrdersResponse {
        orders: orders.into_iter().map(Into::into).collect(),
    }))
}
