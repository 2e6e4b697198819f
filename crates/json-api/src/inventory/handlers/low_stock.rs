//! Low Stock Handler

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use stockroom_app::domain::reports::records::{DEFAULT_LOW_STOCK_THRESHOLD, LowStockRow};

use crate::{errors::into_status_error, extensions::*};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LowStockItemResponse {
    pub product_id: i64,
    pub name: String,
    pub category: String,
    pub location: String,
    pub quantity: i32,
}

impl From<LowStockRow> for LowStockItemResponse {
    fn from(row: LowStockRow) -> Self {
        LowStockItemResponse {
            product_id: row.product_id.into_inner(),
            name: row.name,
            category: row.category.to_string(),
            location: row.location,
            quantity: row.quantity,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LowStockResponse {
    /// Records holding fewer units than this were reported
    pub threshold: i32,
    pub items: Vec<LowStockItemResponse>,
}

/// Low Stock Handler
///
/// Returns stock records holding strictly fewer units than `threshold`
/// (default 20), lowest first.
#[endpoint(
    tags("inventory"),
    summary = "Low Stock",
    responses(
        (status_code = StatusCode::OK, description = "Records under the threshold"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    threshold: QueryParam<i32, false>,
    depot: &mut Depot,
) -> Result<Json<LowStockResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let threshold = threshold.into_inner().unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD);

    let rows = state
        .app
        .reports
        .low_stock(threshold)
        .await
        .map_err(into_status_error)?;

    Ok(Json(LowStockResponse {
        threshold,
        items: rows.into_iter().map(Into::into).collect(),
    }))
}
