//! Stock Distribution Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use stockroom_app::domain::reports::records::LocationStockRow;

use crate::{errors::into_status_error, extensions::*};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LocationStockResponse {
    pub location: String,

    /// Units held across all products
    pub total_stock: i64,

    /// Distinct products with a stock record here
    pub product_count: i64,
}

impl From<LocationStockRow> for LocationStockResponse {
    fn from(row: LocationStockRow) -> Self {
        LocationStockResponse {
            location: row.location,
            total_stock: row.total_stock,
            product_count: row.product_count,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LocationsResponse {
    pub locations: Vec<LocationStockResponse>,
}

/// Stock Distribution Handler
#[endpoint(
    tags("inventory"),
    summary = "Stock By Location",
    responses(
        (status_code = StatusCode::OK, description = "Stock totals per location"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<LocationsResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let rows = state
        .app
        .reports
        .stock_distribution()
        .await
        .map_err(into_status_error)?;

    Ok(Json(LocationsResponse {
        locations: rows.into_iter().map(Into::into).collect(),
    }))
}
