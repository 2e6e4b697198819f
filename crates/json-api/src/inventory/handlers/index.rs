//! Inventory Index Handler

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use stockroom_app::domain::{inventory::records::InventoryRecord, products::records::ProductId};

use crate::{errors::into_status_error, extensions::*};

/// Stock held for one product at one location
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct InventoryRecordResponse {
    pub product_id: i64,
    pub location: String,
    pub quantity: i32,

    /// Absent when the product has never been stocked at this location
    pub updated_at: Option<String>,
}

impl From<InventoryRecord> for InventoryRecordResponse {
    fn from(record: InventoryRecord) -> Self {
        InventoryRecordResponse {
            product_id: record.product_id.into_inner(),
            location: record.location,
            quantity: record.quantity,
            updated_at: record.updated_at.map(|at| at.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct InventoryResponse {
    pub inventory: Vec<InventoryRecordResponse>,
}

/// Inventory Index Handler
///
/// Returns stock records ordered by product then location.
#[endpoint(
    tags("inventory"),
    summary = "List Inventory",
    responses(
        (status_code = StatusCode::OK, description = "Stock records"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product_id: QueryParam<i64, false>,
    depot: &mut Depot,
) -> Result<Json<InventoryResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let records = state
        .app
        .inventory
        .list_inventory(product_id.into_inner().map(ProductId::new))
        .await
        .map_err(into_status_error)?;

    Ok(Json(InventoryResponse {
        inventory: records.into_iter().map(Into::into).collect(),
    }))
}
