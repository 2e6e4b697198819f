//! Inventory Value Handler

use rust_decimal::Decimal;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use stockroom_app::domain::reports::records::CategoryValueRow;

use crate::{errors::into_status_error, extensions::*};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryValueResponse {
    pub category: String,

    /// Held units times current unit price
    #[salvo(schema(value_type = String))]
    pub total_value: Decimal,
}

impl From<CategoryValueRow> for CategoryValueResponse {
    fn from(row: CategoryValueRow) -> Self {
        CategoryValueResponse {
            category: row.category.to_string(),
            total_value: row.total_value,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct InventoryValueResponse {
    pub categories: Vec<CategoryValueResponse>,
}

/// Inventory Value Handler
#[endpoint(
    tags("reports"),
    summary = "Inventory Value By Category",
    responses(
        (status_code = StatusCode::OK, description = "Stock value per category"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<InventoryValueResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let rows = state
        .app
        .reports
        .inventory_value_by_category()
        .await
        .map_err(into_status_error)?;

    Ok(Json(InventoryValueResponse {
        categories: rows.into_iter().map(Into::into).collect(),
    }))
}
