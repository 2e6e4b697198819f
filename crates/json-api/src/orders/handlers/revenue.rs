//! Revenue By Category Handler

use rust_decimal::Decimal;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use stockroom_app::domain::reports::records::CategoryRevenueRow;

use crate::{errors::into_status_error, extensions::*};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryRevenueResponse {
    pub category: String,

    #[salvo(schema(value_type = String))]
    pub total_revenue: Decimal,

    pub order_count: i64,
}

impl From<CategoryRevenueRow> for CategoryRevenueResponse {
    fn from(row: CategoryRevenueRow) -> Self {
        CategoryRevenueResponse {
            category: row.category.to_string(),
            total_revenue: row.total_revenue,
            order_count: row.order_count,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RevenueResponse {
    /// Categories, highest revenue first
    pub categories: Vec<CategoryRevenueResponse>,
}

/// Revenue By Category Handler
#[endpoint(
    tags("orders"),
    summary = "Revenue By Category",
    responses(
        (status_code = StatusCode::OK, description = "Revenue per category"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<RevenueResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let rows = state
        .app
        .reports
        .revenue_by_category()
        .await
        .map_err(into_status_error)?;

    Ok(Json(RevenueResponse {
        categories: rows.into_iter().map(Into::into).collect(),
    }))
}
