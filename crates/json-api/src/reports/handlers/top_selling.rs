//! Top Selling Products Handler

use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use stockroom_app::domain::reports::records::TopSellingRow;

use crate::{errors::into_status_error, extensions::*};

const DEFAULT_LIMIT: i64 = 10;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TopSellingResponse {
    pub product_id: i64,
    pub name: String,
    pub total_sold: i64,

    #[salvo(schema(value_type = String))]
    pub total_revenue: Decimal,
}

impl From<TopSellingRow> for TopSellingResponse {
    fn from(row: TopSellingRow) -> Self {
        TopSellingResponse {
            product_id: row.product_id.into_inner(),
            name: row.name,
            total_sold: row.total_sold,
            total_revenue: row.total_revenue,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TopSellingListResponse {
    /// Best sellers by units sold
    pub products: Vec<TopSellingResponse>,
}

/// Top Selling Products Handler
#[endpoint(
    tags("reports"),
    summary = "Top Selling Products",
    responses(
        (status_code = StatusCode::OK, description = "Best-selling products"),
        (status_code = StatusCode::BAD_REQUEST, description = "Limit must be positive"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    limit: QueryParam<i64, false>,
    depot: &mut Depot,
) -> Result<Json<TopSellingListResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let rows = state
        .app
        .reports
        .top_selling(limit.into_inner().unwrap_or(DEFAULT_LIMIT))
        .await
        .map_err(into_status_error)?;

    Ok(Json(TopSellingListResponse {
        products: rows.into_iter().map(Into::into).collect(),
    }))
}
