//! Update Product Handler

use rust_decimal::Decimal;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use stockroom_app::domain::products::{
    data::ProductUpdate,
    records::{Category, ProductId},
};

use crate::{errors::into_status_error, extensions::*, products::get::ProductResponse};

/// Update Product Request
///
/// Omitted fields keep their current value.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,

    #[salvo(schema(value_type = Option<String>))]
    pub price: Option<Decimal>,

    pub category: Option<String>,
}

impl TryFrom<UpdateProductRequest> for ProductUpdate {
    type Error = StatusError;

    fn try_from(request: UpdateProductRequest) -> Result<Self, Self::Error> {
        let category = request
            .category
            .map(|category| category.parse::<Category>())
            .transpose()
            .or_400("invalid category")?;

        Ok(ProductUpdate {
            name: request.name,
            description: request.description,
            price: request.price,
            category,
        })
    }
}

/// Product Update Handler
#[endpoint(
    tags("products"),
    summary = "Update Product",
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.update",
    skip(product, json, depot),
    fields(product_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    product: PathParam<i64>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let product = ProductId::new(product.into_inner());

    tracing::Span::current().record("product_id", product.into_inner());

    let update = ProductUpdate::try_from(json.into_inner())?;

    let product = state
        .app
        .products
        .update_product(product, update)
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}
