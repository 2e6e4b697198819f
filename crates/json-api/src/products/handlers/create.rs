//! Create Product Handler

use rust_decimal::Decimal;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use stockroom_app::domain::products::{data::NewProduct, records::Category};

use crate::{errors::into_status_error, extensions::*, products::get::ProductResponse};

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Unit price; a decimal string or number with at most two places
    #[salvo(schema(value_type = String))]
    pub price: Decimal,

    /// One of Electronics, Apparel, Footwear, Furniture, Appliances
    pub category: String,
}

impl TryFrom<CreateProductRequest> for NewProduct {
    type Error = StatusError;

    fn try_from(request: CreateProductRequest) -> Result<Self, Self::Error> {
        Ok(NewProduct {
            name: request.name,
            description: request.description,
            price: request.price,
            category: request.category.parse::<Category>().or_400("invalid category")?,
        })
    }
}

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let new_product = NewProduct::try_from(json.into_inner())?;

    let product = state
        .app
        .products
        .create_product(new_product)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/products/{}", product.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(product.into()))
}
