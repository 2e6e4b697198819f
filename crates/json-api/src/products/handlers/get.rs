//! Get Product Handler

use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use stockroom_app::domain::products::records::{ProductId, ProductRecord};

use crate::{errors::into_status_error, extensions::*};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub id: i64,

    /// Display name
    pub name: String,

    /// Free-form description
    pub description: String,

    /// Unit price, as a decimal string
    #[salvo(schema(value_type = String))]
    pub price: Decimal,

    /// Catalog category
    pub category: String,

    /// Where the current product image is stored
    pub image_path: Option<String>,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            id: product.id.into_inner(),
            name: product.name,
            description: product.description,
            price: product.price,
            category: product.category.to_string(),
            image_path: product.image_path,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

/// Get Product Handler
///
/// Returns a product.
#[endpoint(
    tags("products"),
    summary = "Get Product",
    responses(
        (status_code = StatusCode::OK, description = "Product found"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let product = state
        .app
        .products
        .get_product(ProductId::new(product.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}
