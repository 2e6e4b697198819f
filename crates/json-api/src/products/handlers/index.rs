//! Product Index Handler

use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use stockroom_app::domain::products::{data::ProductFilter, records::Category};

use crate::{errors::into_status_error, extensions::*, products::get::ProductResponse};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// The list of products
    pub products: Vec<ProductResponse>,
}

/// Product Index Handler
///
/// Returns the catalog ordered by id, optionally narrowed to a category and
/// an inclusive price range.
#[endpoint(
    tags("products"),
    summary = "List Products",
    responses(
        (status_code = StatusCode::OK, description = "Matching products"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    category: QueryParam<String, false>,
    min_price: QueryParam<String, false>,
    max_price: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let filter = ProductFilter {
        category: category.parse_optional::<Category>("invalid category")?,
        min_price: min_price.parse_optional::<Decimal>("invalid min_price")?,
        max_price: max_price.parse_optional::<Decimal>("invalid max_price")?,
    };

    let products = state
        .app
        .products
        .list_products(filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use stockroom_app::domain::products::{MockProductsService, ProductsServiceError};

    use crate::test_helpers::{TestServices, make_product};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        TestServices::with_products(products)
            .into_service(Router::with_path("products").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_products_in_order() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|filter| *filter == ProductFilter::default())
            .return_once(|_| Ok(vec![make_product(1), make_product(2)]));

        let response: ProductsResponse = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await
            .take_json()
            .await?;

        let ids: Vec<i64> = response.products.iter().map(|product| product.id).collect();

        assert_eq!(ids, vec![1, 2]);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_forwards_filters() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|filter| {
                *filter
                    == ProductFilter {
                        category: Some(Category::Footwear),
                        min_price: Some(Decimal::new(50, 0)),
                        max_price: Some(Decimal::new(9999, 2)),
                    }
            })
            .return_once(|_| Ok(vec![]));

        let res = TestClient::get(
            "http://example.com/products?category=Footwear&min_price=50&max_price=99.99",
        )
        .send(&make_service(products))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_unknown_category_returns_400() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_list_products().never();

        let res = TestClient::get("http://example.com/products?category=Groceries")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_unparseable_price_returns_400() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_list_products().never();

        let res = TestClient::get("http://example.com/products?min_price=cheap")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_inverted_range_returns_400() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .return_once(|_| {
                Err(ProductsServiceError::InvalidArgument(
                    "min_price must not exceed max_price",
                ))
            });

        let res = TestClient::get("http://example.com/products?min_price=100&max_price=10")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_storage_error_returns_500() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .return_once(|_| Err(ProductsServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
