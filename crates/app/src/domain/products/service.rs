//! Products service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::{Db, settle},
    domain::products::{
        data::{NewProduct, ProductFilter, ProductUpdate},
        errors::ProductsServiceError,
        records::{ProductId, ProductRecord},
        repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    #[tracing::instrument(name = "products.service.list_products", skip(self), err)]
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        if let (Some(min), Some(max)) = (filter.min_price, filter.max_price)
            && min > max
        {
            return Err(ProductsServiceError::InvalidArgument(
                "min_price must not exceed max_price",
            ));
        }

        let mut tx = self.db.begin_transaction().await?;

        let result = self
            .repository
            .list_products(&mut tx, &filter)
            .await
            .map_err(ProductsServiceError::from);

        settle(tx, result).await
    }

    #[tracing::instrument(
        name = "products.service.get_product",
        skip(self),
        fields(product_id = %product),
        err
    )]
    async fn get_product(&self, product: ProductId) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let result = self
            .repository
            .get_product(&mut tx, product)
            .await
            .map_err(ProductsServiceError::from);

        settle(tx, result).await
    }

    #[tracing::instrument(
        name = "products.service.create_product",
        skip(self, product),
        fields(category = %product.category),
        err
    )]
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        product.validate()?;

        let mut tx = self.db.begin_transaction().await?;

        let result = self
            .repository
            .create_product(&mut tx, &product)
            .await
            .map_err(ProductsServiceError::from);

        let created = settle(tx, result).await?;

        info!(product_id = %created.id, "created product");

        Ok(created)
    }

    #[tracing::instrument(
        name = "products.service.update_product",
        skip(self, update),
        fields(product_id = %product),
        err
    )]
    async fn update_product(
        &self,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        update.validate()?;

        if update.is_empty() {
            return self.get_product(product).await;
        }

        let mut tx = self.db.begin_transaction().await?;

        let result = self
            .repository
            .update_product(&mut tx, product, &update)
            .await
            .map_err(ProductsServiceError::from);

        settle(tx, result).await
    }

    #[tracing::instrument(
        name = "products.service.set_image_path",
        skip(self),
        fields(product_id = %product),
        err
    )]
    async fn set_image_path(
        &self,
        product: ProductId,
        path: String,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let result = self
            .repository
            .set_image_path(&mut tx, product, &path)
            .await
            .map_err(ProductsServiceError::from);

        settle(tx, result).await
    }

    #[tracing::instrument(name = "products.service.count_products", skip(self), err)]
    async fn count_products(&self) -> Result<i64, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let result = self
            .repository
            .count_products(&mut tx)
            .await
            .map_err(ProductsServiceError::from);

        settle(tx, result).await
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves products matching `filter`, ordered by id.
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductId) -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a new product.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Applies a partial update. An update with no fields returns the
    /// product unchanged.
    async fn update_product(
        &self,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Records where the product's current image is stored.
    async fn set_image_path(
        &self,
        product: ProductId,
        path: String,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Number of products in the catalog.
    async fn count_products(&self) -> Result<i64, ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        domain::products::records::Category,
        test::{TestContext, helpers::create_product},
    };

    use super::*;

    #[tokio::test]
    #[ignore = "requires Docker for the Postgres test container"]
    async fn create_product_returns_stored_fields() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ctx
            .products
            .create_product(NewProduct {
                name: "Wireless Mouse".to_string(),
                description: "Ergonomic".to_string(),
                price: Decimal::new(2999, 2),
                category: Category::Electronics,
            })
            .await?;

        assert_eq!(product.name, "Wireless Mouse");
        assert_eq!(product.description, "Ergonomic");
        assert_eq!(product.price, Decimal::new(2999, 2));
        assert_eq!(product.category, Category::Electronics);
        assert!(product.image_path.is_none(), "new products have no image");

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires Docker for the Postgres test container"]
    async fn get_product_unknown_id_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.products.get_product(ProductId::new(9_999)).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    #[ignore = "requires Docker for the Postgres test container"]
    async fn list_products_applies_category_and_price_filters() -> TestResult {
        let ctx = TestContext::new().await;

        let cheap = create_product(&ctx, Category::Apparel, Decimal::new(1999, 2)).await?;
        let pricey = create_product(&ctx, Category::Apparel, Decimal::new(8999, 2)).await?;
        create_product(&ctx, Category::Furniture, Decimal::new(4999, 2)).await?;

        let apparel = ctx
            .products
            .list_products(ProductFilter {
                category: Some(Category::Apparel),
                ..ProductFilter::default()
            })
            .await?;

        let ids: Vec<_> = apparel.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![cheap.id, pricey.id]);

        let bounded = ctx
            .products
            .list_products(ProductFilter {
                category: None,
                min_price: Some(Decimal::new(2000, 2)),
                max_price: Some(Decimal::new(5000, 2)),
            })
            .await?;

        assert_eq!(bounded.len(), 1, "only the furniture item is in range");
        assert_eq!(bounded.first().map(|p| p.category), Some(Category::Furniture));

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires Docker for the Postgres test container"]
    async fn update_product_changes_only_supplied_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, Category::Footwear, Decimal::new(5999, 2)).await?;

        let updated = ctx
            .products
            .update_product(
                product.id,
                ProductUpdate {
                    price: Some(Decimal::new(4999, 2)),
                    ..ProductUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.price, Decimal::new(4999, 2));
        assert_eq!(updated.name, product.name);
        assert_eq!(updated.category, Category::Footwear);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires Docker for the Postgres test container"]
    async fn empty_update_returns_current_product() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, Category::Appliances, Decimal::new(12_999, 2)).await?;

        let unchanged = ctx
            .products
            .update_product(product.id, ProductUpdate::default())
            .await?;

        assert_eq!(unchanged, product);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires Docker for the Postgres test container"]
    async fn update_unknown_product_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .update_product(
                ProductId::new(404),
                ProductUpdate {
                    name: Some("Ghost".to_string()),
                    ..ProductUpdate::default()
                },
            )
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    #[ignore = "requires Docker for the Postgres test container"]
    async fn set_image_path_is_persisted() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, Category::Electronics, Decimal::new(1000, 2)).await?;

        ctx.products
            .set_image_path(product.id, "uploads/1/a-product-image.png".to_string())
            .await?;

        let stored = ctx.products.get_product(product.id).await?;

        assert_eq!(
            stored.image_path.as_deref(),
            Some("uploads/1/a-product-image.png")
        );

        Ok(())
    }

    #[tokio::test]
    async fn inverted_price_range_is_rejected_before_storage() {
        let pool = sqlx::PgPool::connect_lazy("postgres://localhost/unused")
            .expect("lazy pools don't connect until first use");
        let service = PgProductsService::new(Db::new(pool, std::time::Duration::from_secs(1)));

        let result = service
            .list_products(ProductFilter {
                category: None,
                min_price: Some(Decimal::new(50, 0)),
                max_price: Some(Decimal::new(10, 0)),
            })
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidArgument(_))),
            "expected InvalidArgument, got {result:?}"
        );
    }
}
