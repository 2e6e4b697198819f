//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::domain::products::{
    data::{NewProduct, ProductFilter, ProductUpdate},
    records::{Category, ProductId, ProductRecord},
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const GET_PRODUCT_FOR_SHARE_SQL: &str = include_str!("sql/get_product_for_share.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const SET_IMAGE_PATH_SQL: &str = include_str!("sql/set_image_path.sql");
const COUNT_PRODUCTS_SQL: &str = include_str!("sql/count_products.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .bind(filter.category.map(Category::as_str))
            .bind(filter.min_price)
            .bind(filter.max_price)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_inner())
            .fetch_one(&mut **tx)
            .await
    }

    /// Read a product and hold a share lock on it until the transaction ends,
    /// so its price can't change underneath an order being priced from it.
    pub(crate) async fn get_product_for_share(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<Option<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_FOR_SHARE_SQL)
            .bind(product.into_inner())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: &NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.price)
            .bind(product.category.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
        update: &ProductUpdate,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.into_inner())
            .bind(update.name.as_deref())
            .bind(update.description.as_deref())
            .bind(update.price)
            .bind(update.category.map(Category::as_str))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_image_path(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
        path: &str,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(SET_IMAGE_PATH_SQL)
            .bind(product.into_inner())
            .bind(path)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn count_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_PRODUCTS_SQL)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: ProductId::new(row.try_get("id")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: row.try_get("price")?,
            category: try_get_category(row, "category")?,
            image_path: row.try_get("image_path")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

pub(crate) fn try_get_category(row: &PgRow, col: &str) -> Result<Category, sqlx::Error> {
    let category: String = row.try_get(col)?;

    category
        .parse::<Category>()
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: col.to_string(),
            source: Box::new(e),
        })
}
