//! Orders service.
//!
//! Placing an order is the one operation that writes two ledgers: the order
//! row and the stock decrement that pays for it commit in the same
//! transaction or not at all.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{info, warn};

use crate::{
    database::{Db, settle},
    domain::{
        inventory::{data::validate_location, repository::PgInventoryRepository},
        orders::{
            data::{NewOrder, order_total},
            errors::OrdersServiceError,
            records::{OrderId, OrderRecord, PlacedOrder},
            repository::PgOrdersRepository,
        },
        products::{records::ProductId, repository::PgProductsRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders: PgOrdersRepository,
    products: PgProductsRepository,
    inventory: PgInventoryRepository,
    primary_location: String,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, primary_location: impl Into<String>) -> Self {
        Self {
            db,
            orders: PgOrdersRepository::new(),
            products: PgProductsRepository::new(),
            inventory: PgInventoryRepository::new(),
            primary_location: primary_location.into(),
        }
    }

    async fn place_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
        location: &str,
        quantity: i32,
    ) -> Result<PlacedOrder, OrdersServiceError> {
        // Share-locked so the price can't move before the order is written.
        let product = self
            .products
            .get_product_for_share(tx, product)
            .await?
            .ok_or(OrdersServiceError::ProductNotFound)?;

        let Some(stock) = self
            .inventory
            .lock_for_update(tx, product.id, location)
            .await?
        else {
            warn!("no stock record");

            return Err(OrdersServiceError::InsufficientStock);
        };

        if stock.quantity < quantity {
            warn!(available = stock.quantity, "not enough stock");

            return Err(OrdersServiceError::InsufficientStock);
        }

        let total = order_total(product.price, quantity)?;

        let order = self
            .orders
            .create_order(tx, product.id, location, quantity, total)
            .await?;

        self.inventory
            .compare_and_decrement(tx, product.id, location, quantity)
            .await?
            .ok_or(OrdersServiceError::InsufficientStock)?;

        Ok(PlacedOrder { order, product })
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    #[tracing::instrument(
        name = "orders.service.create_order",
        skip(self, order),
        fields(product_id = %order.product_id, quantity = order.quantity),
        err
    )]
    async fn create_order(&self, order: NewOrder) -> Result<PlacedOrder, OrdersServiceError> {
        if order.quantity <= 0 {
            return Err(OrdersServiceError::InvalidArgument(
                "quantity must be a positive integer",
            ));
        }

        let location = order
            .location
            .unwrap_or_else(|| self.primary_location.clone());

        validate_location(&location).map_err(OrdersServiceError::InvalidArgument)?;

        let mut tx = self.db.begin_transaction().await?;

        let result = self
            .place_order(&mut tx, order.product_id, &location, order.quantity)
            .await;

        let placed = settle(tx, result).await?;

        info!(
            order_id = %placed.order.id,
            location = %placed.order.location,
            total_price = %placed.order.total_price,
            "placed order"
        );

        Ok(placed)
    }

    #[tracing::instrument(
        name = "orders.service.get_order",
        skip(self),
        fields(order_id = %order),
        err
    )]
    async fn get_order(&self, order: OrderId) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let result = self
            .orders
            .get_order(&mut tx, order)
            .await
            .map_err(OrdersServiceError::from);

        settle(tx, result).await
    }

    #[tracing::instrument(name = "orders.service.list_orders", skip(self), err)]
    async fn list_orders(&self) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let result = self
            .orders
            .list_orders(&mut tx)
            .await
            .map_err(OrdersServiceError::from);

        settle(tx, result).await
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Place an order, taking its stock from the requested location (the
    /// primary location when none is given).
    ///
    /// Fails with `InsufficientStock`, leaving stock untouched, when the
    /// location holds fewer units than requested.
    async fn create_order(&self, order: NewOrder) -> Result<PlacedOrder, OrdersServiceError>;

    /// Retrieve a single order.
    async fn get_order(&self, order: OrderId) -> Result<OrderRecord, OrdersServiceError>;

    /// All orders, newest first.
    async fn list_orders(&self) -> Result<Vec<OrderRecord>, OrdersServiceError>;
}
