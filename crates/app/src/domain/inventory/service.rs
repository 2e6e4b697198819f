//! Inventory service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{info, warn};

use crate::{
    database::{Db, settle},
    domain::{
        inventory::{
            data::{StockAction, StockAdjustment, validate_location},
            errors::InventoryServiceError,
            records::InventoryRecord,
            repository::PgInventoryRepository,
        },
        products::records::ProductId,
    },
};

#[derive(Debug, Clone)]
pub struct PgInventoryService {
    db: Db,
    repository: PgInventoryRepository,
    primary_location: String,
}

impl PgInventoryService {
    #[must_use]
    pub fn new(db: Db, primary_location: impl Into<String>) -> Self {
        Self {
            db,
            repository: PgInventoryRepository::new(),
            primary_location: primary_location.into(),
        }
    }

    fn resolve_location(&self, location: Option<String>) -> Result<String, InventoryServiceError> {
        let location = location.unwrap_or_else(|| self.primary_location.clone());

        validate_location(&location).map_err(InventoryServiceError::InvalidArgument)?;

        Ok(location)
    }

    async fn apply_adjustment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
        location: &str,
        action: StockAction,
        value: i32,
    ) -> Result<InventoryRecord, InventoryServiceError> {
        if !self.repository.product_exists(tx, product).await? {
            return Err(InventoryServiceError::NotFound);
        }

        match action {
            StockAction::Add => {
                let held = self
                    .repository
                    .lock_for_update(tx, product, location)
                    .await?
                    .map_or(0, |record| record.quantity);

                if held.checked_add(value).is_none() {
                    warn!(held, "adding {value} units would overflow");

                    return Err(InventoryServiceError::InvalidArgument(
                        "value would overflow the stored quantity",
                    ));
                }

                Ok(self
                    .repository
                    .increment(tx, product, location, value)
                    .await?)
            }
            StockAction::Remove => self
                .repository
                .compare_and_decrement(tx, product, location, value)
                .await?
                .ok_or_else(|| {
                    warn!("not enough stock to remove {value} units");

                    InventoryServiceError::InsufficientStock
                }),
        }
    }
}

#[async_trait]
impl InventoryService for PgInventoryService {
    #[tracing::instrument(name = "inventory.service.list_inventory", skip(self), err)]
    async fn list_inventory(
        &self,
        product: Option<ProductId>,
    ) -> Result<Vec<InventoryRecord>, InventoryServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let result = self
            .repository
            .list_inventory(&mut tx, product)
            .await
            .map_err(InventoryServiceError::from);

        settle(tx, result).await
    }

    #[tracing::instrument(
        name = "inventory.service.get_stock",
        skip(self),
        fields(product_id = %product),
        err
    )]
    async fn get_stock(
        &self,
        product: ProductId,
        location: Option<String>,
    ) -> Result<InventoryRecord, InventoryServiceError> {
        let location = self.resolve_location(location)?;

        let mut tx = self.db.begin_transaction().await?;

        let result = self
            .repository
            .get_or_create(&mut tx, product, &location)
            .await
            .map_err(InventoryServiceError::from);

        settle(tx, result).await
    }

    #[tracing::instrument(
        name = "inventory.service.adjust_stock",
        skip(self, adjustment),
        fields(
            product_id = %adjustment.product_id,
            action = %adjustment.action,
            value = adjustment.value,
        ),
        err
    )]
    async fn adjust_stock(
        &self,
        adjustment: StockAdjustment,
    ) -> Result<InventoryRecord, InventoryServiceError> {
        if adjustment.value <= 0 {
            return Err(InventoryServiceError::InvalidArgument(
                "value must be a positive integer",
            ));
        }

        let location = self.resolve_location(adjustment.location)?;

        let mut tx = self.db.begin_transaction().await?;

        let result = self
            .apply_adjustment(
                &mut tx,
                adjustment.product_id,
                &location,
                adjustment.action,
                adjustment.value,
            )
            .await;

        let record = settle(tx, result).await?;

        info!(
            location = %record.location,
            quantity = record.quantity,
            "adjusted stock"
        );

        Ok(record)
    }
}

#[automock]
#[async_trait]
pub trait InventoryService: Send + Sync {
    /// Stock records ordered by product then location, optionally for a
    /// single product.
    async fn list_inventory(
        &self,
        product: Option<ProductId>,
    ) -> Result<Vec<InventoryRecord>, InventoryServiceError>;

    /// Current stock at `location` (the primary location when `None`). A
    /// location the product was never stocked at reads as zero.
    async fn get_stock(
        &self,
        product: ProductId,
        location: Option<String>,
    ) -> Result<InventoryRecord, InventoryServiceError>;

    /// Add or remove stock outside the order flow. Never takes the quantity
    /// below zero.
    async fn adjust_stock(
        &self,
        adjustment: StockAdjustment,
    ) -> Result<InventoryRecord, InventoryServiceError>;
}
