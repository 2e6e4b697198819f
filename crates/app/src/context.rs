//! App Context

use std::{path::PathBuf, sync::Arc};

use rand::Rng;
use sqlx::migrate::MigrateError;
use thiserror::Error;
use tracing::info;

use crate::{
    database::{self, DatabaseSettings, Db},
    domain::{
        images::{FsImageStore, ImageStore},
        inventory::{InventoryService, PgInventoryService},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
        reports::{PgReportsService, ReportsService},
    },
    seeding::{SeedError, SeedOutcome, Seeder},
};

/// Location orders and adjustments use when the caller names none.
pub const DEFAULT_PRIMARY_LOCATION: &str = "Warehouse A";

/// Directory product images are written under.
pub const DEFAULT_UPLOAD_DIR: &str = "./uploads/products";

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrate(#[source] MigrateError),
}

/// Everything needed to assemble the services.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub database: DatabaseSettings,
    pub run_migrations: bool,
    pub primary_location: String,
    pub upload_dir: PathBuf,
}

impl AppSettings {
    #[must_use]
    pub fn new(database: DatabaseSettings) -> Self {
        Self {
            database,
            run_migrations: true,
            primary_location: DEFAULT_PRIMARY_LOCATION.to_string(),
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub inventory: Arc<dyn InventoryService>,
    pub orders: Arc<dyn OrdersService>,
    pub reports: Arc<dyn ReportsService>,
    pub images: Arc<dyn ImageStore>,
}

impl AppContext {
    /// Connect to the database, migrate it when asked to, and build the
    /// services over the shared pool.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting or migrating fails.
    pub async fn from_settings(settings: &AppSettings) -> Result<Self, AppInitError> {
        let pool = database::connect(&settings.database)
            .await
            .map_err(AppInitError::Database)?;

        if settings.run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrate)?;

            info!("database migrations applied");
        }

        Ok(Self::from_db(
            &Db::new(pool, settings.database.lock_timeout),
            settings,
        ))
    }

    #[must_use]
    pub fn from_db(db: &Db, settings: &AppSettings) -> Self {
        Self {
            products: Arc::new(PgProductsService::new(db.clone())),
            inventory: Arc::new(PgInventoryService::new(
                db.clone(),
                settings.primary_location.clone(),
            )),
            orders: Arc::new(PgOrdersService::new(
                db.clone(),
                settings.primary_location.clone(),
            )),
            reports: Arc::new(PgReportsService::new(db.clone())),
            images: Arc::new(FsImageStore::new(settings.upload_dir.clone())),
        }
    }

    /// Populate an empty catalog with sample data.
    ///
    /// # Errors
    ///
    /// Returns the first service failure hit while seeding.
    pub async fn seed_if_empty<R: Rng + Send + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<SeedOutcome, SeedError> {
        Seeder::new(
            self.products.as_ref(),
            self.inventory.as_ref(),
            self.orders.as_ref(),
        )
        .seed(rng)
        .await
    }
}
