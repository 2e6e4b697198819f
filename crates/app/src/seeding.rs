//! Sample data for an empty catalog.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use rand::Rng;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::{
    inventory::{
        InventoryService, InventoryServiceError,
        data::{StockAction, StockAdjustment},
    },
    orders::{OrdersService, OrdersServiceError, data::NewOrder},
    products::{
        ProductsService, ProductsServiceError,
        data::NewProduct,
        records::{Category, ProductId},
    },
};

/// Locations every sample product is stocked at.
pub const SEED_LOCATIONS: [&str; 4] = ["Warehouse A", "Warehouse B", "Store 1", "Store 2"];

/// Number of sample orders attempted.
pub const SEED_ORDERS: usize = 15;

const SAMPLE_PRODUCTS: [(&str, &str, i64, Category); 10] = [
    (
        "Laptop",
        "High-performance laptop with 20GB RAM",
        99_999,
        Category::Electronics,
    ),
    (
        "Smartphone",
        "Latest model with 128GB storage",
        69_999,
        Category::Electronics,
    ),
    (
        "Headphones",
        "Wireless noise-cancelling headphones",
        19_999,
        Category::Electronics,
    ),
    ("T-shirt", "Cotton t-shirt, size M", 1999, Category::Apparel),
    ("Jeans", "Blue denim jeans, slim fit", 4999, Category::Apparel),
    ("Sneakers", "Running shoes, size 11", 8999, Category::Footwear),
    ("Coffee Table", "Wooden coffee table", 14_999, Category::Furniture),
    ("Desk Chair", "Ergonomic office chair", 19_999, Category::Furniture),
    (
        "Blender",
        "High-speed blender for smoothies",
        7999,
        Category::Appliances,
    ),
    ("Toaster", "6-slice toaster", 3999, Category::Appliances),
];

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to seed products")]
    Products(#[from] ProductsServiceError),

    #[error("failed to seed inventory")]
    Inventory(#[from] InventoryServiceError),

    #[error("failed to seed orders")]
    Orders(#[source] OrdersServiceError),
}

/// What a seeding run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The catalog already held products; nothing was written.
    Skipped { existing_products: i64 },

    Seeded {
        products: usize,
        stock_records: usize,
        orders: usize,
        skipped_orders: usize,
    },
}

/// Opening stock for a sample product at `location`.
///
/// Electronics start lower, warehouses hold twice what stores do, and a
/// random offset in `-10..=20` is applied, never going below zero.
pub fn seed_quantity<R: Rng + ?Sized>(rng: &mut R, category: Category, location: &str) -> i32 {
    let mut base = if category == Category::Electronics {
        15
    } else {
        30
    };

    if location.starts_with("Warehouse") {
        base *= 2;
    }

    (base + rng.gen_range(-10..=20)).max(0)
}

/// Fills an empty catalog through the regular services, so sample orders go
/// through the same stock checks as real ones.
pub struct Seeder<'a> {
    products: &'a dyn ProductsService,
    inventory: &'a dyn InventoryService,
    orders: &'a dyn OrdersService,
}

impl Debug for Seeder<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Seeder").finish_non_exhaustive()
    }
}

impl<'a> Seeder<'a> {
    #[must_use]
    pub fn new(
        products: &'a dyn ProductsService,
        inventory: &'a dyn InventoryService,
        orders: &'a dyn OrdersService,
    ) -> Self {
        Self {
            products,
            inventory,
            orders,
        }
    }

    /// Seed products, stock and orders when the catalog is empty.
    ///
    /// # Errors
    ///
    /// Returns the first service failure other than an order refused for
    /// insufficient stock.
    pub async fn seed<R: Rng + Send + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<SeedOutcome, SeedError> {
        let existing_products = self.products.count_products().await?;

        if existing_products > 0 {
            info!(existing_products, "catalog already populated, skipping seed");

            return Ok(SeedOutcome::Skipped { existing_products });
        }

        let mut seeded: Vec<(ProductId, Category)> = Vec::with_capacity(SAMPLE_PRODUCTS.len());

        for (name, description, cents, category) in SAMPLE_PRODUCTS {
            let product = self
                .products
                .create_product(NewProduct {
                    name: name.to_string(),
                    description: description.to_string(),
                    price: Decimal::new(cents, 2),
                    category,
                })
                .await?;

            seeded.push((product.id, product.category));
        }

        let mut stock_records = 0;

        for &(product, category) in &seeded {
            for location in SEED_LOCATIONS {
                let quantity = seed_quantity(rng, category, location);

                if quantity == 0 {
                    continue;
                }

                self.inventory
                    .adjust_stock(StockAdjustment {
                        product_id: product,
                        location: Some(location.to_string()),
                        action: StockAction::Add,
                        value: quantity,
                    })
                    .await?;

                stock_records += 1;
            }
        }

        let mut orders = 0;
        let mut skipped_orders = 0;

        for _ in 0..SEED_ORDERS {
            let Some(&(product, _)) = seeded.get(rng.gen_range(0..seeded.len())) else {
                continue;
            };

            let quantity = rng.gen_range(1..=5);

            match self
                .orders
                .create_order(NewOrder {
                    product_id: product,
                    quantity,
                    location: None,
                })
                .await
            {
                Ok(_) => orders += 1,
                Err(OrdersServiceError::InsufficientStock) => {
                    warn!(product_id = %product, quantity, "skipping sample order");

                    skipped_orders += 1;
                }
                Err(error) => return Err(SeedError::Orders(error)),
            }
        }

        info!(
            products = seeded.len(),
            stock_records, orders, skipped_orders, "seeded sample data"
        );

        Ok(SeedOutcome::Seeded {
            products: seeded.len(),
            stock_records,
            orders,
            skipped_orders,
        })
    }
}
