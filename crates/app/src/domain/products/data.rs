//! Products Data

use rust_decimal::Decimal;

use crate::domain::products::{ProductsServiceError, records::Category};

/// Longest product name the catalog stores.
pub const MAX_NAME_CHARS: usize = 100;

/// Prices are stored as `NUMERIC(10, 2)`.
const MAX_PRICE_SCALE: u32 = 2;
const MAX_PRICE_CENTS: i64 = 9_999_999_999;

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: Category,
}

impl NewProduct {
    /// Check the fields the database can't be trusted to reject clearly.
    ///
    /// # Errors
    ///
    /// Returns [`ProductsServiceError::InvalidArgument`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ProductsServiceError> {
        validate_name(&self.name)?;
        validate_price(self.price)
    }
}

/// Product Update Data
///
/// Only the supplied fields change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<Category>,
}

impl ProductUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category.is_none()
    }

    /// # Errors
    ///
    /// Returns [`ProductsServiceError::InvalidArgument`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ProductsServiceError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }

        if let Some(price) = self.price {
            validate_price(price)?;
        }

        Ok(())
    }
}

/// Catalog listing filter; absent fields don't constrain the result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub category: Option<Category>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

fn validate_name(name: &str) -> Result<(), ProductsServiceError> {
    if name.trim().is_empty() {
        return Err(ProductsServiceError::InvalidArgument(
            "product name must not be empty",
        ));
    }

    if name.chars().count() > MAX_NAME_CHARS {
        return Err(ProductsServiceError::InvalidArgument(
            "product name must be at most 100 characters",
        ));
    }

    Ok(())
}

fn validate_price(price: Decimal) -> Result<(), ProductsServiceError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ProductsServiceError::InvalidArgument(
            "price must not be negative",
        ));
    }

    if price.normalize().scale() > MAX_PRICE_SCALE {
        return Err(ProductsServiceError::InvalidArgument(
            "price must have at most two decimal places",
        ));
    }

    if price > Decimal::new(MAX_PRICE_CENTS, MAX_PRICE_SCALE) {
        return Err(ProductsServiceError::InvalidArgument("price is too large"));
    }

    Ok(())
}
