//! Inventory Data

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use thiserror::Error;

use crate::domain::products::records::ProductId;

/// Longest location name the ledger stores.
pub const MAX_LOCATION_CHARS: usize = 100;

/// Direction of a stock adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockAction {
    Add,
    Remove,
}

impl StockAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
        }
    }
}

impl Display for StockAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown stock action \"{0}\", expected \"add\" or \"remove\"")]
pub struct UnknownStockAction(pub String);

impl FromStr for StockAction {
    type Err = UnknownStockAction;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "add" => Ok(Self::Add),
            "remove" => Ok(Self::Remove),
            other => Err(UnknownStockAction(other.to_string())),
        }
    }
}

/// Stock Adjustment Data
///
/// A `location` of `None` targets the primary location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockAdjustment {
    pub product_id: ProductId,
    pub location: Option<String>,
    pub action: StockAction,
    pub value: i32,
}

/// Check a location name supplied by a caller.
///
/// # Errors
///
/// Returns a static description of the problem.
pub fn validate_location(location: &str) -> Result<(), &'static str> {
    if location.trim().is_empty() {
        return Err("location must not be empty");
    }

    if location.trim() != location {
        return Err("location must not start or end with whitespace");
    }

    if location.chars().count() > MAX_LOCATION_CHARS {
        return Err("location must be at most 100 characters");
    }

    Ok(())
}
