//! Inventory Handlers

pub(crate) mod adjust;
pub(crate) mod index;
pub(crate) mod locations;
pub(crate) mod low_stock;
