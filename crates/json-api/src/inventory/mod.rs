//! Inventory

mod handlers;

pub(crate) use handlers::*;
