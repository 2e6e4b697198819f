//! Report Handlers

pub(crate) mod inventory_value;
pub(crate) mod top_selling;
