//! Stockroom Domain Concerns

pub mod errors;
pub mod images;
pub mod inventory;
pub mod orders;
pub mod products;
pub mod reports;
