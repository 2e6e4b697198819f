//! Product Images

pub mod errors;
pub mod format;
pub mod store;

pub use errors::ImageStoreError;
pub use store::*;
