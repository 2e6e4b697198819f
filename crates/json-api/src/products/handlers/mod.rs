//! Product Handlers

pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod image;
pub(crate) mod index;
pub(crate) mod update;
