//! Inventory service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind as DbErrorKind},
};
use thiserror::Error;

use crate::{
    database::{is_out_of_range, is_write_conflict},
    domain::errors::{ErrorKind, ServiceError},
};

#[derive(Debug, Error)]
pub enum InventoryServiceError {
    #[error("product not found")]
    NotFound,

    #[error("insufficient stock")]
    InsufficientStock,

    #[error("{0}")]
    InvalidArgument(&'static str),

    #[error("stock was modified concurrently")]
    Conflict,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl ServiceError for InventoryServiceError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound => ErrorKind::NotFound,
            Self::InsufficientStock => ErrorKind::InsufficientStock,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::Conflict => ErrorKind::Conflict,
            Self::Sql(_) => ErrorKind::Internal,
        }
    }
}

impl From<Error> for InventoryServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        if is_write_conflict(&error) {
            return Self::Conflict;
        }

        if is_out_of_range(&error) {
            return Self::InvalidArgument("value is out of range for storage");
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(DbErrorKind::ForeignKeyViolation) => Self::NotFound,
            Some(DbErrorKind::CheckViolation) => Self::InsufficientStock,
            _ => Self::Sql(error),
        }
    }
}
