//! Products service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind as DbErrorKind},
};
use thiserror::Error;

use crate::{
    database::is_write_conflict,
    domain::errors::{ErrorKind, ServiceError},
};

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("product not found")]
    NotFound,

    #[error("{0}")]
    InvalidArgument(&'static str),

    #[error("invalid data")]
    InvalidData,

    #[error("product was modified concurrently")]
    Conflict,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl ServiceError for ProductsServiceError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound => ErrorKind::NotFound,
            Self::InvalidArgument(_) | Self::InvalidData => ErrorKind::InvalidArgument,
            Self::Conflict => ErrorKind::Conflict,
            Self::Sql(_) => ErrorKind::Internal,
        }
    }
}

impl From<Error> for ProductsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        if is_write_conflict(&error) {
            return Self::Conflict;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(DbErrorKind::NotNullViolation | DbErrorKind::CheckViolation) => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}
