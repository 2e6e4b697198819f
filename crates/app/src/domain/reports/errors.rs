//! Reports service errors.

use thiserror::Error;

use crate::domain::errors::{ErrorKind, ServiceError};

#[derive(Debug, Error)]
pub enum ReportsServiceError {
    #[error("{0}")]
    InvalidArgument(&'static str),

    #[error("storage error")]
    Sql(#[from] sqlx::Error),
}

impl ServiceError for ReportsServiceError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::Sql(_) => ErrorKind::Internal,
        }
    }
}
