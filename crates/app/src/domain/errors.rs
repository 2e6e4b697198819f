//! Error taxonomy shared by every service.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Coarse classification of a service failure, used by callers to pick a
/// response status without matching on each service's own error enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A referenced product or order does not exist.
    NotFound,

    /// A decrement would take a stock quantity below zero.
    InsufficientStock,

    /// The caller supplied a value the operation can never accept.
    InvalidArgument,

    /// A concurrent writer won a race detected by the database.
    Conflict,

    /// Storage or connectivity fault.
    Internal,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::InsufficientStock => "insufficient_stock",
            Self::InvalidArgument => "invalid_argument",
            Self::Conflict => "conflict",
            Self::Internal => "internal",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Implemented by every service error enum.
pub trait ServiceError: std::error::Error + Send + Sync + 'static {
    fn kind(&self) -> ErrorKind;
}
