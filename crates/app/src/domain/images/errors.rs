//! Image store errors.

use thiserror::Error;

use crate::domain::errors::{ErrorKind, ServiceError};

#[derive(Debug, Error)]
pub enum ImageStoreError {
    #[error("no image found for product")]
    NotFound,

    #[error("image exceeds the 5 MiB limit")]
    TooLarge,

    #[error("only PNG, JPG and JPEG images are allowed")]
    UnsupportedFormat,

    #[error("image storage error")]
    Io(#[from] std::io::Error),
}

impl ServiceError for ImageStoreError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound => ErrorKind::NotFound,
            Self::TooLarge | Self::UnsupportedFormat => ErrorKind::InvalidArgument,
            Self::Io(_) => ErrorKind::Internal,
        }
    }
}
