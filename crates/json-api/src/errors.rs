//! Service error to HTTP status mapping.

use std::error::Error as _;

use salvo::http::StatusError;
use tracing::error;

use stockroom_app::domain::{
    errors::{ErrorKind, ServiceError},
    images::ImageStoreError,
};

/// Map a service failure onto a status error carrying the message as `brief`
/// and the error kind as `detail`. Internal failures are logged and returned
/// without detail.
pub(crate) fn into_status_error<E: ServiceError>(error: E) -> StatusError {
    let kind = error.kind();

    let status = match kind {
        ErrorKind::NotFound => StatusError::not_found(),
        ErrorKind::InsufficientStock | ErrorKind::Conflict => StatusError::conflict(),
        ErrorKind::InvalidArgument => StatusError::bad_request(),
        ErrorKind::Internal => {
            match error.source() {
                Some(source) => error!(kind = %kind, "{error}: {source}"),
                None => error!(kind = %kind, "{error}"),
            }

            return StatusError::internal_server_error();
        }
    };

    status.brief(error.to_string()).detail(kind.as_str())
}

/// Like [`into_status_error`], but oversized uploads get 413.
pub(crate) fn image_status_error(error: ImageStoreError) -> StatusError {
    match error {
        ImageStoreError::TooLarge => StatusError::payload_too_large()
            .brief(error.to_string())
            .detail(ErrorKind::InvalidArgument.as_str()),
        other => into_status_error(other),
    }
}
