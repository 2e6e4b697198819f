//! Result helper extensions for HTTP handlers.

use std::fmt::Display;

use salvo::prelude::StatusError;
use tracing::error;

use stockroom_app::domain::errors::ErrorKind;

/// Map errors to HTTP errors that don't come from a service.
pub(crate) trait ResultExt<T> {
    /// Log the error and hide it behind a 500.
    fn or_500(self, context: &str) -> Result<T, StatusError>;

    /// Reject the request, explaining what was wrong with it.
    fn or_400(self, context: &str) -> Result<T, StatusError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Display,
{
    fn or_500(self, context: &str) -> Result<T, StatusError> {
        self.map_err(|error| {
            error!("{context}: {error}");

            StatusError::internal_server_error()
        })
    }

    fn or_400(self, context: &str) -> Result<T, StatusError> {
        self.map_err(|error| {
            StatusError::bad_request()
                .brief(format!("{context}: {error}"))
                .detail(ErrorKind::InvalidArgument.as_str())
        })
    }
}
