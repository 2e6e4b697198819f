//! Optional query parameter parsing helpers.

use std::{fmt::Display, str::FromStr};

use salvo::{oapi::extract::QueryParam, prelude::StatusError};

use crate::extensions::*;

pub(crate) trait OptionalQueryExt {
    /// Parse the parameter when present, answering 400 when it doesn't parse.
    fn parse_optional<T>(self, context: &str) -> Result<Option<T>, StatusError>
    where
        T: FromStr,
        T::Err: Display;
}

impl OptionalQueryExt for QueryParam<String, false> {
    fn parse_optional<T>(self, context: &str) -> Result<Option<T>, StatusError>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.into_inner()
            .map(|value| value.trim().parse::<T>())
            .transpose()
            .or_400(context)
    }
}
