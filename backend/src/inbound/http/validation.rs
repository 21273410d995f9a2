//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every request failure becomes an `invalid_request` error whose details
//! carry the offending `field` (as spelled in the JSON body or path) and a
//! machine-readable `code`.

use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use serde_json::json;

use crate::domain::{optional_text, Error, FieldError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    InvalidValue,
}

impl ErrorCode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidValue => "invalid",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) const fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, code: ErrorCode, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    field_error(
        field,
        ErrorCode::MissingField,
        format!("missing required field: {}", field.as_str()),
    )
}

pub(crate) fn invalid_value_error(field: FieldName, message: impl Into<String>) -> Error {
    field_error(field, ErrorCode::InvalidValue, message.into())
}

/// Parse a UUID-backed identifier taken from the path or query string.
pub(crate) fn parse_id<T: FromStr>(raw: &str, field: FieldName) -> Result<T, Error> {
    raw.parse().map_err(|_| {
        Error::invalid_request(format!("{} must be a valid UUID", field.as_str())).with_details(
            json!({
                "field": field.as_str(),
                "value": raw,
                "code": ErrorCode::InvalidUuid.as_str(),
            }),
        )
    })
}

/// Require a body field that serde left as `None`.
pub(crate) fn required<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Re-label a domain validation failure with its JSON field name.
pub(crate) fn relabel(err: FieldError, field: FieldName) -> Error {
    let message = match &err {
        FieldError::Empty { .. } => format!("{} must not be empty", field.as_str()),
        FieldError::TooLong { max, .. } => {
            format!("{} must be at most {max} characters", field.as_str())
        }
        FieldError::Invalid { reason, .. } => format!("{} {reason}", field.as_str()),
    };
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": err.code(),
    }))
}

/// Reject a domain validation failure under the field name it carries.
pub(crate) fn rejected(err: FieldError) -> Error {
    let field = FieldName::new(err.field());
    relabel(err, field)
}

/// Normalise optional free text; blanks collapse to `None`.
pub(crate) fn text(
    value: Option<&str>,
    field: FieldName,
    max: Option<usize>,
) -> Result<Option<String>, Error> {
    optional_text(value, field.as_str(), max).map_err(|err| relabel(err, field))
}

/// Normalise a nullable field in a partial update.
pub(crate) fn nullable_text(
    value: Option<Option<&str>>,
    field: FieldName,
    max: Option<usize>,
) -> Result<Option<Option<String>>, Error> {
    value.map(|inner| text(inner, field, max)).transpose()
}

/// Deserialise a field that distinguishes "absent" from "explicitly null".
///
/// Use with `#[serde(default, deserialize_with = "nullable")]`: an absent
/// key yields `None`, `null` yields `Some(None)` and a value yields
/// `Some(Some(value))`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
