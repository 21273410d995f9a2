//! Shared building blocks for validated domain values.
//!
//! Entity identifiers are UUID newtypes generated by [`uuid_identifier!`] and
//! short human-entered strings are trimmed, length-checked newtypes generated
//! by [`bounded_text!`]. Both keep serde and `FromStr` behaviour consistent
//! across the household aggregates.

use serde_json::json;

use super::Error;

/// Validation failure for one named input field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("{field} is invalid: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl FieldError {
    /// Build an [`FieldError::Invalid`] for `field`.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending field as it appears in request payloads.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Empty { field } | Self::TooLong { field, .. } | Self::Invalid { field, .. } => {
                field
            }
        }
    }

    /// Machine-readable failure code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Empty { .. } => "empty",
            Self::TooLong { .. } => "too_long",
            Self::Invalid { .. } => "invalid",
        }
    }
}

impl From<FieldError> for Error {
    fn from(err: FieldError) -> Self {
        Self::invalid_request(err.to_string()).with_details(json!({
            "field": err.field(),
            "code": err.code(),
        }))
    }
}

/// Trim `raw` and enforce `1..=max` characters.
pub fn required_text(raw: &str, field: &'static str, max: usize) -> Result<String, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldError::Empty { field });
    }
    if trimmed.chars().count() > max {
        return Err(FieldError::TooLong { field, max });
    }
    Ok(trimmed.to_owned())
}

/// Trim optional text, collapsing blank input to `None`.
pub fn optional_text(
    raw: Option<&str>,
    field: &'static str,
    max: Option<usize>,
) -> Result<Option<String>, FieldError> {
    let Some(trimmed) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(None);
    };
    if let Some(limit) = max
        && trimmed.chars().count() > limit
    {
        return Err(FieldError::TooLong { field, max: limit });
    }
    Ok(Some(trimmed.to_owned()))
}

/// Declare a UUID-backed entity identifier.
macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(::uuid::Uuid);

        impl $name {
            /// Generate a fresh random identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(::uuid::Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: ::uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &::uuid::Uuid {
                &self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = ::uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                ::uuid::Uuid::parse_str(s).map(Self)
            }
        }
    };
}

/// Declare a trimmed, length-limited text value.
macro_rules! bounded_text {
    ($(#[$meta:meta])* $name:ident, field = $field:literal, max = $max:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Maximum length in characters.
            pub const MAX: usize = $max;

            /// Trim and validate raw input.
            pub fn new(raw: impl AsRef<str>) -> Result<Self, $crate::domain::FieldError> {
                $crate::domain::values::required_text(raw.as_ref(), $field, $max).map(Self)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::domain::FieldError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

pub(crate) use {bounded_text, uuid_identifier};

#[cfg(test)]
mod tests {
    //! Regression coverage for shared value helpers.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    bounded_text!(
        /// Test-only text value.
        Label,
        field = "label",
        max = 5
    );

    #[rstest]
    #[case("  jam ", Ok("jam".to_owned()))]
    #[case("   ", Err(FieldError::Empty { field: "label" }))]
    #[case("marmalade", Err(FieldError::TooLong { field: "label", max: 5 }))]
    fn required_text_trims_and_bounds(
        #[case] raw: &str,
        #[case] expected: Result<String, FieldError>,
    ) {
        assert_eq!(required_text(raw, "label", 5), expected);
    }

    #[rstest]
    #[case(None, Ok(None))]
    #[case(Some("  "), Ok(None))]
    #[case(Some(" top shelf "), Ok(Some("top shelf".to_owned())))]
    #[case(Some("abcdef"), Err(FieldError::TooLong { field: "icon", max: 3 }))]
    fn optional_text_collapses_blanks(
        #[case] raw: Option<&str>,
        #[case] expected: Result<Option<String>, FieldError>,
    ) {
        let max = if raw == Some("abcdef") { Some(3) } else { None };
        assert_eq!(optional_text(raw, "icon", max), expected);
    }

    #[rstest]
    fn generated_text_rejects_overlong_values() {
        assert!(Label::new("pickles").is_err());
        assert_eq!(Label::new(" jam ").map(String::from), Ok("jam".to_owned()));
    }

    #[rstest]
    fn field_errors_become_invalid_requests_with_details() {
        let error: Error = FieldError::TooLong {
            field: "name",
            max: 3,
        }
        .into();
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        let details = error.details().expect("details present");
        assert_eq!(details["field"], "name");
        assert_eq!(details["code"], "too_long");
    }
}
