//! Error types for the Strainer core library
//!
//! Invalid input never raises: filters record [`FilterError`] values on the
//! application context and the runner hands them back as data, so callers
//! can render targeted per-field messages next to a best-effort partial
//! result.

use crate::path::ContextPath;
use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Stable identifier for the reason a filter rejected a value.
///
/// Codes are part of each filter's documented contract and are safe to
/// match on programmatically; messages are not. Filters with a concern the
/// closed set does not cover declare their own code via `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The value has the wrong semantic kind.
    TypeMismatch,
    /// The value falls outside a configured bound.
    OutOfRange,
    /// The value could not be parsed or coerced.
    FormatInvalid,
    /// A required key or value is missing.
    KeyMissing,
    /// A key was present that the configuration does not permit.
    KeyNotAllowed,
    /// The value has the wrong length.
    LengthMismatch,
    /// A switch discriminant matched no case.
    NoMatchingCase,
    /// Filter-specific code.
    Custom(String),
}

impl ErrorCode {
    /// The snake_case wire identifier for this code.
    pub fn as_str(&self) -> &str {
        match self {
            ErrorCode::TypeMismatch => "type_mismatch",
            ErrorCode::OutOfRange => "out_of_range",
            ErrorCode::FormatInvalid => "format_invalid",
            ErrorCode::KeyMissing => "key_missing",
            ErrorCode::KeyNotAllowed => "key_not_allowed",
            ErrorCode::LengthMismatch => "length_mismatch",
            ErrorCode::NoMatchingCase => "no_matching_case",
            ErrorCode::Custom(code) => code,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A single validation failure.
///
/// `context` is the path to the offending sub-value within the input
/// (empty for the root). Serializes to the `{code, message, context}`
/// payload shape suitable for e.g. a 400 Bad Request response body.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("{message}")]
pub struct FilterError {
    pub code: ErrorCode,
    pub message: String,
    pub context: ContextPath,
}

impl FilterError {
    pub fn new(code: ErrorCode, message: impl Into<String>, context: ContextPath) -> Self {
        Self {
            code,
            message: message.into(),
            context,
        }
    }
}
