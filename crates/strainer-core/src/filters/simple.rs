//! Presence, emptiness, type-tag and membership filters
//!
//! Copyright (c) 2025 Strainer Team
//! Licensed under the Apache-2.0 license

use crate::error::ErrorCode;
use crate::pipeline::context::ApplyContext;
use crate::pipeline::filter::Filter;
use crate::types::{length_of, ValueKind};
use serde_json::Value;

/// Filter that does nothing; a placeholder for chain or assignment slots
/// that should pass the value through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOp;

impl Filter for NoOp {
    fn apply_value(&self, value: Value, _ctx: &mut ApplyContext) -> Option<Value> {
        Some(value)
    }
}

/// Rejects the absent sentinel and empty values.
///
/// This filter is the single exception to the "absent passes by default"
/// rule. Error code: `key_missing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Required;

impl Filter for Required {
    fn apply_value(&self, value: Value, ctx: &mut ApplyContext) -> Option<Value> {
        if length_of(&value) == Some(0) {
            ctx.reject(ErrorCode::KeyMissing, "This value is required.");
            None
        } else {
            Some(value)
        }
    }

    fn apply_absent(&self, ctx: &mut ApplyContext) -> Option<Value> {
        ctx.reject(ErrorCode::KeyMissing, "This value is required.");
        None
    }
}

/// Expects the value not to be empty.
///
/// "Empty" means zero length; values that do not have a length (booleans,
/// numbers, null) are never considered empty — in particular, `false` and
/// `0` pass. Absence is allowed by default; [`Required`] is the hard-wired
/// strict form. Error codes: `length_mismatch` for empty values,
/// `key_missing` when absence is rejected.
#[derive(Debug, Clone, Copy)]
pub struct NotEmpty {
    allow_absent: bool,
}

impl NotEmpty {
    pub fn new() -> Self {
        Self { allow_absent: true }
    }

    /// Whether the absent sentinel is allowed through.
    pub fn allow_absent(mut self, allow: bool) -> Self {
        self.allow_absent = allow;
        self
    }
}

impl Default for NotEmpty {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for NotEmpty {
    fn apply_value(&self, value: Value, ctx: &mut ApplyContext) -> Option<Value> {
        if length_of(&value) == Some(0) {
            ctx.reject(ErrorCode::LengthMismatch, "Non-empty value expected.");
            None
        } else {
            Some(value)
        }
    }

    fn apply_absent(&self, ctx: &mut ApplyContext) -> Option<Value> {
        if !self.allow_absent {
            ctx.reject(ErrorCode::KeyMissing, "Non-empty value expected.");
        }
        None
    }
}

/// Replaces absent and empty values with a default.
///
/// Placed ahead of stricter stages, this turns "nothing was provided" into
/// a concrete fallback before validation runs.
#[derive(Debug, Clone)]
pub struct Optional {
    default: Value,
}

impl Optional {
    pub fn new(default: impl Into<Value>) -> Self {
        Self {
            default: default.into(),
        }
    }
}

impl Filter for Optional {
    fn apply_value(&self, value: Value, _ctx: &mut ApplyContext) -> Option<Value> {
        if length_of(&value) == Some(0) {
            Some(self.default.clone())
        } else {
            Some(value)
        }
    }

    fn apply_absent(&self, _ctx: &mut ApplyContext) -> Option<Value> {
        Some(self.default.clone())
    }
}

/// Checks the semantic kind of a value against an allowed set.
///
/// Error code: `type_mismatch`.
#[derive(Debug, Clone)]
pub struct ExpectType {
    allowed: Vec<ValueKind>,
}

impl ExpectType {
    pub fn new(kind: ValueKind) -> Self {
        Self {
            allowed: vec![kind],
        }
    }

    pub fn any_of(kinds: impl IntoIterator<Item = ValueKind>) -> Self {
        Self {
            allowed: kinds.into_iter().collect(),
        }
    }

    fn allowed_names(&self) -> String {
        let mut names: Vec<&str> = self.allowed.iter().map(|kind| kind.name()).collect();
        names.sort_unstable();
        names.dedup();
        names.join(", ")
    }
}

impl Filter for ExpectType {
    fn apply_value(&self, value: Value, ctx: &mut ApplyContext) -> Option<Value> {
        let incoming = ValueKind::of(&value);
        if self.allowed.contains(&incoming) {
            Some(value)
        } else {
            ctx.reject(
                ErrorCode::TypeMismatch,
                format!(
                    "{} is not valid (allowed types: {}).",
                    incoming,
                    self.allowed_names(),
                ),
            );
            None
        }
    }
}

/// Requires the value to match one of a set of allowed options.
///
/// Comparison is by value equality, so any JSON value can be an option.
/// Error code: `not_valid_choice`.
#[derive(Debug, Clone)]
pub struct Choice {
    choices: Vec<Value>,
}

impl Choice {
    pub const CODE_INVALID: &'static str = "not_valid_choice";

    pub fn new<I, V>(choices: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            choices: choices.into_iter().map(Into::into).collect(),
        }
    }
}

impl Filter for Choice {
    fn apply_value(&self, value: Value, ctx: &mut ApplyContext) -> Option<Value> {
        if self.choices.contains(&value) {
            Some(value)
        } else {
            let mut options: Vec<String> =
                self.choices.iter().map(|choice| choice.to_string()).collect();
            options.sort_unstable();
            ctx.reject(
                ErrorCode::Custom(Self::CODE_INVALID.to_owned()),
                format!("Valid options are: {}.", options.join(", ")),
            );
            None
        }
    }
}

/// Ensures values have exactly the given length.
///
/// Error codes: `length_mismatch`, or `type_mismatch` for values without a
/// length.
#[derive(Debug, Clone, Copy)]
pub struct Length {
    length: usize,
}

impl Length {
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Filter for Length {
    fn apply_value(&self, value: Value, ctx: &mut ApplyContext) -> Option<Value> {
        let Some(actual) = length_of(&value) else {
            ctx.reject(
                ErrorCode::TypeMismatch,
                format!(
                    "{} is not valid (allowed types: mapping, sequence, string).",
                    ValueKind::of(&value),
                ),
            );
            return None;
        };

        if actual > self.length {
            ctx.reject(
                ErrorCode::LengthMismatch,
                format!("Value is too long (length must be exactly {}).", self.length),
            );
            None
        } else if actual < self.length {
            ctx.reject(
                ErrorCode::LengthMismatch,
                format!("Value is too short (length must be exactly {}).", self.length),
            );
            None
        } else {
            Some(value)
        }
    }
}

/// Enforces a minimum length.
#[derive(Debug, Clone, Copy)]
pub struct MinLength {
    min_length: usize,
}

impl MinLength {
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }
}

impl Filter for MinLength {
    fn apply_value(&self, value: Value, ctx: &mut ApplyContext) -> Option<Value> {
        let Some(actual) = length_of(&value) else {
            ctx.reject(
                ErrorCode::TypeMismatch,
                format!(
                    "{} is not valid (allowed types: mapping, sequence, string).",
                    ValueKind::of(&value),
                ),
            );
            return None;
        };

        // The value is not padded: it is not clear to which end the padding
        // would go, nor what it would be.
        if actual < self.min_length {
            ctx.reject(
                ErrorCode::LengthMismatch,
                format!("Value is too short (length must be >= {}).", self.min_length),
            );
            None
        } else {
            Some(value)
        }
    }
}

/// Enforces a maximum length.
#[derive(Debug, Clone, Copy)]
pub struct MaxLength {
    max_length: usize,
}

impl MaxLength {
    pub fn new(max_length: usize) -> Self {
        Self { max_length }
    }
}

impl Filter for MaxLength {
    fn apply_value(&self, value: Value, ctx: &mut ApplyContext) -> Option<Value> {
        let Some(actual) = length_of(&value) else {
            ctx.reject(
                ErrorCode::TypeMismatch,
                format!(
                    "{} is not valid (allowed types: mapping, sequence, string).",
                    ValueKind::of(&value),
                ),
            );
            return None;
        };

        // The value is not truncated, for symmetry with MinLength.
        if actual > self.max_length {
            ctx.reject(
                ErrorCode::LengthMismatch,
                format!("Value is too long (length must be <= {}).", self.max_length),
            );
            None
        } else {
            Some(value)
        }
    }
}
