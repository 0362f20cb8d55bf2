//! Numeric coercion and bound filters
//!
//! Copyright (c) 2025 Strainer Team
//! Licensed under the Apache-2.0 license

use crate::error::ErrorCode;
use crate::pipeline::context::ApplyContext;
use crate::pipeline::filter::Filter;
use crate::types::ValueKind;
use serde_json::{Number, Value};

/// Interprets the value as an integer.
///
/// Numeric strings are converted; floats (and numeric strings) carrying an
/// integral value are accepted, anything with a fractional part is
/// invalid. Error code: `format_invalid`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Int;

enum IntParse {
    NotNumeric,
    NotIntegral,
}

impl Int {
    fn parse(value: &Value) -> Result<Number, IntParse> {
        match value {
            Value::Number(number) => {
                if number.is_i64() || number.is_u64() {
                    Ok(number.clone())
                } else {
                    Self::integral(number.as_f64().ok_or(IntParse::NotNumeric)?)
                }
            }
            Value::String(text) => {
                let text = text.trim();
                if let Ok(parsed) = text.parse::<i64>() {
                    Ok(Number::from(parsed))
                } else if let Ok(parsed) = text.parse::<f64>() {
                    Self::integral(parsed)
                } else {
                    Err(IntParse::NotNumeric)
                }
            }
            _ => Err(IntParse::NotNumeric),
        }
    }

    fn integral(value: f64) -> Result<Number, IntParse> {
        if !value.is_finite() {
            return Err(IntParse::NotNumeric);
        }
        if value.fract() != 0.0 || value < i64::MIN as f64 || value > i64::MAX as f64 {
            return Err(IntParse::NotIntegral);
        }
        Ok(Number::from(value as i64))
    }
}

impl Filter for Int {
    fn apply_value(&self, value: Value, ctx: &mut ApplyContext) -> Option<Value> {
        match Self::parse(&value) {
            Ok(number) => Some(Value::Number(number)),
            Err(IntParse::NotNumeric) => {
                ctx.reject(ErrorCode::FormatInvalid, "Numeric value expected.");
                None
            }
            Err(IntParse::NotIntegral) => {
                ctx.reject(ErrorCode::FormatInvalid, "Integer value expected.");
                None
            }
        }
    }
}

/// Enforces a minimum value on numbers. Error code: `out_of_range`.
#[derive(Debug, Clone)]
pub struct Min {
    bound: Number,
    exclusive: bool,
}

impl Min {
    pub fn new(bound: impl Into<Number>) -> Self {
        Self {
            bound: bound.into(),
            exclusive: false,
        }
    }

    /// Excludes the bound itself from the valid range.
    pub fn exclusive(mut self) -> Self {
        self.exclusive = true;
        self
    }
}

impl Filter for Min {
    fn apply_value(&self, value: Value, ctx: &mut ApplyContext) -> Option<Value> {
        let Some(actual) = value.as_f64() else {
            ctx.reject(
                ErrorCode::TypeMismatch,
                format!(
                    "{} is not valid (allowed types: float, integer).",
                    ValueKind::of(&value),
                ),
            );
            return None;
        };

        let bound = self.bound.as_f64().unwrap_or(f64::NAN);
        if actual < bound || (self.exclusive && actual == bound) {
            let operator = if self.exclusive { ">" } else { ">=" };
            ctx.reject(
                ErrorCode::OutOfRange,
                format!("Value is too small (must be {} {}).", operator, self.bound),
            );
            None
        } else {
            Some(value)
        }
    }
}

/// Enforces a maximum value on numbers. Error code: `out_of_range`.
#[derive(Debug, Clone)]
pub struct Max {
    bound: Number,
    exclusive: bool,
}

impl Max {
    pub fn new(bound: impl Into<Number>) -> Self {
        Self {
            bound: bound.into(),
            exclusive: false,
        }
    }

    /// Excludes the bound itself from the valid range.
    pub fn exclusive(mut self) -> Self {
        self.exclusive = true;
        self
    }
}

impl Filter for Max {
    fn apply_value(&self, value: Value, ctx: &mut ApplyContext) -> Option<Value> {
        let Some(actual) = value.as_f64() else {
            ctx.reject(
                ErrorCode::TypeMismatch,
                format!(
                    "{} is not valid (allowed types: float, integer).",
                    ValueKind::of(&value),
                ),
            );
            return None;
        };

        let bound = self.bound.as_f64().unwrap_or(f64::NAN);
        if actual > bound || (self.exclusive && actual == bound) {
            let operator = if self.exclusive { "<" } else { "<=" };
            ctx.reject(
                ErrorCode::OutOfRange,
                format!("Value is too large (must be {} {}).", operator, self.bound),
            );
            None
        } else {
            Some(value)
        }
    }
}
