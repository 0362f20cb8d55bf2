//! Semantic value kinds for the Strainer value model
//!
//! Filters operate on dynamic JSON values; type checks compare against this
//! closed set of kinds rather than reflecting on concrete types. The kind
//! names are the user-facing names that appear in error messages.

use serde_json::Value;
use std::fmt;

/// The semantic kind of a JSON value.
///
/// Numbers split into `Integer` and `Float`: a number parsed from `42` is
/// an integer, one parsed from `4.5` (or `4.0`) is a float.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Boolean,
    Integer,
    Float,
    String,
    Sequence,
    Mapping,
}

impl ValueKind {
    /// Classifies a value.
    pub fn of(value: &Value) -> ValueKind {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(number) => {
                if number.is_i64() || number.is_u64() {
                    ValueKind::Integer
                } else {
                    ValueKind::Float
                }
            }
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Sequence,
            Value::Object(_) => ValueKind::Mapping,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::Sequence => "sequence",
            ValueKind::Mapping => "mapping",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The length of a value, for the kinds that have one: character count for
/// strings, element count for sequences, entry count for mappings.
///
/// Values without a length (booleans, numbers, null) return `None` and are
/// never considered empty by the emptiness filters.
pub fn length_of(value: &Value) -> Option<usize> {
    match value {
        Value::String(text) => Some(text.chars().count()),
        Value::Array(items) => Some(items.len()),
        Value::Object(entries) => Some(entries.len()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_kinds() {
        assert_eq!(ValueKind::of(&json!(42)), ValueKind::Integer);
        assert_eq!(ValueKind::of(&json!(-7)), ValueKind::Integer);
        assert_eq!(ValueKind::of(&json!(4.5)), ValueKind::Float);
    }

    #[test]
    fn test_container_kinds() {
        assert_eq!(ValueKind::of(&json!([1, 2])), ValueKind::Sequence);
        assert_eq!(ValueKind::of(&json!({"a": 1})), ValueKind::Mapping);
        assert_eq!(ValueKind::of(&json!(null)), ValueKind::Null);
    }

    #[test]
    fn test_length_of_sized_values() {
        assert_eq!(length_of(&json!("héllo")), Some(5));
        assert_eq!(length_of(&json!([1, 2, 3])), Some(3));
        assert_eq!(length_of(&json!({"a": 1})), Some(1));
        assert_eq!(length_of(&json!("")), Some(0));
    }

    #[test]
    fn test_length_of_unsized_values() {
        assert_eq!(length_of(&json!(false)), None);
        assert_eq!(length_of(&json!(0)), None);
        assert_eq!(length_of(&json!(null)), None);
    }
}
