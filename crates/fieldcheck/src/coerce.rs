//! Conversion of dynamic field values into the type a predicate expects

use crate::error::RuleError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Runtime type a predicate evaluates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueType {
    /// A string
    Text,
    /// A number representable as `i64`
    Integer,
    /// A string (character count) or a sequence of strings or integers (item count)
    Sized,
    /// Any value, passed through unchanged
    Any,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Text => "string",
            ValueType::Integer => "integer",
            ValueType::Sized => "string or list",
            ValueType::Any => "any",
        };
        f.write_str(name)
    }
}

/// A value after coercion
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coerced<'a> {
    Text(&'a str),
    Integer(i64),
    Sized(usize),
    Any(&'a Value),
}

impl<'a> Coerced<'a> {
    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            Coerced::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Coerced::Integer(number) => Some(*number),
            _ => None,
        }
    }

    pub fn as_len(&self) -> Option<usize> {
        match self {
            Coerced::Sized(len) => Some(*len),
            _ => None,
        }
    }
}

/// Name of a JSON value's type, for error messages
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

fn mismatch(expected: ValueType, value: &Value) -> RuleError {
    RuleError::Coercion {
        expected,
        found: type_name(value).to_string(),
    }
}

/// Coerce `value` to `expected`, without guessing: strings are never parsed
/// into numbers and numbers are never formatted into strings.
pub fn coerce(value: &Value, expected: ValueType) -> Result<Coerced<'_>, RuleError> {
    match expected {
        ValueType::Any => Ok(Coerced::Any(value)),
        ValueType::Text => value
            .as_str()
            .map(Coerced::Text)
            .ok_or_else(|| mismatch(expected, value)),
        ValueType::Integer => value
            .as_i64()
            .map(Coerced::Integer)
            .ok_or_else(|| mismatch(expected, value)),
        ValueType::Sized => match value {
            Value::String(text) => Ok(Coerced::Sized(text.chars().count())),
            Value::Array(items) if is_homogeneous_sequence(items) => {
                Ok(Coerced::Sized(items.len()))
            }
            other => Err(mismatch(expected, other)),
        },
    }
}

fn is_homogeneous_sequence(items: &[Value]) -> bool {
    items.iter().all(Value::is_string) || items.iter().all(Value::is_i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_coercion() {
        assert_eq!(coerce(&json!("abc"), ValueType::Text).unwrap(), Coerced::Text("abc"));
        assert!(matches!(
            coerce(&json!(12), ValueType::Text),
            Err(RuleError::Coercion { expected: ValueType::Text, .. })
        ));
    }

    #[test]
    fn test_integer_coercion_is_strict() {
        assert_eq!(coerce(&json!(12), ValueType::Integer).unwrap(), Coerced::Integer(12));
        assert!(coerce(&json!("12"), ValueType::Integer).is_err());
        assert!(coerce(&json!(1.5), ValueType::Integer).is_err());
    }

    #[test]
    fn test_sized_counts_chars_not_bytes() {
        assert_eq!(coerce(&json!("café"), ValueType::Sized).unwrap(), Coerced::Sized(4));
        assert_eq!(
            coerce(&json!(["a", "b"]), ValueType::Sized).unwrap(),
            Coerced::Sized(2)
        );
        assert_eq!(coerce(&json!([1, 2, 3]), ValueType::Sized).unwrap(), Coerced::Sized(3));
        assert_eq!(coerce(&json!([]), ValueType::Sized).unwrap(), Coerced::Sized(0));
    }

    #[test]
    fn test_sized_rejects_mixed_and_scalar_values() {
        assert!(coerce(&json!(["a", 1]), ValueType::Sized).is_err());
        assert!(coerce(&json!(true), ValueType::Sized).is_err());
        assert!(coerce(&json!({"a": 1}), ValueType::Sized).is_err());
    }

    #[test]
    fn test_coercion_error_reports_found_type() {
        let err = coerce(&json!(true), ValueType::Integer).unwrap_err();
        assert_eq!(
            err,
            RuleError::Coercion {
                expected: ValueType::Integer,
                found: "boolean".to_string()
            }
        );
    }
}
