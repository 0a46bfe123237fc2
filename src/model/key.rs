//! Hashable surrogate keys for scalar JSON values

use serde_json::{Number, Value};
use std::fmt;

use super::types::ValueType;

/// Hashable key for a scalar JSON value.
///
/// Deduplication and grouping compare values by value equality. JSON arrays
/// and objects carry no such key here; operations that need one reject them
/// with the offending kind so the caller can surface a typed error.
///
/// Numbers compare by their JSON representation: `1` and `1.0` are distinct
/// keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKey {
    /// JSON null
    Null,
    /// Boolean value
    Boolean(bool),
    /// Numeric value
    Number(Number),
    /// String value
    String(String),
}

impl ValueKey {
    /// Build the key for a scalar value, or report the unkeyable kind.
    pub fn try_from_value(value: &Value) -> Result<Self, ValueType> {
        match value {
            Value::Null => Ok(ValueKey::Null),
            Value::Bool(b) => Ok(ValueKey::Boolean(*b)),
            Value::Number(n) => Ok(ValueKey::Number(n.clone())),
            Value::String(s) => Ok(ValueKey::String(s.clone())),
            other => Err(ValueType::of(other)),
        }
    }
}

impl fmt::Display for ValueKey {
    /// Renders the key as object-key text: strings verbatim, everything else
    /// as its JSON literal.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKey::Null => f.write_str("null"),
            ValueKey::Boolean(b) => write!(f, "{b}"),
            ValueKey::Number(n) => write!(f, "{n}"),
            ValueKey::String(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_keys() {
        assert_eq!(ValueKey::try_from_value(&json!(null)), Ok(ValueKey::Null));
        assert_eq!(
            ValueKey::try_from_value(&json!("a")),
            Ok(ValueKey::String("a".to_string()))
        );
        assert_eq!(
            ValueKey::try_from_value(&json!(true)),
            Ok(ValueKey::Boolean(true))
        );
    }

    #[test]
    fn test_composite_values_have_no_key() {
        assert_eq!(ValueKey::try_from_value(&json!([1])), Err(ValueType::Array));
        assert_eq!(
            ValueKey::try_from_value(&json!({"a": 1})),
            Err(ValueType::Object)
        );
    }

    #[test]
    fn test_key_equality_is_value_equality() {
        let a = ValueKey::try_from_value(&json!("A")).unwrap();
        let b = ValueKey::try_from_value(&json!("A")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rendering() {
        assert_eq!(ValueKey::try_from_value(&json!("A")).unwrap().to_string(), "A");
        assert_eq!(ValueKey::try_from_value(&json!(42)).unwrap().to_string(), "42");
        assert_eq!(ValueKey::try_from_value(&json!(null)).unwrap().to_string(), "null");
        assert_eq!(ValueKey::try_from_value(&json!(true)).unwrap().to_string(), "true");
    }
}
