//! Type system definitions for custom function signatures

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Runtime kind tag of a JSON value.
///
/// Doubles as the constraint vocabulary for function signatures: a declared
/// parameter type is compared against the kind tag of the supplied argument
/// before dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    /// JSON null
    Null,
    /// Boolean value (true/false)
    Boolean,
    /// Integer or floating point number
    Number,
    /// String value
    String,
    /// Ordered sequence of values
    Array,
    /// Mapping from string keys to values
    Object,
    /// Any type (used for polymorphic parameters and return types)
    Any,
}

impl ValueType {
    /// Get the kind tag of a runtime JSON value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueType::Null,
            Value::Bool(_) => ValueType::Boolean,
            Value::Number(_) => ValueType::Number,
            Value::String(_) => ValueType::String,
            Value::Array(_) => ValueType::Array,
            Value::Object(_) => ValueType::Object,
        }
    }

    /// Check whether a runtime kind satisfies this declared constraint.
    pub fn is_compatible_with(&self, other: &ValueType) -> bool {
        match (self, other) {
            (ValueType::Any, _) | (_, ValueType::Any) => true,
            _ => self == other,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Null => "null",
            ValueType::Boolean => "boolean",
            ValueType::Number => "number",
            ValueType::String => "string",
            ValueType::Array => "array",
            ValueType::Object => "object",
            ValueType::Any => "any",
        };
        write!(f, "{name}")
    }
}
