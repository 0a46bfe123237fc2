//! Function implementations organized by category

pub mod collection;
pub mod grouping;
pub mod selection;

// Re-export all functions for convenience
pub use collection::*;
pub use grouping::*;
pub use selection::*;

use std::sync::Arc;

use serde_json::Value;

use crate::model::ValueType;
use crate::random::RandomSource;
use crate::registry::function::{FunctionError, FunctionRegistry, FunctionResult};

/// Register all built-in functions, sharing one random source between the
/// randomized ones.
pub fn register_builtin_functions(
    registry: &mut FunctionRegistry,
    random: Arc<dyn RandomSource>,
) -> FunctionResult<()> {
    // Selection functions
    registry.register(OneOfFunction::new(Arc::clone(&random)))?;
    registry.register(SomeOfFunction::new(Arc::clone(&random)))?;

    // Collection functions
    registry.register(UniqueFunction)?;

    // Grouping functions
    registry.register(GroupByFunction)?;
    registry.register(GroupBySelectFirstFunction)?;
    registry.register(GroupBySelectOneFunction::new(Arc::clone(&random)))?;
    registry.register(GroupBySelectSomeFunction::new(random))?;

    Ok(())
}

// Argument extraction shared by the function implementations. Signature
// validation has already run by the time these are called, but each function
// still rematches so it stays safe when invoked directly.

pub(crate) fn expect_array<'a>(
    name: &str,
    index: usize,
    value: &'a Value,
) -> FunctionResult<&'a [Value]> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(FunctionError::InvalidArgumentType {
            name: name.to_string(),
            index,
            expected: ValueType::Array.to_string(),
            actual: ValueType::of(other).to_string(),
        }),
    }
}

pub(crate) fn expect_string<'a>(
    name: &str,
    index: usize,
    value: &'a Value,
) -> FunctionResult<&'a str> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(FunctionError::InvalidArgumentType {
            name: name.to_string(),
            index,
            expected: ValueType::String.to_string(),
            actual: ValueType::of(other).to_string(),
        }),
    }
}

/// A sample size: a non-negative whole number. Negative or fractional counts
/// are value errors, not type errors.
pub(crate) fn expect_count(name: &str, index: usize, value: &Value) -> FunctionResult<usize> {
    let number = match value {
        Value::Number(n) => n,
        other => {
            return Err(FunctionError::InvalidArgumentType {
                name: name.to_string(),
                index,
                expected: ValueType::Number.to_string(),
                actual: ValueType::of(other).to_string(),
            });
        }
    };

    if let Some(n) = number.as_u64() {
        return Ok(usize::try_from(n).unwrap_or(usize::MAX));
    }
    if number.as_i64().is_some() || number.as_f64().is_some_and(|f| f < 0.0) {
        return Err(FunctionError::InvalidArgument {
            name: name.to_string(),
            message: format!("count must be non-negative, got {number}"),
        });
    }
    if let Some(f) = number.as_f64() {
        if f.fract() == 0.0 {
            return Ok(f as usize);
        }
    }
    Err(FunctionError::InvalidArgument {
        name: name.to_string(),
        message: format!("count must be a whole number, got {number}"),
    })
}

/// Sample without replacement, clamped to the population size: asking for
/// more elements than exist returns all of them.
pub(crate) fn sample_members(
    random: &dyn RandomSource,
    items: &[Value],
    count: usize,
) -> Vec<Value> {
    let amount = count.min(items.len());
    random
        .sample_indices(items.len(), amount)
        .into_iter()
        .map(|i| items[i].clone())
        .collect()
}
