//! unique() - value-equality deduplication

use rustc_hash::FxHashSet;
use serde_json::Value;

use super::expect_array;
use crate::model::{ValueKey, ValueType};
use crate::registry::function::{FunctionError, FunctionResult, PathFunction};
use crate::registry::signature::{FunctionSignature, ParameterInfo};

/// unique() function - returns the distinct values of an array
///
/// Values are compared by value equality via [`ValueKey`], so elements must be
/// scalars. Callers must not rely on the result order; compose with a sort
/// stage downstream when a deterministic order is needed.
pub struct UniqueFunction;

impl PathFunction for UniqueFunction {
    fn name(&self) -> &str {
        "unique"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new(
                "unique",
                vec![ParameterInfo::required("array", ValueType::Array)],
                ValueType::Array,
            )
        });
        &SIG
    }
    fn documentation(&self) -> &str {
        "Returns the distinct values of the input array, compared by value equality. \
         Nested arrays and objects are not comparable this way and are rejected."
    }
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        let items = expect_array(self.name(), 0, &args[0])?;

        let mut seen = FxHashSet::default();
        let mut distinct = Vec::new();
        for item in items {
            let key = ValueKey::try_from_value(item).map_err(|kind| {
                FunctionError::UnhashableElement {
                    name: self.name().to_string(),
                    kind: kind.to_string(),
                }
            })?;
            if seen.insert(key) {
                distinct.push(item.clone());
            }
        }
        Ok(Value::Array(distinct))
    }
}
