//! one_of() and some_of() - randomized selection from arrays

use std::sync::Arc;

use serde_json::Value;

use super::{expect_array, expect_count, sample_members};
use crate::model::ValueType;
use crate::random::{RandomSource, ThreadRandom};
use crate::registry::function::{FunctionError, FunctionResult, PathFunction};
use crate::registry::signature::{FunctionSignature, ParameterInfo};

/// one_of() function - uniformly-random element of an array
pub struct OneOfFunction {
    random: Arc<dyn RandomSource>,
}

impl OneOfFunction {
    /// Create the function with an injected random source
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }
}

impl Default for OneOfFunction {
    fn default() -> Self {
        Self::new(Arc::new(ThreadRandom))
    }
}

impl PathFunction for OneOfFunction {
    fn name(&self) -> &str {
        "one_of"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new(
                "one_of",
                vec![ParameterInfo::required("array", ValueType::Array)],
                ValueType::Any,
            )
        });
        &SIG
    }
    fn documentation(&self) -> &str {
        "Returns a uniformly-random element of the input array. Fails on an empty array."
    }
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        let items = expect_array(self.name(), 0, &args[0])?;
        if items.is_empty() {
            return Err(FunctionError::EmptyInput {
                name: self.name().to_string(),
            });
        }
        Ok(items[self.random.pick_index(items.len())].clone())
    }
}

/// some_of() function - uniformly-random sample without replacement
///
/// The sample size is clamped to the array length: requesting more elements
/// than exist returns all of them.
pub struct SomeOfFunction {
    random: Arc<dyn RandomSource>,
}

impl SomeOfFunction {
    /// Create the function with an injected random source
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }
}

impl Default for SomeOfFunction {
    fn default() -> Self {
        Self::new(Arc::new(ThreadRandom))
    }
}

impl PathFunction for SomeOfFunction {
    fn name(&self) -> &str {
        "some_of"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new(
                "some_of",
                vec![
                    ParameterInfo::required("array", ValueType::Array),
                    ParameterInfo::required("count", ValueType::Number),
                ],
                ValueType::Array,
            )
        });
        &SIG
    }
    fn documentation(&self) -> &str {
        "Returns a uniformly-random sample, without replacement, of min(count, length) elements."
    }
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        let items = expect_array(self.name(), 0, &args[0])?;
        let count = expect_count(self.name(), 1, &args[1])?;
        Ok(Value::Array(sample_members(
            self.random.as_ref(),
            items,
            count,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SeededRandom;
    use serde_json::json;

    #[test]
    fn test_one_of_returns_a_member() {
        let function = OneOfFunction::default();
        for _ in 0..20 {
            let result = function.evaluate(&[json!(["a", "b", "c"])]).unwrap();
            assert!(["a", "b", "c"].iter().any(|s| result == *s));
        }
    }

    #[test]
    fn test_one_of_empty_array_fails() {
        let function = OneOfFunction::default();
        let err = function.evaluate(&[json!([])]).unwrap_err();
        assert_eq!(
            err,
            FunctionError::EmptyInput {
                name: "one_of".to_string()
            }
        );
    }

    #[test]
    fn test_one_of_is_seedable() {
        let a = OneOfFunction::new(Arc::new(SeededRandom::new(3)));
        let b = OneOfFunction::new(Arc::new(SeededRandom::new(3)));
        let input = json!([1, 2, 3, 4, 5, 6, 7, 8]);
        for _ in 0..10 {
            assert_eq!(
                a.evaluate(std::slice::from_ref(&input)).unwrap(),
                b.evaluate(std::slice::from_ref(&input)).unwrap()
            );
        }
    }

    #[test]
    fn test_some_of_sample_size() {
        let function = SomeOfFunction::default();
        let result = function.evaluate(&[json!([1, 2, 3, 4, 5]), json!(3)]).unwrap();
        assert_eq!(result.as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_some_of_clamps_to_length() {
        let function = SomeOfFunction::default();
        let result = function.evaluate(&[json!(["a", "b", "c"]), json!(9)]).unwrap();
        let sample = result.as_array().unwrap();
        assert_eq!(sample.len(), 3);
        assert!(sample.iter().all(|v| ["a", "b", "c"].iter().any(|s| v == s)));
    }

    #[test]
    fn test_some_of_has_no_duplicate_positions() {
        let function = SomeOfFunction::default();
        let input: Vec<i64> = (0..50).collect();
        let result = function.evaluate(&[json!(input), json!(50)]).unwrap();
        let mut picked: Vec<i64> = result
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_i64().unwrap())
            .collect();
        picked.sort_unstable();
        assert_eq!(picked, input);
    }

    #[test]
    fn test_some_of_negative_count_fails() {
        let function = SomeOfFunction::default();
        let err = function.evaluate(&[json!([1, 2]), json!(-1)]).unwrap_err();
        assert!(matches!(err, FunctionError::InvalidArgument { .. }));
    }

    #[test]
    fn test_some_of_fractional_count_fails() {
        let function = SomeOfFunction::default();
        let err = function.evaluate(&[json!([1, 2]), json!(1.5)]).unwrap_err();
        assert!(matches!(err, FunctionError::InvalidArgument { .. }));
    }

    #[test]
    fn test_some_of_zero_count_is_empty() {
        let function = SomeOfFunction::default();
        let result = function.evaluate(&[json!([1, 2]), json!(0)]).unwrap();
        assert_eq!(result, json!([]));
    }
}
