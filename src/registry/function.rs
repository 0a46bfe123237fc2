//! Function trait, error taxonomy and registry

use crate::model::ValueType;
use crate::registry::signature::FunctionSignature;
use log::trace;
use rustc_hash::FxHashMap;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Result type for function operations
pub type FunctionResult<T> = Result<T, FunctionError>;

/// Function registration and evaluation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FunctionError {
    /// A function with the same name is already registered
    #[error("Function '{name}' is already registered")]
    Duplicate {
        /// Function name
        name: String,
    },

    /// Call to a name with no registered function
    #[error("Unknown function '{name}'")]
    UnknownFunction {
        /// Function name
        name: String,
    },

    /// Invalid number of arguments
    #[error("Function '{name}' expects {min}-{} arguments, got {actual}", max.map_or("∞".to_string(), |n| n.to_string()))]
    InvalidArity {
        /// Function name
        name: String,
        /// Minimum arguments
        min: usize,
        /// Maximum arguments (None for unlimited)
        max: Option<usize>,
        /// Actual arguments provided
        actual: usize,
    },

    /// Invalid argument type
    #[error("Function '{name}' argument {index} expects {expected}, got {actual}")]
    InvalidArgumentType {
        /// Function name
        name: String,
        /// Argument index
        index: usize,
        /// Expected type
        expected: String,
        /// Actual type
        actual: String,
    },

    /// Argument of the declared type with an unusable value
    #[error("Function '{name}': {message}")]
    InvalidArgument {
        /// Function name
        name: String,
        /// What was wrong with the value
        message: String,
    },

    /// Operation requires a non-empty array
    #[error("Function '{name}' requires a non-empty array")]
    EmptyInput {
        /// Function name
        name: String,
    },

    /// Element kind that cannot be compared by value
    #[error("Function '{name}' cannot compare {kind} values by value equality")]
    UnhashableElement {
        /// Function name
        name: String,
        /// Offending value kind
        kind: String,
    },

    /// Runtime evaluation error
    #[error("Function '{name}' evaluation error: {message}")]
    Evaluation {
        /// Function name
        name: String,
        /// Error message
        message: String,
    },
}

/// Trait for custom path query functions
///
/// Implementations are pure: they read their arguments, return a fresh JSON
/// value or an error, and hold no mutable state.
pub trait PathFunction: Send + Sync {
    /// Get the function name
    fn name(&self) -> &str;

    /// Get the function signature
    fn signature(&self) -> &FunctionSignature;

    /// Evaluate the function with already-validated arguments
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value>;

    /// Get function documentation
    fn documentation(&self) -> &str {
        ""
    }

    /// Validate arguments against the signature (both arity and types)
    fn validate_args(&self, args: &[Value]) -> FunctionResult<()> {
        let sig = self.signature();
        let arg_count = args.len();

        if arg_count < sig.min_arity || sig.max_arity.is_some_and(|max| arg_count > max) {
            return Err(FunctionError::InvalidArity {
                name: self.name().to_string(),
                min: sig.min_arity,
                max: sig.max_arity,
                actual: arg_count,
            });
        }

        for (i, arg) in args.iter().enumerate() {
            if let Some(param) = sig.parameters.get(i) {
                let arg_type = ValueType::of(arg);
                if !param.param_type.is_compatible_with(&arg_type) {
                    return Err(FunctionError::InvalidArgumentType {
                        name: self.name().to_string(),
                        index: i,
                        expected: param.param_type.to_string(),
                        actual: arg_type.to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}

/// Registry mapping function names to implementations
///
/// Append-only: entries are registered at construction time and never mutated
/// afterwards, so a registry can be shared across evaluator sessions without
/// locking.
#[derive(Clone)]
pub struct FunctionRegistry {
    functions: FxHashMap<String, Arc<dyn PathFunction>>,
}

impl FunctionRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            functions: FxHashMap::default(),
        }
    }

    /// Register a function; names are unique
    pub fn register<F: PathFunction + 'static>(&mut self, function: F) -> FunctionResult<()> {
        self.register_arc(Arc::new(function))
    }

    /// Register an already shared function
    pub fn register_arc(&mut self, function: Arc<dyn PathFunction>) -> FunctionResult<()> {
        let name = function.name().to_string();
        if self.functions.contains_key(&name) {
            return Err(FunctionError::Duplicate { name });
        }
        self.functions.insert(name, function);
        Ok(())
    }

    /// Get a function by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn PathFunction>> {
        self.functions.get(name).cloned()
    }

    /// Check if a function exists
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Get all registered function names
    pub fn function_names(&self) -> Vec<&str> {
        self.functions.keys().map(|s| s.as_str()).collect()
    }

    /// Get a function's signature by name
    pub fn signature(&self, name: &str) -> Option<&FunctionSignature> {
        self.functions.get(name).map(|f| f.signature())
    }

    /// Evaluator-facing entry point: look up the function, validate the
    /// arguments against its signature, and invoke it.
    pub fn dispatch(&self, name: &str, args: &[Value]) -> FunctionResult<Value> {
        let function = self
            .get(name)
            .ok_or_else(|| FunctionError::UnknownFunction {
                name: name.to_string(),
            })?;
        trace!("dispatching '{}' with {} argument(s)", name, args.len());
        function.validate_args(args)?;
        function.evaluate(args)
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::signature::ParameterInfo;
    use serde_json::json;

    struct EchoFunction;

    impl PathFunction for EchoFunction {
        fn name(&self) -> &str {
            "echo"
        }

        fn signature(&self) -> &FunctionSignature {
            static SIG: std::sync::LazyLock<FunctionSignature> =
                std::sync::LazyLock::new(|| {
                    FunctionSignature::new(
                        "echo",
                        vec![ParameterInfo::required("input", ValueType::Array)],
                        ValueType::Array,
                    )
                });
            &SIG
        }

        fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
            self.validate_args(args)?;
            Ok(args[0].clone())
        }
    }

    #[test]
    fn test_register_and_dispatch() {
        let mut registry = FunctionRegistry::new();
        registry.register(EchoFunction).unwrap();

        assert!(registry.contains("echo"));
        let result = registry.dispatch("echo", &[json!([1, 2])]).unwrap();
        assert_eq!(result, json!([1, 2]));
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry = FunctionRegistry::new();
        registry.register(EchoFunction).unwrap();

        let err = registry.register(EchoFunction).unwrap_err();
        assert_eq!(
            err,
            FunctionError::Duplicate {
                name: "echo".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_function() {
        let registry = FunctionRegistry::new();
        let err = registry.dispatch("missing", &[]).unwrap_err();
        assert_eq!(
            err,
            FunctionError::UnknownFunction {
                name: "missing".to_string()
            }
        );
    }

    #[test]
    fn test_arity_is_checked_before_invocation() {
        let mut registry = FunctionRegistry::new();
        registry.register(EchoFunction).unwrap();

        let err = registry.dispatch("echo", &[]).unwrap_err();
        assert!(matches!(err, FunctionError::InvalidArity { actual: 0, .. }));

        let err = registry
            .dispatch("echo", &[json!([]), json!([])])
            .unwrap_err();
        assert!(matches!(err, FunctionError::InvalidArity { actual: 2, .. }));
    }

    #[test]
    fn test_argument_types_are_checked_before_invocation() {
        let mut registry = FunctionRegistry::new();
        registry.register(EchoFunction).unwrap();

        let err = registry.dispatch("echo", &[json!("nope")]).unwrap_err();
        assert_eq!(
            err,
            FunctionError::InvalidArgumentType {
                name: "echo".to_string(),
                index: 0,
                expected: "array".to_string(),
                actual: "string".to_string(),
            }
        );
    }

    #[test]
    fn test_signature_lookup() {
        let mut registry = FunctionRegistry::new();
        registry.register(EchoFunction).unwrap();

        let sig = registry.signature("echo").unwrap();
        assert_eq!(sig.to_string(), "echo(input: array) -> array");
        assert!(registry.signature("missing").is_none());
    }
}
