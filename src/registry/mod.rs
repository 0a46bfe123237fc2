//! Function registry for custom path query functions
//!
//! The registry is the single point of truth mapping a function name to its
//! signature and implementation. A host evaluator resolves a call node,
//! evaluates the argument sub-expressions to JSON values, and hands name and
//! arguments to [`FunctionRegistry::dispatch`], which validates arity and
//! argument kinds before invoking the implementation.

pub mod function;
pub mod functions;
pub mod signature;

pub use function::{FunctionError, FunctionRegistry, FunctionResult, PathFunction};
pub use signature::{FunctionSignature, ParameterInfo};
