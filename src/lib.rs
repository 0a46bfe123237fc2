//! Randomized selection, deduplication and grouping functions for JSON path
//! query evaluators.
//!
//! This crate augments a host path query engine (JMESPath-style) with a fixed
//! set of custom functions over array-typed query results: `one_of`,
//! `some_of`, `unique`, `group_by`, `group_by_select_first`,
//! `group_by_select_one` and `group_by_select_some`. The host engine owns
//! expression parsing, filters, projections and pipes; this crate owns the
//! function registry contract and the algorithms behind the functions.
//!
//! ```
//! use jsonpick::create_standard_registry;
//! use serde_json::json;
//!
//! let registry = create_standard_registry();
//!
//! let picked = registry
//!     .dispatch("one_of", &[json!(["a", "b", "c"])])
//!     .unwrap();
//! assert!(["a", "b", "c"].iter().any(|s| picked == *s));
//!
//! let groups = registry
//!     .dispatch(
//!         "group_by",
//!         &[json!([{"model": "A"}, {"model": "B"}, {"model": "A"}]), json!("model")],
//!     )
//!     .unwrap();
//! assert_eq!(groups["A"].as_array().unwrap().len(), 2);
//! ```
//!
//! Randomness is an injected capability: pass a [`SeededRandom`] to
//! [`create_standard_registry_with_random`] for reproducible selection.

#![warn(missing_docs)]

pub mod model;
pub mod random;
pub mod registry;

pub use model::{ValueKey, ValueType};
pub use random::{RandomSource, SeededRandom, ThreadRandom};
pub use registry::function::{FunctionError, FunctionRegistry, FunctionResult, PathFunction};
pub use registry::functions::register_builtin_functions;
pub use registry::signature::{FunctionSignature, ParameterInfo};

use std::sync::Arc;

/// Create a registry with all built-in functions, drawing randomness from the
/// thread-local generator.
pub fn create_standard_registry() -> FunctionRegistry {
    create_standard_registry_with_random(Arc::new(ThreadRandom))
}

/// Create a registry with all built-in functions, drawing randomness from the
/// given source.
pub fn create_standard_registry_with_random(random: Arc<dyn RandomSource>) -> FunctionRegistry {
    let mut registry = FunctionRegistry::new();
    register_builtin_functions(&mut registry, random)
        .expect("built-in function names are distinct");
    registry
}
