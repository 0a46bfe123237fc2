//! Data model for function arguments and results
//!
//! Functions operate on plain `serde_json::Value` trees; this module holds
//! the kind tags used by signature validation and the value-equality keys
//! used by deduplication and grouping.

pub mod key;
pub mod types;

pub use key::ValueKey;
pub use types::ValueType;
