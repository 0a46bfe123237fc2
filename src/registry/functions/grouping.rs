//! group_by() and its select variants

use std::sync::Arc;

use indexmap::IndexMap;
use log::debug;
use serde_json::{Map, Value};

use super::{expect_array, expect_count, expect_string, sample_members};
use crate::model::{ValueKey, ValueType};
use crate::random::{RandomSource, ThreadRandom};
use crate::registry::function::{FunctionError, FunctionResult, PathFunction};
use crate::registry::signature::{FunctionSignature, ParameterInfo};

/// Partition array elements into groups keyed by the value of `key`.
///
/// Elements that are not objects, or objects without `key`, contribute to no
/// group. Within each group the input order is preserved; groups themselves
/// are in first-insertion order. Scalar key values are rendered to their JSON
/// literal text (strings verbatim); array- or object-valued keys are rejected.
fn group_elements(
    name: &str,
    items: &[Value],
    key: &str,
) -> FunctionResult<IndexMap<String, Vec<Value>>> {
    let mut groups: IndexMap<String, Vec<Value>> = IndexMap::new();
    for item in items {
        let Some(field) = item.as_object().and_then(|obj| obj.get(key)) else {
            debug!("group_by: dropping element without key '{key}'");
            continue;
        };
        let group_key =
            ValueKey::try_from_value(field).map_err(|kind| FunctionError::UnhashableElement {
                name: name.to_string(),
                kind: kind.to_string(),
            })?;
        groups
            .entry(group_key.to_string())
            .or_default()
            .push(item.clone());
    }
    Ok(groups)
}

fn grouping_signature(
    name: &'static str,
    with_count: bool,
    return_type: ValueType,
) -> FunctionSignature {
    let mut parameters = vec![
        ParameterInfo::required("array", ValueType::Array),
        ParameterInfo::required("key", ValueType::String),
    ];
    if with_count {
        parameters.push(ParameterInfo::required("count", ValueType::Number));
    }
    FunctionSignature::new(name, parameters, return_type)
}

/// group_by() function - partition an array of objects by a field value
///
/// Elements lacking the field contribute to no group and are absent from all
/// grouped-select results. Each skip is logged at debug level; it never turns
/// into an evaluation error.
pub struct GroupByFunction;

impl PathFunction for GroupByFunction {
    fn name(&self) -> &str {
        "group_by"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> =
            std::sync::LazyLock::new(|| grouping_signature("group_by", false, ValueType::Object));
        &SIG
    }
    fn documentation(&self) -> &str {
        "Partitions an array of objects into an object of groups keyed by the value of the \
         given field. Elements without the field are skipped."
    }
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        let items = expect_array(self.name(), 0, &args[0])?;
        let key = expect_string(self.name(), 1, &args[1])?;

        let groups = group_elements(self.name(), items, key)?;
        let mut object = Map::with_capacity(groups.len());
        for (group_key, members) in groups {
            object.insert(group_key, Value::Array(members));
        }
        Ok(Value::Object(object))
    }
}

/// group_by_select_first() function - first element of each group
pub struct GroupBySelectFirstFunction;

impl PathFunction for GroupBySelectFirstFunction {
    fn name(&self) -> &str {
        "group_by_select_first"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> =
            std::sync::LazyLock::new(|| {
                grouping_signature("group_by_select_first", false, ValueType::Array)
            });
        &SIG
    }
    fn documentation(&self) -> &str {
        "Groups like group_by(), then returns the first element of each group, in group order. \
         Deterministic for identical input."
    }
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        let items = expect_array(self.name(), 0, &args[0])?;
        let key = expect_string(self.name(), 1, &args[1])?;

        let groups = group_elements(self.name(), items, key)?;
        let mut selected = Vec::with_capacity(groups.len());
        for members in groups.values() {
            if let Some(first) = members.first() {
                selected.push(first.clone());
            }
        }
        Ok(Value::Array(selected))
    }
}

/// group_by_select_one() function - one random element per group
pub struct GroupBySelectOneFunction {
    random: Arc<dyn RandomSource>,
}

impl GroupBySelectOneFunction {
    /// Create the function with an injected random source
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }
}

impl Default for GroupBySelectOneFunction {
    fn default() -> Self {
        Self::new(Arc::new(ThreadRandom))
    }
}

impl PathFunction for GroupBySelectOneFunction {
    fn name(&self) -> &str {
        "group_by_select_one"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> =
            std::sync::LazyLock::new(|| {
                grouping_signature("group_by_select_one", false, ValueType::Array)
            });
        &SIG
    }
    fn documentation(&self) -> &str {
        "Groups like group_by(), then returns a uniformly-random element of each group, in \
         group order."
    }
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        let items = expect_array(self.name(), 0, &args[0])?;
        let key = expect_string(self.name(), 1, &args[1])?;

        let groups = group_elements(self.name(), items, key)?;
        let mut selected = Vec::with_capacity(groups.len());
        for members in groups.values() {
            // Groups are non-empty by construction.
            selected.push(members[self.random.pick_index(members.len())].clone());
        }
        Ok(Value::Array(selected))
    }
}

/// group_by_select_some() function - a bounded random sample per group
///
/// The per-group clamp matches some_of(): each group yields
/// min(count, group length) elements. The result keeps one array per group so
/// a downstream projection stage can flatten when desired.
pub struct GroupBySelectSomeFunction {
    random: Arc<dyn RandomSource>,
}

impl GroupBySelectSomeFunction {
    /// Create the function with an injected random source
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }
}

impl Default for GroupBySelectSomeFunction {
    fn default() -> Self {
        Self::new(Arc::new(ThreadRandom))
    }
}

impl PathFunction for GroupBySelectSomeFunction {
    fn name(&self) -> &str {
        "group_by_select_some"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> =
            std::sync::LazyLock::new(|| {
                grouping_signature("group_by_select_some", true, ValueType::Array)
            });
        &SIG
    }
    fn documentation(&self) -> &str {
        "Groups like group_by(), then samples up to count elements of each group without \
         replacement, returning one array per group, in group order."
    }
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        let items = expect_array(self.name(), 0, &args[0])?;
        let key = expect_string(self.name(), 1, &args[1])?;
        let count = expect_count(self.name(), 2, &args[2])?;

        let groups = group_elements(self.name(), items, key)?;
        let mut selected = Vec::with_capacity(groups.len());
        for members in groups.values() {
            selected.push(Value::Array(sample_members(
                self.random.as_ref(),
                members,
                count,
            )));
        }
        Ok(Value::Array(selected))
    }
}
