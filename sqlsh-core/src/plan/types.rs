use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Query plan as described by the database: a flat list of nodes linked by index.
///
/// Field names follow the protobuf JSON mapping (`planNodes`, `childLinks`, ...);
/// snake_case names are accepted too and unknown fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryPlan {
    #[serde(default, alias = "plan_nodes", deserialize_with = "nullable")]
    pub plan_nodes: Vec<PlanNode>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanNode {
    /// Stable id assigned by the plan producer. Node 0 is the root.
    #[serde(default, deserialize_with = "integer")]
    pub index: i32,
    #[serde(default, alias = "display_name", deserialize_with = "nullable")]
    pub display_name: String,
    #[serde(default, alias = "child_links", deserialize_with = "nullable")]
    pub child_links: Vec<ChildLink>,
    #[serde(default, alias = "short_representation")]
    pub short_representation: Option<ShortRepresentation>,
    /// Operator attributes, scalar values only
    #[serde(default, deserialize_with = "nullable")]
    pub metadata: BTreeMap<String, Value>,
    #[serde(default, alias = "execution_stats")]
    pub execution_stats: Option<ExecutionStats>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildLink {
    #[serde(default, alias = "child_index", deserialize_with = "integer")]
    pub child_index: i32,
    /// Role of the child, e.g. "Input", "Scalar", "Split Range"; may be empty
    #[serde(default, rename = "type", deserialize_with = "nullable")]
    pub link_type: String,
    #[serde(default, deserialize_with = "nullable")]
    pub variable: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortRepresentation {
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
}

/// Execution statistics attached to a node when the query was profiled
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionStats {
    #[serde(default, deserialize_with = "nullable")]
    pub rows: StatValue,
    #[serde(default, deserialize_with = "nullable")]
    pub latency: StatValue,
    #[serde(default, alias = "executionSummary", deserialize_with = "nullable")]
    pub execution_summary: ExecutionSummary,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatValue {
    #[serde(default, deserialize_with = "scalar_string")]
    pub total: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub unit: String,
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.is_empty() {
            write!(f, "{}", self.total)
        } else {
            write!(f, "{} {}", self.total, self.unit)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionSummary {
    #[serde(default, alias = "numExecutions", deserialize_with = "scalar_string")]
    pub num_executions: String,
}

/// Render a scalar JSON value as plain text. Null is empty.
pub(crate) fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Treat an explicit `null` like a missing field
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(scalar_text).unwrap_or_default())
}

/// Integers may arrive as JSON numbers or as quoted strings
fn integer<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .ok_or_else(|| D::Error::custom(format!("invalid node index: {}", n))),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i32>()
            .map_err(|_| D::Error::custom(format!("invalid node index: {:?}", s))),
        Some(other) => Err(D::Error::custom(format!("invalid node index: {}", other))),
    }
}
