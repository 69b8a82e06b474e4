//! Common test utilities for report and configuration tests
//!
//! Provides plan fixtures in the JSON wire format and scratch config directories.

#![allow(dead_code)]

use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

/// Distributed union over a cross apply, with predicates on three nodes
pub fn singers_plan() -> Value {
    json!({"planNodes": [
        {"index": 0, "kind": "RELATIONAL", "displayName": "Distributed Union",
         "childLinks": [{"childIndex": 1}, {"childIndex": 6, "type": "Split Range"}],
         "metadata": {"subquery_cluster_node": "1"},
         "executionStats": {"rows": {"total": "3", "unit": "rows"},
                            "latency": {"total": "1.2", "unit": "msecs"},
                            "execution_summary": {"num_executions": "1"}}},
        {"index": 1, "displayName": "Cross Apply",
         "childLinks": [{"childIndex": 2}, {"childIndex": 4, "type": "Map"}]},
        {"index": 2, "displayName": "Filter Scan",
         "childLinks": [
            {"childIndex": 8},
            {"childIndex": 9, "type": "Seek Condition"},
            {"childIndex": 3, "type": "Residual Condition"}]},
        {"index": 3, "kind": "SCALAR", "displayName": "Function",
         "shortRepresentation": {"description": "($LastName = 'Smith')"}},
        {"index": 4, "displayName": "Filter",
         "childLinks": [{"childIndex": 7}, {"childIndex": 5, "type": "Condition"}]},
        {"index": 5, "displayName": "Function",
         "shortRepresentation": {"description": "($SingerId > 10)"}},
        {"index": 6, "displayName": "Function",
         "shortRepresentation": {"description": "true"}},
        {"index": 7, "displayName": "Scan",
         "metadata": {"scan_type": "TableScan", "scan_target": "Albums"}},
        {"index": 8, "displayName": "Scan",
         "metadata": {"scan_type": "IndexScan", "scan_target": "SingersByName"}},
        {"index": 9, "displayName": "Function",
         "shortRepresentation": {"description": "($FirstName = 'Ann')"}}
    ]})
}

/// Single table scan with execution statistics, in snake_case field names
pub fn profiled_scan_plan() -> Value {
    json!({"plan_nodes": [
        {"index": 0, "display_name": "Scan",
         "metadata": {"scan_type": "TableScan", "scan_target": "Songs"},
         "execution_stats": {"rows": {"total": "42", "unit": "rows"},
                             "latency": {"total": "0.35", "unit": "msecs"},
                             "execution_summary": {"num_executions": "2"}}}
    ]})
}

pub fn to_input(plan: &Value) -> String {
    serde_json::to_string(plan).expect("Failed to serialize fixture")
}

/// Temp directory holding `sqlsh.toml` with the given content
pub fn config_dir(content: &str) -> TempDir {
    let tmp_dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(tmp_dir.path().join("sqlsh.toml"), content).expect("Failed to write config");
    tmp_dir
}
