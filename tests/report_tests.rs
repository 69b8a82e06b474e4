//! Plan report tests
//!
//! Render JSON plans end to end: table rows, predicate block and modes.

mod common;

use common::{profiled_scan_plan, singers_plan, to_input};
use serde_json::json;
use sqlsh::{render_plan_report, CliError, PlanMode, RenderStyle};
use sqlsh_core::CoreError;

fn report(plan: &serde_json::Value, mode: PlanMode) -> String {
    render_plan_report(&to_input(plan), mode, &RenderStyle::default()).unwrap()
}

#[test]
fn test_plan_report_contains_tree() {
    let output = report(&singers_plan(), PlanMode::Plan);

    assert!(output.contains("Query_Execution_Plan (EXPERIMENTAL)"));
    for text in [
        "Distributed Union",
        "+- Cross Apply",
        "   +- [Input] Filter Scan",
        "   |  +- Index Scan (Index: SingersByName)",
        "   +- [Map] Filter",
        "      +- Table Scan (Table: Albums)",
    ] {
        assert!(output.contains(text), "missing {text:?} in\n{output}");
    }
    assert!(!output.contains("Rows_Returned"));
    assert!(!output.contains("Function"));
}

#[test]
fn test_plan_report_orders_rows_in_preorder() {
    let output = report(&singers_plan(), PlanMode::Plan);
    let positions: Vec<usize> = [
        "Distributed Union",
        "Cross Apply",
        "Filter Scan",
        "Index Scan",
        "[Map] Filter",
        "Table Scan",
    ]
    .iter()
    .map(|text| output.find(text).unwrap())
    .collect();

    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn test_plan_report_predicate_block() {
    let output = report(&singers_plan(), PlanMode::Plan);

    let expected = concat!(
        "Predicates(identified by ID):\n",
        " 0: Split Range: true\n",
        " 2: Seek Condition: ($FirstName = 'Ann')\n",
        "    Residual Condition: ($LastName = 'Smith')\n",
        " 4: Condition: ($SingerId > 10)\n",
        "\n",
    );
    assert!(output.ends_with(expected), "unexpected tail in\n{output}");
    assert!(output.contains("*0"));
    assert!(output.contains("*2"));
    assert!(output.contains("*4"));
}

#[test]
fn test_profile_report_has_stats() {
    let output = report(&profiled_scan_plan(), PlanMode::Profile);

    for column in ["Rows_Returned", "Executions", "Total_Latency"] {
        assert!(output.contains(column), "missing {column}");
    }
    assert!(output.contains("Table Scan (Table: Songs)"));
    assert!(output.contains("42"));
    assert!(output.contains("0.35 msecs"));
    assert!(!output.contains("Predicates(identified by ID):"));
}

#[test]
fn test_plan_mode_hides_stats() {
    let output = report(&profiled_scan_plan(), PlanMode::Plan);
    assert!(!output.contains("42"));
    assert!(!output.contains("msecs"));
}

#[test]
fn test_empty_plan_renders_nothing() {
    assert_eq!(report(&json!({"planNodes": []}), PlanMode::Plan), "");
    assert_eq!(report(&json!({}), PlanMode::Profile), "");
    assert_eq!(report(&json!({"planNodes": null}), PlanMode::Plan), "");
}

#[test]
fn test_invisible_root_renders_nothing() {
    let plan = json!({"planNodes": [
        {"index": 0, "displayName": "Function", "childLinks": [{"childIndex": 1}]},
        {"index": 1, "displayName": "Scan"}
    ]});
    assert_eq!(report(&plan, PlanMode::Plan), "");
}

#[test]
fn test_custom_style() {
    let style = RenderStyle {
        link: "│".to_string(),
        mid: "├─".to_string(),
        end: "└─".to_string(),
        indent: 1,
    };
    let output = render_plan_report(&to_input(&singers_plan()), PlanMode::Plan, &style).unwrap();
    assert!(output.contains("└─ Cross Apply"));
    assert!(output.contains("  ├─ [Input] Filter Scan"));
    assert!(output.contains("  │ └─ Index Scan (Index: SingersByName)"));
}

#[test]
fn test_malformed_json_is_error() {
    let result = render_plan_report("{not json", PlanMode::Plan, &RenderStyle::default());
    assert!(matches!(result, Err(CliError::MalformedPlan(_))));
}

#[test]
fn test_missing_root_is_error() {
    let plan = json!({"planNodes": [{"index": 3, "displayName": "Scan"}]});
    let result = render_plan_report(&to_input(&plan), PlanMode::Plan, &RenderStyle::default());
    assert!(matches!(result, Err(CliError::Plan(CoreError::MissingRoot))));
}

#[test]
fn test_dangling_child_is_error() {
    let plan = json!({"planNodes": [
        {"index": 0, "displayName": "Filter", "childLinks": [{"childIndex": 5}]}
    ]});
    let result = render_plan_report(&to_input(&plan), PlanMode::Plan, &RenderStyle::default());
    assert!(matches!(
        result,
        Err(CliError::Plan(CoreError::DanglingChildLink { parent: 0, child: 5 }))
    ));
}
