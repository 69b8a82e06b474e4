//! Plan report output: a table of plan rows followed by the predicate list.

use sqlsh_core::{process_plan, QueryPlan, RenderStyle, Row};
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::config::PlanMode;
use crate::error::CliResult;

pub const PLAN_COLUMNS: [&str; 2] = ["ID", "Query_Execution_Plan (EXPERIMENTAL)"];
pub const PROFILE_COLUMNS: [&str; 5] = [
    "ID",
    "Query_Execution_Plan",
    "Rows_Returned",
    "Executions",
    "Total_Latency",
];

pub const PREDICATES_HEADER: &str = "Predicates(identified by ID):";

fn cells(row: &Row, mode: PlanMode) -> Vec<String> {
    match mode {
        PlanMode::Plan => vec![row.formatted_id.clone(), row.text.clone()],
        PlanMode::Profile => vec![
            row.formatted_id.clone(),
            row.text.clone(),
            row.rows_total.clone(),
            row.executions.clone(),
            row.latency_total.clone(),
        ],
    }
}

/// Format plan rows as a table. Empty when there are no rows.
pub fn format_table(rows: &[Row], mode: PlanMode) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let header: &[&str] = match mode {
        PlanMode::Plan => &PLAN_COLUMNS,
        PlanMode::Profile => &PROFILE_COLUMNS,
    };

    let mut builder = Builder::default();
    builder.push_record(header.iter().map(|column| column.to_string()));
    for row in rows {
        builder.push_record(cells(row, mode));
    }

    let mut table = builder.build();
    table.with(Style::psql());
    format!("{}\n", table)
}

/// Format the predicate block. Empty when there are no predicates.
pub fn format_predicates(predicates: &[String]) -> String {
    if predicates.is_empty() {
        return String::new();
    }

    let mut output = String::new();
    output.push_str(PREDICATES_HEADER);
    output.push('\n');
    for predicate in predicates {
        output.push(' ');
        output.push_str(predicate);
        output.push('\n');
    }
    output.push('\n');
    output
}

/// Parse a JSON plan description and render the full report.
pub fn render_plan_report(input: &str, mode: PlanMode, style: &RenderStyle) -> CliResult<String> {
    let plan: QueryPlan = serde_json::from_str(input)?;
    let processed = process_plan(&plan, mode.with_stats(), style)?;
    tracing::debug!(
        %mode,
        rows = processed.rows.len(),
        predicates = processed.predicates.len(),
        "rendering plan report"
    );

    let mut output = format_table(&processed.rows, mode);
    output.push_str(&format_predicates(&processed.predicates));
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, text: &str) -> Row {
        Row {
            formatted_id: id.to_string(),
            text: text.to_string(),
            rows_total: "10".to_string(),
            executions: "1".to_string(),
            latency_total: "0.5 msecs".to_string(),
            predicates: Vec::new(),
        }
    }

    #[test]
    fn test_format_table_empty() {
        assert_eq!(format_table(&[], PlanMode::Plan), "");
        assert_eq!(format_table(&[], PlanMode::Profile), "");
    }

    #[test]
    fn test_format_table_plan_columns() {
        let table = format_table(&[row(" 0", "Scan")], PlanMode::Plan);
        assert!(table.contains("Query_Execution_Plan (EXPERIMENTAL)"));
        assert!(table.contains("Scan"));
        assert!(!table.contains("Rows_Returned"));
        assert!(!table.contains("0.5 msecs"));
    }

    #[test]
    fn test_format_table_profile_columns() {
        let table = format_table(&[row(" 0", "Scan")], PlanMode::Profile);
        for column in PROFILE_COLUMNS {
            assert!(table.contains(column), "missing {column}");
        }
        assert!(table.contains("0.5 msecs"));
    }

    #[test]
    fn test_format_predicates() {
        assert_eq!(format_predicates(&[]), "");
        assert_eq!(
            format_predicates(&["1: Condition: ($x > 1)".to_string()]),
            "Predicates(identified by ID):\n 1: Condition: ($x > 1)\n\n"
        );
    }
}
