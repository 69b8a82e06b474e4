//! Report rows for a whole query plan.

use serde::Serialize;

use super::render::RenderStyle;
use super::tree::PlanTree;
use super::types::{PlanNode, QueryPlan};
use crate::error::CoreResult;

/// A plan row ready for a table renderer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Row {
    /// Right-justified node id, prefixed by `*` when the row has predicates
    pub formatted_id: String,
    pub text: String,
    pub rows_total: String,
    pub executions: String,
    pub latency_total: String,
    pub predicates: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessedPlan {
    pub rows: Vec<Row>,
    /// Predicate lines, each group prefixed by the id of its row
    pub predicates: Vec<String>,
}

/// Build, render and format a query plan.
///
/// Statistics columns are left empty unless `with_stats` is set.
pub fn process_plan(
    plan: &QueryPlan,
    with_stats: bool,
    style: &RenderStyle,
) -> CoreResult<ProcessedPlan> {
    let id_width = max_visible_index(&plan.plan_nodes).to_string().len();
    let marked_width = id_width + 1;

    let tree = PlanTree::build(&plan.plan_nodes)?;
    let plan_rows = tree.render_rows(style)?;

    let mut processed = ProcessedPlan::default();
    for plan_row in plan_rows {
        let formatted_id = if plan_row.predicates.is_empty() {
            format!("{:>width$}", plan_row.id, width = marked_width)
        } else {
            format!("{:>width$}", format!("*{}", plan_row.id), width = marked_width)
        };

        for (i, predicate) in plan_row.predicates.iter().enumerate() {
            let prefix = if i == 0 {
                format!("{:>width$}:", plan_row.id, width = id_width)
            } else {
                " ".repeat(id_width + 1)
            };
            processed.predicates.push(format!("{} {}", prefix, predicate));
        }

        let (rows_total, executions, latency_total) = if with_stats {
            (plan_row.rows_total, plan_row.executions, plan_row.latency_total)
        } else {
            Default::default()
        };

        processed.rows.push(Row {
            formatted_id,
            text: plan_row.text,
            rows_total,
            executions,
            latency_total,
            predicates: plan_row.predicates,
        });
    }

    tracing::debug!(
        rows = processed.rows.len(),
        predicates = processed.predicates.len(),
        with_stats,
        "processed query plan"
    );
    Ok(processed)
}

/// Largest index among visible nodes, 0 when there is none
fn max_visible_index(plan_nodes: &[PlanNode]) -> i32 {
    plan_nodes
        .iter()
        .filter(|node| node.is_visible())
        .map(|node| node.index)
        .max()
        .unwrap_or(0)
}
