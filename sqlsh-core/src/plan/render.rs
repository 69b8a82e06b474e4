//! Plan tree rendering.
//!
//! Visible nodes are drawn as a text tree, one line per node, where each line
//! is `<branch prefix>\t<payload>`. Every line is then split back into its
//! branch prefix and payload to produce a row.

use serde::{Deserialize, Serialize};

use super::describe::is_predicate_link;
use super::tree::{NodeId, PlanTree};
use super::types::PlanNode;
use crate::error::{CoreError, CoreResult};

/// Glyphs used to draw the tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    /// Vertical link under a node that has more children to come
    pub link: String,
    /// Marker for a child that is not the last one
    pub mid: String,
    /// Marker for the last child
    pub end: String,
    /// Spaces after a link glyph
    pub indent: usize,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self::ascii()
    }
}

impl RenderStyle {
    /// Plain ASCII glyphs: `|` and `+-` with an indent of 2
    pub fn ascii() -> Self {
        Self {
            link: "|".to_string(),
            mid: "+-".to_string(),
            end: "+-".to_string(),
            indent: 2,
        }
    }
}

/// One rendered plan row, in tree pre-order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlanRow {
    pub id: i32,
    /// Branch prefix, optional `[link type]` and operator text
    pub text: String,
    pub rows_total: String,
    pub executions: String,
    pub latency_total: String,
    pub predicates: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct LinePayload {
    id: i32,
    link_type: String,
}

#[derive(Debug, Default)]
struct TextTree {
    value: String,
    children: Vec<TextTree>,
}

impl TextTree {
    fn new(value: String) -> Self {
        Self {
            value,
            children: Vec::new(),
        }
    }

    fn draw(&self, style: &RenderStyle) -> String {
        let mut out = String::new();
        out.push_str(&self.value);
        out.push('\n');
        let mut ended = Vec::new();
        draw_children(&mut out, style, &mut ended, &self.children);
        out
    }
}

/// `ended[i]` tells whether the ancestor at depth `i` was the last of its siblings
fn draw_children(
    out: &mut String,
    style: &RenderStyle,
    ended: &mut Vec<bool>,
    children: &[TextTree],
) {
    for (i, child) in children.iter().enumerate() {
        let last = i + 1 == children.len();

        for &ancestor_ended in ended.iter() {
            if ancestor_ended {
                out.push_str(&" ".repeat(style.indent + 1));
            } else {
                out.push_str(&style.link);
                out.push_str(&" ".repeat(style.indent));
            }
        }
        out.push_str(if last { &style.end } else { &style.mid });
        out.push(' ');
        out.push_str(&child.value);
        out.push('\n');

        if !child.children.is_empty() {
            ended.push(last);
            draw_children(out, style, ended, &child.children);
            ended.pop();
        }
    }
}

impl<'p> PlanTree<'p> {
    /// Render visible nodes as rows in pre-order.
    ///
    /// Returns no rows when the plan is empty or its root is invisible.
    pub fn render_rows(&self, style: &RenderStyle) -> CoreResult<Vec<PlanRow>> {
        let text_tree = match self.root() {
            Some(_) => self.text_tree(Self::ROOT, "")?,
            None => None,
        };
        let Some(text_tree) = text_tree else {
            return Ok(Vec::new());
        };

        let drawn = text_tree.draw(style);
        let mut rows = Vec::new();
        for line in drawn.lines().filter(|line| !line.is_empty()) {
            rows.push(self.decode_line(line)?);
        }

        tracing::debug!(rows = rows.len(), "rendered plan rows");
        Ok(rows)
    }

    fn text_tree(&self, id: NodeId, link_type: &str) -> CoreResult<Option<TextTree>> {
        let node = self.node(id);
        if !node.is_visible() {
            return Ok(None);
        }

        let payload = serde_json::to_string(&LinePayload {
            id: node.plan_node.index,
            link_type: link_type.to_string(),
        })?;
        let mut tree = TextTree::new(format!("\t{}", payload));

        // Serialize Result repeats scalar subqueries as extra children; keep the
        // first child and the Scalar ones only.
        let serialize_result = node.plan_node.display_name == "Serialize Result";
        for (i, link) in node.children.iter().enumerate() {
            if serialize_result && !(i == 0 || link.link_type == "Scalar") {
                continue;
            }
            if let Some(child) = self.text_tree(link.child, &link.link_type)? {
                tree.children.push(child);
            }
        }

        Ok(Some(tree))
    }

    fn decode_line(&self, line: &str) -> CoreResult<PlanRow> {
        let malformed = || CoreError::MalformedTreeLine(line.to_string());

        let (branch, payload) = line.split_once('\t').ok_or_else(malformed)?;
        let payload: LinePayload = serde_json::from_str(payload).map_err(|_| malformed())?;
        let plan_node = self.lookup(payload.id).ok_or_else(malformed)?;

        let operator = plan_node.operator_text();
        let text = if payload.link_type.is_empty() {
            operator
        } else {
            format!("[{}] {}", payload.link_type, operator)
        };

        let stats = plan_node.execution_stats.clone().unwrap_or_default();
        Ok(PlanRow {
            id: payload.id,
            text: format!("{}{}", branch, text),
            rows_total: stats.rows.total,
            executions: stats.execution_summary.num_executions,
            latency_total: stats.latency.to_string(),
            predicates: self.predicates(plan_node),
        })
    }

    /// Predicates read from the node's own child links, not the pruned tree
    pub fn predicates(&self, plan_node: &PlanNode) -> Vec<String> {
        plan_node
            .child_links
            .iter()
            .filter_map(|child_link| {
                let target = self.lookup(child_link.child_index)?;
                is_predicate_link(&child_link.link_type, target).then(|| {
                    format!("{}: {}", child_link.link_type, target.short_description())
                })
            })
            .collect()
    }
}
