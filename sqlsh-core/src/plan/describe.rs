//! Operator descriptions and node classification.

use super::types::{scalar_text, PlanNode};

/// Scalar bookkeeping operators that never get a row of their own
const INVISIBLE_OPERATORS: [&str; 5] = [
    "Function",
    "Reference",
    "Constant",
    "Array Constructor",
    "Parameter",
];

/// Metadata keys shown in the operator title or meaningless on their own
const TITLE_KEYS: [&str; 4] = [
    "call_type",
    "iterator_type",
    "scan_target",
    "subquery_cluster_node",
];

impl PlanNode {
    pub fn is_visible(&self) -> bool {
        !INVISIBLE_OPERATORS.contains(&self.display_name.as_str())
    }

    pub fn is_root(&self) -> bool {
        self.index == 0
    }

    /// Metadata value as text, empty when absent
    pub fn metadata_text(&self, key: &str) -> String {
        self.metadata.get(key).map(scalar_text).unwrap_or_default()
    }

    pub fn short_description(&self) -> &str {
        self.short_representation
            .as_ref()
            .map(|repr| repr.description.as_str())
            .unwrap_or_default()
    }

    /// Operator text, e.g. `Distributed Union (split_ranges_aligned: false)`
    /// or `Table Scan (Full scan: true, Table: Singers)`.
    pub fn operator_text(&self) -> String {
        let scan_type = self.metadata_text("scan_type");
        let scan_type = scan_type.strip_suffix("Scan").unwrap_or(&scan_type);

        let title = [
            self.metadata_text("call_type").as_str(),
            self.metadata_text("iterator_type").as_str(),
            scan_type,
            self.display_name.as_str(),
        ]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

        let mut fields: Vec<String> = self
            .metadata
            .iter()
            .filter(|(key, _)| !TITLE_KEYS.contains(&key.as_str()))
            .map(|(key, value)| {
                if key == "scan_type" {
                    format!("{}: {}", scan_type, self.metadata_text("scan_target"))
                } else {
                    format!("{}: {}", key, scalar_text(value))
                }
            })
            .collect();
        fields.sort();

        if fields.is_empty() {
            title
        } else {
            format!("{} ({})", title, fields.join(", "))
        }
    }
}

/// A child link is a predicate when it points at a `Function` through a
/// condition-like edge. Aggregates are functions too but hang off other edges.
pub fn is_predicate_link(link_type: &str, target: &PlanNode) -> bool {
    target.display_name == "Function"
        && (link_type.ends_with("Condition") || link_type == "Split Range")
}
