//! Query plan tree engine.
//!
//! Turns the flat, index-linked node list of a query plan into a tree and
//! renders it as depth-indented rows:
//! - `tree`: arena-backed tree reconstruction
//! - `describe`: operator text and node classification
//! - `render`: tree drawing, rows and predicates
//! - `process`: id formatting and the predicate side-list

mod describe;
mod process;
mod render;
mod tree;
mod types;


pub use describe::is_predicate_link;
pub use process::{process_plan, ProcessedPlan, Row};
pub use render::{PlanRow, RenderStyle};
pub use tree::{Link, NodeId, PlanTree, TreeNode};
pub use types::{
    ChildLink, ExecutionStats, ExecutionSummary, PlanNode, QueryPlan, ShortRepresentation,
    StatValue,
};
