//! sqlsh core - text and tree processing behind the sqlsh command-line client.
//!
//! This crate has no I/O and no database dependencies. It provides the two
//! pieces of the client that do real work on their input:
//!
//! # Main Components
//!
//! - **Separator**: Splits a buffer of query text into statements, skipping
//!   quoted strings and comments and classifying each terminator
//! - **Plan**: Rebuilds a query plan tree from its flat node list and renders
//!   it as indented rows with predicates and execution statistics
//!
//! # Example
//!
//! ```rust
//! use sqlsh_core::{separate, Delimiter};
//!
//! let statements = separate("SELECT 1; SELECT 'a;b'\\G");
//! assert_eq!(statements.len(), 2);
//! assert_eq!(statements[1].text, "SELECT 'a;b'");
//! assert_eq!(statements[1].delimiter, Delimiter::Vertical);
//! ```

pub mod error;
pub mod plan;
pub mod separator;

// Re-export main types for convenience
pub use error::{CoreError, CoreResult};
pub use plan::{
    process_plan, ChildLink, ExecutionStats, PlanNode, PlanRow, PlanTree, ProcessedPlan,
    QueryPlan, RenderStyle, Row, ShortRepresentation,
};
pub use separator::{separate, Delimiter, Statement};
