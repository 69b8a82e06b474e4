pub mod config;
pub mod error;
pub mod logging;
pub mod report;

pub use config::{Config, PlanMode};
pub use error::{CliError, CliResult};
pub use report::{format_predicates, format_table, render_plan_report};
pub use sqlsh_core::{separate, Delimiter, QueryPlan, RenderStyle, Statement};
