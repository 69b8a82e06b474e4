//! Error types for sqlsh-core.

use thiserror::Error;

/// Plan engine error type
///
/// The separator never fails; every variant here comes from building or
/// rendering a plan tree.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Malformed tree line: {0:?}")]
    MalformedTreeLine(String),

    #[error("Plan has no root node (index 0)")]
    MissingRoot,

    #[error("Plan node {parent} links to missing child {child}")]
    DanglingChildLink { parent: i32, child: i32 },

    #[error("Tree payload error: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Result type for plan operations
pub type CoreResult<T> = Result<T, CoreError>;

impl serde::Serialize for CoreError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}
