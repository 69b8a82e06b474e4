use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid mode: {0:?} (expected PLAN or PROFILE)")]
    InvalidMode(String),

    #[error("Malformed query plan: {0}")]
    MalformedPlan(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Plan error: {0}")]
    Plan(#[from] sqlsh_core::CoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CliResult<T> = Result<T, CliError>;

impl serde::Serialize for CliError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}
