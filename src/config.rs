//! Configuration handling for the sqlsh tools
//!
//! Settings come from an optional `sqlsh.toml` file in the working directory.
//!
//! ## Environment Variables
//!
//! - `SQLSH_MODE` - Default plan mode (`PLAN` or `PROFILE`)
//! - `RUST_LOG` - Log filter
//!
//! These can be set in a `.env` file next to the configuration file.

use serde::{Deserialize, Serialize};
use sqlsh_core::RenderStyle;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{CliError, CliResult};

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "sqlsh.toml";

/// Environment variable names
pub const ENV_MODE: &str = "SQLSH_MODE";

/// How much of a query plan to show
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum PlanMode {
    /// Plan tree only
    #[default]
    Plan,
    /// Plan tree with execution statistics
    Profile,
}

impl PlanMode {
    pub fn with_stats(self) -> bool {
        matches!(self, PlanMode::Profile)
    }
}

impl FromStr for PlanMode {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "" | "PLAN" => Ok(PlanMode::Plan),
            "PROFILE" => Ok(PlanMode::Profile),
            _ => Err(CliError::InvalidMode(s.to_string())),
        }
    }
}

impl TryFrom<String> for PlanMode {
    type Error = CliError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for PlanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanMode::Plan => write!(f, "PLAN"),
            PlanMode::Profile => write!(f, "PROFILE"),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Mode used when none is given on the command line
    #[serde(default)]
    pub mode: PlanMode,
    /// Tree drawing glyphs
    #[serde(default)]
    pub style: RenderStyle,
}

/// Load a `.env` file from `dir` if present. Errors are ignored.
pub fn load_dotenv(dir: &Path) {
    let env_path = dir.join(".env");
    if env_path.exists() {
        let _ = dotenvy::from_path(&env_path);
    }
}

impl Config {
    /// Load configuration from a directory
    ///
    /// A missing configuration file gives the defaults. Environment variable
    /// overrides are applied on top.
    pub fn load(dir: &Path) -> CliResult<Self> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            tracing::debug!(path = %config_path.display(), "loaded configuration file");
            Self::from_toml(&content)?
        } else {
            Self::default()
        };

        config.apply_mode_override(std::env::var(ENV_MODE).ok())?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> CliResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Override the mode with an environment value. Empty values are ignored.
    fn apply_mode_override(&mut self, value: Option<String>) -> CliResult<()> {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            self.mode = value.parse()?;
        }
        Ok(())
    }
}
