//! Configuration loading tests

mod common;

use common::config_dir;
use sqlsh::config::{load_dotenv, ENV_MODE};
use sqlsh::{Config, PlanMode, RenderStyle};
use tempfile::TempDir;

#[test]
fn test_load_without_file_gives_defaults() {
    let tmp_dir = TempDir::new().unwrap();
    let config = Config::load(tmp_dir.path()).unwrap();
    assert_eq!(config.style, RenderStyle::ascii());
}

#[test]
fn test_load_reads_style() {
    let tmp_dir = config_dir(
        r#"
[style]
mid = "|-"
indent = 3
"#,
    );
    let config = Config::load(tmp_dir.path()).unwrap();
    assert_eq!(config.style.mid, "|-");
    assert_eq!(config.style.end, "+-");
    assert_eq!(config.style.indent, 3);
}

#[test]
fn test_load_rejects_bad_toml() {
    let tmp_dir = config_dir("mode = ");
    assert!(Config::load(tmp_dir.path()).is_err());
}

#[test]
fn test_env_overrides_file_mode() {
    let tmp_dir = config_dir("mode = \"plan\"\n");
    std::fs::write(tmp_dir.path().join(".env"), format!("{}=profile\n", ENV_MODE)).unwrap();

    load_dotenv(tmp_dir.path());
    let config = Config::load(tmp_dir.path()).unwrap();
    assert_eq!(config.mode, PlanMode::Profile);
}
