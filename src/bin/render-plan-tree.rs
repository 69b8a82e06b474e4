use anyhow::Context;
use clap::Parser;
use sqlsh::{config, logging, render_plan_report, Config, PlanMode};
use std::io::{self, Read, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "render-plan-tree")]
#[command(about = "Render a JSON query plan read from stdin as an ASCII tree table", long_about = None)]
struct Args {
    /// PLAN or PROFILE (defaults to SQLSH_MODE, then sqlsh.toml, then PLAN)
    #[arg(short, long)]
    mode: Option<PlanMode>,

    /// Directory holding sqlsh.toml and .env
    #[arg(long, default_value = ".")]
    config_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    config::load_dotenv(&args.config_dir);
    logging::init();

    let config = Config::load(&args.config_dir).context("Failed to load configuration")?;
    let mode = args.mode.unwrap_or(config.mode);
    tracing::debug!(%mode, "rendering plan from stdin");

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read plan from stdin")?;

    let report = render_plan_report(&input, mode, &config.style)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(report.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
