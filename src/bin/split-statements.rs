use anyhow::Context;
use clap::Parser;
use sqlsh::{logging, separate};
use std::io::{self, Read, Write};

#[derive(Parser, Debug)]
#[command(name = "split-statements")]
#[command(about = "Split SQL read from stdin into statements, one JSON object per line", long_about = None)]
struct Args {
    /// Pretty-print each statement instead of one per line
    #[arg(long)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init();

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read statements from stdin")?;

    let statements = separate(&input);
    tracing::debug!(count = statements.len(), "separated statements");

    let mut stdout = io::stdout().lock();
    for statement in &statements {
        let line = if args.pretty {
            serde_json::to_string_pretty(statement)?
        } else {
            serde_json::to_string(statement)?
        };
        writeln!(stdout, "{}", line)?;
    }
    stdout.flush()?;
    Ok(())
}
