//! monty-sync CLI tool.
//!
//! Usage:
//! ```bash
//! monty-sync
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use monty_sync::{run_monty_sync, ProcessRunner, SyncConfig};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Synchronise third_party/full-monty with upstream and run verification gates
#[derive(Parser)]
#[command(name = "monty-sync")]
#[command(author, version, about, long_about = None)]
struct Cli {}

fn main() -> ExitCode {
    let _cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("warn"))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("monty-sync error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let repo_root = std::env::current_dir().context("unable to determine working directory")?;
    let config = SyncConfig::load(&repo_root)?;
    let mut runner = ProcessRunner::default();
    run_monty_sync(&mut runner, &config, &mut std::io::stdout().lock())?;
    Ok(())
}
