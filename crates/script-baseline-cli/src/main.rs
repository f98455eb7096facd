//! verify-script-baseline CLI tool.
//!
//! Usage:
//! ```bash
//! verify-script-baseline [PATHS]... [--root <DIR>]
//! verify-script-baseline --list-rules
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;

/// Validate roadmap script baseline contracts.
#[derive(Parser)]
#[command(name = "verify-script-baseline")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Optional script paths to validate. Defaults to all roadmap scripts.
    paths: Vec<PathBuf>,

    /// Scripts root directory
    #[arg(long, default_value = "scripts")]
    root: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// List available rules and exit
    #[arg(long)]
    list_rules: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Output format for baseline reports.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report.
    #[default]
    Text,
    /// JSON output.
    Json,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut stdout = std::io::stdout().lock();

    if cli.list_rules {
        commands::list_rules::run(&mut stdout)?;
        return Ok(ExitCode::SUCCESS);
    }

    let code = commands::check::run(&cli.root, &cli.paths, cli.format, &mut stdout)?;
    Ok(ExitCode::from(code))
}
