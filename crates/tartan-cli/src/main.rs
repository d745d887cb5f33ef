//! Tartan policy evaluator runner
//!
//! Loads a snapshot file, runs one or more evaluation passes and prints the
//! resulting snapshot followed by the audit log.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tartan_config::SnapshotLoader;
use tartan_core::{EvaluationLog, StateSnapshot};
use tartan_rules::{evaluate, evaluate_raw};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Evaluate smart-home automation policies against a snapshot file.
#[derive(Parser, Debug)]
#[command(name = "tartan-eval")]
#[command(version)]
#[command(about = "Compute the next house state from a snapshot file.", long_about = None)]
struct Cli {
    /// Snapshot file (YAML or JSON)
    snapshot: PathBuf,

    /// Directory holding secrets.yaml (defaults to the snapshot's directory)
    #[arg(long)]
    config_dir: Option<PathBuf>,

    /// Number of passes to run, feeding each result into the next
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    ticks: u32,

    /// Output format for the resulting snapshot
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let cli = Cli::parse();
    let snapshot = if cli.snapshot.is_absolute() {
        cli.snapshot.clone()
    } else {
        std::env::current_dir()?.join(&cli.snapshot)
    };
    let config_dir = cli
        .config_dir
        .clone()
        .unwrap_or_else(|| snapshot_dir(&snapshot));

    let mut loader = SnapshotLoader::new(&config_dir)
        .with_context(|| format!("failed to prepare loader for {}", config_dir.display()))?;
    let raw = loader
        .load_file(&snapshot)
        .with_context(|| format!("failed to load snapshot {}", cli.snapshot.display()))?;

    info!(snapshot = %cli.snapshot.display(), ticks = cli.ticks, "Evaluating snapshot");

    let mut log = EvaluationLog::new();
    let mut state = evaluate_raw(&raw, &mut log);
    for tick in 2..=cli.ticks {
        debug!(tick, "Running follow-up pass");
        state = evaluate(&state, &mut log);
    }

    print!("{}", render(&state, cli.format)?);
    println!("---");
    print!("{}", log);

    Ok(())
}

fn snapshot_dir(snapshot: &Path) -> PathBuf {
    snapshot
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn render(state: &StateSnapshot, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Yaml => serde_yaml::to_string(state)?,
        OutputFormat::Json => serde_json::to_string_pretty(state)? + "\n",
    };
    Ok(rendered)
}
