//! Command-line entry point: train and evaluate one configured experiment.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tabula::config::Config;
use tracing_subscriber::EnvFilter;

/// Tabular reinforcement-learning experiment runner
#[derive(Parser)]
#[command(name = "tabula")]
#[command(about = "Train a Q-learning or SARSA agent and replay a frozen evaluation episode")]
#[command(version)]
struct Cli {
    /// Path to the KEY=VALUE experiment configuration
    config: PathBuf,

    /// Seed for the random source (overrides RL_SEED)
    #[arg(long)]
    seed: Option<u64>,

    /// Directory for relative output paths (defaults to the config's directory)
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let config = Config::load(&cli.config)
        .with_context(|| format!("failed to load config {}", cli.config.display()))?;

    if let Some(dir) = &cli.output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    }

    let summary = tabula::experiment::run(&config, cli.seed, cli.output_dir.as_deref())
        .context("experiment failed")?;

    tracing::info!(
        episodes = summary.episodes,
        mean_return = summary.returns.mean,
        evaluation_return = summary.evaluation_return,
        seed = summary.seed,
        "done"
    );
    Ok(())
}
