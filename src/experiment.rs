//! Full experiment pipeline: build from config, train, evaluate, save.

use crate::config::Config;
use crate::environment::Environment;
use crate::error::Result;
use crate::output::{self, OutputPaths, RunSummary};
use crate::trainer::Trainer;
use std::path::Path;
use tracing::info;

/// Run a configured experiment end to end and write every output.
///
/// Configuration errors surface before the first episode; output errors
/// after the run are returned as-is.
pub fn run(config: &Config, seed: Option<u64>, output_dir: Option<&Path>) -> Result<RunSummary> {
    let paths = OutputPaths::from_config(config, output_dir)?;
    let mut trainer = Trainer::from_config(config, seed)?;

    let report = trainer.train();
    let evaluation = trainer.evaluate_outcome();

    output::save_returns(&paths.returns, &report.returns)?;
    output::save_history(&paths.history, &evaluation.history)?;
    if let Some(path) = &paths.value_table {
        trainer.table().save(path)?;
        info!(path = %path.display(), states = trainer.env().state_space(), "saved value table");
    }

    let summary = RunSummary {
        agent: trainer.agent().kind().to_string(),
        environment: trainer.env().kind().to_string(),
        seed: trainer.seed(),
        episodes: report.returns.len(),
        successes: report.successes,
        stopped_early: report.stopped_early,
        returns: report.statistics(),
        evaluation_return: evaluation.episode_return(),
        evaluation_steps: evaluation.steps(),
        evaluation_succeeded: evaluation.succeeded,
    };
    if let Some(path) = &paths.summary {
        output::save_summary(path, &summary)?;
    }

    Ok(summary)
}
