//! Writers for the results of a run.
//!
//! - returns: one episode return per line
//! - history: `action<TAB>reward<TAB>state<TAB>info` per line
//! - value table: bincode snapshot (optional)
//! - summary: pretty-printed JSON (optional)

use crate::config::Config;
use crate::error::Result;
use crate::history::History;
use crate::metrics::Statistics;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Where a run writes its results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub returns: PathBuf,
    pub history: PathBuf,
    pub value_table: Option<PathBuf>,
    pub summary: Option<PathBuf>,
}

impl OutputPaths {
    /// Read `RETURNS_PATH`, `HISTORY_PATH` and the optional `QTABLE_PATH`
    /// and `SUMMARY_PATH`. Relative paths are placed under `output_dir` when
    /// given, otherwise next to the config file.
    pub fn from_config(config: &Config, output_dir: Option<&Path>) -> Result<Self> {
        let resolve = |raw: PathBuf| match output_dir {
            Some(dir) if raw.is_relative() => dir.join(raw),
            _ => raw,
        };
        let required = |key: &str| -> Result<PathBuf> {
            Ok(match output_dir {
                Some(_) => resolve(PathBuf::from(config.get(key)?)),
                None => config.path(key)?,
            })
        };
        let optional = |key: &str| -> Option<PathBuf> {
            match output_dir {
                Some(_) => config.get(key).ok().map(|raw| resolve(PathBuf::from(raw))),
                None => config.path_opt(key),
            }
        };

        Ok(OutputPaths {
            returns: required("RETURNS_PATH")?,
            history: required("HISTORY_PATH")?,
            value_table: optional("QTABLE_PATH"),
            summary: optional("SUMMARY_PATH"),
        })
    }
}

/// Write one return per line with 15 decimals.
pub fn write_returns<W: Write>(writer: &mut W, returns: &[f64]) -> Result<()> {
    for episode_return in returns {
        writeln!(writer, "{:.15}", episode_return)?;
    }
    Ok(())
}

/// Write one trajectory entry per line, tab separated.
pub fn write_history<W: Write>(writer: &mut W, history: &History) -> Result<()> {
    for step in history {
        writeln!(
            writer,
            "{}\t{:.15}\t{}\t{}",
            step.action, step.reward, step.state, step.info
        )?;
    }
    Ok(())
}

pub fn save_returns<P: AsRef<Path>>(path: P, returns: &[f64]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_returns(&mut writer, returns)?;
    writer.flush()?;
    info!(path = %path.display(), count = returns.len(), "saved returns");
    Ok(())
}

pub fn save_history<P: AsRef<Path>>(path: P, history: &History) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_history(&mut writer, history)?;
    writer.flush()?;
    info!(path = %path.display(), steps = history.len(), "saved history");
    Ok(())
}

/// Machine-readable overview of a finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub agent: String,
    pub environment: String,
    pub seed: u64,
    pub episodes: usize,
    pub successes: usize,
    pub stopped_early: bool,
    pub returns: Statistics,
    pub evaluation_return: f64,
    pub evaluation_steps: usize,
    pub evaluation_succeeded: bool,
}

pub fn save_summary<P: AsRef<Path>>(path: P, summary: &RunSummary) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, summary)?;
    writeln!(writer)?;
    writer.flush()?;
    info!(path = %path.display(), "saved summary");
    Ok(())
}
