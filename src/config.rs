//! # Configuration
//!
//! Experiments are described by a flat text file of `KEY=VALUE` lines:
//!
//! ```text
//! # agent
//! AGENT_NAME=q_learning
//! AGENT_ALPHA=0.1
//! AGENT_GAMMA=0.99
//! AGENT_EPSILON=0.1
//!
//! ENV_NAME=maze
//! ENV_MAZE_PATH=maze.txt
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. Every other line must
//! contain exactly one `=`; anything else is rejected when the file is loaded,
//! so a run never starts from a half-read configuration.

use crate::error::{Result, TabulaError};
use std::collections::HashMap;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct Config {
    values: HashMap<String, String>,
    base_dir: Option<PathBuf>,
}

impl Config {
    /// Load a configuration file. Relative paths read through [`Config::path`]
    /// are resolved against the file's directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&text)?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        debug!(path = %path.display(), keys = config.values.len(), "loaded config");
        Ok(config)
    }

    /// Parse configuration text. Later duplicates override earlier ones.
    pub fn parse(text: &str) -> Result<Self> {
        let mut values = HashMap::new();

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let items: Vec<&str> = line.split('=').collect();
            if items.len() != 2 || items[0].trim().is_empty() {
                return Err(TabulaError::ConfigParse {
                    line: idx + 1,
                    content: line.to_string(),
                });
            }

            values.insert(items[0].trim().to_string(), items[1].trim().to_string());
        }

        Ok(Config {
            values,
            base_dir: None,
        })
    }

    pub fn set<K: Into<String>, V: ToString>(&mut self, key: K, value: V) {
        self.values.insert(key.into(), value.to_string());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Result<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| TabulaError::MissingKey(key.to_string()))
    }

    /// Read and parse a required key.
    pub fn parse_value<T>(&self, key: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        let raw = self.get(key)?;
        raw.parse::<T>()
            .map_err(|e| TabulaError::invalid_value(key, raw, e.to_string()))
    }

    /// Read and parse an optional key, falling back to `default` when absent.
    /// A present but malformed value is still an error.
    pub fn parse_or<T>(&self, key: &str, default: T) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        if self.contains(key) {
            self.parse_value(key)
        } else {
            Ok(default)
        }
    }

    /// Read an optional key that must parse when present.
    pub fn parse_opt<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: Display,
    {
        if self.contains(key) {
            self.parse_value(key).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Read a path-valued key, resolving relative paths against the directory
    /// of the loaded file.
    pub fn path(&self, key: &str) -> Result<PathBuf> {
        let raw = PathBuf::from(self.get(key)?);
        Ok(self.resolve(raw))
    }

    pub fn path_opt(&self, key: &str) -> Option<PathBuf> {
        self.values.get(key).map(|raw| self.resolve(PathBuf::from(raw)))
    }

    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    fn resolve(&self, raw: PathBuf) -> PathBuf {
        match &self.base_dir {
            Some(dir) if raw.is_relative() => dir.join(raw),
            _ => raw,
        }
    }
}
