//! # Tabula - Tabular Reinforcement Learning Experiment Harness
//!
//! Tabula trains a tabular agent (Q-learning or SARSA) against a discrete
//! environment, then replays one frozen evaluation episode. Everything the
//! learner touches is an index: environments discretize their internal state
//! into a [`State`], the agent picks an [`Action`] index, and the learned
//! estimates live in a dense [`value_table::ValueTable`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tabula::config::Config;
//! use tabula::trainer::Trainer;
//!
//! let config = Config::load("experiment.conf").unwrap();
//! let mut trainer = Trainer::from_config(&config, Some(42)).unwrap();
//!
//! let report = trainer.train();
//! let history = trainer.evaluate();
//! println!("{} episodes, eval return {}", report.returns.len(), history.total_reward());
//! ```
//!
//! ## Module Organization
//!
//! - [`agent`] - Q-learning and SARSA update rules with epsilon-greedy selection
//! - [`config`] - `KEY=VALUE` experiment configuration
//! - [`environment`] - Maze and CartPole environments
//! - [`episode`] - Single-episode interaction loop
//! - [`error`] - Error types and result handling
//! - [`experiment`] - End-to-end run: train, evaluate, save
//! - [`history`] - Per-step trajectory records
//! - [`metrics`] - Summary statistics over episode returns
//! - [`output`] - Returns, history and summary writers
//! - [`trainer`] - Training and evaluation runs
//! - [`value_table`] - Dense state x action value storage

pub mod agent;
pub mod config;
pub mod environment;
pub mod episode;
pub mod error;
pub mod experiment;
pub mod history;
pub mod metrics;
pub mod output;
pub mod trainer;
pub mod value_table;

/// Index of a discretized environment state.
pub type State = usize;

/// Index into an environment's ordered action set.
pub type Action = usize;

pub type Reward = f64;

#[cfg(test)]
mod tests;
