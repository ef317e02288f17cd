//! # Tabular Agents Module
//!
//! Agents choose actions against a [`ValueTable`](crate::value_table::ValueTable)
//! and update it from observed transitions.
//!
//! ## Available Agents
//!
//! - **QLearning**: off-policy, bootstraps from the best next-state value
//! - **Sarsa**: on-policy, bootstraps from the value of the next action actually chosen
//!
//! Both explore epsilon-greedily and can be frozen with
//! [`TabularAgent::fix`] for a deterministic, non-learning evaluation run.
//!
//! ## Example Usage
//!
//! ```rust
//! use rand::{rngs::StdRng, SeedableRng};
//! use tabula::agent::{Agent, AgentKind, Hyperparameters, TabularAgent};
//! use tabula::value_table::ValueTable;
//!
//! let params = Hyperparameters::new(0.1, 0.99, 0.1).unwrap();
//! let agent = Agent::new(AgentKind::QLearning, params);
//! let mut table = ValueTable::new(10, 4, 0.0);
//! let mut rng = StdRng::seed_from_u64(7);
//!
//! let a1 = agent.select_action(&table, 0, &mut rng);
//! let a2 = agent.select_action(&table, 1, &mut rng);
//! agent.learn(&mut table, 0, a1, -1.0, 1, a2);
//! ```

pub mod policy;
pub mod traits;

mod q_learning;
mod sarsa;

pub use q_learning::QLearning;
pub use sarsa::Sarsa;
pub use traits::TabularAgent;

use crate::config::Config;
use crate::error::{Result, TabulaError};
use crate::value_table::ValueTable;
use crate::{Action, Reward, State};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Learning rate, discount factor and exploration probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hyperparameters {
    pub alpha: f64,
    pub gamma: f64,
    pub epsilon: f64,
}

impl Hyperparameters {
    pub fn new(alpha: f64, gamma: f64, epsilon: f64) -> Result<Self> {
        for (name, value) in [("alpha", alpha), ("gamma", gamma), ("epsilon", epsilon)] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(TabulaError::invalid_parameter(
                    name.to_string(),
                    format!("must be within [0, 1], got {}", value),
                ));
            }
        }
        Ok(Hyperparameters {
            alpha,
            gamma,
            epsilon,
        })
    }

    /// Read `AGENT_ALPHA`, `AGENT_GAMMA` and `AGENT_EPSILON`.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.parse_value("AGENT_ALPHA")?,
            config.parse_value("AGENT_GAMMA")?,
            config.parse_value("AGENT_EPSILON")?,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentKind {
    QLearning,
    Sarsa,
}

impl FromStr for AgentKind {
    type Err = TabulaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "q_learning" | "qlearning" | "q-learning" => Ok(AgentKind::QLearning),
            "sarsa" => Ok(AgentKind::Sarsa),
            _ => Err(TabulaError::UnknownAgent(s.to_string())),
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentKind::QLearning => write!(f, "q_learning"),
            AgentKind::Sarsa => write!(f, "sarsa"),
        }
    }
}

/// Closed set of agents the harness can run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Agent {
    QLearning(QLearning),
    Sarsa(Sarsa),
}

impl Agent {
    pub fn new(kind: AgentKind, params: Hyperparameters) -> Self {
        match kind {
            AgentKind::QLearning => Agent::QLearning(QLearning::new(params)),
            AgentKind::Sarsa => Agent::Sarsa(Sarsa::new(params)),
        }
    }

    /// Build the agent named by `AGENT_NAME`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let kind: AgentKind = config.get("AGENT_NAME")?.parse()?;
        let params = Hyperparameters::from_config(config)?;
        Ok(Self::new(kind, params))
    }

    pub fn kind(&self) -> AgentKind {
        match self {
            Agent::QLearning(_) => AgentKind::QLearning,
            Agent::Sarsa(_) => AgentKind::Sarsa,
        }
    }
}

impl TabularAgent for Agent {
    fn select_action<R: Rng + ?Sized>(&self, table: &ValueTable, state: State, rng: &mut R) -> Action {
        match self {
            Agent::QLearning(agent) => agent.select_action(table, state, rng),
            Agent::Sarsa(agent) => agent.select_action(table, state, rng),
        }
    }

    fn learn(&self, table: &mut ValueTable, s1: State, a1: Action, r: Reward, s2: State, a2: Action) {
        match self {
            Agent::QLearning(agent) => agent.learn(table, s1, a1, r, s2, a2),
            Agent::Sarsa(agent) => agent.learn(table, s1, a1, r, s2, a2),
        }
    }

    fn hyperparameters(&self) -> &Hyperparameters {
        match self {
            Agent::QLearning(agent) => agent.hyperparameters(),
            Agent::Sarsa(agent) => agent.hyperparameters(),
        }
    }

    fn hyperparameters_mut(&mut self) -> &mut Hyperparameters {
        match self {
            Agent::QLearning(agent) => agent.hyperparameters_mut(),
            Agent::Sarsa(agent) => agent.hyperparameters_mut(),
        }
    }
}
