//! # Environments
//!
//! Every environment exposes a finite, discretized view of itself to the
//! learner through [`Environment`]. Two are provided:
//!
//! - [`Maze`]: a character grid loaded from a file; the agent walks from the
//!   top-left interior cell to the bottom-right one.
//! - [`CartPole`]: an inverted pendulum on a cart, integrated with RK4 and
//!   discretized into a mixed-radix state index.
//!
//! [`Env`] is the closed set of the two, built by name from the configuration.

pub mod cartpole;
pub mod discretize;
pub mod integrator;
pub mod maze;

pub use cartpole::{CartPole, CartPoleParams};
pub use maze::Maze;

use crate::config::Config;
use crate::error::{Result, TabulaError};
use crate::{Action, Reward, State};
use std::fmt;
use std::str::FromStr;

/// Capability contract shared by all environments
pub trait Environment {
    /// Number of discrete states
    fn state_space(&self) -> usize;

    /// Number of discrete actions
    fn action_space(&self) -> usize;

    /// Discretized current state
    fn state(&self) -> State;

    /// Reward for the state the environment is currently in
    fn reward(&self) -> Reward;

    /// Human-readable snapshot for the trajectory log
    fn info(&self) -> String;

    /// Apply `action`. Panics if `action >= action_space()`.
    fn step(&mut self, action: Action);

    /// Restore the initial configuration
    fn reset(&mut self);

    /// Whether the episode must end in the current state
    fn is_terminal(&self) -> bool;

    /// Whether the current state counts as solving the task
    fn is_success(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvKind {
    Maze,
    CartPole,
}

impl FromStr for EnvKind {
    type Err = TabulaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "maze" => Ok(EnvKind::Maze),
            "cartpole" | "cart_pole" | "cart-pole" => Ok(EnvKind::CartPole),
            _ => Err(TabulaError::UnknownEnvironment(s.to_string())),
        }
    }
}

impl fmt::Display for EnvKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvKind::Maze => write!(f, "maze"),
            EnvKind::CartPole => write!(f, "cartpole"),
        }
    }
}

/// Closed set of environments the harness can run.
#[derive(Debug, Clone)]
pub enum Env {
    Maze(Maze),
    CartPole(CartPole),
}

impl Env {
    /// Build the environment named by `ENV_NAME`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let kind: EnvKind = config.get("ENV_NAME")?.parse()?;
        match kind {
            EnvKind::Maze => Ok(Env::Maze(Maze::from_config(config)?)),
            EnvKind::CartPole => Ok(Env::CartPole(CartPole::from_config(config)?)),
        }
    }

    pub fn kind(&self) -> EnvKind {
        match self {
            Env::Maze(_) => EnvKind::Maze,
            Env::CartPole(_) => EnvKind::CartPole,
        }
    }
}

impl From<Maze> for Env {
    fn from(maze: Maze) -> Self {
        Env::Maze(maze)
    }
}

impl From<CartPole> for Env {
    fn from(cartpole: CartPole) -> Self {
        Env::CartPole(cartpole)
    }
}

macro_rules! delegate {
    ($self:ident, $env:ident => $body:expr) => {
        match $self {
            Env::Maze($env) => $body,
            Env::CartPole($env) => $body,
        }
    };
}

impl Environment for Env {
    fn state_space(&self) -> usize {
        delegate!(self, env => env.state_space())
    }

    fn action_space(&self) -> usize {
        delegate!(self, env => env.action_space())
    }

    fn state(&self) -> State {
        delegate!(self, env => env.state())
    }

    fn reward(&self) -> Reward {
        delegate!(self, env => env.reward())
    }

    fn info(&self) -> String {
        delegate!(self, env => env.info())
    }

    fn step(&mut self, action: Action) {
        delegate!(self, env => env.step(action))
    }

    fn reset(&mut self) {
        delegate!(self, env => env.reset())
    }

    fn is_terminal(&self) -> bool {
        delegate!(self, env => env.is_terminal())
    }

    fn is_success(&self) -> bool {
        delegate!(self, env => env.is_success())
    }
}
