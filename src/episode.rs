//! # Episode Loop
//!
//! One episode runs
//! `RESET -> (SELECT_ACTION -> STEP -> OBSERVE -> LEARN)* -> TERMINAL | BUDGET_EXHAUSTED`.
//!
//! The next action is always selected before the update for the current
//! transition, which is what SARSA needs, and a terminal state's table row is
//! zeroed before the update that bootstraps from it, so nothing is learned
//! from value beyond the end of an episode.

use crate::agent::TabularAgent;
use crate::environment::Environment;
use crate::history::History;
use crate::value_table::ValueTable;
use rand::Rng;
use tracing::trace;

/// What one episode produced
#[derive(Clone, Debug, PartialEq)]
pub struct EpisodeOutcome {
    pub history: History,
    /// Environment reported success in the final state
    pub succeeded: bool,
    /// Episode ended on a terminal state rather than the step budget
    pub terminated: bool,
}

impl EpisodeOutcome {
    /// Sum of rewards over the trajectory
    pub fn episode_return(&self) -> f64 {
        self.history.total_reward()
    }

    /// Number of environment steps taken
    pub fn steps(&self) -> usize {
        self.history.len().saturating_sub(1)
    }
}

/// Drives a single agent/environment episode against a value table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EpisodeRunner {
    pub max_step: usize,
}

impl EpisodeRunner {
    pub fn new(max_step: usize) -> Self {
        EpisodeRunner { max_step }
    }

    pub fn run<E, A, R>(
        &self,
        env: &mut E,
        agent: &A,
        table: &mut ValueTable,
        rng: &mut R,
    ) -> EpisodeOutcome
    where
        E: Environment + ?Sized,
        A: TabularAgent + ?Sized,
        R: Rng + ?Sized,
    {
        let mut history = History::new();

        env.reset();
        let mut s1 = env.state();
        let mut a1 = agent.select_action(table, s1, rng);
        history.push(a1, env.reward(), s1, env.info());

        let mut terminated = false;
        for step in 0..self.max_step {
            env.step(a1);
            let s2 = env.state();
            let r = env.reward();
            let a2 = agent.select_action(table, s2, rng);
            history.push(a1, r, s2, env.info());
            trace!(step, s1, a1, r, s2, a2, "transition");

            terminated = env.is_terminal();
            if terminated {
                table.fill_row(s2, 0.0);
            }
            agent.learn(table, s1, a1, r, s2, a2);

            if terminated {
                break;
            }
            s1 = s2;
            a1 = a2;
        }

        EpisodeOutcome {
            succeeded: env.is_success(),
            terminated,
            history,
        }
    }
}
