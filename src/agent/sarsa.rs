use super::policy::{blend, epsilon_greedy};
use super::traits::TabularAgent;
use super::Hyperparameters;
use crate::value_table::ValueTable;
use crate::{Action, Reward, State};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// On-policy tabular SARSA.
///
/// The bootstrap target is the value of the action already selected for the
/// next state, so `a2` must come from [`TabularAgent::select_action`] before
/// `learn` is called.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sarsa {
    pub params: Hyperparameters,
}

impl Sarsa {
    pub fn new(params: Hyperparameters) -> Self {
        Sarsa { params }
    }
}

impl TabularAgent for Sarsa {
    fn select_action<R: Rng + ?Sized>(&self, table: &ValueTable, state: State, rng: &mut R) -> Action {
        epsilon_greedy(table, state, self.params.epsilon, rng)
    }

    fn learn(&self, table: &mut ValueTable, s1: State, a1: Action, r: Reward, s2: State, a2: Action) {
        assert!(table.action_count() > 0, "learn needs at least one action");
        let target = r + self.params.gamma * table.get(s2, a2);
        let updated = blend(table.get(s1, a1), target, self.params.alpha);
        table.set(s1, a1, updated);
    }

    fn hyperparameters(&self) -> &Hyperparameters {
        &self.params
    }

    fn hyperparameters_mut(&mut self) -> &mut Hyperparameters {
        &mut self.params
    }
}
