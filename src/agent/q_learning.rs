use super::policy::{blend, epsilon_greedy};
use super::traits::TabularAgent;
use super::Hyperparameters;
use crate::value_table::ValueTable;
use crate::{Action, Reward, State};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Off-policy tabular Q-learning.
///
/// The bootstrap target uses the best value reachable from the next state,
/// regardless of which action will actually be taken there:
///
/// `Q(s1, a1) <- (1 - alpha) Q(s1, a1) + alpha (r + gamma max_a Q(s2, a))`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QLearning {
    pub params: Hyperparameters,
}

impl QLearning {
    pub fn new(params: Hyperparameters) -> Self {
        QLearning { params }
    }
}

impl TabularAgent for QLearning {
    fn select_action<R: Rng + ?Sized>(&self, table: &ValueTable, state: State, rng: &mut R) -> Action {
        epsilon_greedy(table, state, self.params.epsilon, rng)
    }

    fn learn(&self, table: &mut ValueTable, s1: State, a1: Action, r: Reward, s2: State, _a2: Action) {
        assert!(table.action_count() > 0, "learn needs at least one action");
        let target = r + self.params.gamma * table.max(s2);
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
