use super::Hyperparameters;
use crate::value_table::ValueTable;
use crate::{Action, Reward, State};
use rand::Rng;

/// Trait for tabular value-based agents.
///
/// Agents hold only their hyperparameters; the value table is owned by the
/// caller and lent in for every call.
pub trait TabularAgent {
    /// Select an action for `state` using the agent's exploration policy
    fn select_action<R: Rng + ?Sized>(&self, table: &ValueTable, state: State, rng: &mut R)
        -> Action;

    /// Update `table[s1][a1]` from the observed transition `(s1, a1, r, s2, a2)`
    fn learn(&self, table: &mut ValueTable, s1: State, a1: Action, r: Reward, s2: State, a2: Action);

    fn hyperparameters(&self) -> &Hyperparameters;

    fn hyperparameters_mut(&mut self) -> &mut Hyperparameters;

    /// Freeze the agent for evaluation: no exploration and a zero learning rate,
    /// so `select_action` is greedy and `learn` leaves the table unchanged.
    fn fix(&mut self) {
        let params = self.hyperparameters_mut();
        params.alpha = 0.0;
        params.epsilon = 0.0;
    }

    /// Get the current exploration rate
    fn exploration_rate(&self) -> f64 {
        self.hyperparameters().epsilon
    }
}
