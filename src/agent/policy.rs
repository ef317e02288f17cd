use crate::value_table::ValueTable;
use crate::{Action, State};
use rand::Rng;

/// Epsilon-greedy selection over one row of the table.
///
/// With probability `epsilon` a uniformly random action is returned,
/// otherwise the lowest-index maximizer of `table.row(state)`.
pub fn epsilon_greedy<R: Rng + ?Sized>(
    table: &ValueTable,
    state: State,
    epsilon: f64,
    rng: &mut R,
) -> Action {
    let num_actions = table.action_count();
    assert!(num_actions > 0, "action selection needs at least one action");

    if rng.gen::<f64>() < epsilon {
        rng.gen_range(0..num_actions)
    } else {
        table.argmax(state)
    }
}

/// Shared blend of the old estimate with a bootstrap target.
#[inline]
pub(crate) fn blend(old: f64, target: f64, alpha: f64) -> f64 {
    (1.0 - alpha) * old + alpha * target
}
