use crate::{Action, Reward, State};
use serde::{Deserialize, Serialize};

/// One recorded interaction: the action taken, the reward and state it led
/// to, and the environment's diagnostic snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub action: Action,
    pub reward: Reward,
    pub state: State,
    pub info: String,
}

/// Trajectory of one episode.
///
/// The first entry describes the initial state before any action has been
/// applied; every further entry is one environment step.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    steps: Vec<Step>,
}

impl History {
    pub fn new() -> Self {
        History { steps: Vec::new() }
    }

    pub fn push(&mut self, action: Action, reward: Reward, state: State, info: String) {
        self.steps.push(Step {
            action,
            reward,
            state,
            info,
        });
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    pub fn rewards(&self) -> impl Iterator<Item = Reward> + '_ {
        self.steps.iter().map(|s| s.reward)
    }

    /// Sum of every recorded reward, the initial entry included.
    pub fn total_reward(&self) -> Reward {
        self.rewards().sum()
    }

    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
