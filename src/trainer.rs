use crate::agent::{Agent, TabularAgent};
use crate::config::Config;
use crate::environment::{Env, Environment};
use crate::episode::{EpisodeOutcome, EpisodeRunner};
use crate::error::{Result, TabulaError};
use crate::history::History;
use crate::metrics::Statistics;
use crate::value_table::ValueTable;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Episode budgets and table initialization for a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainerSettings {
    pub max_episode: usize,
    pub max_step: usize,
    /// Stop training after this many consecutive successful episodes
    pub max_succeeded_episode: Option<usize>,
    /// Episodes between progress log lines
    pub log_interval: usize,
    pub init_qvalue: f64,
}

impl TrainerSettings {
    pub fn new(max_episode: usize, max_step: usize, init_qvalue: f64) -> Self {
        TrainerSettings {
            max_episode,
            max_step,
            max_succeeded_episode: None,
            log_interval: (max_episode / 10).max(1),
            init_qvalue,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let max_episode: usize = config.parse_value("RL_MAX_EPISODE")?;
        let max_step: usize = config.parse_value("RL_MAX_STEP")?;
        let init_qvalue: f64 = config.parse_value("QTABLE_INIT_QVALUE")?;
        if !init_qvalue.is_finite() {
            return Err(TabulaError::invalid_value(
                "QTABLE_INIT_QVALUE",
                init_qvalue.to_string(),
                "must be finite",
            ));
        }

        let mut settings = Self::new(max_episode, max_step, init_qvalue);
        settings.max_succeeded_episode = config
            .parse_opt::<usize>("RL_MAX_SUCCEEDED_EPISODE")?
            .filter(|&n| n > 0);
        settings.log_interval = config.parse_or("RL_LOG_INTERVAL", settings.log_interval)?.max(1);
        Ok(settings)
    }
}

/// Result of the training phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Return of every training episode, in order
    pub returns: Vec<f64>,
    pub successes: usize,
    pub stopped_early: bool,
}

impl TrainingReport {
    pub fn statistics(&self) -> Statistics {
        Statistics::of_returns(&self.returns)
    }
}

/// Owns the agent, environment, value table and random source for one
/// experiment.
///
/// The table lives for the whole run and is only mutated through the
/// episode loop.
pub struct Trainer {
    agent: Agent,
    env: Env,
    table: ValueTable,
    runner: EpisodeRunner,
    settings: TrainerSettings,
    rng: StdRng,
    seed: u64,
}

impl Trainer {
    /// Create a trainer. Without a seed one is drawn from OS entropy; either
    /// way it is available from [`Trainer::seed`] for reproducing the run.
    pub fn new(agent: Agent, env: Env, settings: TrainerSettings, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random::<u64>);
        let table = ValueTable::new(env.state_space(), env.action_space(), settings.init_qvalue);

        Trainer {
            agent,
            env,
            table,
            runner: EpisodeRunner::new(settings.max_step),
            settings,
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Build agent, environment and settings from `config`. An explicit
    /// `seed` takes precedence over `RL_SEED`.
    pub fn from_config(config: &Config, seed: Option<u64>) -> Result<Self> {
        let agent = Agent::from_config(config)?;
        let env = Env::from_config(config)?;
        let settings = TrainerSettings::from_config(config)?;
        let seed = match seed {
            Some(seed) => Some(seed),
            None => config.parse_opt("RL_SEED")?,
        };

        info!(
            agent = %agent.kind(),
            env = %env.kind(),
            states = env.state_space(),
            actions = env.action_space(),
            "created trainer"
        );
        Ok(Self::new(agent, env, settings, seed))
    }

    /// Run one episode with the current agent parameters.
    pub fn run_episode(&mut self) -> EpisodeOutcome {
        self.runner
            .run(&mut self.env, &self.agent, &mut self.table, &mut self.rng)
    }

    /// Run the training episodes and collect their returns.
    pub fn train(&mut self) -> TrainingReport {
        let mut returns = Vec::new();
        let mut successes = 0;
        let mut consecutive = 0;
        let mut stopped_early = false;

        info!(
            episodes = self.settings.max_episode,
            max_step = self.settings.max_step,
            seed = self.seed,
            "training started"
        );

        for episode in 0..self.settings.max_episode {
            let outcome = self.run_episode();
            let episode_return = outcome.episode_return();
            returns.push(episode_return);
            debug!(episode, episode_return, steps = outcome.steps(), "episode finished");

            if outcome.succeeded {
                successes += 1;
                consecutive += 1;
            } else {
                consecutive = 0;
            }

            if (episode + 1) % self.settings.log_interval == 0 {
                let recent = Statistics::recent(&returns, self.settings.log_interval);
                info!(
                    episode = episode + 1,
                    mean_return = recent.mean,
                    max_return = recent.max,
                    successes,
                    "training progress"
                );
            }

            if let Some(limit) = self.settings.max_succeeded_episode {
                if consecutive >= limit {
                    warn!(episode = episode + 1, consecutive, "stopping early after consecutive successes");
                    stopped_early = true;
                    break;
                }
            }
        }

        info!(episodes = returns.len(), successes, "training finished");
        TrainingReport {
            returns,
            successes,
            stopped_early,
        }
    }

    /// Freeze the agent and run one greedy, non-learning episode.
    pub fn evaluate(&mut self) -> History {
        self.evaluate_outcome().history
    }

    pub fn evaluate_outcome(&mut self) -> EpisodeOutcome {
        self.agent.fix();
        let outcome = self.run_episode();
        info!(
            episode_return = outcome.episode_return(),
            steps = outcome.steps(),
            succeeded = outcome.succeeded,
            "evaluation finished"
        );
        outcome
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    pub fn table(&self) -> &ValueTable {
        &self.table
    }

    pub fn settings(&self) -> &TrainerSettings {
        &self.settings
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}
