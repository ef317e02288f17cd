use super::{small_maze, REWARDS, SMALL_MAZE};
use crate::agent::{Agent, AgentKind, Hyperparameters, TabularAgent};
use crate::config::Config;
use crate::environment::{Env, Environment, Maze};
use crate::trainer::{Trainer, TrainerSettings};
use tempfile::tempdir;

fn maze_trainer(kind: AgentKind, epsilon: f64, settings: TrainerSettings, seed: u64) -> Trainer {
    let agent = Agent::new(kind, Hyperparameters::new(0.5, 0.9, epsilon).unwrap());
    Trainer::new(agent, Env::from(small_maze()), settings, Some(seed))
}

#[test]
fn test_train_returns_one_value_per_episode() {
    let mut trainer = maze_trainer(AgentKind::QLearning, 0.2, TrainerSettings::new(50, 30, 0.0), 3);
    let report = trainer.train();

    assert_eq!(report.returns.len(), 50);
    assert!(report.successes <= 50);
    assert!(!report.stopped_early);
    assert_eq!(report.statistics().count, 50);
    assert_eq!(trainer.table().state_count(), 25);
    assert_eq!(trainer.table().action_count(), 4);
}

#[test]
fn test_same_seed_reproduces_run() {
    for kind in [AgentKind::QLearning, AgentKind::Sarsa] {
        let settings = TrainerSettings::new(40, 20, 0.0);
        let mut first = maze_trainer(kind, 0.3, settings, 17);
        let mut second = maze_trainer(kind, 0.3, settings, 17);

        assert_eq!(first.train(), second.train());
        assert_eq!(first.table(), second.table());
        assert_eq!(first.evaluate(), second.evaluate());
    }
}

#[test]
fn test_evaluation_is_frozen_and_bounded() {
    let settings = TrainerSettings::new(100, 15, 0.0);
    let mut trainer = maze_trainer(AgentKind::Sarsa, 0.2, settings, 5);
    trainer.train();

    let before = trainer.table().clone();
    let history = trainer.evaluate();

    assert!(history.len() <= settings.max_step + 1);
    assert!(!history.is_empty());
    assert_eq!(trainer.agent().hyperparameters().alpha, 0.0);
    assert_eq!(trainer.agent().exploration_rate(), 0.0);
    assert_eq!(trainer.table(), &before);

    // a frozen agent replays the same greedy trajectory
    assert_eq!(trainer.evaluate(), history);
}

#[test]
fn test_trained_agent_reaches_goal() {
    let mut trainer = maze_trainer(AgentKind::QLearning, 0.1, TrainerSettings::new(500, 100, 0.0), 11);
    let report = trainer.train();
    assert!(report.successes > 0);

    let outcome = trainer.evaluate_outcome();
    assert!(outcome.succeeded);
    assert_eq!(outcome.steps(), 4);
    assert_eq!(outcome.episode_return(), 3.0 * REWARDS.step + REWARDS.step + REWARDS.goal);
}

#[test]
fn test_stops_after_consecutive_successes() {
    // one corridor cell from the goal: only "right" succeeds
    let corridor = Maze::parse("####\n#..#\n####\n", REWARDS).unwrap();
    let agent = Agent::new(AgentKind::QLearning, Hyperparameters::new(0.5, 0.9, 0.0).unwrap());
    let mut settings = TrainerSettings::new(100, 10, 0.0);
    settings.max_succeeded_episode = Some(2);

    let mut trainer = Trainer::new(agent, Env::from(corridor), settings, Some(0));
    let report = trainer.train();

    // greedy ties pick up, down, left in turn before right is tried
    assert!(report.stopped_early);
    assert_eq!(report.returns.len(), 5);
    assert_eq!(report.successes, 2);
    assert_eq!(report.returns[4], REWARDS.step + REWARDS.goal);
}

#[test]
fn test_huge_episode_budget_with_early_stop() {
    let corridor = Maze::parse("####\n#..#\n####\n", REWARDS).unwrap();
    let agent = Agent::new(AgentKind::QLearning, Hyperparameters::new(0.5, 0.9, 0.0).unwrap());
    let mut settings = TrainerSettings::new(usize::MAX, usize::MAX, 0.0);
    settings.max_succeeded_episode = Some(2);

    let mut trainer = Trainer::new(agent, Env::from(corridor), settings, Some(0));
    let report = trainer.train();

    assert!(report.stopped_early);
    assert_eq!(report.returns.len(), 5);
}

#[test]
fn test_seed_is_reported() {
    let trainer = maze_trainer(AgentKind::QLearning, 0.1, TrainerSettings::new(1, 1, 0.0), 99);
    assert_eq!(trainer.seed(), 99);
}

#[test]
fn test_drawn_seed_reproduces_run() {
    let settings = TrainerSettings::new(20, 20, 0.0);
    let agent = Agent::new(AgentKind::QLearning, Hyperparameters::new(0.5, 0.9, 0.3).unwrap());
    let mut unseeded = Trainer::new(agent, Env::from(small_maze()), settings, None);
    let mut replay = maze_trainer(AgentKind::QLearning, 0.3, settings, unseeded.seed());

    assert_eq!(unseeded.train(), replay.train());
}

#[test]
fn test_initial_table_value() {
    let trainer = maze_trainer(AgentKind::Sarsa, 0.1, TrainerSettings::new(1, 1, 2.5), 1);
    assert!(trainer.table().as_array().iter().all(|&v| v == 2.5));
}

#[test]
fn test_settings_from_config() {
    let config = Config::parse(
        "RL_MAX_EPISODE=200\nRL_MAX_STEP=50\nQTABLE_INIT_QVALUE=1.5\nRL_MAX_SUCCEEDED_EPISODE=0\n",
    )
    .unwrap();
    let settings = TrainerSettings::from_config(&config).unwrap();

    assert_eq!(settings.max_episode, 200);
    assert_eq!(settings.max_step, 50);
    assert_eq!(settings.init_qvalue, 1.5);
    assert_eq!(settings.max_succeeded_episode, None);
    assert_eq!(settings.log_interval, 20);

    let config = Config::parse(
        "RL_MAX_EPISODE=5\nRL_MAX_STEP=50\nQTABLE_INIT_QVALUE=0\nRL_MAX_SUCCEEDED_EPISODE=3\nRL_LOG_INTERVAL=0\n",
    )
    .unwrap();
    let settings = TrainerSettings::from_config(&config).unwrap();
    assert_eq!(settings.max_succeeded_episode, Some(3));
    assert_eq!(settings.log_interval, 1);
}

#[test]
fn test_settings_reject_non_finite_initial_value() {
    let config = Config::parse("RL_MAX_EPISODE=5\nRL_MAX_STEP=5\nQTABLE_INIT_QVALUE=inf\n").unwrap();
    assert!(TrainerSettings::from_config(&config).is_err());
}

#[test]
fn test_trainer_from_config() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("maze.txt"), SMALL_MAZE).unwrap();
    let config_path = dir.path().join("run.conf");
    std::fs::write(
        &config_path,
        "AGENT_NAME=sarsa\nAGENT_ALPHA=0.5\nAGENT_GAMMA=0.9\nAGENT_EPSILON=0.1\n\
         ENV_NAME=maze\nENV_MAZE_PATH=maze.txt\n\
         ENV_GOAL_REWARD=10\nENV_DEAD_REWARD=-10\nENV_DEFAULT_REWARD=-1\n\
         QTABLE_INIT_QVALUE=0\nRL_MAX_EPISODE=10\nRL_MAX_STEP=20\nRL_SEED=5\n",
    )
    .unwrap();
    let config = Config::load(&config_path).unwrap();

    let trainer = Trainer::from_config(&config, None).unwrap();
    assert_eq!(trainer.seed(), 5);
    assert_eq!(trainer.agent().kind(), AgentKind::Sarsa);
    assert_eq!(trainer.env().state_space(), 25);
    assert_eq!(trainer.settings().max_episode, 10);

    let mut trainer = Trainer::from_config(&config, Some(8)).unwrap();
    assert_eq!(trainer.seed(), 8);
    assert_eq!(trainer.train().returns.len(), 10);
}
