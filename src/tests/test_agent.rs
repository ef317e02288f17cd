use crate::agent::{Agent, AgentKind, Hyperparameters, QLearning, Sarsa, TabularAgent};
use crate::config::Config;
use crate::error::TabulaError;
use crate::value_table::ValueTable;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn params(alpha: f64, gamma: f64, epsilon: f64) -> Hyperparameters {
    Hyperparameters::new(alpha, gamma, epsilon).unwrap()
}

#[test]
fn test_greedy_selection_picks_first_maximum() {
    let mut table = ValueTable::new(3, 4, 0.0);
    table.set(1, 2, 5.0);
    table.set(1, 3, 5.0);
    table.set(2, 0, -1.0);

    let agent = Agent::new(AgentKind::QLearning, params(0.1, 0.9, 0.0));
    let mut rng = StdRng::seed_from_u64(0);

    for _ in 0..50 {
        assert_eq!(agent.select_action(&table, 1, &mut rng), 2);
        assert_eq!(agent.select_action(&table, 2, &mut rng), 1);
        assert_eq!(agent.select_action(&table, 0, &mut rng), 0);
    }
}

#[test]
fn test_full_exploration_is_uniform() {
    let mut table = ValueTable::new(1, 4, 0.0);
    table.set(0, 0, 100.0);

    let agent = Agent::new(AgentKind::Sarsa, params(0.1, 0.9, 1.0));
    let mut rng = StdRng::seed_from_u64(42);

    let draws = 40_000;
    let mut counts = [0usize; 4];
    for _ in 0..draws {
        counts[agent.select_action(&table, 0, &mut rng)] += 1;
    }

    let expected = draws as f64 / 4.0;
    for count in counts {
        assert!(
            (count as f64 - expected).abs() < expected * 0.05,
            "counts {:?} not uniform",
            counts
        );
    }
}

#[test]
fn test_q_learning_update_closed_form() {
    let mut table = ValueTable::new(2, 3, 0.0);
    table.set(0, 1, 2.0);
    table.set(1, 0, 1.0);
    table.set(1, 2, 4.0);

    let (alpha, gamma, r) = (0.3, 0.9, -1.0);
    let agent = QLearning::new(params(alpha, gamma, 0.1));
    agent.learn(&mut table, 0, 1, r, 1, 0);

    let expected = (1.0 - alpha) * 2.0 + alpha * (r + gamma * 4.0);
    assert!((table.get(0, 1) - expected).abs() < 1e-12);
}

#[test]
fn test_sarsa_uses_selected_next_action() {
    let mut table = ValueTable::new(2, 3, 0.0);
    table.set(0, 1, 2.0);
    table.set(1, 0, 1.0);
    table.set(1, 2, 4.0);

    let (alpha, gamma, r) = (0.3, 0.9, -1.0);
    let agent = Sarsa::new(params(alpha, gamma, 0.1));
    agent.learn(&mut table, 0, 1, r, 1, 0);

    let expected = (1.0 - alpha) * 2.0 + alpha * (r + gamma * 1.0);
    assert!((table.get(0, 1) - expected).abs() < 1e-12);
}

#[test]
fn test_q_learning_and_sarsa_diverge_when_next_action_is_not_greedy() {
    let mut base = ValueTable::new(2, 2, 0.0);
    base.set(1, 0, 1.0);
    base.set(1, 1, 9.0);

    let p = params(0.5, 0.9, 0.0);
    let mut q_table = base.clone();
    let mut s_table = base.clone();
    Agent::new(AgentKind::QLearning, p).learn(&mut q_table, 0, 0, 0.0, 1, 0);
    Agent::new(AgentKind::Sarsa, p).learn(&mut s_table, 0, 0, 0.0, 1, 0);

    assert!((q_table.get(0, 0) - 0.5 * 0.9 * 9.0).abs() < 1e-12);
    assert!((s_table.get(0, 0) - 0.5 * 0.9 * 1.0).abs() < 1e-12);
    assert_ne!(q_table.get(0, 0), s_table.get(0, 0));
}

#[test]
fn test_fix_freezes_learning_and_exploration() {
    for kind in [AgentKind::QLearning, AgentKind::Sarsa] {
        let mut agent = Agent::new(kind, params(0.5, 0.99, 0.3));
        agent.fix();

        assert_eq!(agent.hyperparameters().alpha, 0.0);
        assert_eq!(agent.hyperparameters().epsilon, 0.0);
        assert_eq!(agent.hyperparameters().gamma, 0.99);
        assert_eq!(agent.exploration_rate(), 0.0);

        let mut table = ValueTable::new(3, 2, 0.0);
        table.set(0, 0, 1.5);
        table.set(1, 1, 8.0);
        let before = table.clone();

        agent.learn(&mut table, 0, 0, 100.0, 1, 1);
        agent.learn(&mut table, 1, 1, -3.0, 2, 0);
        assert_eq!(table, before);
    }
}

#[test]
fn test_invalid_hyperparameters_rejected() {
    assert!(Hyperparameters::new(1.5, 0.9, 0.1).is_err());
    assert!(Hyperparameters::new(0.1, -0.1, 0.1).is_err());
    assert!(Hyperparameters::new(0.1, 0.9, f64::NAN).is_err());
}

#[test]
fn test_agent_kind_parsing() {
    assert_eq!("q_learning".parse::<AgentKind>().unwrap(), AgentKind::QLearning);
    assert_eq!("QLearning".parse::<AgentKind>().unwrap(), AgentKind::QLearning);
    assert_eq!("SARSA".parse::<AgentKind>().unwrap(), AgentKind::Sarsa);
    assert!(matches!(
        "dqn".parse::<AgentKind>(),
        Err(TabulaError::UnknownAgent(name)) if name == "dqn"
    ));
}

#[test]
fn test_agent_from_config() {
    let config = Config::parse(
        "AGENT_NAME=sarsa\nAGENT_ALPHA=0.2\nAGENT_GAMMA=0.95\nAGENT_EPSILON=0.05\n",
    )
    .unwrap();
    let agent = Agent::from_config(&config).unwrap();

    assert_eq!(agent.kind(), AgentKind::Sarsa);
    assert_eq!(*agent.hyperparameters(), params(0.2, 0.95, 0.05));
}

#[test]
fn test_unknown_agent_name_is_explicit_error() {
    let config = Config::parse(
        "AGENT_NAME=monte_carlo\nAGENT_ALPHA=0.2\nAGENT_GAMMA=0.95\nAGENT_EPSILON=0.05\n",
    )
    .unwrap();
    assert!(matches!(
        Agent::from_config(&config),
        Err(TabulaError::UnknownAgent(_))
    ));
}

#[test]
#[should_panic]
fn test_selection_without_actions_panics() {
    let table = ValueTable::new(1, 0, 0.0);
    let agent = Agent::new(AgentKind::QLearning, params(0.1, 0.9, 0.0));
    agent.select_action(&table, 0, &mut StdRng::seed_from_u64(1));
}
