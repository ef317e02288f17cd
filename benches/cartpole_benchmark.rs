//! CartPole throughput: raw RK4 stepping and short training runs for both
//! agents on the discretized environment.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::f64::consts::PI;
use tabula::agent::{Agent, AgentKind, Hyperparameters};
use tabula::environment::discretize::Bins;
use tabula::environment::{CartPole, CartPoleParams, Env, Environment};
use tabula::trainer::{Trainer, TrainerSettings};

fn params() -> CartPoleParams {
    CartPoleParams {
        g: 9.80665,
        cart_mass: 1.0,
        pole_mass: 0.1,
        pole_length: 0.5,
        tau: 0.02,
        forces: vec![-10.0, 10.0],
        bins: [
            Bins::new(-2.0, 2.0, 4).unwrap(),
            Bins::new(-PI, PI, 40).unwrap(),
            Bins::new(-2.0, 2.0, 10).unwrap(),
            Bins::new(-10.0, 10.0, 50).unwrap(),
        ],
        x_penalty: 0.0,
        init_theta: PI,
    }
}

fn bench_step(c: &mut Criterion) {
    let mut cartpole = CartPole::new(params());
    let mut action = 0;

    c.bench_function("cartpole_step", |b| {
        b.iter(|| {
            action = 1 - action;
            cartpole.step(black_box(action));
            black_box(cartpole.state())
        })
    });
}

fn bench_training(c: &mut Criterion) {
    let mut group = c.benchmark_group("cartpole_training");
    group.sample_size(10);

    for kind in [AgentKind::QLearning, AgentKind::Sarsa] {
        group.bench_with_input(BenchmarkId::from_parameter(kind), &kind, |b, &kind| {
            b.iter(|| {
                let agent = Agent::new(kind, Hyperparameters::new(0.5, 0.99, 0.1).unwrap());
                let env = Env::from(CartPole::new(params()));
                let mut trainer = Trainer::new(agent, env, TrainerSettings::new(10, 500, 0.0), Some(0));
                black_box(trainer.train())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_step, bench_training);
criterion_main!(benches);
