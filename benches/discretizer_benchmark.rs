use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use latticerl::agent::{Learner, QLearning};
use latticerl::builders::QLearningBuilder;
use latticerl::discretizer::Discretizer;
use latticerl::environment::{CartPole, Environment};
use latticerl::types::State;

fn bench_nearest_state(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest_state");
    let env = CartPole::new();

    for points in [3usize, 5, 7] {
        let discretizer = Discretizer::from_features(&env.features(), &[points; 4]).unwrap();
        let query = [0.3, -0.2, 0.05, 0.4];
        group.bench_with_input(BenchmarkId::from_parameter(discretizer.len()), &discretizer, |b, d| {
            b.iter(|| d.nearest(black_box(&query)).unwrap())
        });
    }

    group.finish();
}

fn cart_pole_learner(env: &CartPole) -> QLearning {
    QLearningBuilder::new()
        .state_grid(&[5, 5, 5, 5])
        .action_grid(3)
        .epochs(1)
        .alpha(0.1)
        .gamma(0.9)
        .lambda(0.9)
        .epsilon(0.1)
        .seed(0)
        .build(env)
        .unwrap()
}

fn bench_trace_update(c: &mut Criterion) {
    let env = CartPole::new();
    let mut learner = cart_pole_learner(&env);
    let state = learner.discretize(State::raw(vec![0.0; 4])).unwrap();
    let next = learner.discretize(State::raw(vec![0.1, 0.0, 0.02, 0.0])).unwrap();
    let action = learner.table().actions()[1].selected(true);

    c.bench_function("qlearning_update_625x3", |b| {
        b.iter(|| learner.update(black_box(&state), &action, -1.0, black_box(&next)).unwrap())
    });
}

fn bench_cart_pole_epoch(c: &mut Criterion) {
    let mut group = c.benchmark_group("cart_pole");
    group.sample_size(10);

    group.bench_function("one_epoch", |b| {
        b.iter(|| {
            let mut env = CartPole::new();
            let mut learner = cart_pole_learner(&env);
            learner.learn(&mut env).unwrap()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_nearest_state, bench_trace_update, bench_cart_pole_epoch);
criterion_main!(benches);
