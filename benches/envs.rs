//! Environment benchmarks
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use popjym::envs::{CartPoleVariant, Push};
use popjym::simulation::RandomActor;
use popjym::{run_episodes, EnvStructure, Environment, PrngKey};

fn bench_reset(c: &mut Criterion) {
    let env = CartPoleVariant::NoisyStatelessCartPoleEasy.build();
    let params = env.default_params();
    let key = PrngKey::new(0);
    c.bench_function("cartpole_reset", |b| b.iter(|| env.reset(key, &params)));
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("cartpole_step");
    for variant in [
        CartPoleVariant::StatelessCartPoleEasy,
        CartPoleVariant::NoisyStatelessCartPoleHard,
    ] {
        let env = variant.build();
        let params = env.default_params();
        let (_, state) = env.reset(PrngKey::new(0), &params);
        let key = PrngKey::new(1);
        group.bench_function(BenchmarkId::new("step_env", variant), |b| {
            b.iter(|| env.step_env(key, &state, &Push::Right, &params))
        });
        group.bench_function(BenchmarkId::new("step", variant), |b| {
            b.iter(|| env.step(key, &state, &Push::Right, &params))
        });
    }
    group.finish();
}

fn bench_episodes(c: &mut Criterion) {
    let mut group = c.benchmark_group("cartpole_episodes");
    let num_episodes = 10;
    group.throughput(Throughput::Elements(num_episodes as u64));
    let env = CartPoleVariant::NoisyStatelessCartPoleMedium.build();
    let params = env.default_params();
    group.bench_function("random_actor", |b| {
        b.iter(|| {
            let actor = RandomActor::new(env.action_space(&params));
            run_episodes(&env, params, actor, PrngKey::new(2), num_episodes, ())
        })
    });
    group.finish();
}

criterion_group!(benches, bench_reset, bench_step, bench_episodes);
criterion_main!(benches);
