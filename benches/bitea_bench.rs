//! Criterion benchmarks for u-bitea.
//!
//! Uses seeded G(n, p) random graphs so the numbers measure operator and
//! loop overhead rather than instance-specific luck.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use u_bitea::bitea::{BitEaConfig, BitEaRunner};
use u_bitea::graph::Graph;
use u_bitea::operators::{generate_child, local_search, random_greedy, LocalSearchConfig};
use u_bitea::random::create_rng;

fn random_graph(n: usize, density: f64, seed: u64) -> Graph {
    let mut rng = create_rng(seed);
    let mut edges = Vec::new();
    for u in 0..n {
        for v in (u + 1)..n {
            if rng.random_bool(density) {
                edges.push((u, v));
            }
        }
    }
    Graph::from_edges(n, &edges).expect("valid random graph")
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_generate_child(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_child");
    group.sample_size(20);

    for &(n, k) in &[(125usize, 17usize), (250, 28), (500, 48)] {
        let graph = random_graph(n, 0.5, 42);
        let mut rng = create_rng(7);
        let p1 = random_greedy(&graph, k, &mut rng);
        let p2 = random_greedy(&graph, k, &mut rng);
        let local = LocalSearchConfig::default();
        group.bench_with_input(
            BenchmarkId::new(format!("n{n}_k{k}"), n),
            &(graph, p1, p2),
            |b, (g, p1, p2)| {
                b.iter(|| {
                    let child = generate_child(black_box(g), p1, p2, k, &local, true);
                    black_box(child)
                })
            },
        );
    }
    group.finish();
}

fn bench_local_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("local_search");
    group.sample_size(20);

    for &(n, k) in &[(125usize, 17usize), (250, 28)] {
        let graph = random_graph(n, 0.5, 42);
        let start = random_greedy(&graph, k, &mut create_rng(7));
        let local = LocalSearchConfig::default().with_max_iterations(500);
        group.bench_with_input(BenchmarkId::from_parameter(n), &(graph, start), |b, (g, s)| {
            b.iter(|| {
                let mut coloring = s.clone();
                let outcome = local_search(black_box(g), &mut coloring, &local);
                black_box(outcome)
            })
        });
    }
    group.finish();
}

fn bench_bitea_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("bitea_run");
    group.sample_size(10);

    for &(n, k) in &[(100usize, 15usize), (250, 28)] {
        let graph = random_graph(n, 0.5, 42);
        let config = BitEaConfig::new(k)
            .with_population_size(20)
            .with_max_generations(200)
            .with_seed(42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &(graph, config), |b, (g, c)| {
            b.iter(|| {
                let result = BitEaRunner::run(black_box(g), black_box(c));
                black_box(result)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generate_child, bench_local_search, bench_bitea_run);
criterion_main!(benches);
