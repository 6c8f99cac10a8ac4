use proptest::prelude::*;
use rand::Rng;
use u_bitea::bitset::Bitset;
use u_bitea::coloring::{Coloring, Pool};
use u_bitea::graph::Graph;
use u_bitea::operators::{
    crossover, fix_conflicts, generate_child, local_search, random_greedy, search_back,
    LocalSearchConfig,
};
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
    Graph::from_edges(n, &edges).unwrap()
}

/// (graph, parent 1, parent 2, target color count)
fn instance() -> impl Strategy<Value = (Graph, Coloring, Coloring, usize)> {
    (1usize..48, 0.0f64..0.9, any::<u64>(), 1usize..7, 1usize..7, 1usize..7).prop_map(
        |(n, density, seed, k1, k2, target)| {
            let graph = random_graph(n, density, seed);
            let mut rng = create_rng(seed ^ 0x5eed);
            let p1 = random_greedy(&graph, k1, &mut rng);
            let p2 = random_greedy(&graph, k2, &mut rng);
            (graph, p1, p2, target)
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_crossover_commits_each_vertex_at_most_once((graph, p1, p2, k) in instance()) {
        let n = graph.size();
        let mut child = Coloring::empty(n, k);
        let mut pool = Pool::new(n);
        let mut used = Bitset::new(n);
        let placed = crossover(&graph, [&p1, &p2], &mut child, &mut pool, &mut used);

        prop_assert_eq!(placed, used.count(), "return value counts committed vertices");
        prop_assert_eq!(placed + pool.count(), n, "committed and pooled vertices cover the graph");
        prop_assert!(!pool.members().intersects(&used), "pooled vertices are never committed");
        let mut seen = Bitset::new(n);
        for class in child.classes() {
            prop_assert!(!seen.intersects(class), "vertex placed in two child classes");
            seen.union_with(class);
        }
        prop_assert_eq!(&seen, &used, "tracker matches the filled classes");
        prop_assert_eq!(child.uncolored(), pool.count());
        prop_assert_eq!(child.fitness(), 0, "every crossover class is an independent set");
    }

    #[test]
    fn test_repair_empties_pool((graph, p1, p2, k) in instance()) {
        let n = graph.size();
        let mut child = Coloring::empty(n, k);
        let mut pool = Pool::new(n);
        let mut used = Bitset::new(n);
        crossover(&graph, [&p1, &p2], &mut child, &mut pool, &mut used);
        let outcome = fix_conflicts(&graph, &mut child, &mut pool);

        prop_assert!(pool.is_empty());
        prop_assert_eq!(child.uncolored(), 0);
        prop_assert_eq!(child.fitness(), outcome.total_conflicts);
        prop_assert_eq!(child.fitness(), child.recompute_fitness(&graph));
    }

    #[test]
    fn test_child_is_complete_partition((graph, p1, p2, k) in instance(), reduce in any::<bool>()) {
        let (child, report) =
            generate_child(&graph, &p1, &p2, k, &LocalSearchConfig::default(), reduce);

        prop_assert!(child.is_partition(), "each vertex in at most one class");
        prop_assert_eq!(child.uncolored(), 0, "child must be complete");
        prop_assert_eq!(child.fitness(), child.recompute_fitness(&graph), "cached fitness drifted");
        prop_assert!(child.color_count() <= k);
        prop_assert_eq!(report.fitness, child.fitness());
        prop_assert_eq!(report.color_count, child.color_count());
        prop_assert_eq!(child.fitness() == 0, child.is_proper(&graph));
    }

    #[test]
    fn test_reduction_never_raises_child_fitness((graph, p1, p2, k) in instance()) {
        let local = LocalSearchConfig::default();
        let (plain, plain_report) = generate_child(&graph, &p1, &p2, k, &local, false);
        let (child, report) = generate_child(&graph, &p1, &p2, k, &local, true);

        prop_assert!(report.fitness <= plain_report.fitness, "kept reduction raised fitness");
        if !report.reduced {
            prop_assert_eq!(&child, &plain);
        }
    }

    #[test]
    fn test_local_search_never_worsens((graph, p1, _p2, _k) in instance(), tenure in 0usize..10) {
        let mut coloring = p1.clone();
        let config = LocalSearchConfig::default().with_max_iterations(100).with_tabu_tenure(tenure);
        let outcome = local_search(&graph, &mut coloring, &config);

        prop_assert!(outcome.final_fitness <= outcome.initial_fitness);
        prop_assert_eq!(outcome.initial_fitness, p1.fitness());
        prop_assert_eq!(outcome.final_fitness, coloring.fitness());
        prop_assert_eq!(coloring.fitness(), coloring.recompute_fitness(&graph));
        prop_assert!(coloring.is_partition());
        prop_assert_eq!(coloring.uncolored(), 0);
        prop_assert_eq!(coloring.color_count(), p1.color_count());
    }

    #[test]
    fn test_search_back_drops_one_class((graph, p1, _p2, _k) in instance()) {
        let mut coloring = p1.clone();
        let mut pool = Pool::new(graph.size());
        let removed = search_back(&graph, &mut coloring, &mut pool);

        if p1.color_count() < 2 {
            prop_assert!(removed.is_none());
            prop_assert_eq!(&coloring, &p1);
        } else {
            prop_assert!(removed.is_some());
            prop_assert_eq!(coloring.color_count(), p1.color_count() - 1);
            prop_assert_eq!(coloring.uncolored(), pool.count());
            prop_assert!(coloring.fitness() <= p1.fitness(), "re-placement adds no conflict");
            prop_assert_eq!(coloring.fitness(), coloring.recompute_fitness(&graph));
        }
    }
}
