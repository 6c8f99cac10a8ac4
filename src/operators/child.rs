//! Offspring construction: crossover, repair, reduction, polish.

use super::crossover::crossover;
use super::local_search::{local_search, LocalSearchConfig};
use super::repair::fix_conflicts;
use super::search_back::search_back;
use crate::bitset::Bitset;
use crate::coloring::{Coloring, Pool};
use crate::graph::Graph;

/// Summary of one [`generate_child`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildReport {
    /// Fitness of the finished child.
    pub fitness: u64,
    /// Color count of the finished child.
    pub color_count: usize,
    /// Uncolored vertices of the finished child (always zero).
    pub uncolored: usize,
    /// Whether a color class was removed and the removal kept.
    pub reduced: bool,
    /// Local-search moves applied, including those of a kept reduction.
    pub moves: usize,
}

/// Builds one complete child from two parents.
///
/// Pipeline: [`crossover`] into `target_color_count` slots, [`fix_conflicts`]
/// on the pool, then [`local_search`]. If `reduce` is set and more than one
/// class is left, a copy of the polished child goes through [`search_back`],
/// repair and its own local search. The reduced copy is kept only when its
/// polished fitness is not worse than the polished unreduced child's, so
/// turning reduction on never yields a child with higher fitness than
/// turning it off.
///
/// Empty classes left by crossover are dropped before the reduction step,
/// since they cost nothing to remove.
pub fn generate_child(
    graph: &Graph,
    parent1: &Coloring,
    parent2: &Coloring,
    target_color_count: usize,
    local: &LocalSearchConfig,
    reduce: bool,
) -> (Coloring, ChildReport) {
    let n = graph.size();
    let mut child = Coloring::empty(n, target_color_count.max(1));
    let mut pool = Pool::new(n);
    let mut used = Bitset::new(n);

    crossover(graph, [parent1, parent2], &mut child, &mut pool, &mut used);
    fix_conflicts(graph, &mut child, &mut pool);
    child.compact();

    let mut moves = local_search(graph, &mut child, local).moves;
    let mut reduced = false;
    if reduce && child.color_count() > 1 {
        let mut trial = child.clone();
        search_back(graph, &mut trial, &mut pool);
        fix_conflicts(graph, &mut trial, &mut pool);
        let polished = local_search(graph, &mut trial, local);
        if trial.fitness() <= child.fitness() {
            log::trace!(
                "reduction kept: {} -> {} colors, fitness {} -> {}",
                child.color_count(),
                trial.color_count(),
                child.fitness(),
                trial.fitness()
            );
            child = trial;
            reduced = true;
            moves += polished.moves;
        }
    }

    let report = ChildReport {
        fitness: child.fitness(),
        color_count: child.color_count(),
        uncolored: child.uncolored(),
        reduced,
        moves,
    };
    (child, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::random_greedy;
    use crate::random::create_rng;
    use rand::Rng;

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

    #[test]
    fn test_child_is_complete_partition() {
        let g = Graph::complete(4).unwrap();
        let p1 = Coloring::from_assignment(&g, &[Some(0), Some(0), Some(1), Some(2)], 3).unwrap();
        let p2 = Coloring::from_assignment(&g, &[Some(2), Some(1), Some(0), Some(0)], 3).unwrap();
        let (child, report) = generate_child(&g, &p1, &p2, 3, &LocalSearchConfig::default(), true);
        assert!(child.is_partition());
        assert_eq!(report.uncolored, 0);
        assert_eq!(child.fitness(), child.recompute_fitness(&g));
        assert!(report.fitness > 0, "K4 has no proper 3-coloring");
        assert_eq!(report.color_count, 3, "dropping to 2 colors only adds conflicts");
        assert!(!report.reduced);
    }

    #[test]
    fn test_reduction_kept_when_free() {
        let g = Graph::cycle(4).unwrap();
        // both parents waste a color on a single vertex
        let p = Coloring::from_assignment(&g, &[Some(0), Some(1), Some(0), Some(2)], 3).unwrap();
        let (child, report) = generate_child(&g, &p, &p, 3, &LocalSearchConfig::default(), true);
        assert!(child.is_proper(&g));
        assert_eq!(report.color_count, 2);
        assert_eq!(report.fitness, 0);
    }

    #[test]
    fn test_reduction_disabled_keeps_target() {
        let g = Graph::from_edges(3, &[]).unwrap();
        let p = Coloring::from_assignment(&g, &[Some(0), Some(1), Some(2)], 3).unwrap();
        let (child, report) = generate_child(&g, &p, &p, 3, &LocalSearchConfig::default(), false);
        assert_eq!(child.color_count(), 3);
        assert!(!report.reduced);
        assert_eq!(report.fitness, 0);
    }

    #[test]
    fn test_bipartite_child_is_proper() {
        let g = Graph::cycle(8).unwrap();
        let even_odd: Vec<Option<usize>> = (0..8).map(|v| Some(v % 2)).collect();
        let shifted: Vec<Option<usize>> = (0..8).map(|v| Some((v + 1) % 2)).collect();
        let p1 = Coloring::from_assignment(&g, &even_odd, 2).unwrap();
        let p2 = Coloring::from_assignment(&g, &shifted, 2).unwrap();
        let (child, report) = generate_child(&g, &p1, &p2, 2, &LocalSearchConfig::default(), true);
        assert!(child.is_proper(&g));
        assert_eq!(report.color_count, 2);
    }

    #[test]
    fn test_kept_reduction_never_worse_than_plain_child() {
        let local = LocalSearchConfig::default();
        for seed in 0..60 {
            let g = random_graph(40, 0.4, seed);
            let mut rng = create_rng(seed + 1_000);
            let p1 = random_greedy(&g, 7, &mut rng);
            let p2 = random_greedy(&g, 7, &mut rng);

            let (plain, plain_report) = generate_child(&g, &p1, &p2, 7, &local, false);
            let (child, report) = generate_child(&g, &p1, &p2, 7, &local, true);

            assert!(
                report.fitness <= plain_report.fitness,
                "seed {seed}: reduced child fitness {} ({} colors) worse than {} ({} colors)",
                report.fitness,
                report.color_count,
                plain_report.fitness,
                plain_report.color_count
            );
            if report.reduced {
                assert_eq!(report.color_count + 1, plain_report.color_count);
            } else {
                assert_eq!(child, plain, "seed {seed}: rejected reduction must leave the child as is");
            }
        }
    }
}
