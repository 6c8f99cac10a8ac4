//! Initial individuals.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::coloring::Coloring;
use crate::graph::Graph;

/// Randomized greedy coloring with exactly `color_count` classes.
///
/// Vertices are visited in a random order; each goes to the class where it
/// adds the least conflict weight (lowest index on ties). The result is
/// complete (`uncolored == 0`), and proper whenever first-fit in that order
/// needs no more than `color_count` colors.
pub fn random_greedy<R: Rng>(graph: &Graph, color_count: usize, rng: &mut R) -> Coloring {
    let mut order: Vec<usize> = (0..graph.size()).collect();
    order.shuffle(rng);

    let mut coloring = Coloring::empty(graph.size(), color_count);
    for v in order {
        let best = (0..color_count)
            .min_by_key(|&c| (coloring.placement_cost(graph, v, c), c))
            .unwrap_or(0);
        coloring.assign(graph, v, best);
    }
    coloring
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_complete_and_consistent() {
        let g = Graph::complete(6).unwrap();
        let mut rng = create_rng(42);
        let c = random_greedy(&g, 4, &mut rng);
        assert_eq!(c.color_count(), 4);
        assert_eq!(c.uncolored(), 0);
        assert!(c.is_partition());
        assert_eq!(c.fitness(), c.recompute_fitness(&g));
        assert!(c.fitness() > 0, "K6 cannot be 4-colored");
    }

    #[test]
    fn test_even_cycle_two_colors() {
        let g = Graph::cycle(4).unwrap();
        for seed in 0..20 {
            let mut rng = create_rng(seed);
            let c = random_greedy(&g, 2, &mut rng);
            assert!(c.is_proper(&g), "seed {seed} produced {:?}", c.assignment());
        }
    }

    #[test]
    fn test_seed_reproducible() {
        let g = Graph::cycle(9).unwrap();
        let a = random_greedy(&g, 3, &mut create_rng(5));
        let b = random_greedy(&g, 3, &mut create_rng(5));
        assert_eq!(a, b);
    }
}
