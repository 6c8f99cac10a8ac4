//! Parent selection strategies.
//!
//! Selection reads the population under a shared lock, so it must never
//! mutate it. All strategies assume **minimization** (lower fitness = better).
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use super::types::Individual;
use rand::Rng;

/// Selection strategy for choosing parents.
///
/// # Examples
///
/// ```
/// use u_bitea::bitea::Selection;
///
/// // Uniform random parents (the default)
/// let sel = Selection::default();
/// assert_eq!(sel, Selection::Uniform);
///
/// // Tournament with size 2 (light pressure toward fitter parents)
/// let sel = Selection::Tournament(2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Every individual is equally likely.
    ///
    /// # Complexity
    /// O(1) per selection
    #[default]
    Uniform,

    /// Tournament selection: pick `k` individuals at random, select the best.
    ///
    /// # Complexity
    /// O(k) per selection
    Tournament(usize),

    /// Linear rank-based selection: the best of `n` individuals has weight
    /// `n`, the worst weight 1.
    ///
    /// # Complexity
    /// O(n log n) per selection
    Rank,
}

impl Selection {
    /// Select a parent index from the population.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn select<I: Individual, R: Rng>(&self, population: &[I], rng: &mut R) -> usize {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );

        match self {
            Selection::Uniform => rng.random_range(0..population.len()),
            Selection::Tournament(k) => tournament(population, *k, rng),
            Selection::Rank => rank(population, rng),
        }
    }

    /// Selects two parents, distinct whenever the population has at least
    /// two individuals.
    ///
    /// The second parent is redrawn a few times if it collides with the
    /// first; after that a uniformly random other index is used, so strong
    /// selection pressure cannot stall the draw.
    pub fn select_pair<I: Individual, R: Rng>(&self, population: &[I], rng: &mut R) -> (usize, usize) {
        let first = self.select(population, rng);
        let n = population.len();
        if n < 2 {
            return (first, first);
        }
        for _ in 0..4 {
            let second = self.select(population, rng);
            if second != first {
                return (first, second);
            }
        }
        let offset = rng.random_range(1..n);
        (first, (first + offset) % n)
    }
}

fn tournament<I: Individual, R: Rng>(population: &[I], k: usize, rng: &mut R) -> usize {
    let k = k.max(1);
    let n = population.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if population[idx].fitness() < population[best_idx].fitness() {
            best_idx = idx;
        }
    }
    best_idx
}

fn rank<I: Individual, R: Rng>(population: &[I], rng: &mut R) -> usize {
    let n = population.len();
    if n == 1 {
        return 0;
    }

    let mut indexed: Vec<usize> = (0..n).collect();
    indexed.sort_by(|&a, &b| {
        population[a]
            .fitness()
            .partial_cmp(&population[b].fitness())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    // rank 0 (best) has weight n
    let total = n * (n + 1) / 2;
    let mut threshold = rng.random_range(0..total);
    for (rank, &idx) in indexed.iter().enumerate() {
        let weight = n - rank;
        if threshold < weight {
            return idx;
        }
        threshold -= weight;
    }

    indexed[n - 1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitea::Score;
    use crate::random::create_rng;

    #[derive(Clone)]
    struct TestInd {
        fit: Score,
    }

    impl Individual for TestInd {
        type Fitness = Score;
        fn fitness(&self) -> Score {
            self.fit
        }
    }

    fn make_population(conflicts: &[u64]) -> Vec<TestInd> {
        conflicts
            .iter()
            .map(|&c| TestInd {
                fit: Score {
                    uncolored: 0,
                    conflicts: c,
                    colors: 3,
                },
            })
            .collect()
    }

    #[test]
    fn test_uniform_covers_everyone() {
        let pop = make_population(&[10, 5, 1, 8]);
        let mut rng = create_rng(42);
        let mut counts = [0u32; 4];
        for _ in 0..10_000 {
            counts[Selection::Uniform.select(&pop, &mut rng)] += 1;
        }
        for &c in &counts {
            assert!(c > 1500, "expected uniform, got counts: {counts:?}");
        }
    }

    #[test]
    fn test_tournament_favors_best() {
        let pop = make_population(&[10, 5, 1, 8]);
        let mut rng = create_rng(42);
        let mut counts = [0u32; 4];
        let n = 10_000;
        for _ in 0..n {
            counts[Selection::Tournament(4).select(&pop, &mut rng)] += 1;
        }
        let best_count = counts[2];
        assert!(
            best_count > 6000,
            "expected best to be selected >60% of the time, got {best_count}/{n}"
        );
    }

    #[test]
    fn test_rank_favors_best() {
        let pop = make_population(&[100, 50, 1, 80]);
        let mut rng = create_rng(42);
        let mut counts = [0u32; 4];
        for _ in 0..10_000 {
            counts[Selection::Rank.select(&pop, &mut rng)] += 1;
        }
        assert!(
            counts[2] > counts[0],
            "best should be selected more: best={}, worst={}",
            counts[2],
            counts[0]
        );
    }

    #[test]
    fn test_pair_is_distinct() {
        let pop = make_population(&[3, 0, 3, 3, 3]);
        let mut rng = create_rng(7);
        for sel in [Selection::Uniform, Selection::Tournament(5), Selection::Rank] {
            for _ in 0..500 {
                let (a, b) = sel.select_pair(&pop, &mut rng);
                assert_ne!(a, b, "{sel:?} returned the same parent twice");
                assert!(a < pop.len() && b < pop.len());
            }
        }
    }

    #[test]
    fn test_single_individual() {
        let pop = make_population(&[5]);
        let mut rng = create_rng(42);
        assert_eq!(Selection::Uniform.select(&pop, &mut rng), 0);
        assert_eq!(Selection::Tournament(3).select(&pop, &mut rng), 0);
        assert_eq!(Selection::Rank.select(&pop, &mut rng), 0);
        assert_eq!(Selection::Uniform.select_pair(&pop, &mut rng), (0, 0));
    }

    #[test]
    #[should_panic(expected = "cannot select from empty population")]
    fn test_empty_population_panics() {
        let pop: Vec<TestInd> = vec![];
        let mut rng = create_rng(42);
        Selection::Uniform.select(&pop, &mut rng);
    }
}
