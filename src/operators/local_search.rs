//! Tabu-guarded conflict descent.
//!
//! # Algorithm
//!
//! 1. Collect the conflicting vertices (those with a neighbor in their own
//!    class).
//! 2. For each of them and each other class, compute the conflict weight the
//!    vertex would carry there. Skip `(vertex, class)` pairs that are tabu.
//! 3. Apply the move with the largest strict reduction of total fitness
//!    (first found on ties: lowest vertex, then lowest class) and forbid the
//!    vertex from returning to the class it left for `tabu_tenure`
//!    iterations.
//! 4. Stop when fitness reaches zero, no admissible move improves, or the
//!    iteration budget is spent.
//!
//! Only strictly improving moves are applied, so fitness never increases and
//! a zero-fitness coloring is returned untouched. Uncolored vertices are
//! never moved and never created.
//!
//! # Reference
//!
//! Hertz, A. & de Werra, D. (1987). "Using tabu search techniques for graph
//! coloring", *Computing* 39(4), 345-351.

use crate::coloring::Coloring;
use crate::graph::Graph;

/// Configuration for [`local_search`].
///
/// # Examples
///
/// ```
/// use u_bitea::operators::LocalSearchConfig;
///
/// let config = LocalSearchConfig::default()
///     .with_max_iterations(1000)
///     .with_tabu_tenure(10);
/// assert_eq!(config.max_iterations, 1000);
/// assert_eq!(config.tabu_tenure, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalSearchConfig {
    /// Maximum number of iterations (each applies at most one move).
    pub max_iterations: usize,
    /// How many iterations a vertex may not re-enter the class it just left.
    pub tabu_tenure: usize,
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            tabu_tenure: 7,
        }
    }
}

impl LocalSearchConfig {
    /// Sets the maximum number of iterations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the tabu tenure.
    pub fn with_tabu_tenure(mut self, tenure: usize) -> Self {
        self.tabu_tenure = tenure;
        self
    }
}

/// Statistics of one [`local_search`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalSearchOutcome {
    /// Iterations executed.
    pub iterations: usize,
    /// Moves applied.
    pub moves: usize,
    /// Fitness on entry.
    pub initial_fitness: u64,
    /// Fitness on exit.
    pub final_fitness: u64,
}

/// Relocates conflicting vertices to reduce `coloring`'s fitness in place.
pub fn local_search(
    graph: &Graph,
    coloring: &mut Coloring,
    config: &LocalSearchConfig,
) -> LocalSearchOutcome {
    let mut outcome = LocalSearchOutcome {
        initial_fitness: coloring.fitness(),
        final_fitness: coloring.fitness(),
        ..LocalSearchOutcome::default()
    };
    let k = coloring.color_count();
    if k < 2 || coloring.fitness() == 0 {
        return outcome;
    }

    let mut color: Vec<Option<usize>> = coloring.assignment();
    // tabu_until[v * k + c]: first iteration at which v may enter c again
    let mut tabu_until = vec![0usize; graph.size() * k];

    for iteration in 0..config.max_iterations {
        if coloring.fitness() == 0 {
            break;
        }
        outcome.iterations += 1;

        // (gain, vertex, from, to)
        let mut best: Option<(u64, usize, usize, usize)> = None;
        for v in &coloring.conflicting_vertices(graph) {
            let Some(from) = color[v] else { continue };
            let current = coloring.placement_cost(graph, v, from);
            for to in 0..k {
                if to == from || tabu_until[v * k + to] > iteration {
                    continue;
                }
                let cost = coloring.placement_cost(graph, v, to);
                if cost >= current {
                    continue;
                }
                let gain = current - cost;
                if best.map_or(true, |(g, ..)| gain > g) {
                    best = Some((gain, v, from, to));
                }
            }
        }

        let Some((_, v, from, to)) = best else { break };
        coloring.move_vertex(graph, v, from, to);
        color[v] = Some(to);
        tabu_until[v * k + from] = iteration + 1 + config.tabu_tenure;
        outcome.moves += 1;
    }

    outcome.final_fitness = coloring.fitness();
    outcome
}
