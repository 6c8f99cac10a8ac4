//! Pool repair.

use crate::coloring::{Coloring, Pool};
use crate::graph::Graph;

/// What [`fix_conflicts`] had to give up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepairOutcome {
    /// Pooled vertices that could only be placed with a nonzero cost. This is
    /// a vertex count; the weighted cost is in `total_conflicts`.
    pub conflicting_vertices: usize,
    /// Conflict weight added to the coloring while draining the pool.
    pub total_conflicts: u64,
}

/// Places every pooled vertex into the class where it adds the least
/// conflict weight, lowest class index on ties.
///
/// Vertices are taken heaviest first, so high-weight vertices get the first
/// pick of classes. The pool is empty afterwards and the coloring's
/// `uncolored` count has dropped by the pool size; its fitness has grown by
/// exactly `total_conflicts`.
///
/// # Panics
/// Panics (in debug builds) if the pool is nonempty and the coloring has no
/// classes.
pub fn fix_conflicts(graph: &Graph, coloring: &mut Coloring, pool: &mut Pool) -> RepairOutcome {
    let mut outcome = RepairOutcome::default();
    if pool.is_empty() {
        return outcome;
    }
    debug_assert!(coloring.color_count() > 0, "nowhere to place pooled vertices");

    for v in pool.drain_by_weight(graph) {
        let (best, cost) = (0..coloring.color_count())
            .map(|c| (c, coloring.placement_cost(graph, v, c)))
            .min_by_key(|&(c, cost)| (cost, c))
            .unwrap_or((0, 0));
        coloring.assign(graph, v, best);
        if cost > 0 {
            outcome.conflicting_vertices += 1;
            outcome.total_conflicts += cost;
        }
    }
    outcome
}
