//! Greedy partition crossover.
//!
//! The child is built one color class at a time. For slot `i` the *scanned*
//! parent is `i % 2`; each parent offers its unconsumed class with the most
//! fresh vertices (vertices not yet committed to the child), and the larger
//! offer wins. Ties go to the scanned parent, and within one parent to the
//! lowest class index, so a given pair of parents always yields the same
//! child.
//!
//! The winning class is consumed: its fresh vertices are copied into the
//! child slot unless they have a neighbor already there, in which case they
//! go to the pool. The pool is then swept into the same slot wherever that
//! adds no conflict. Anything still uncommitted after the last slot ends up
//! in the pool for [`fix_conflicts`](super::fix_conflicts).
//!
//! Every child class produced here is an independent set, so the child
//! leaves crossover with zero fitness and `uncolored == pool.count()`.

use crate::bitset::Bitset;
use crate::coloring::{Coloring, Pool};
use crate::graph::Graph;

/// Builds `child`'s classes from two parents.
///
/// `child` must be uncolored; its class count is the target color count.
/// `used` is the used-vertex tracker and should start empty: a vertex is
/// inserted into at most one child class, and only if it is not yet in
/// `used`.
///
/// Returns the number of vertices newly committed to the child.
pub fn crossover(
    graph: &Graph,
    parents: [&Coloring; 2],
    child: &mut Coloring,
    pool: &mut Pool,
    used: &mut Bitset,
) -> usize {
    debug_assert_eq!(child.uncolored(), graph.size(), "child must start uncolored");

    let mut consumed = [
        vec![false; parents[0].color_count()],
        vec![false; parents[1].color_count()],
    ];
    let mut newly_used = 0;

    for slot in 0..child.color_count() {
        let scanned = slot % 2;
        let other = 1 - scanned;

        let pick = match (
            best_class(parents[scanned], &consumed[scanned], used),
            best_class(parents[other], &consumed[other], used),
        ) {
            (Some(a), Some(b)) if b.1 > a.1 => Some((other, b.0)),
            (Some(a), _) => Some((scanned, a.0)),
            (None, Some(b)) => Some((other, b.0)),
            (None, None) => None,
        };

        if let Some((p, c)) = pick {
            consumed[p][c] = true;
            newly_used += fill_slot(graph, parents[p].class(c), slot, child, pool, used);
        }
        newly_used += sweep_pool(graph, slot, child, pool, used);
    }

    let mut leftover = Bitset::full(graph.size());
    leftover.difference_with(used);
    pool.extend(&leftover);

    newly_used
}

/// `(class index, fresh member count)` of the parent's unconsumed class with
/// the most vertices outside `used`.
fn best_class(parent: &Coloring, consumed: &[bool], used: &Bitset) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    for (c, class) in parent.classes().iter().enumerate() {
        if consumed[c] {
            continue;
        }
        let fresh = class.difference_count(used);
        if best.map_or(true, |(_, n)| fresh > n) {
            best = Some((c, fresh));
        }
    }
    best
}

fn fill_slot(
    graph: &Graph,
    source: &Bitset,
    slot: usize,
    child: &mut Coloring,
    pool: &mut Pool,
    used: &mut Bitset,
) -> usize {
    let mut placed = 0;
    for v in source {
        if used.contains(v) {
            continue;
        }
        if graph.neighbors(v).intersects(child.class(slot)) {
            pool.insert(v);
            continue;
        }
        child.assign(graph, v, slot);
        used.insert(v);
        pool.remove(v);
        placed += 1;
    }
    placed
}

fn sweep_pool(
    graph: &Graph,
    slot: usize,
    child: &mut Coloring,
    pool: &mut Pool,
    used: &mut Bitset,
) -> usize {
    let waiting: Vec<usize> = pool.members().iter().collect();
    let mut placed = 0;
    for v in waiting {
        if graph.neighbors(v).intersects(child.class(slot)) {
            continue;
        }
        child.assign(graph, v, slot);
        used.insert(v);
        pool.remove(v);
        placed += 1;
    }
    placed
}
