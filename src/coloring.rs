//! Colorings as ordered lists of color-class bitsets.
//!
//! A [`Coloring`] is the individual the evolutionary loop works on. Class `c`
//! is the [`Bitset`] of vertices colored `c`. Alongside the classes it caches
//!
//! - `fitness`: `Σ w(u) + w(v)` over edges `(u, v)` whose ends share a class,
//! - `uncolored`: the number of vertices in no class.
//!
//! Every mutating method keeps both caches exact, so
//! [`recompute_fitness`](Coloring::recompute_fitness) always agrees with
//! [`fitness`](Coloring::fitness) between operator calls.
//!
//! The [`Pool`] holds vertices that an operator has taken out of (or not yet
//! put into) any class; it lives only for the duration of one child
//! construction.

use crate::bitea::{Individual, Score};
use crate::bitset::Bitset;
use crate::error::{ColoringError, Result};
use crate::graph::Graph;

/// A (possibly partial, possibly conflicting) vertex coloring.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coloring {
    size: usize,
    classes: Vec<Bitset>,
    fitness: u64,
    uncolored: usize,
}

impl Coloring {
    /// A coloring with `color_count` empty classes; every vertex uncolored.
    pub fn empty(size: usize, color_count: usize) -> Self {
        Self {
            size,
            classes: vec![Bitset::new(size); color_count],
            fitness: 0,
            uncolored: size,
        }
    }

    /// Builds a coloring from explicit classes and computes both caches.
    ///
    /// Classes are expected to be disjoint; a vertex present in two classes
    /// is counted once for `uncolored` and contributes conflicts in each.
    pub fn from_classes(graph: &Graph, classes: Vec<Bitset>) -> Self {
        let mut coloring = Self {
            size: graph.size(),
            classes,
            fitness: 0,
            uncolored: 0,
        };
        coloring.refresh(graph);
        coloring
    }

    /// Builds a coloring from a per-vertex color list.
    ///
    /// # Errors
    /// Returns [`ColoringError::InvalidGraph`] if the list length differs from
    /// the graph size or a color is `>= color_count`.
    ///
    /// ```
    /// use u_bitea::coloring::Coloring;
    /// use u_bitea::graph::Graph;
    ///
    /// let g = Graph::cycle(4).unwrap();
    /// let c = Coloring::from_assignment(&g, &[Some(0), Some(1), Some(0), Some(1)], 2).unwrap();
    /// assert_eq!(c.fitness(), 0);
    /// assert!(c.is_proper(&g));
    /// ```
    pub fn from_assignment(
        graph: &Graph,
        assignment: &[Option<usize>],
        color_count: usize,
    ) -> Result<Self> {
        if assignment.len() != graph.size() {
            return Err(ColoringError::graph(format!(
                "assignment covers {} vertices, graph has {}",
                assignment.len(),
                graph.size()
            )));
        }
        let mut classes = vec![Bitset::new(graph.size()); color_count];
        for (v, color) in assignment.iter().enumerate() {
            if let Some(c) = *color {
                if c >= color_count {
                    return Err(ColoringError::graph(format!(
                        "vertex {v} has color {c}, only {color_count} colors available"
                    )));
                }
                classes[c].insert(v);
            }
        }
        Ok(Self::from_classes(graph, classes))
    }

    /// Number of vertices in the universe.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn color_count(&self) -> usize {
        self.classes.len()
    }

    #[inline]
    pub fn classes(&self) -> &[Bitset] {
        &self.classes
    }

    #[inline]
    pub fn class(&self, c: usize) -> &Bitset {
        &self.classes[c]
    }

    /// Cached total conflict weight.
    #[inline]
    pub fn fitness(&self) -> u64 {
        self.fitness
    }

    /// Cached number of vertices in no class.
    #[inline]
    pub fn uncolored(&self) -> usize {
        self.uncolored
    }

    /// Ranking key used by selection and replacement.
    #[inline]
    pub fn score(&self) -> Score {
        Score {
            uncolored: self.uncolored,
            conflicts: self.fitness,
            colors: self.classes.len(),
        }
    }

    /// The class containing `v`, if any (first match).
    pub fn color_of(&self, v: usize) -> Option<usize> {
        self.classes.iter().position(|class| class.contains(v))
    }

    /// Per-vertex color list, `None` for uncolored vertices.
    pub fn assignment(&self) -> Vec<Option<usize>> {
        let mut out = vec![None; self.size()];
        for (c, class) in self.classes.iter().enumerate() {
            for v in class {
                out[v].get_or_insert(c);
            }
        }
        out
    }

    /// Conflict weight `v` would add (or currently adds) in class `c`.
    #[inline]
    pub fn placement_cost(&self, graph: &Graph, v: usize, c: usize) -> u64 {
        graph.conflict_cost(v, &self.classes[c])
    }

    /// Puts the uncolored vertex `v` into class `c` and returns the conflict
    /// weight this added.
    ///
    /// # Panics
    /// Panics (in debug builds) if `v` is already colored.
    pub fn assign(&mut self, graph: &Graph, v: usize, c: usize) -> u64 {
        debug_assert!(self.color_of(v).is_none(), "vertex {v} already colored");
        let cost = graph.conflict_cost(v, &self.classes[c]);
        self.classes[c].insert(v);
        self.fitness += cost;
        self.uncolored -= 1;
        cost
    }

    /// Takes `v` out of class `c`. Returns the conflict weight removed, or
    /// `None` if `v` was not in `c`.
    pub fn unassign(&mut self, graph: &Graph, v: usize, c: usize) -> Option<u64> {
        if !self.classes[c].remove(v) {
            return None;
        }
        let cost = graph.conflict_cost(v, &self.classes[c]);
        self.fitness -= cost;
        self.uncolored += 1;
        Some(cost)
    }

    /// Moves `v` from class `from` to class `to`, keeping the caches exact.
    /// Returns the new fitness.
    pub fn move_vertex(&mut self, graph: &Graph, v: usize, from: usize, to: usize) -> u64 {
        debug_assert!(self.classes[from].contains(v), "vertex {v} not in class {from}");
        if from == to {
            return self.fitness;
        }
        self.classes[from].remove(v);
        let removed = graph.conflict_cost(v, &self.classes[from]);
        let added = graph.conflict_cost(v, &self.classes[to]);
        self.classes[to].insert(v);
        self.fitness = self.fitness - removed + added;
        self.fitness
    }

    /// Deletes class `c`, shifting later classes down by one. Its members
    /// become uncolored and are returned.
    pub fn remove_class(&mut self, graph: &Graph, c: usize) -> Bitset {
        let members = self.classes.remove(c);
        self.fitness -= class_conflicts(graph, &members);
        self.uncolored += members.count();
        members
    }

    /// Drops every empty class. Returns how many were dropped.
    pub fn compact(&mut self) -> usize {
        let before = self.classes.len();
        self.classes.retain(|class| !class.is_empty());
        before - self.classes.len()
    }

    /// Total conflict weight computed from scratch.
    pub fn recompute_fitness(&self, graph: &Graph) -> u64 {
        self.classes.iter().map(|class| class_conflicts(graph, class)).sum()
    }

    /// Recomputes both caches from scratch.
    pub fn refresh(&mut self, graph: &Graph) {
        self.fitness = self.recompute_fitness(graph);
        let mut covered = Bitset::new(graph.size());
        for class in &self.classes {
            covered.union_with(class);
        }
        self.uncolored = graph.size() - covered.count();
    }

    /// Vertices with at least one neighbor in their own class.
    pub fn conflicting_vertices(&self, graph: &Graph) -> Bitset {
        let mut out = Bitset::new(graph.size());
        for class in &self.classes {
            for v in class {
                if graph.neighbors(v).intersects(class) {
                    out.insert(v);
                }
            }
        }
        out
    }

    /// Edges `(u, v)`, `u < v`, whose ends share a class.
    pub fn conflicting_edges(&self, graph: &Graph) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for class in &self.classes {
            for u in class {
                out.extend(
                    graph
                        .neighbors(u)
                        .iter_intersection(class)
                        .filter(|&v| v > u)
                        .map(|v| (u, v)),
                );
            }
        }
        out
    }

    /// `true` when every vertex is in exactly one class and no edge is
    /// monochromatic. Checked from scratch, not from the caches.
    pub fn is_proper(&self, graph: &Graph) -> bool {
        self.is_partition() && self.conflicting_edges(graph).is_empty()
    }

    /// `true` when the classes are pairwise disjoint and cover every vertex.
    pub fn is_partition(&self) -> bool {
        let size = self.size();
        let mut seen = Bitset::new(size);
        let mut total = 0;
        for class in &self.classes {
            if seen.intersects(class) {
                return false;
            }
            seen.union_with(class);
            total += class.count();
        }
        total == size
    }
}

impl Individual for Coloring {
    type Fitness = Score;

    fn fitness(&self) -> Score {
        self.score()
    }
}

/// Conflict weight inside one class.
pub(crate) fn class_conflicts(graph: &Graph, class: &Bitset) -> u64 {
    // every monochromatic edge is seen from both ends
    class.iter().map(|v| graph.conflict_cost(v, class)).sum::<u64>() / 2
}

/// Vertices waiting to be placed into a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pool {
    members: Bitset,
}

impl Pool {
    pub fn new(size: usize) -> Self {
        Self {
            members: Bitset::new(size),
        }
    }

    #[inline]
    pub fn insert(&mut self, v: usize) -> bool {
        self.members.insert(v)
    }

    #[inline]
    pub fn remove(&mut self, v: usize) -> bool {
        self.members.remove(v)
    }

    #[inline]
    pub fn contains(&self, v: usize) -> bool {
        self.members.contains(v)
    }

    /// Number of pooled vertices.
    #[inline]
    pub fn count(&self) -> usize {
        self.members.count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &Bitset {
        &self.members
    }

    pub fn extend(&mut self, vertices: &Bitset) {
        self.members.union_with(vertices);
    }

    /// Empties the pool, returning its members heaviest first (ties by
    /// lower index).
    pub fn drain_by_weight(&mut self, graph: &Graph) -> Vec<usize> {
        let mut order: Vec<usize> = self.members.iter().collect();
        order.sort_by(|&a, &b| graph.weight(b).cmp(&graph.weight(a)).then(a.cmp(&b)));
        self.members.clear();
        order
    }
}
