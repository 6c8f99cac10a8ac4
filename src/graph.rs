//! Dense bit-adjacency graph with vertex weights.
//!
//! Each vertex owns one [`Bitset`] row holding its neighbors. Weights scale
//! the conflict cost of an edge and order repair decisions; when no weights
//! are supplied they default to vertex degree.

use crate::bitset::Bitset;
use crate::error::{ColoringError, Result};

/// An undirected, simple, vertex-weighted graph. Immutable during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    edges: Vec<Bitset>,
    weights: Vec<u64>,
}

impl Graph {
    /// Builds a graph from an edge list, with degree weights.
    ///
    /// Self-loops and duplicate edges are ignored.
    ///
    /// # Errors
    /// Returns [`ColoringError::InvalidGraph`] if `size == 0` or an endpoint
    /// is out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_bitea::graph::Graph;
    ///
    /// let square = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
    /// assert_eq!(square.edge_count(), 4);
    /// assert_eq!(square.weight(0), 2);
    /// ```
    pub fn from_edges(size: usize, edges: &[(usize, usize)]) -> Result<Self> {
        if size == 0 {
            return Err(ColoringError::graph("graph must have at least one vertex"));
        }
        let mut rows = vec![Bitset::new(size); size];
        for &(u, v) in edges {
            if u >= size || v >= size {
                return Err(ColoringError::graph(format!(
                    "edge ({u}, {v}) out of range for {size} vertices"
                )));
            }
            if u == v {
                continue;
            }
            rows[u].insert(v);
            rows[v].insert(u);
        }
        Self::from_adjacency(rows)
    }

    /// Builds a graph from adjacency rows, with degree weights.
    ///
    /// Rows are symmetrized and the diagonal is cleared.
    ///
    /// # Errors
    /// Returns [`ColoringError::InvalidGraph`] if there are no rows or a row's
    /// capacity differs from the row count.
    pub fn from_adjacency(mut rows: Vec<Bitset>) -> Result<Self> {
        let size = rows.len();
        if size == 0 {
            return Err(ColoringError::graph("graph must have at least one vertex"));
        }
        if let Some(bad) = rows.iter().position(|r| r.capacity() != size) {
            return Err(ColoringError::graph(format!(
                "adjacency row {bad} has capacity {}, expected {size}",
                rows[bad].capacity()
            )));
        }
        for u in 0..size {
            rows[u].remove(u);
            let neighbors: Vec<usize> = rows[u].iter().collect();
            for v in neighbors {
                rows[v].insert(u);
            }
        }
        let weights = rows.iter().map(|r| r.count() as u64).collect();
        Ok(Self {
            edges: rows,
            weights,
        })
    }

    /// Replaces the degree weights with explicit ones.
    ///
    /// # Errors
    /// Returns [`ColoringError::InvalidGraph`] if the length does not match.
    pub fn with_weights(mut self, weights: Vec<u64>) -> Result<Self> {
        if weights.len() != self.size() {
            return Err(ColoringError::graph(format!(
                "expected {} weights, got {}",
                self.size(),
                weights.len()
            )));
        }
        self.weights = weights;
        Ok(self)
    }

    /// Sets every vertex weight to `w`.
    pub fn with_uniform_weights(mut self, w: u64) -> Self {
        self.weights.iter_mut().for_each(|x| *x = w);
        self
    }

    /// Number of vertices.
    #[inline]
    pub fn size(&self) -> usize {
        self.edges.len()
    }

    /// Neighbor set of `v`.
    #[inline]
    pub fn neighbors(&self, v: usize) -> &Bitset {
        &self.edges[v]
    }

    #[inline]
    pub fn weight(&self, v: usize) -> u64 {
        self.weights[v]
    }

    pub fn weights(&self) -> &[u64] {
        &self.weights
    }

    #[inline]
    pub fn degree(&self, v: usize) -> usize {
        self.edges[v].count()
    }

    #[inline]
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.edges[u].contains(v)
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(Bitset::count).sum::<usize>() / 2
    }

    /// Conflict cost of the edge `(u, v)` when both ends share a color.
    #[inline]
    pub fn edge_cost(&self, u: usize, v: usize) -> u64 {
        self.weights[u] + self.weights[v]
    }

    /// Total conflict cost `v` would incur among `members`:
    /// `Σ w(u) + w(v)` over neighbors `u` of `v` in `members`.
    ///
    /// `v` itself is never counted, whether or not it is in `members`.
    #[inline]
    pub fn conflict_cost(&self, v: usize, members: &Bitset) -> u64 {
        let wv = self.weights[v];
        self.edges[v]
            .iter_intersection(members)
            .map(|u| self.weights[u] + wv)
            .sum()
    }

    /// Cycle `0 - 1 - ... - (n-1) - 0`.
    pub fn cycle(n: usize) -> Result<Self> {
        let edges: Vec<(usize, usize)> = (0..n).map(|i| (i, (i + 1) % n)).collect();
        Self::from_edges(n, &edges)
    }

    /// Complete graph on `n` vertices.
    pub fn complete(n: usize) -> Result<Self> {
        let mut edges = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for u in 0..n {
            for v in (u + 1)..n {
                edges.push((u, v));
            }
        }
        Self::from_edges(n, &edges)
    }
}
