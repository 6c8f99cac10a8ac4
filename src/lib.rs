//! Bit-parallel evolutionary algorithm for weighted graph k-coloring.
//!
//! Colorings are stored as one [`Bitset`](bitset::Bitset) per color class,
//! so conflict counting, crossover, and repair reduce to word-wide AND,
//! OR, and popcount over adjacency rows.
//!
//! - **Graph**: immutable vertex-weighted adjacency bitsets ([`graph`])
//! - **Coloring**: color classes with cached weighted conflict ([`coloring`])
//! - **Operators**: partition crossover, conflict repair, color-class
//!   removal, tabu local search, and the child pipeline ([`operators`])
//! - **BitEA**: concurrent steady-state evolutionary loop ([`bitea`])
//! - **I/O**: DIMACS graphs, weight files, coloring output ([`io`])
//!
//! # Quick Start
//!
//! ```
//! use u_bitea::prelude::*;
//!
//! let graph = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
//! let config = BitEaConfig::new(2).with_seed(7);
//! let result = bit_ea(&graph, &config).unwrap();
//! assert_eq!(result.best_fitness, 0);
//! assert!(result.best.is_proper(&graph));
//! ```
//!
//! Fitness is the sum of `w(u) + w(v)` over monochromatic edges, with vertex
//! weights defaulting to degrees. Lower is better; zero means proper.

pub mod bitea;
pub mod bitset;
pub mod coloring;
pub mod error;
pub mod graph;
pub mod io;
pub mod operators;
pub mod random;

use bitea::{BitEaConfig, BitEaResult, BitEaRunner};
use error::Result;
use graph::Graph;

/// Runs BitEA on `graph`. Shorthand for [`BitEaRunner::run`].
pub fn bit_ea(graph: &Graph, config: &BitEaConfig) -> Result<BitEaResult> {
    BitEaRunner::run(graph, config)
}

/// Common imports.
pub mod prelude {
    pub use crate::bit_ea;
    pub use crate::bitea::{BitEaConfig, BitEaResult, BitEaRunner, Score, Selection};
    pub use crate::bitset::Bitset;
    pub use crate::coloring::{Coloring, Pool};
    pub use crate::error::ColoringError;
    pub use crate::graph::Graph;
    pub use crate::operators::{generate_child, LocalSearchConfig};
}
