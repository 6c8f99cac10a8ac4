//! Bitset evolutionary algorithm for weighted graph k-coloring.
//!
//! A steady-state EA: several generators concurrently pick two parents
//! from a shared population, build a child with the
//! [`operators`](crate::operators) pipeline, and let it replace the worst
//! member when it scores strictly better.
//!
//! # Key Types
//!
//! - [`BitEaConfig`]: Algorithm parameters (population size, target colors, presets)
//! - [`BitEaRunner`]: Executes the generational loop
//! - [`BitEaResult`]: Best coloring plus run statistics
//! - [`Score`]: Lexicographic ranking key (uncolored, conflicts, colors)
//!
//! # References
//!
//! - Galinier & Hao (1999), "Hybrid Evolutionary Algorithms for Graph Coloring"
//! - Lü & Hao (2010), "A memetic algorithm for graph coloring"

mod config;
mod population;
mod runner;
mod selection;
mod types;

pub use config::BitEaConfig;
pub use population::Population;
pub use runner::{BitEaResult, BitEaRunner};
pub use selection::Selection;
pub use types::{Fitness, Individual, Score};
