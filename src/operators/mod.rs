//! Coloring operators.
//!
//! The building blocks of one generation, in data-flow order:
//!
//! - [`crossover`]: greedy partition crossover from two parents; leftovers go
//!   to a [`Pool`](crate::coloring::Pool)
//! - [`fix_conflicts`]: drains the pool into least-conflict classes
//! - [`search_back`]: removes the smallest class, redistributing its members
//! - [`local_search`]: tabu-guarded descent on conflicting vertices
//! - [`generate_child`]: the full pipeline with the reduction acceptance rule
//!
//! plus [`random_greedy`] for seeding the population.
//!
//! # References
//!
//! - Galinier, P. & Hao, J.-K. (1999), "Hybrid Evolutionary Algorithms for
//!   Graph Coloring", *Journal of Combinatorial Optimization* 3, 379-397
//! - Hertz, A. & de Werra, D. (1987), "Using tabu search techniques for graph
//!   coloring", *Computing* 39, 345-351

mod child;
mod crossover;
mod init;
mod local_search;
mod repair;
mod search_back;

pub use child::{generate_child, ChildReport};
pub use crossover::crossover;
pub use init::random_greedy;
pub use local_search::{local_search, LocalSearchConfig, LocalSearchOutcome};
pub use repair::{fix_conflicts, RepairOutcome};
pub use search_back::search_back;
