//! Parallel tabu search engine.
//!
//! Provides generic tabu search drivers over user-defined solutions:
//!
//! - **Tabu Search (TS)**: Single-objective trajectory optimization using
//!   short-term memory (tabu list) to escape local optima, with periodic
//!   shuffling after stagnation.
//! - **Pareto Tabu Search**: Multi-objective variant exploring a working set
//!   of solutions and archiving every non-dominated one.
//! - **Quality indicators**: Hypervolume and inverted generational distance
//!   for finished bi-objective fronts.
//! - **Routing**: A reference closed-tour problem with the segment-swap
//!   neighborhood, in single- and multi-objective form.
//!
//! # Architecture
//!
//! Each neighborhood pass is evaluated in parallel on a per-run worker pool.
//! Moves are sharded round-robin and reduced in enumeration order, so a
//! seeded run returns the same result for any pool size. Problems plug in
//! through the [`tabu::Solution`], [`tabu::Neighborhood`] and
//! [`tabu::TabuProblem`] traits; nothing in [`tabu`] or [`pareto`] knows
//! about routing.

pub mod error;
pub mod pareto;
pub mod routing;
pub mod tabu;

pub use error::{Result, SearchError};
