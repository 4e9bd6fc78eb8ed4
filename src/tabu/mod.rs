//! Tabu Search (TS).
//!
//! A single-solution trajectory metaheuristic that uses memory structures
//! (the tabu list) to forbid recently adopted moves, preventing cycling
//! and encouraging exploration of new regions of the search space.
//!
//! Every neighborhood pass is evaluated in parallel: moves are sharded over
//! a [`WorkerPool`] and the shard results are reduced deterministically,
//! so a seeded run gives the same answer for any pool size.
//!
//! The building blocks ([`TabuRegistry`], [`WorkerPool`],
//! [`find_best_candidate`], [`find_best_candidates`]) are shared with the
//! multi-objective driver in [`crate::pareto`].
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Glover, F. (1990). "Tabu Search—Part II", *ORSA Journal on Computing* 2(1), 4-32.

mod config;
mod evaluation;
mod memory;
mod pool;
mod runner;
mod types;

pub use config::TabuConfig;
pub use evaluation::{find_best_candidate, find_best_candidates, Aspiration, Candidate};
pub use memory::{TabuMemory, TabuRegistry};
pub use pool::{Bundle, WorkerPool};
pub use runner::{TabuResult, TabuRunner};
pub use types::{Cost, CostKey, Neighborhood, Objectives, Solution, TabuProblem};
