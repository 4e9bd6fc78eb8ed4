//! Pareto multi-objective tabu search.
//!
//! Every objective is minimized. The driver explores a working set of
//! solutions, keeps a Pareto archive of everything non-dominated it has
//! seen, and shuffles the working set when the archive stops growing.
//!
//! [`hypervolume`] and [`inverted_generational_distance`] score finished
//! bi-objective fronts.

mod config;
mod front;
mod indicators;
mod runner;
mod set;

pub use config::{MaxPropagation, ParetoConfig};
pub use front::{build_pareto_front, dominates, ParetoFront};
pub use indicators::{hypervolume, inverted_generational_distance, nadir_point, to_points};
pub use runner::{accept_all, accept_none, ParetoResult, ParetoRunner};
pub use set::SolutionSet;
