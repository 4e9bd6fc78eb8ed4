//! Reference routing problem: closed tours with segment swaps.
//!
//! A [`RoutingInstance`] holds one or more [`DistanceMatrix`] metrics over
//! the same nodes and is shared by every tour through an `Arc`. [`Tour`]
//! minimizes the primary metric with [`TabuRunner`](crate::tabu::TabuRunner);
//! [`MultiTour`] minimizes every metric at once, or completion and total
//! waiting time (see [`TourObjectives`]), with
//! [`ParetoRunner`](crate::pareto::ParetoRunner).
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use u_tabu::routing::{DistanceMatrix, RoutingInstance, TourProblem};
//! use u_tabu::tabu::{TabuConfig, TabuRunner};
//!
//! let points = [(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0), (1.0, 3.0)];
//! let matrix = DistanceMatrix::euclidean("pentagon", &points).unwrap();
//! let instance = Arc::new(RoutingInstance::new("pentagon", vec![matrix]).unwrap());
//!
//! let config = TabuConfig::default().with_max_iterations(50).with_seed(42);
//! let result = TabuRunner::run(&TourProblem::new(instance), &config).unwrap();
//! assert!(result.best_cost > 0.0);
//! ```

mod instance;
mod links;
mod swap;
mod tour;

pub use instance::{DistanceMatrix, RoutingInstance, TourObjectives};
pub use links::{Links, SwapMove};
pub use swap::SegmentSwap;
pub use tour::{MultiTour, MultiTourProblem, PathMetrics, SolutionRecord, Tour, TourProblem};
