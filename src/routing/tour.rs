//! Closed tours over a [`RoutingInstance`].
//!
//! [`Tour`] minimizes the primary metric; [`MultiTour`] minimizes the
//! instance's [`TourObjectives`] and is searched with the Pareto driver. Both are
//! immutable: the visiting order and the per-stop arrival offsets are
//! derived from the links on first use and cached for the tour's lifetime.

use std::fmt;
use std::sync::{Arc, OnceLock};

use rand::seq::SliceRandom;
use rand::Rng;

use super::instance::{RoutingInstance, TourObjectives};
use super::links::Links;
use super::swap::SegmentSwap;
use crate::error::{Result, SearchError};
use crate::tabu::{Objectives, Solution, TabuProblem};

/// Per-stop timing derived from a tour's visiting order.
///
/// Offsets are measured on the primary metric from the moment the tour
/// leaves the depot.
pub trait PathMetrics {
    /// Visiting order, starting at the depot.
    fn path(&self) -> &[usize];

    /// Arrival offset at each stop of [`path`](PathMetrics::path).
    fn arrival_offsets(&self) -> &[f64];

    /// Offset at which the tour is back at the depot.
    fn completion(&self) -> f64;

    /// Sum over all stops of the time between arrival and completion.
    fn total_waiting_time(&self) -> f64 {
        let completion = self.completion();
        self.arrival_offsets().iter().map(|a| completion - a).sum()
    }
}

/// Serializable summary of a tour, for reporting.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolutionRecord {
    /// Problem identifier.
    pub problem: String,
    /// Objective values.
    pub cost: Vec<f64>,
    /// Visiting order, starting at the depot.
    pub path: Vec<usize>,
    /// See [`PathMetrics::completion`].
    pub completion: f64,
    /// See [`PathMetrics::total_waiting_time`].
    pub total_waiting_time: f64,
}

#[derive(Clone)]
struct Route {
    instance: Arc<RoutingInstance>,
    links: Links,
    path: OnceLock<Vec<usize>>,
    offsets: OnceLock<Vec<f64>>,
}

impl Route {
    fn new(instance: Arc<RoutingInstance>, links: Links) -> Self {
        Self {
            instance,
            links,
            path: OnceLock::new(),
            offsets: OnceLock::new(),
        }
    }

    fn from_path(instance: Arc<RoutingInstance>, path: &[usize]) -> Result<Self> {
        let n = instance.size();
        if path.len() != n {
            return Err(SearchError::Import {
                problem: instance.problem().to_string(),
                reason: format!("tour visits {} nodes, instance has {n}", path.len()),
            });
        }
        let mut seen = vec![false; n];
        for &node in path {
            if node >= n || seen[node] {
                return Err(SearchError::Import {
                    problem: instance.problem().to_string(),
                    reason: format!("tour is not a permutation of 0..{n} (node {node})"),
                });
            }
            seen[node] = true;
        }

        let links = Links::from_path(path);
        Ok(Self::new(instance, links))
    }

    /// Shuffles a random contiguous stretch of the visiting order.
    fn shuffled<R: Rng>(&self, rng: &mut R) -> Option<Links> {
        let n = self.links.len();
        if n < 3 {
            return None;
        }
        let start = rng.random_range(0..n - 1);
        let end = rng.random_range(start + 2..=n);

        let mut path = self.path().to_vec();
        path[start..end].shuffle(rng);
        Some(Links::from_path(&path))
    }

    fn record(&self, cost: Vec<f64>) -> SolutionRecord {
        SolutionRecord {
            problem: self.instance.problem().to_string(),
            cost,
            path: self.path().to_vec(),
            completion: self.completion(),
            total_waiting_time: self.total_waiting_time(),
        }
    }

    fn objectives(&self) -> Objectives {
        match self.instance.objectives() {
            TourObjectives::Lengths => self
                .instance
                .metrics()
                .iter()
                .map(|m| self.links.length(m))
                .collect::<Vec<_>>()
                .into(),
            TourObjectives::Service => service_objectives(self),
        }
    }
}

/// Completion and total waiting time, in that order.
fn service_objectives(metrics: &impl PathMetrics) -> Objectives {
    Objectives::from([metrics.completion(), metrics.total_waiting_time()])
}

impl PathMetrics for Route {
    fn path(&self) -> &[usize] {
        self.path.get_or_init(|| self.links.path())
    }

    fn arrival_offsets(&self) -> &[f64] {
        self.offsets.get_or_init(|| {
            let metric = self.instance.primary();
            let mut offset = 0.0;
            let mut last: Option<usize> = None;
            self.path()
                .iter()
                .map(|&node| {
                    if let Some(last) = last {
                        offset += metric.get(last, node);
                    }
                    last = Some(node);
                    offset
                })
                .collect()
        })
    }

    fn completion(&self) -> f64 {
        let path = self.path();
        match (path.first(), path.last(), self.arrival_offsets().last()) {
            (Some(&depot), Some(&last), Some(&offset)) => {
                offset + self.instance.primary().get(last, depot)
            }
            _ => 0.0,
        }
    }
}

/// Single-objective tour: cost is the length on the primary metric.
#[derive(Clone)]
pub struct Tour {
    route: Route,
    cost: f64,
}

impl Tour {
    /// Builds the tour visiting `path` in order.
    ///
    /// # Errors
    ///
    /// [`SearchError::Import`] when `path` is not a permutation of the
    /// instance's nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use u_tabu::routing::{DistanceMatrix, RoutingInstance, Tour};
    /// use u_tabu::tabu::Solution;
    ///
    /// let m = DistanceMatrix::new(
    ///     "triangle",
    ///     vec![vec![0.0, 1.0, 2.0], vec![1.0, 0.0, 3.0], vec![2.0, 3.0, 0.0]],
    /// )
    /// .unwrap();
    /// let instance = Arc::new(RoutingInstance::new("triangle", vec![m]).unwrap());
    /// let tour = Tour::new(instance, &[0, 1, 2]).unwrap();
    /// assert_eq!(tour.cost(), 6.0);
    /// ```
    pub fn new(instance: Arc<RoutingInstance>, path: &[usize]) -> Result<Self> {
        let route = Route::from_path(instance, path)?;
        let cost = route.links.length(route.instance.primary());
        Ok(Self { route, cost })
    }

    pub(crate) fn from_links(instance: Arc<RoutingInstance>, links: Links, cost: f64) -> Self {
        Self {
            route: Route::new(instance, links),
            cost,
        }
    }

    /// The shared instance.
    pub fn instance(&self) -> &Arc<RoutingInstance> {
        &self.route.instance
    }

    /// Successor / predecessor encoding.
    pub fn links(&self) -> &Links {
        &self.route.links
    }

    /// Tour length recomputed edge by edge.
    pub fn recompute_cost(&self) -> f64 {
        self.route.links.length(self.route.instance.primary())
    }

    /// Reporting summary.
    pub fn record(&self) -> SolutionRecord {
        self.route.record(vec![self.cost])
    }
}

impl Solution for Tour {
    type Cost = f64;
    type Neighborhood = SegmentSwap;

    fn cost(&self) -> f64 {
        self.cost
    }

    fn neighborhoods(&self) -> Vec<SegmentSwap> {
        SegmentSwap::offered(&self.route.instance)
    }

    fn shuffle<R: Rng>(&self, rng: &mut R) -> Self {
        match self.route.shuffled(rng) {
            Some(links) => {
                let cost = links.length(self.route.instance.primary());
                Self::from_links(Arc::clone(&self.route.instance), links, cost)
            }
            None => self.clone(),
        }
    }
}

impl PathMetrics for Tour {
    fn path(&self) -> &[usize] {
        self.route.path()
    }

    fn arrival_offsets(&self) -> &[f64] {
        self.route.arrival_offsets()
    }

    fn completion(&self) -> f64 {
        self.route.completion()
    }
}

impl fmt::Debug for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tour")
            .field("path", &self.route.path())
            .field("cost", &self.cost)
            .finish()
    }
}

/// Multi-objective tour over the instance's [`TourObjectives`].
#[derive(Clone)]
pub struct MultiTour {
    route: Route,
    costs: Objectives,
}

impl MultiTour {
    /// Builds the tour visiting `path` in order.
    ///
    /// # Errors
    ///
    /// [`SearchError::Import`] when `path` is not a permutation of the
    /// instance's nodes.
    pub fn new(instance: Arc<RoutingInstance>, path: &[usize]) -> Result<Self> {
        let route = Route::from_path(instance, path)?;
        let costs = route.objectives();
        Ok(Self { route, costs })
    }

    pub(crate) fn from_links(instance: Arc<RoutingInstance>, links: Links, costs: Objectives) -> Self {
        Self {
            route: Route::new(instance, links),
            costs,
        }
    }

    /// Tour over `links` with its objectives computed from scratch.
    pub(crate) fn evaluated(instance: Arc<RoutingInstance>, links: Links) -> Self {
        let route = Route::new(instance, links);
        let costs = route.objectives();
        Self { route, costs }
    }

    /// The shared instance.
    pub fn instance(&self) -> &Arc<RoutingInstance> {
        &self.route.instance
    }

    /// Successor / predecessor encoding.
    pub fn links(&self) -> &Links {
        &self.route.links
    }

    /// Objectives recomputed from the links.
    pub fn recompute_costs(&self) -> Objectives {
        self.route.objectives()
    }

    /// Reporting summary.
    pub fn record(&self) -> SolutionRecord {
        self.route.record(self.costs.as_slice().to_vec())
    }
}

impl Solution for MultiTour {
    type Cost = Objectives;
    type Neighborhood = SegmentSwap;

    fn cost(&self) -> Objectives {
        self.costs.clone()
    }

    fn neighborhoods(&self) -> Vec<SegmentSwap> {
        SegmentSwap::offered(&self.route.instance)
    }

    fn shuffle<R: Rng>(&self, rng: &mut R) -> Self {
        match self.route.shuffled(rng) {
            Some(links) => Self::evaluated(Arc::clone(&self.route.instance), links),
            None => self.clone(),
        }
    }
}

impl PathMetrics for MultiTour {
    fn path(&self) -> &[usize] {
        self.route.path()
    }

    fn arrival_offsets(&self) -> &[f64] {
        self.route.arrival_offsets()
    }

    fn completion(&self) -> f64 {
        self.route.completion()
    }
}

impl fmt::Debug for MultiTour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiTour")
            .field("path", &self.route.path())
            .field("costs", &self.costs.as_slice())
            .finish()
    }
}

/// Single-objective routing problem, starting from the nearest-neighbor
/// tour.
#[derive(Debug, Clone)]
pub struct TourProblem {
    instance: Arc<RoutingInstance>,
}

impl TourProblem {
    /// Wraps a shared instance.
    pub fn new(instance: Arc<RoutingInstance>) -> Self {
        Self { instance }
    }

    /// The shared instance.
    pub fn instance(&self) -> &Arc<RoutingInstance> {
        &self.instance
    }
}

impl TabuProblem for TourProblem {
    type Solution = Tour;

    fn initial_solution<R: Rng>(&self, _rng: &mut R) -> Result<Tour> {
        Tour::new(Arc::clone(&self.instance), &self.instance.nearest_neighbor_path())
    }
}

/// Multi-objective routing problem, starting from the nearest-neighbor
/// tour on the primary metric.
#[derive(Debug, Clone)]
pub struct MultiTourProblem {
    instance: Arc<RoutingInstance>,
}

impl MultiTourProblem {
    /// Wraps a shared instance.
    pub fn new(instance: Arc<RoutingInstance>) -> Self {
        Self { instance }
    }

    /// The shared instance.
    pub fn instance(&self) -> &Arc<RoutingInstance> {
        &self.instance
    }
}

impl TabuProblem for MultiTourProblem {
    type Solution = MultiTour;

    fn initial_solution<R: Rng>(&self, _rng: &mut R) -> Result<MultiTour> {
        MultiTour::new(Arc::clone(&self.instance), &self.instance.nearest_neighbor_path())
    }
}
