//! Immutable routing instance data.

use crate::error::{Result, SearchError};

/// Square matrix of non-negative travel costs, stored row-major.
///
/// `get(from, to)` is the cost of the directed edge `from -> to`; the
/// matrix does not have to be symmetric.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    size: usize,
    values: Vec<f64>,
}

impl DistanceMatrix {
    /// Builds a matrix from its rows.
    ///
    /// # Errors
    ///
    /// [`SearchError::Import`] naming `problem` when the matrix is empty,
    /// not square, or holds a negative or non-finite entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tabu::routing::DistanceMatrix;
    ///
    /// let m = DistanceMatrix::new("tiny", vec![vec![0.0, 2.0], vec![3.0, 0.0]]).unwrap();
    /// assert_eq!(m.size(), 2);
    /// assert_eq!(m.get(1, 0), 3.0);
    /// assert!(DistanceMatrix::new("bad", vec![vec![0.0, 1.0]]).is_err());
    /// ```
    pub fn new(problem: &str, rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        if size == 0 {
            return Err(import(problem, "distance matrix is empty"));
        }

        let mut values = Vec::with_capacity(size * size);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(import(
                    problem,
                    format!("row {i} has {} entries, expected {size}", row.len()),
                ));
            }
            if let Some(j) = row.iter().position(|v| !v.is_finite() || *v < 0.0) {
                return Err(import(
                    problem,
                    format!("entry ({i}, {j}) is {}, expected a finite non-negative value", row[j]),
                ));
            }
            values.extend(row);
        }

        Ok(Self { size, values })
    }

    /// Euclidean distances between planar points.
    pub fn euclidean(problem: &str, points: &[(f64, f64)]) -> Result<Self> {
        let rows = points
            .iter()
            .map(|&(x1, y1)| points.iter().map(|&(x2, y2)| (x2 - x1).hypot(y2 - y1)).collect())
            .collect();
        Self::new(problem, rows)
    }

    /// Number of nodes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cost of the edge `from -> to`.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.values[from * self.size + to]
    }
}

fn import(problem: &str, reason: impl Into<String>) -> SearchError {
    SearchError::Import {
        problem: problem.to_string(),
        reason: reason.into(),
    }
}

/// What a [`MultiTour`](super::MultiTour) minimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TourObjectives {
    /// One tour length per metric matrix, updated incrementally by swaps.
    #[default]
    Lengths,
    /// Completion and total waiting time on the primary metric, read from
    /// [`PathMetrics`](super::PathMetrics) and recomputed after every move.
    Service,
}

/// A routing problem instance: one or more metric matrices over the same
/// nodes, plus the search parameters of its tours.
///
/// Built once, then shared by every tour through an `Arc`. The first
/// metric is the primary one: single-objective tours minimize it and the
/// nearest-neighbor construction follows it. Node 0 is the depot.
#[derive(Debug, Clone)]
pub struct RoutingInstance {
    problem: String,
    metrics: Vec<DistanceMatrix>,
    tabu_capacity: usize,
    segment_lengths: Vec<(usize, usize)>,
    objectives: TourObjectives,
}

impl RoutingInstance {
    /// Default capacity of the segment-swap tabu memory.
    pub const DEFAULT_TABU_CAPACITY: usize = 100;

    /// Segment-length pairs offered by default.
    pub const DEFAULT_SEGMENT_LENGTHS: [(usize, usize); 3] = [(1, 1), (2, 1), (2, 2)];

    /// Creates an instance from its metric matrices.
    ///
    /// # Errors
    ///
    /// [`SearchError::Import`] when no metric is given or the metrics do
    /// not cover the same number of nodes.
    pub fn new(problem: impl Into<String>, metrics: Vec<DistanceMatrix>) -> Result<Self> {
        let problem = problem.into();
        let Some(size) = metrics.first().map(DistanceMatrix::size) else {
            return Err(import(&problem, "at least one metric matrix is required"));
        };
        if let Some(k) = metrics.iter().position(|m| m.size() != size) {
            return Err(import(
                &problem,
                format!("metric {k} covers {} nodes, expected {size}", metrics[k].size()),
            ));
        }

        Ok(Self {
            problem,
            metrics,
            tabu_capacity: Self::DEFAULT_TABU_CAPACITY,
            segment_lengths: Self::DEFAULT_SEGMENT_LENGTHS.to_vec(),
            objectives: TourObjectives::default(),
        })
    }

    /// Sets the segment-swap tabu memory capacity.
    pub fn with_tabu_capacity(mut self, capacity: usize) -> Self {
        self.tabu_capacity = capacity;
        self
    }

    /// Sets the segment-length pairs offered to tours.
    pub fn with_segment_lengths(mut self, lengths: Vec<(usize, usize)>) -> Self {
        self.segment_lengths = lengths;
        self
    }

    /// Sets what multi-objective tours minimize.
    pub fn with_objectives(mut self, objectives: TourObjectives) -> Self {
        self.objectives = objectives;
        self
    }

    /// Problem identifier.
    pub fn problem(&self) -> &str {
        &self.problem
    }

    /// Number of nodes, depot included.
    pub fn size(&self) -> usize {
        self.metrics[0].size()
    }

    /// All metric matrices.
    pub fn metrics(&self) -> &[DistanceMatrix] {
        &self.metrics
    }

    /// The first metric matrix.
    pub fn primary(&self) -> &DistanceMatrix {
        &self.metrics[0]
    }

    /// Segment-swap tabu memory capacity.
    pub fn tabu_capacity(&self) -> usize {
        self.tabu_capacity
    }

    /// Segment-length pairs offered to tours.
    pub fn segment_lengths(&self) -> &[(usize, usize)] {
        &self.segment_lengths
    }

    /// What multi-objective tours minimize.
    pub fn objectives(&self) -> TourObjectives {
        self.objectives
    }

    /// Greedy tour from the depot: always travel to the closest unvisited
    /// node on the primary metric, lowest index first on ties.
    pub fn nearest_neighbor_path(&self) -> Vec<usize> {
        let n = self.size();
        let primary = self.primary();
        let mut visited = vec![false; n];
        let mut path = Vec::with_capacity(n);

        let mut last = 0;
        visited[0] = true;
        path.push(0);
        while path.len() < n {
            let mut next: Option<usize> = None;
            for node in (0..n).filter(|&node| !visited[node]) {
                let closer = match next {
                    None => true,
                    Some(best) => primary.get(last, node) < primary.get(last, best),
                };
                if closer {
                    next = Some(node);
                }
            }
            let Some(node) = next else { break };
            visited[node] = true;
            path.push(node);
            last = node;
        }

        path
    }
}
