//! Multi-objective tabu search configuration.

use std::fmt;
use std::sync::Arc;

use crate::tabu::Objectives;

/// Upper bound on the exploration working set.
#[derive(Clone)]
pub enum MaxPropagation {
    /// Fixed maximum number of propagating solutions.
    Fixed(usize),
    /// Maximum computed from the current Pareto front's costs.
    Dynamic(Arc<dyn Fn(&[Objectives]) -> usize + Send + Sync>),
}

impl MaxPropagation {
    /// Maximum working-set size for the given front.
    pub fn limit(&self, front: &[Objectives]) -> usize {
        match self {
            MaxPropagation::Fixed(n) => *n,
            MaxPropagation::Dynamic(f) => f(front),
        }
    }
}

impl fmt::Debug for MaxPropagation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaxPropagation::Fixed(n) => f.debug_tuple("Fixed").field(n).finish(),
            MaxPropagation::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// Configuration parameters for multi-objective tabu search.
///
/// # Examples
///
/// ```
/// use u_tabu::pareto::{MaxPropagation, ParetoConfig};
///
/// let config = ParetoConfig::default()
///     .with_max_iterations(200)
///     .with_shuffle_after(20)
///     .with_max_propagation(MaxPropagation::Fixed(8))
///     .with_pool_size(2);
/// assert_eq!(config.max_iterations, 200);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ParetoConfig {
    /// Number of iterations (fixed budget, no early stopping).
    pub max_iterations: usize,
    /// Iterations without working-set growth before every member is
    /// shuffled.
    pub shuffle_after: usize,
    /// Worker threads per parallel round (0 = one per CPU).
    pub pool_size: usize,
    /// Whether a tabu move may be adopted when its candidate would enter
    /// the Pareto archive.
    pub aspiration: bool,
    /// Bound on the working set; `None` lets it grow freely.
    pub max_propagation: Option<MaxPropagation>,
    /// Record the cost of every candidate seen (bi-objective only).
    pub record_candidates: bool,
    /// Random seed (None for the default seed).
    pub seed: Option<u64>,
}

impl Default for ParetoConfig {
    fn default() -> Self {
        Self {
            max_iterations: 500,
            shuffle_after: 10,
            pool_size: 0,
            aspiration: true,
            max_propagation: None,
            record_candidates: false,
            seed: None,
        }
    }
}

impl ParetoConfig {
    /// Sets the iteration budget.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the stagnation threshold before shuffling.
    pub fn with_shuffle_after(mut self, n: usize) -> Self {
        self.shuffle_after = n;
        self
    }

    /// Sets the number of worker threads.
    pub fn with_pool_size(mut self, n: usize) -> Self {
        self.pool_size = n;
        self
    }

    /// Enables or disables the aspiration criterion.
    pub fn with_aspiration(mut self, aspiration: bool) -> Self {
        self.aspiration = aspiration;
        self
    }

    /// Bounds the working set.
    pub fn with_max_propagation(mut self, max: MaxPropagation) -> Self {
        self.max_propagation = Some(max);
        self
    }

    /// Enables candidate-cost recording.
    pub fn with_record_candidates(mut self, record: bool) -> Self {
        self.record_candidates = record;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.shuffle_after == 0 {
            return Err("shuffle_after must be at least 1".into());
        }
        if let Some(MaxPropagation::Fixed(0)) = self.max_propagation {
            return Err("a fixed max_propagation must be at least 1".into());
        }
        Ok(())
    }
}
