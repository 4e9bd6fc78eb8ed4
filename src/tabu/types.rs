//! Core traits for tabu search problems.
//!
//! The search engine only ever sees three capabilities:
//!
//! - [`TabuProblem`]: builds the starting solution from an immutable
//!   problem configuration
//! - [`Solution`]: an immutable candidate with a cost, its neighborhoods,
//!   and optional diversification / post-optimization hooks
//! - [`Neighborhood`]: enumerates move descriptors and materializes the
//!   solution a move leads to
//!
//! Costs are either a scalar (`f64`, single-objective) or an
//! [`Objectives`] vector (multi-objective). Both map to a [`CostKey`],
//! which is what solution sets use for membership: two differently encoded
//! solutions with the same cost are the same set element.

use std::cmp::Ordering;
use std::fmt::Debug;
use std::hash::{Hash, Hasher};
use std::ops::Index;

use rand::Rng;

use crate::error::Result;

/// A solution cost.
///
/// Implemented for `f64` (single-objective) and [`Objectives`]
/// (multi-objective). Lower is better in every component.
pub trait Cost: Clone + PartialEq + Debug + Send + Sync + 'static {
    /// Canonical key used for cost-based set membership.
    fn key(&self) -> CostKey;
}

impl Cost for f64 {
    fn key(&self) -> CostKey {
        CostKey::from_values(std::slice::from_ref(self))
    }
}

impl Cost for Objectives {
    fn key(&self) -> CostKey {
        CostKey::from_values(&self.0)
    }
}

/// Totally ordered, hashable form of a cost.
///
/// `-0.0` is folded into `0.0` and every NaN into one canonical NaN, so
/// equal costs always produce equal keys. Ordering is lexicographic under
/// [`f64::total_cmp`].
#[derive(Debug, Clone)]
pub struct CostKey(Vec<f64>);

impl CostKey {
    fn from_values(values: &[f64]) -> Self {
        Self(
            values
                .iter()
                .map(|&v| {
                    if v == 0.0 {
                        0.0
                    } else if v.is_nan() {
                        f64::NAN
                    } else {
                        v
                    }
                })
                .collect(),
        )
    }
}

impl PartialEq for CostKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CostKey {}

impl PartialOrd for CostKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CostKey {
    fn cmp(&self, other: &Self) -> Ordering {
        for (a, b) in self.0.iter().zip(other.0.iter()) {
            match a.total_cmp(b) {
                Ordering::Equal => {}
                ord => return ord,
            }
        }
        self.0.len().cmp(&other.0.len())
    }
}

impl Hash for CostKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.len().hash(state);
        for v in &self.0 {
            v.to_bits().hash(state);
        }
    }
}

/// Fixed-arity vector of independent objective values (all minimized).
///
/// # Examples
///
/// ```
/// use u_tabu::tabu::Objectives;
///
/// let a = Objectives::from([1.0, 5.0]);
/// let b = Objectives::from([2.0, 5.0]);
/// assert!(a.dominates(&b));
/// assert!(!b.dominates(&a));
/// assert_eq!(a.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Objectives(Vec<f64>);

impl Objectives {
    /// Wraps objective values.
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// Number of objectives.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no objectives at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Objective values as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Pareto dominance (minimization): `self` is no worse in every
    /// objective and strictly better in at least one.
    pub fn dominates(&self, other: &Objectives) -> bool {
        crate::pareto::dominates(&self.0, &other.0)
    }
}

impl From<Vec<f64>> for Objectives {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl<const N: usize> From<[f64; N]> for Objectives {
    fn from(values: [f64; N]) -> Self {
        Self(values.to_vec())
    }
}

impl Index<usize> for Objectives {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

/// An immutable candidate solution.
///
/// Every move produces a new value; a solution is never mutated after
/// construction, so derived quantities may be cached on first access.
/// `cost` must be a pure function of the encoding.
pub trait Solution: Clone + Send + Sync + Sized {
    /// Scalar (`f64`) or vector ([`Objectives`]) cost.
    type Cost: Cost;

    /// Neighborhood type offered by this solution.
    type Neighborhood: Neighborhood<Self>;

    /// Cost of this solution (lower is better).
    fn cost(&self) -> Self::Cost;

    /// Neighborhoods valid for this solution, in a fixed order.
    fn neighborhoods(&self) -> Vec<Self::Neighborhood>;

    /// Returns a randomized, still feasible perturbation of `self`.
    ///
    /// Used only for diversification after stagnation. The default
    /// returns an unchanged copy.
    fn shuffle<R: Rng>(&self, _rng: &mut R) -> Self {
        self.clone()
    }

    /// Final local-improvement pass, applied once per returned result.
    /// Identity by default.
    fn post_optimization(&self) -> Self {
        self.clone()
    }
}

/// A structural neighborhood over solutions of type `S`.
///
/// Neighborhood values are small descriptors (e.g. segment lengths); the
/// solution they act on is passed explicitly, so the same value can be
/// shared read-only by every worker of a round.
pub trait Neighborhood<S>: Send + Sync {
    /// Move descriptor, also used as the tabu key.
    type Move: Clone + Eq + Hash + Debug + Send + Sync;

    /// Tabu class. Neighborhoods of the same class share one tabu memory.
    fn class(&self) -> &'static str;

    /// Capacity of the tabu memory for this neighborhood's class.
    fn tabu_capacity(&self) -> usize;

    /// Every feasible move for `solution`, in a fixed deterministic order.
    fn moves(&self, solution: &S) -> Vec<Self::Move>;

    /// Materializes the solution reached by applying `mv` to `solution`.
    ///
    /// Implementations should derive the new cost incrementally from the
    /// old one rather than recomputing it from scratch.
    fn apply(&self, solution: &S, mv: &Self::Move) -> Result<S>;
}

/// Defines a problem for tabu search.
///
/// The implementing type holds the immutable problem configuration
/// (distance tables, capacities, ...) and builds the starting solution.
pub trait TabuProblem: Send + Sync {
    /// The solution type.
    type Solution: Solution;

    /// Creates a feasible initial solution.
    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Result<Self::Solution>;
}
