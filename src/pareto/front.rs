//! Pareto dominance and the non-dominated archive.
//!
//! All objectives are **minimized**: lower values are better.
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"
//! - IEEE Transactions on Evolutionary Computation, 6(2), 182-197

use crate::tabu::{Cost, Objectives, Solution};

/// Compare two objective vectors for Pareto dominance (minimization).
///
/// `a` dominates `b` iff `a` is no worse in every objective and strictly
/// better in at least one. Equal vectors do not dominate each other.
///
/// # Example
///
/// ```
/// use u_tabu::pareto::dominates;
///
/// assert!(dominates(&[1.0, 2.0], &[1.0, 3.0]));
/// assert!(!dominates(&[1.0, 2.0], &[1.0, 2.0]));
/// assert!(!dominates(&[1.0, 5.0], &[5.0, 1.0]));
/// ```
pub fn dominates(a: &[f64], b: &[f64]) -> bool {
    let mut a_better_in_some = false;

    for (&va, &vb) in a.iter().zip(b.iter()) {
        if vb < va {
            return false;
        }
        if va < vb {
            a_better_in_some = true;
        }
    }

    a_better_in_some
}

/// A set of mutually non-dominated items keyed by their objective vectors.
///
/// The only way in is [`admit_with`](ParetoFront::admit_with) (or
/// [`admit`](ParetoFront::admit) for solutions), which keeps the closure
/// property: no member ever dominates another. Members are kept in
/// admission order; no other order is implied.
///
/// # Example
///
/// ```
/// use u_tabu::pareto::ParetoFront;
/// use u_tabu::tabu::Objectives;
///
/// let mut front = ParetoFront::new();
/// assert!(front.admit_with(Objectives::from([1.0, 5.0]), "a"));
/// assert!(front.admit_with(Objectives::from([5.0, 1.0]), "b"));
/// assert!(!front.admit_with(Objectives::from([6.0, 6.0]), "dominated"));
/// assert!(front.admit_with(Objectives::from([0.0, 0.0]), "ideal"));
/// assert_eq!(front.items(), &["ideal"]);
/// ```
#[derive(Debug, Clone)]
pub struct ParetoFront<T> {
    costs: Vec<Objectives>,
    items: Vec<T>,
}

impl<T> Default for ParetoFront<T> {
    fn default() -> Self {
        Self {
            costs: Vec::new(),
            items: Vec::new(),
        }
    }
}

impl<T> ParetoFront<T> {
    /// Creates an empty front.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the front has no member.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Objective vectors of the members, parallel to [`items`](Self::items).
    pub fn costs(&self) -> &[Objectives] {
        &self.costs
    }

    /// Members, parallel to [`costs`](Self::costs).
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// `(cost, member)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&Objectives, &T)> {
        self.costs.iter().zip(self.items.iter())
    }

    /// Consumes the front, returning its members.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Whether some member dominates `cost` or has exactly this cost.
    ///
    /// A cost covered by the front would be rejected by
    /// [`admit_with`](Self::admit_with).
    pub fn covers(&self, cost: &Objectives) -> bool {
        let key = cost.key();
        self.costs
            .iter()
            .any(|member| member.dominates(cost) || member.key() == key)
    }

    /// Admits `item` unless a member dominates it or has the same cost.
    ///
    /// On admission every member dominated by `cost` is removed. Returns
    /// whether `item` was inserted. O(|front|).
    pub fn admit_with(&mut self, cost: Objectives, item: T) -> bool {
        if self.covers(&cost) {
            return false;
        }

        let mut i = 0;
        while i < self.costs.len() {
            if cost.dominates(&self.costs[i]) {
                self.costs.remove(i);
                self.items.remove(i);
            } else {
                i += 1;
            }
        }

        self.costs.push(cost);
        self.items.push(item);
        true
    }
}

impl<S: Solution<Cost = Objectives>> ParetoFront<S> {
    /// Admits a solution under its own cost. See [`admit_with`](Self::admit_with).
    pub fn admit(&mut self, solution: S) -> bool {
        let cost = solution.cost();
        self.admit_with(cost, solution)
    }
}

/// Reduces any collection of objective vectors to its non-dominated subset.
///
/// Duplicates collapse to one entry. Order follows first admission.
///
/// # Example
///
/// ```
/// use u_tabu::pareto::build_pareto_front;
///
/// let front = build_pareto_front(vec![
///     vec![1.0, 5.0],
///     vec![3.0, 3.0],
///     vec![4.0, 4.0],
///     vec![5.0, 1.0],
///     vec![3.0, 3.0],
/// ]);
/// assert_eq!(front, vec![vec![1.0, 5.0], vec![3.0, 3.0], vec![5.0, 1.0]]);
/// ```
pub fn build_pareto_front<I, P>(points: I) -> Vec<Vec<f64>>
where
    I: IntoIterator<Item = P>,
    P: Into<Vec<f64>>,
{
    let mut front = ParetoFront::new();
    for point in points {
        front.admit_with(Objectives::new(point.into()), ());
    }
    front
        .costs()
        .iter()
        .map(|c| c.as_slice().to_vec())
        .collect()
}
