//! Cost-keyed solution set used as the exploration frontier.

use std::collections::BTreeMap;

use rand::seq::index;
use rand::Rng;

use crate::tabu::{Cost, CostKey, Solution};

/// A set of solutions whose membership is decided by cost alone.
///
/// Two differently encoded solutions with equal cost are the same element;
/// the first one inserted is kept. Iteration follows cost-key order, so a
/// seeded search visits members in a reproducible order.
#[derive(Debug, Clone)]
pub struct SolutionSet<S> {
    members: BTreeMap<CostKey, S>,
}

impl<S> Default for SolutionSet<S> {
    fn default() -> Self {
        Self {
            members: BTreeMap::new(),
        }
    }
}

impl<S: Solution> SolutionSet<S> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Inserts `solution` unless a member already has its cost.
    pub fn insert(&mut self, solution: S) -> bool {
        let key = solution.cost().key();
        if self.members.contains_key(&key) {
            return false;
        }
        self.members.insert(key, solution);
        true
    }

    /// Whether a member has exactly this cost.
    pub fn contains_cost(&self, cost: &S::Cost) -> bool {
        self.members.contains_key(&cost.key())
    }

    /// Members in cost-key order.
    pub fn iter(&self) -> impl Iterator<Item = &S> {
        self.members.values()
    }

    /// Removes `count` members chosen uniformly at random.
    pub fn remove_random<R: Rng>(&mut self, count: usize, rng: &mut R) {
        let count = count.min(self.members.len());
        if count == 0 {
            return;
        }

        let keys: Vec<CostKey> = self.members.keys().cloned().collect();
        for i in index::sample(rng, keys.len(), count) {
            self.members.remove(&keys[i]);
        }
    }

    /// Consumes the set, returning its members in cost-key order.
    pub fn into_vec(self) -> Vec<S> {
        self.members.into_values().collect()
    }
}

impl<S: Solution> FromIterator<S> for SolutionSet<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for solution in iter {
            set.insert(solution);
        }
        set
    }
}
