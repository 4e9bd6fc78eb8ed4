//! Segment-swap neighborhood.
//!
//! Exchanges two disjoint stretches of a tour, of `first_length` and
//! `second_length` consecutive nodes, keeping the orientation of both. The
//! new length is derived from the old one by the edges the relinking
//! removes and adds (see [`Links::swap`]).

use std::sync::Arc;

use super::instance::{RoutingInstance, TourObjectives};
use super::links::{Links, SwapMove};
use super::tour::{MultiTour, PathMetrics, Tour};
use crate::error::{Result, SearchError};
use crate::tabu::{Neighborhood, Objectives, Solution};

/// Segment-swap neighborhood for a pair of segment lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentSwap {
    first_length: usize,
    second_length: usize,
    capacity: usize,
}

impl SegmentSwap {
    /// Tabu class shared by every segment-length pair.
    pub const CLASS: &'static str = "segment-swap";

    /// Creates the neighborhood with the given tabu memory capacity.
    pub fn new(first_length: usize, second_length: usize, capacity: usize) -> Self {
        Self {
            first_length,
            second_length,
            capacity,
        }
    }

    /// Neighborhoods of the instance's segment-length pairs that fit its
    /// tours: at least one node must stay outside both segments.
    pub fn offered(instance: &RoutingInstance) -> Vec<Self> {
        let n = instance.size();
        instance
            .segment_lengths()
            .iter()
            .filter(|&&(a, b)| a > 0 && b > 0 && n > a + b)
            .map(|&(a, b)| Self::new(a, b, instance.tabu_capacity()))
            .collect()
    }

    /// Length of the first segment.
    pub fn first_length(&self) -> usize {
        self.first_length
    }

    /// Length of the second segment.
    pub fn second_length(&self) -> usize {
        self.second_length
    }

    /// Every swap of the tour visiting `path`.
    ///
    /// Ordered by the first segment's starting offset, then by the gap
    /// between the two segments. The second segment starts right after the
    /// first one and moves forward until it ends right before it.
    ///
    /// When both segments have the same length, `(a, b)` and `(b, a)` are
    /// the same swap; only the orientation with the lower first head is
    /// listed, so every swap has a single tabu key.
    pub fn enumerate(&self, path: &[usize]) -> Vec<SwapMove> {
        let n = path.len();
        let (l1, l2) = (self.first_length, self.second_length);
        if l1 == 0 || l2 == 0 || n <= l1 + l2 {
            return Vec::new();
        }

        let mut moves = Vec::with_capacity(n * (n - l1 - l2 + 1));
        for first_head_index in 0..n {
            let first_tail_index = (first_head_index + l1 - 1) % n;
            for gap in 0..=(n - l1 - l2) {
                let second_head_index = (first_tail_index + gap + 1) % n;
                let second_tail_index = (second_head_index + l2 - 1) % n;
                if l1 == l2 && path[first_head_index] > path[second_head_index] {
                    continue;
                }
                moves.push(SwapMove {
                    first_head: path[first_head_index],
                    first_tail: path[first_tail_index],
                    second_head: path[second_head_index],
                    second_tail: path[second_tail_index],
                });
            }
        }
        moves
    }

    fn check(&self, links: &Links, mv: &SwapMove) -> Result<()> {
        let n = links.len();
        if n <= self.first_length + self.second_length {
            return Err(SearchError::Neighborhood(format!(
                "swapping segments of {} and {} nodes needs more than {} nodes, tour has {n}",
                self.first_length,
                self.second_length,
                self.first_length + self.second_length
            )));
        }
        let nodes = [mv.first_head, mv.first_tail, mv.second_head, mv.second_tail];
        if let Some(node) = nodes.iter().find(|&&node| node >= n) {
            return Err(SearchError::Neighborhood(format!(
                "{mv:?} refers to node {node}, tour has {n}"
            )));
        }

        let mut covered = vec![false; n];
        for (head, tail, length) in [
            (mv.first_head, mv.first_tail, self.first_length),
            (mv.second_head, mv.second_tail, self.second_length),
        ] {
            let mut node = head;
            for step in 0..length {
                if covered[node] {
                    return Err(SearchError::Neighborhood(format!(
                        "{mv:?} has overlapping segments at node {node}"
                    )));
                }
                covered[node] = true;
                if step + 1 < length {
                    node = links.after(node);
                }
            }
            if node != tail {
                return Err(SearchError::Neighborhood(format!(
                    "{mv:?}: segment from {head} is not {length} nodes long ending at {tail}"
                )));
            }
        }
        Ok(())
    }
}

impl Neighborhood<Tour> for SegmentSwap {
    type Move = SwapMove;

    fn class(&self) -> &'static str {
        Self::CLASS
    }

    fn tabu_capacity(&self) -> usize {
        self.capacity
    }

    fn moves(&self, tour: &Tour) -> Vec<SwapMove> {
        self.enumerate(tour.path())
    }

    fn apply(&self, tour: &Tour, mv: &SwapMove) -> Result<Tour> {
        self.check(tour.links(), mv)?;
        let instance = tour.instance();
        let (links, deltas) = tour.links().swap(mv, std::slice::from_ref(instance.primary()));
        let delta: f64 = deltas.iter().sum();
        Ok(Tour::from_links(Arc::clone(instance), links, tour.cost() + delta))
    }
}

impl Neighborhood<MultiTour> for SegmentSwap {
    type Move = SwapMove;

    fn class(&self) -> &'static str {
        Self::CLASS
    }

    fn tabu_capacity(&self) -> usize {
        self.capacity
    }

    fn moves(&self, tour: &MultiTour) -> Vec<SwapMove> {
        self.enumerate(tour.path())
    }

    fn apply(&self, tour: &MultiTour, mv: &SwapMove) -> Result<MultiTour> {
        self.check(tour.links(), mv)?;
        let instance = tour.instance();
        if instance.objectives() == TourObjectives::Service {
            // waiting time has no per-edge delta
            let (links, _) = tour.links().swap(mv, &[]);
            return Ok(MultiTour::evaluated(Arc::clone(instance), links));
        }

        let (links, deltas) = tour.links().swap(mv, instance.metrics());
        let costs: Objectives = tour
            .cost()
            .as_slice()
            .iter()
            .zip(&deltas)
            .map(|(cost, delta)| cost + delta)
            .collect::<Vec<_>>()
            .into();
        Ok(MultiTour::from_links(Arc::clone(instance), links, costs))
    }
}
