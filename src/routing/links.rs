//! Doubly linked tour encoding and the segment-swap relinking.
//!
//! A closed tour over nodes `0..n` is stored as two arrays: `after[v]` is
//! the node visited right after `v`, `before[v]` the one right before it.
//! Swapping two segments then touches a constant number of entries and a
//! constant number of edges, whatever the tour length.

use super::instance::DistanceMatrix;

/// Two disjoint tour segments to exchange, given by their boundary nodes.
///
/// In the tour the nodes appear as
/// `first_head .. first_tail .. second_head .. second_tail`, each segment
/// keeping its orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapMove {
    /// First node of the first segment.
    pub first_head: usize,
    /// Last node of the first segment.
    pub first_tail: usize,
    /// First node of the second segment.
    pub second_head: usize,
    /// Last node of the second segment.
    pub second_tail: usize,
}

/// Successor / predecessor arrays of a closed tour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Links {
    after: Vec<usize>,
    before: Vec<usize>,
}

impl Links {
    /// Links of the closed tour visiting `path` in order.
    ///
    /// `path` must be a permutation of `0..path.len()`.
    pub fn from_path(path: &[usize]) -> Self {
        let n = path.len();
        let mut after = vec![0; n];
        let mut before = vec![0; n];
        for (i, &node) in path.iter().enumerate() {
            let next = path[(i + 1) % n];
            after[node] = next;
            before[next] = node;
        }
        Self { after, before }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.after.len()
    }

    /// Whether the tour has no node.
    pub fn is_empty(&self) -> bool {
        self.after.is_empty()
    }

    /// Node visited right after `node`.
    pub fn after(&self, node: usize) -> usize {
        self.after[node]
    }

    /// Node visited right before `node`.
    pub fn before(&self, node: usize) -> usize {
        self.before[node]
    }

    /// Visiting order, starting at node 0.
    pub fn path(&self) -> Vec<usize> {
        let mut path = Vec::with_capacity(self.len());
        if self.is_empty() {
            return path;
        }
        let mut node = 0;
        loop {
            path.push(node);
            node = self.after[node];
            if node == 0 || path.len() == self.len() {
                break;
            }
        }
        path
    }

    /// Full tour length under `metric`.
    pub fn length(&self, metric: &DistanceMatrix) -> f64 {
        self.after
            .iter()
            .enumerate()
            .map(|(node, &next)| metric.get(node, next))
            .sum()
    }

    /// Exchanges the two segments of `mv`.
    ///
    /// Returns the relinked tour and, for each matrix of `metrics`, the
    /// change of the tour length: three edges change when the segments are
    /// adjacent, four otherwise. At least one node must lie outside both
    /// segments.
    pub fn swap(&self, mv: &SwapMove, metrics: &[DistanceMatrix]) -> (Links, Vec<f64>) {
        let SwapMove {
            mut first_head,
            mut first_tail,
            mut second_head,
            mut second_tail,
        } = *mv;

        // Normalize so that a wrap-around adjacency reads first -> second.
        if first_head == self.after[second_tail] {
            std::mem::swap(&mut first_head, &mut second_head);
            std::mem::swap(&mut first_tail, &mut second_tail);
        }

        let mut after = self.after.clone();
        let mut before = self.before.clone();

        if first_tail == self.before[second_head] {
            let before_first = self.before[first_head];
            let after_second = self.after[second_tail];

            let deltas = metrics
                .iter()
                .map(|m| {
                    m.get(before_first, second_head)
                        + m.get(second_tail, first_head)
                        + m.get(first_tail, after_second)
                        - m.get(before_first, first_head)
                        - m.get(first_tail, second_head)
                        - m.get(second_tail, after_second)
                })
                .collect();

            link(&mut after, &mut before, before_first, second_head);
            link(&mut after, &mut before, second_tail, first_head);
            link(&mut after, &mut before, first_tail, after_second);

            (Links { after, before }, deltas)
        } else {
            let before_first = self.before[first_head];
            let before_second = self.before[second_head];
            let after_first = self.after[first_tail];
            let after_second = self.after[second_tail];

            let deltas = metrics
                .iter()
                .map(|m| {
                    m.get(before_first, second_head)
                        + m.get(second_tail, after_first)
                        + m.get(before_second, first_head)
                        + m.get(first_tail, after_second)
                        - m.get(before_first, first_head)
                        - m.get(first_tail, after_first)
                        - m.get(before_second, second_head)
                        - m.get(second_tail, after_second)
                })
                .collect();

            link(&mut after, &mut before, before_first, second_head);
            link(&mut after, &mut before, before_second, first_head);
            link(&mut after, &mut before, second_tail, after_first);
            link(&mut after, &mut before, first_tail, after_second);

            (Links { after, before }, deltas)
        }
    }
}

#[inline]
fn link(after: &mut [usize], before: &mut [usize], from: usize, to: usize) {
    after[from] = to;
    before[to] = from;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(n: usize) -> DistanceMatrix {
        // Asymmetric, integer-valued so sums are exact.
        let rows = (0..n)
            .map(|i| (0..n).map(|j| if i == j { 0.0 } else { (i * 7 + j * 3) as f64 % 11.0 + 1.0 }).collect())
            .collect();
        DistanceMatrix::new("ring", rows).unwrap()
    }

    fn mv(first_head: usize, first_tail: usize, second_head: usize, second_tail: usize) -> SwapMove {
        SwapMove {
            first_head,
            first_tail,
            second_head,
            second_tail,
        }
    }

    #[test]
    fn test_from_path_round_trips() {
        let links = Links::from_path(&[0, 3, 1, 4, 2]);
        assert_eq!(links.path(), vec![0, 3, 1, 4, 2]);
        assert_eq!(links.after(2), 0);
        assert_eq!(links.before(0), 2);
    }

    #[test]
    fn test_path_starts_at_depot() {
        let links = Links::from_path(&[2, 0, 1]);
        assert_eq!(links.path(), vec![0, 1, 2]);
    }

    #[test]
    fn test_adjacent_swap() {
        let m = ring(6);
        let links = Links::from_path(&[0, 1, 2, 3, 4, 5]);
        // [1] and [2, 3] are adjacent
        let (swapped, deltas) = links.swap(&mv(1, 1, 2, 3), std::slice::from_ref(&m));
        assert_eq!(swapped.path(), vec![0, 2, 3, 1, 4, 5]);
        assert_eq!(links.length(&m) + deltas[0], swapped.length(&m));
    }

    #[test]
    fn test_wrap_around_adjacent_swap() {
        let m = ring(6);
        let links = Links::from_path(&[0, 1, 2, 3, 4, 5]);
        // second segment [5, 0] directly precedes first segment [1]
        let (swapped, deltas) = links.swap(&mv(1, 1, 5, 0), std::slice::from_ref(&m));
        assert_eq!(swapped.path(), vec![0, 2, 3, 4, 1, 5]);
        assert_eq!(links.length(&m) + deltas[0], swapped.length(&m));
    }

    #[test]
    fn test_separated_swap() {
        let m = ring(7);
        let links = Links::from_path(&[0, 1, 2, 3, 4, 5, 6]);
        let (swapped, deltas) = links.swap(&mv(1, 2, 5, 5), std::slice::from_ref(&m));
        assert_eq!(swapped.path(), vec![0, 5, 3, 4, 1, 2, 6]);
        assert_eq!(links.length(&m) + deltas[0], swapped.length(&m));
    }

    #[test]
    fn test_separated_by_single_node() {
        let m = ring(5);
        let links = Links::from_path(&[0, 1, 2, 3, 4]);
        let (swapped, deltas) = links.swap(&mv(1, 1, 3, 4), std::slice::from_ref(&m));
        assert_eq!(swapped.path(), vec![0, 3, 4, 2, 1]);
        assert_eq!(links.length(&m) + deltas[0], swapped.length(&m));
    }

    #[test]
    fn test_one_delta_per_metric() {
        let a = ring(5);
        let b = DistanceMatrix::euclidean(
            "pts",
            &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.5, 2.0)],
        )
        .unwrap();
        let links = Links::from_path(&[0, 1, 2, 3, 4]);
        let metrics = [a, b];
        let (swapped, deltas) = links.swap(&mv(2, 2, 3, 3), &metrics);
        assert_eq!(deltas.len(), 2);
        for (m, d) in metrics.iter().zip(&deltas) {
            assert!((links.length(m) + d - swapped.length(m)).abs() < 1e-9);
        }
    }
}
