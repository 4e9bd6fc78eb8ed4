//! Quality indicators for finished bi-objective fronts.
//!
//! Both indicators take a front as a slice of `(f1, f2)` points (both
//! minimized) and return `None` when there is nothing to measure.
//!
//! # References
//!
//! - Zitzler & Thiele (1999), "Multiobjective evolutionary algorithms: a
//!   comparative case study and the strength Pareto approach"
//! - Coello Coello & Reyes Sierra (2004), "A study of the parallelization
//!   of a coevolutionary multi-objective evolutionary algorithm" (IGD)

use crate::tabu::Objectives;

/// Area dominated by `front` and bounded by `reference`.
///
/// The union of the rectangles spanned by each point and the reference
/// point, computed by sorting on the first objective and accumulating
/// non-overlapping strips. Points that are not strictly better than the
/// reference in both objectives add nothing, and dominated points are
/// tolerated. Returns `None` for an empty front.
///
/// # Complexity
///
/// O(n log n)
///
/// # Example
///
/// ```
/// use u_tabu::pareto::hypervolume;
///
/// let hv = hypervolume(&[(1.0, 5.0), (5.0, 1.0)], (6.0, 6.0));
/// assert_eq!(hv, Some(9.0));
/// assert_eq!(hypervolume(&[], (6.0, 6.0)), None);
/// ```
pub fn hypervolume(front: &[(f64, f64)], reference: (f64, f64)) -> Option<f64> {
    if front.is_empty() {
        return None;
    }

    let (ref_x, ref_y) = reference;
    let mut points: Vec<(f64, f64)> = front
        .iter()
        .copied()
        .filter(|&(x, y)| x < ref_x && y < ref_y)
        .collect();
    points.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));

    let mut volume = 0.0;
    let mut ceiling = ref_y;
    for (x, y) in points {
        if y < ceiling {
            volume += (ref_x - x) * (ceiling - y);
            ceiling = y;
        }
    }

    Some(volume)
}

/// Mean distance from each reference point to its nearest front point.
///
/// Lower is better; 0 means every reference point lies on the front.
/// Returns `None` when either input is empty.
///
/// # Example
///
/// ```
/// use u_tabu::pareto::inverted_generational_distance;
///
/// let reference = [(0.0, 2.0), (2.0, 0.0)];
/// let igd = inverted_generational_distance(&[(0.0, 2.0)], &reference).unwrap();
/// assert!((igd - 8f64.sqrt() / 2.0).abs() < 1e-12);
/// ```
pub fn inverted_generational_distance(
    front: &[(f64, f64)],
    reference_front: &[(f64, f64)],
) -> Option<f64> {
    if front.is_empty() || reference_front.is_empty() {
        return None;
    }

    let total: f64 = reference_front
        .iter()
        .map(|&(rx, ry)| {
            front
                .iter()
                .map(|&(x, y)| (x - rx).hypot(y - ry))
                .fold(f64::INFINITY, f64::min)
        })
        .sum();

    Some(total / reference_front.len() as f64)
}

/// Component-wise maximum over several fronts, the usual hypervolume
/// reference when comparing runs on the same problem.
///
/// Returns `None` when every front is empty.
pub fn nadir_point<'a, I>(fronts: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = &'a [(f64, f64)]>,
{
    fronts
        .into_iter()
        .flatten()
        .fold(None, |acc: Option<(f64, f64)>, &(x, y)| match acc {
            None => Some((x, y)),
            Some((mx, my)) => Some((mx.max(x), my.max(y))),
        })
}

/// First two objectives of each cost, skipping costs with fewer than two.
pub fn to_points(costs: &[Objectives]) -> Vec<(f64, f64)> {
    costs
        .iter()
        .filter(|c| c.len() >= 2)
        .map(|c| (c[0], c[1]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_hypervolume_two_points() {
        assert_eq!(hypervolume(&[(1.0, 5.0), (5.0, 1.0)], (6.0, 6.0)), Some(9.0));
    }

    #[test]
    fn test_hypervolume_order_independent() {
        let a = hypervolume(&[(1.0, 5.0), (3.0, 3.0), (5.0, 1.0)], (6.0, 6.0));
        let b = hypervolume(&[(5.0, 1.0), (1.0, 5.0), (3.0, 3.0)], (6.0, 6.0));
        assert_eq!(a, b);
        // 5 + 3*2 + 1*2
        assert_eq!(a, Some(13.0));
    }

    #[test]
    fn test_hypervolume_single_point() {
        assert_eq!(hypervolume(&[(2.0, 3.0)], (4.0, 4.0)), Some(2.0));
    }

    #[test]
    fn test_hypervolume_ignores_dominated_and_outside() {
        let base = hypervolume(&[(1.0, 1.0)], (3.0, 3.0));
        let noisy = hypervolume(&[(1.0, 1.0), (2.0, 2.0), (5.0, 0.0), (1.0, 1.0)], (3.0, 3.0));
        assert_eq!(base, Some(4.0));
        assert_eq!(noisy, base);
        assert_eq!(hypervolume(&[(3.0, 1.0)], (3.0, 3.0)), Some(0.0));
    }

    #[test]
    fn test_hypervolume_empty() {
        assert_eq!(hypervolume(&[], (1.0, 1.0)), None);
    }

    #[test]
    fn test_igd_on_reference_is_zero() {
        let front = [(1.0, 5.0), (5.0, 1.0)];
        assert_eq!(inverted_generational_distance(&front, &front), Some(0.0));
    }

    #[test]
    fn test_igd_averages_nearest_distances() {
        let reference = [(0.0, 0.0), (4.0, 0.0)];
        let front = [(0.0, 3.0)];
        // distances 3 and 5
        assert_eq!(inverted_generational_distance(&front, &reference), Some(4.0));
    }

    #[test]
    fn test_igd_empty_inputs() {
        assert_eq!(inverted_generational_distance(&[], &[(0.0, 0.0)]), None);
        assert_eq!(inverted_generational_distance(&[(0.0, 0.0)], &[]), None);
    }

    #[test]
    fn test_nadir_point() {
        let a: &[(f64, f64)] = &[(1.0, 5.0), (3.0, 2.0)];
        let b: &[(f64, f64)] = &[(4.0, 1.0)];
        assert_eq!(nadir_point([a, b]), Some((4.0, 5.0)));
        assert_eq!(nadir_point(Vec::<&[(f64, f64)]>::new()), None);
    }

    #[test]
    fn test_to_points_skips_short_costs() {
        let costs = vec![Objectives::from([1.0, 2.0, 3.0]), Objectives::from([4.0])];
        assert_eq!(to_points(&costs), vec![(1.0, 2.0)]);
    }

    proptest! {
        #[test]
        fn prop_hypervolume_monotone_under_non_dominated_addition(
            points in prop::collection::vec((0u8..50, 0u8..50), 1..20),
            extra in (0u8..50, 0u8..50),
        ) {
            let reference = (50.0, 50.0);
            let front: Vec<(f64, f64)> = crate::pareto::build_pareto_front(
                points.iter().map(|&(a, b)| vec![a as f64, b as f64]),
            )
            .into_iter()
            .map(|p| (p[0], p[1]))
            .collect();

            let extra = (extra.0 as f64, extra.1 as f64);
            let dominated = front
                .iter()
                .any(|&(x, y)| crate::pareto::dominates(&[x, y], &[extra.0, extra.1]));
            prop_assume!(!dominated);

            let mut grown = front.clone();
            grown.push(extra);

            let before = hypervolume(&front, reference).unwrap();
            let after = hypervolume(&grown, reference).unwrap();
            prop_assert!(after >= before - 1e-9, "{} < {}", after, before);
        }
    }
}
