//! 2-opt segment reversal within one route.
//!
//! Reversing `route[i..=j]` replaces the edges `(a, route[i])` and
//! `(route[j], b)`, where `a` and `b` are the neighbours outside the segment
//! (the depot at either end), by `(a, route[j])` and `(route[i], b)`:
//!
//! ```text
//! gain = d(a, r[i]) + d(r[j], b) - d(a, r[j]) - d(r[i], b)
//! ```
//!
//! A pass scans all (i, j) and applies each reversal with positive gain as
//! soon as it is found. One pass is O(n²).
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use super::IMPROVEMENT_EPS;
use crate::distance::DistanceMatrix;

/// Runs one 2-opt pass over `route`, applying every improving reversal found.
///
/// The route holds node indices excluding `depot`; it is assumed to start
/// and end at `depot`. Returns `true` if the route changed.
///
/// # Examples
///
/// ```
/// use vrp_cost2serve::models::Position;
/// use vrp_cost2serve::distance::DistanceMatrix;
/// use vrp_cost2serve::local_search::{route_distance, two_opt_pass};
///
/// let dm = DistanceMatrix::from_positions(&[
///     Position::new(0.0, 0.0),
///     Position::new(1.0, 1.0),
///     Position::new(2.0, 0.0),
///     Position::new(1.0, -1.0),
/// ]);
///
/// // 0 → 1 → 3 → 2 → 0 crosses itself
/// let mut route = vec![1, 3, 2];
/// let before = route_distance(&route, 0, &dm);
/// assert!(two_opt_pass(&mut route, 0, &dm));
/// assert!(route_distance(&route, 0, &dm) < before);
/// ```
pub fn two_opt_pass(route: &mut [usize], depot: usize, distances: &DistanceMatrix) -> bool {
    let n = route.len();
    if n < 2 {
        return false;
    }

    let mut improved = false;
    for i in 0..n - 1 {
        for j in i + 1..n {
            if reversal_gain(route, depot, distances, i, j) > IMPROVEMENT_EPS {
                route[i..=j].reverse();
                improved = true;
            }
        }
    }
    improved
}

/// Distance saved by reversing `route[i..=j]`.
fn reversal_gain(
    route: &[usize],
    depot: usize,
    distances: &DistanceMatrix,
    i: usize,
    j: usize,
) -> f64 {
    let before = i.checked_sub(1).map_or(depot, |k| route[k]);
    let after = route.get(j + 1).copied().unwrap_or(depot);
    let (first, last) = (route[i], route[j]);

    distances.get(before, first) + distances.get(last, after)
        - distances.get(before, last)
        - distances.get(first, after)
}
