//! Or-opt: relocate a short run of consecutive nodes within one route.
//!
//! For each run length k in 1..=3, every run `route[from..from + k]` is cut
//! out and tried in front of every other position. The best strictly
//! improving relocation for that k is applied. One pass is O(n²).
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use super::IMPROVEMENT_EPS;
use crate::distance::DistanceMatrix;

/// Runs one Or-opt pass for segment sizes 1, 2 and 3.
///
/// The route holds node indices excluding `depot`. Returns `true` if any
/// segment was moved.
///
/// # Examples
///
/// ```
/// use vrp_cost2serve::models::Position;
/// use vrp_cost2serve::distance::DistanceMatrix;
/// use vrp_cost2serve::local_search::{or_opt_pass, route_distance};
///
/// let dm = DistanceMatrix::from_positions(&[
///     Position::new(0.0, 0.0),
///     Position::new(1.0, 0.0),
///     Position::new(2.0, 0.0),
///     Position::new(3.0, 0.0),
/// ]);
///
/// let mut route = vec![2, 1, 3];
/// let before = route_distance(&route, 0, &dm);
/// or_opt_pass(&mut route, 0, &dm);
/// assert!(route_distance(&route, 0, &dm) <= before);
/// ```
pub fn or_opt_pass(route: &mut Vec<usize>, depot: usize, distances: &DistanceMatrix) -> bool {
    let mut improved = false;
    for seg_len in 1..=route.len().min(3) {
        if let Some(best) = best_relocation(route, depot, distances, seg_len) {
            best.apply(route);
            improved = true;
        }
    }
    improved
}

/// Length of the closed walk `depot → route… → depot`; 0 for an empty route.
pub fn route_distance(route: &[usize], depot: usize, distances: &DistanceMatrix) -> f64 {
    match (route.first(), route.last()) {
        (Some(&first), Some(&last)) => {
            distances.get(depot, first) + distances.path_length(route) + distances.get(last, depot)
        }
        _ => 0.0,
    }
}

/// Moving `route[from..from + len]` in front of the node originally at `to`
/// (`to == route.len()` appends).
#[derive(Debug, Clone, Copy)]
struct Relocation {
    from: usize,
    len: usize,
    to: usize,
    gain: f64,
}

impl Relocation {
    fn apply(&self, route: &mut Vec<usize>) {
        let segment: Vec<usize> = route.drain(self.from..self.from + self.len).collect();
        let at = if self.to > self.from {
            self.to - self.len
        } else {
            self.to
        };
        route.splice(at..at, segment);
    }
}

fn best_relocation(
    route: &[usize],
    depot: usize,
    distances: &DistanceMatrix,
    seg_len: usize,
) -> Option<Relocation> {
    let n = route.len();
    if n <= seg_len {
        return None;
    }
    let node = |k: Option<usize>| k.and_then(|k| route.get(k).copied()).unwrap_or(depot);

    let mut best: Option<Relocation> = None;
    for from in 0..=n - seg_len {
        let head = route[from];
        let tail = route[from + seg_len - 1];
        let before = node(from.checked_sub(1));
        let after = node(Some(from + seg_len));
        let cut_gain = distances.get(before, head) + distances.get(tail, after)
            - distances.get(before, after);

        for to in (0..=n).filter(|&to| to < from || to > from + seg_len) {
            let left = node(to.checked_sub(1));
            let right = node(Some(to));
            let insert_cost = distances.get(left, head) + distances.get(tail, right)
                - distances.get(left, right);

            let gain = cut_gain - insert_cost;
            if gain > best.map_or(IMPROVEMENT_EPS, |b| b.gain) {
                best = Some(Relocation {
                    from,
                    len: seg_len,
                    to,
                    gain,
                });
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;

    fn matrix(points: &[(f64, f64)]) -> DistanceMatrix {
        let positions: Vec<Position> = points.iter().map(|&(x, y)| Position::new(x, y)).collect();
        DistanceMatrix::from_positions(&positions)
    }

    fn line() -> DistanceMatrix {
        matrix(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)])
    }

    #[test]
    fn test_or_opt_already_optimal() {
        let dm = line();
        let mut route = vec![1, 2, 3];
        assert!(!or_opt_pass(&mut route, 0, &dm));
        assert_eq!(route, vec![1, 2, 3]);
    }

    #[test]
    fn test_or_opt_empty() {
        let dm = line();
        let mut route: Vec<usize> = vec![];
        assert!(!or_opt_pass(&mut route, 0, &dm));
        assert_eq!(route_distance(&route, 0, &dm), 0.0);
    }

    #[test]
    fn test_or_opt_moves_to_route_end() {
        // 0 → 3 → 1 → 2 → 0 = 3 + 2 + 1 + 2 = 8; moving 3 to the end gives 6
        let dm = line();
        let mut route = vec![3, 1, 2];
        assert!(or_opt_pass(&mut route, 0, &dm));
        assert!((route_distance(&route, 0, &dm) - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_or_opt_keeps_all_nodes() {
        let dm = matrix(&[
            (5.0, 5.0),
            (0.0, 0.0),
            (10.0, 0.0),
            (0.0, 10.0),
            (10.0, 10.0),
            (5.0, 0.0),
        ]);
        let mut route = vec![1, 4, 2, 5, 3];
        let initial = route_distance(&route, 0, &dm);
        while or_opt_pass(&mut route, 0, &dm) {}
        assert!(route_distance(&route, 0, &dm) <= initial + 1e-10);
        let mut sorted = route.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_route_distance() {
        let dm = line();
        assert!((route_distance(&[1, 2, 3], 0, &dm) - 6.0).abs() < 1e-10);
        assert!((route_distance(&[2], 0, &dm) - 4.0).abs() < 1e-10);
    }
}
