//! Nearest-neighbor + local search tour sequencer.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use super::{Tour, TourSequencer};
use crate::distance::DistanceMatrix;
use crate::error::RoutingError;
use crate::local_search::{or_opt_pass, two_opt_pass};

/// Configuration for [`LocalSearchSequencer`].
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use vrp_cost2serve::tour::TourConfig;
///
/// let config = TourConfig::default().with_time_limit(Duration::from_millis(50));
/// assert_eq!(config.time_limit, Some(Duration::from_millis(50)));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TourConfig {
    /// Wall-clock budget for the improvement phase of one tour.
    ///
    /// When it runs out the best tour so far is returned.
    pub time_limit: Option<Duration>,
}

impl TourConfig {
    /// Sets the per-tour time budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}

/// Builds a tour by nearest-neighbor construction from the depot, then
/// alternates 2-opt and Or-opt passes until neither improves.
///
/// Ties are broken by lowest node index, so identical input always gives
/// the identical tour unless the time budget fires.
///
/// # Examples
///
/// ```
/// use vrp_cost2serve::models::Position;
/// use vrp_cost2serve::distance::DistanceMatrix;
/// use vrp_cost2serve::tour::{LocalSearchSequencer, TourSequencer};
///
/// let dm = DistanceMatrix::from_positions(&[
///     Position::new(0.0, 0.0),
///     Position::new(0.0, 1.0),
///     Position::new(1.0, 1.0),
///     Position::new(1.0, 0.0),
/// ]);
/// let tour = LocalSearchSequencer::default().sequence(&dm).unwrap();
/// assert_eq!(tour.nodes().first(), Some(&0));
/// assert_eq!(tour.nodes().last(), Some(&0));
/// assert!((tour.distance() - 4.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LocalSearchSequencer {
    config: TourConfig,
}

impl LocalSearchSequencer {
    /// Creates a sequencer with the given configuration.
    pub fn new(config: TourConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &TourConfig {
        &self.config
    }
}

impl TourSequencer for LocalSearchSequencer {
    fn sequence(&self, distances: &DistanceMatrix) -> Result<Tour, RoutingError> {
        let n = distances.size();
        if n == 0 || !distances.is_finite() {
            return Err(RoutingError::TourNotFound { nodes: n });
        }

        let deadline = self.config.time_limit.map(|limit| Instant::now() + limit);
        let depot = 0;

        let mut route = nearest_neighbor_order(distances, depot);
        let mut passes = 0usize;
        while route.len() > 2 {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                warn!(nodes = n, passes, "tour time budget exhausted");
                break;
            }
            let reversed = two_opt_pass(&mut route, depot, distances);
            let relocated = or_opt_pass(&mut route, depot, distances);
            passes += 1;
            if !reversed && !relocated {
                break;
            }
        }
        trace!(nodes = n, passes, "tour sequenced");

        let mut nodes = Vec::with_capacity(route.len() + 2);
        nodes.push(depot);
        nodes.extend(route);
        nodes.push(depot);
        Ok(Tour::from_nodes(nodes, distances))
    }
}

/// Greedy nearest-neighbor order of all non-depot nodes.
fn nearest_neighbor_order(distances: &DistanceMatrix, depot: usize) -> Vec<usize> {
    let mut remaining: Vec<usize> = (0..distances.size()).filter(|&i| i != depot).collect();
    let mut order = Vec::with_capacity(remaining.len());
    let mut current = depot;
    while let Some(next) = distances.nearest_neighbor(current, &remaining) {
        remaining.retain(|&i| i != next);
        order.push(next);
        current = next;
    }
    order
}
