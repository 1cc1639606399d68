//! Sweep constructive heuristic.
//!
//! # Algorithm
//!
//! Sorts customers by compass bearing from the depot (north = 0°, clockwise),
//! then groups them into clusters by sweeping through the bearings while
//! respecting capacity. Each cluster is then ordered into a short closed tour
//! by a [`TourSequencer`].
//!
//! # Complexity
//!
//! O(n log n) for clustering, plus the cost of sequencing each cluster.
//!
//! # Reference
//!
//! Gillett, B.E. & Miller, L.R. (1974). "A Heuristic Algorithm for the
//! Vehicle-Dispatch Problem", *Operations Research* 22(2), 340-349.

use tracing::debug;

use super::RouteConstructor;
use crate::distance::DistanceMatrix;
use crate::error::RoutingError;
use crate::models::{Instance, Route, Solution};
use crate::tour::{LocalSearchSequencer, TourConfig, TourSequencer};

/// Cluster-first, route-second construction by bearing sweep.
///
/// Each route keeps its tour distance rounded to 4 decimals. The sweep
/// total is the cross-route sum rounded to 2 decimals, read with
/// [`Solution::rounded_total(2)`](Solution::rounded_total);
/// [`Solution::total_distance`] is the same sum before that rounding.
///
/// # Examples
///
/// ```
/// use vrp_cost2serve::models::{Customer, Depot, Instance};
/// use vrp_cost2serve::constructive::{RouteConstructor, Sweep};
///
/// let instance = Instance::new(
///     Depot::new(0.0, 0.0),
///     vec![
///         Customer::new(1, 1.0, 1.0, 10.0),
///         Customer::new(2, -1.0, 1.0, 10.0),
///         Customer::new(3, -1.0, -1.0, 10.0),
///         Customer::new(4, 1.0, -1.0, 10.0),
///     ],
///     30.0,
/// )
/// .unwrap();
///
/// let solution = Sweep::default().solve(&instance).unwrap();
/// assert_eq!(solution.num_served(), 4);
/// assert_eq!(solution.num_routes(), 2);
/// // 6.8284 + 2.8284
/// assert_eq!(solution.rounded_total(2), 9.66);
/// ```
#[derive(Debug, Clone)]
pub struct Sweep<S = LocalSearchSequencer> {
    sequencer: S,
}

impl Sweep<LocalSearchSequencer> {
    /// Creates a sweep constructor with the local search sequencer.
    pub fn with_tour_config(config: TourConfig) -> Self {
        Self::new(LocalSearchSequencer::new(config))
    }
}

impl Default for Sweep<LocalSearchSequencer> {
    fn default() -> Self {
        Self::with_tour_config(TourConfig::default())
    }
}

impl<S: TourSequencer> Sweep<S> {
    /// Creates a sweep constructor using the given tour sequencer.
    pub fn new(sequencer: S) -> Self {
        Self { sequencer }
    }

    /// Groups customer node indices into capacity-feasible clusters.
    ///
    /// Customers are visited in ascending bearing (stable, so equal bearings
    /// keep input order). A cluster closes when the next customer would push
    /// its demand over capacity; the last cluster is always closed.
    fn cluster(&self, instance: &Instance) -> Vec<Vec<usize>> {
        let depot = instance.depot().position();
        let mut by_bearing: Vec<(usize, f64)> = instance
            .customers()
            .iter()
            .enumerate()
            .map(|(i, c)| (i + 1, c.position().bearing_from(depot)))
            .collect();
        by_bearing.sort_by(|a, b| a.1.total_cmp(&b.1));

        let capacity = instance.vehicle_capacity();
        let mut clusters = Vec::new();
        let mut current: Vec<usize> = Vec::new();
        let mut load = 0.0;

        for (node, _) in by_bearing {
            let demand = instance.customers()[node - 1].demand();
            if load + demand > capacity && !current.is_empty() {
                debug!(size = current.len(), load, "cluster closed");
                clusters.push(std::mem::take(&mut current));
                load = 0.0;
            }
            current.push(node);
            load += demand;
        }
        if !current.is_empty() {
            clusters.push(current);
        }
        clusters
    }
}

impl<S: TourSequencer> RouteConstructor for Sweep<S> {
    fn solve(&self, instance: &Instance) -> Result<Solution, RoutingError> {
        let mut solution = Solution::new();
        if !instance.has_usable_capacity() {
            debug!(capacity = instance.vehicle_capacity(), "unusable capacity, no routes");
            return Ok(solution);
        }
        instance.check_single_demands()?;
        if instance.num_customers() == 0 {
            return Ok(solution);
        }

        let distances = DistanceMatrix::from_instance(instance);
        for cluster in self.cluster(instance) {
            let mut nodes = Vec::with_capacity(cluster.len() + 1);
            nodes.push(0);
            nodes.extend_from_slice(&cluster);

            let tour = self.sequencer.sequence(&distances.submatrix(&nodes))?;
            if !visits_each_once(tour.stops(), nodes.len()) {
                return Err(RoutingError::TourNotFound { nodes: nodes.len() });
            }
            let customers = instance.customers();
            let ids = tour
                .stops()
                .iter()
                .map(|&local| customers[nodes[local] - 1].id())
                .collect();
            let load = cluster.iter().map(|&n| customers[n - 1].demand()).sum();
            solution.add_route(Route::new(ids, tour.distance(), load));
        }

        debug!(
            routes = solution.num_routes(),
            total = solution.rounded_total(2),
            "sweep solved"
        );
        Ok(solution)
    }

    fn name(&self) -> &'static str {
        "sweep"
    }
}

/// `true` if `stops` is a permutation of `1..size`.
fn visits_each_once(stops: &[usize], size: usize) -> bool {
    let mut seen = vec![false; size];
    stops.len() + 1 == size
        && stops
            .iter()
            .all(|&s| s > 0 && s < size && !std::mem::replace(&mut seen[s], true))
}
