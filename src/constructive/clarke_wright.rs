//! Clarke-Wright savings algorithm, parallel version.
//!
//! # Algorithm
//!
//! The savings algorithm (Clarke & Wright, 1964) starts with each customer
//! on its own route (depot → customer → depot). It then merges routes by
//! joining the end of one route to the start of another, scored by the
//! distance saved:
//!
//! ```text
//! s(i, j) = d(0, i) + d(0, j) - d(i, j)
//! ```
//!
//! All pairs are processed in decreasing order of savings, and every merge
//! that keeps the combined route within capacity (and, optionally, a
//! maximum route distance) is accepted. A node that becomes interior to a
//! route can no longer take part in a merge.
//!
//! # Complexity
//!
//! O(n² log n) where n = number of customers (dominated by sorting savings).
//!
//! # Reference
//!
//! Clarke, G. & Wright, J.W. (1964). "Scheduling of Vehicles from a Central
//! Depot to a Number of Delivery Points", *Operations Research* 12(4), 568-581.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::RouteConstructor;
use crate::distance::DistanceMatrix;
use crate::error::RoutingError;
use crate::evaluation::RouteEvaluator;
use crate::models::{Instance, Solution};

/// Tolerance on the merged demand.
const CAPACITY_EPS: f64 = 1e-10;

/// Tolerance on the merged route distance.
const DISTANCE_EPS: f64 = 1e-10;

/// Settings for the savings constructor.
///
/// # Examples
///
/// ```
/// use vrp_cost2serve::constructive::SavingsConfig;
///
/// let config = SavingsConfig::default().with_max_route_distance(120.0);
/// assert!(config.ignore_negative_savings);
/// assert_eq!(config.max_route_distance, Some(120.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavingsConfig {
    /// Upper bound on a route's depot-to-depot distance.
    pub max_route_distance: Option<f64>,
    /// Stop merging at the first pair with a negative saving.
    pub ignore_negative_savings: bool,
}

impl Default for SavingsConfig {
    fn default() -> Self {
        Self {
            max_route_distance: None,
            ignore_negative_savings: true,
        }
    }
}

impl SavingsConfig {
    /// Sets the maximum route distance.
    pub fn with_max_route_distance(mut self, max: f64) -> Self {
        self.max_route_distance = Some(max);
        self
    }

    /// Keeps merging past negative savings.
    pub fn with_negative_savings(mut self) -> Self {
        self.ignore_negative_savings = false;
        self
    }
}

/// A savings value for joining customer nodes `i` and `j`.
#[derive(Debug)]
struct Saving {
    i: usize,
    j: usize,
    value: f64,
    distance: f64,
}

/// Route under construction: customer nodes (depot implicit), demand and
/// depot-to-depot cost.
#[derive(Debug)]
struct PartialRoute {
    nodes: Vec<usize>,
    demand: f64,
    cost: f64,
}

/// A slot of the route arena.
#[derive(Debug)]
enum RouteSlot {
    Active(PartialRoute),
    /// Absorbed into another route; never referenced again.
    Merged,
}

/// Clarke-Wright parallel savings constructor.
///
/// # Examples
///
/// ```
/// use vrp_cost2serve::models::{Customer, Depot, Instance};
/// use vrp_cost2serve::constructive::{RouteConstructor, Savings};
///
/// let instance = Instance::new(
///     Depot::new(0.0, 0.0),
///     vec![
///         Customer::new(1, 1.0, 0.0, 10.0),
///         Customer::new(2, 2.0, 0.0, 10.0),
///         Customer::new(3, 3.0, 0.0, 10.0),
///     ],
///     30.0,
/// )
/// .unwrap();
///
/// let solution = Savings::default().solve(&instance).unwrap();
/// assert_eq!(solution.num_routes(), 1);
/// assert!((solution.total_distance() - 6.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Savings {
    config: SavingsConfig,
}

impl Savings {
    /// Creates a savings constructor with the given settings.
    pub fn new(config: SavingsConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &SavingsConfig {
        &self.config
    }

    /// Runs the merge phase and returns the customer node sequences of the
    /// surviving routes, in slot order.
    ///
    /// Node 0 of `distances` is the depot; `demands[k]` belongs to node
    /// `k + 1`.
    fn merge_routes(
        &self,
        distances: &DistanceMatrix,
        demands: &[f64],
        capacity: f64,
    ) -> Vec<Vec<usize>> {
        let n = demands.len();
        let savings = compute_savings(distances);

        // Slot k starts as the singleton route of node k + 1
        let mut slots: Vec<RouteSlot> = demands
            .iter()
            .enumerate()
            .map(|(k, &demand)| {
                let node = k + 1;
                RouteSlot::Active(PartialRoute {
                    nodes: vec![node],
                    demand,
                    cost: distances.get(0, node) + distances.get(node, 0),
                })
            })
            .collect();

        // endpoint[node] = slot of the route `node` is a free end of; None
        // for interior nodes and the depot
        let mut endpoint: Vec<Option<usize>> =
            std::iter::once(None).chain((0..n).map(Some)).collect();

        let mut merges = 0usize;
        for saving in &savings {
            let Saving { i, j, value, .. } = *saving;
            if self.config.ignore_negative_savings && value < 0.0 {
                trace!(i, j, value, "negative saving, stopping");
                break;
            }

            let (Some(l), Some(r)) = (endpoint[i], endpoint[j]) else {
                continue;
            };
            if l == r {
                continue;
            }
            let (RouteSlot::Active(left), RouteSlot::Active(right)) = (&slots[l], &slots[r]) else {
                continue;
            };

            let merged_demand = left.demand + right.demand;
            if merged_demand - CAPACITY_EPS > capacity {
                trace!(i, j, merged_demand, "merge rejected: capacity");
                continue;
            }

            let merged_cost = left.cost - distances.get(0, i) + right.cost
                - distances.get(0, j)
                + distances.get(i, j);
            if let Some(max) = self.config.max_route_distance {
                if merged_cost - DISTANCE_EPS > max {
                    trace!(i, j, merged_cost, "merge rejected: route distance");
                    continue;
                }
            }

            let RouteSlot::Active(mut right) = std::mem::replace(&mut slots[r], RouteSlot::Merged)
            else {
                continue;
            };
            let RouteSlot::Active(left) = &mut slots[l] else {
                continue;
            };

            // i must end the left route and j must start the right one
            if left.nodes.first() == Some(&i) {
                left.nodes.reverse();
            }
            if right.nodes.last() == Some(&j) {
                right.nodes.reverse();
            }

            if left.nodes.len() > 1 {
                endpoint[i] = None;
            }
            if right.nodes.len() > 1 {
                endpoint[j] = None;
            }
            if let Some(&far) = right.nodes.last() {
                endpoint[far] = Some(l);
            }

            left.nodes.append(&mut right.nodes);
            left.demand = merged_demand;
            left.cost = merged_cost;
            merges += 1;
            trace!(i, j, value, left = l, right = r, "merged");
        }

        debug!(candidates = savings.len(), merges, "savings merge phase done");
        slots
            .into_iter()
            .filter_map(|slot| match slot {
                RouteSlot::Active(route) => Some(route.nodes),
                RouteSlot::Merged => None,
            })
            .collect()
    }
}

impl RouteConstructor for Savings {
    fn solve(&self, instance: &Instance) -> Result<Solution, RoutingError> {
        if !instance.has_usable_capacity() {
            debug!(capacity = instance.vehicle_capacity(), "unusable capacity, no routes");
            return Ok(Solution::degenerate());
        }
        instance.check_single_demands()?;
        if instance.num_customers() == 0 {
            return Ok(Solution::degenerate());
        }

        let distances = DistanceMatrix::from_instance(instance);
        let demands: Vec<f64> = instance.customers().iter().map(|c| c.demand()).collect();
        let evaluator = RouteEvaluator::new(instance, &distances);

        let mut solution = Solution::new();
        for nodes in self.merge_routes(&distances, &demands, instance.vehicle_capacity()) {
            solution.add_route(evaluator.build_route(&nodes));
        }

        debug!(
            routes = solution.num_routes(),
            total = solution.rounded_total(2),
            "savings solved"
        );
        Ok(solution)
    }

    fn name(&self) -> &'static str {
        "savings"
    }
}

/// Savings for every unordered customer pair, best first.
///
/// Sorted by saving descending; ties go to the pair that is farther apart,
/// then to the higher node indices.
fn compute_savings(distances: &DistanceMatrix) -> Vec<Saving> {
    let n = distances.size();
    let mut savings = Vec::with_capacity(n.saturating_sub(1) * n.saturating_sub(2) / 2);
    for i in 1..n {
        for j in (i + 1)..n {
            let d = distances.get(i, j);
            savings.push(Saving {
                i,
                j,
                value: distances.get(i, 0) + distances.get(0, j) - d,
                distance: d,
            });
        }
    }

    savings.sort_by(|a, b| {
        b.value
            .total_cmp(&a.value)
            .then_with(|| b.distance.total_cmp(&a.distance))
            .then_with(|| b.i.cmp(&a.i))
            .then_with(|| b.j.cmp(&a.j))
    });
    savings
}
