//! Route evaluator that computes distance, load and feasibility.

use std::collections::HashMap;

use crate::distance::DistanceMatrix;
use crate::models::{round_to, Instance, Route, Solution, Violation, ViolationType};

/// Tolerance on route load when validating capacity.
pub const CAPACITY_TOLERANCE: f64 = 1e-9;

/// Evaluates routes against an instance and its distance matrix.
///
/// Node indices follow [`DistanceMatrix::from_instance`]: 0 is the depot and
/// `k` is the `k`-th customer (1-based) in input order.
///
/// # Examples
///
/// ```
/// use vrp_cost2serve::models::{Customer, Depot, Instance};
/// use vrp_cost2serve::distance::DistanceMatrix;
/// use vrp_cost2serve::evaluation::RouteEvaluator;
///
/// let instance = Instance::new(
///     Depot::new(0.0, 0.0),
///     vec![Customer::new(11, 3.0, 4.0, 10.0), Customer::new(12, 6.0, 8.0, 20.0)],
///     100.0,
/// )
/// .unwrap();
/// let dm = DistanceMatrix::from_instance(&instance);
///
/// let evaluator = RouteEvaluator::new(&instance, &dm);
/// let route = evaluator.build_route(&[1, 2]);
/// assert_eq!(route.customer_ids(), &[11, 12]);
/// assert_eq!(route.load(), 30.0);
/// assert!((route.distance() - 20.0).abs() < 1e-10);
/// ```
pub struct RouteEvaluator<'a> {
    instance: &'a Instance,
    distances: &'a DistanceMatrix,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates a new evaluator for the given instance and matrix.
    pub fn new(instance: &'a Instance, distances: &'a DistanceMatrix) -> Self {
        Self {
            instance,
            distances,
        }
    }

    /// Builds a route from customer node indices (depot excluded).
    ///
    /// The distance includes both depot legs and is rounded to 4 decimals.
    pub fn build_route(&self, nodes: &[usize]) -> Route {
        let customers = self.instance.customers();
        let ids = nodes.iter().map(|&n| customers[n - 1].id()).collect();
        let load = nodes.iter().map(|&n| customers[n - 1].demand()).sum();
        let distance = round_to(self.route_distance(nodes), 4);
        Route::new(ids, distance, load)
    }

    /// Unrounded depot → nodes → depot distance.
    pub fn route_distance(&self, nodes: &[usize]) -> f64 {
        match (nodes.first(), nodes.last()) {
            (Some(&first), Some(&last)) => {
                self.distances.get(0, first)
                    + self.distances.path_length(nodes)
                    + self.distances.get(last, 0)
            }
            _ => 0.0,
        }
    }

    /// Checks a solution for coverage and capacity, and optionally a maximum
    /// route distance.
    ///
    /// Every customer must appear exactly once and each route's load must
    /// stay within capacity (plus [`CAPACITY_TOLERANCE`]). The distance
    /// bound is checked against the unrounded route length recomputed from
    /// the matrix, not the 4-decimal [`Route::distance`]. The degenerate
    /// placeholder solution is checked for coverage only.
    pub fn validate(&self, solution: &Solution, max_route_distance: Option<f64>) -> Vec<Violation> {
        let mut violations = Vec::new();
        let index: HashMap<i64, usize> = self
            .instance
            .customers()
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id(), i))
            .collect();
        let mut served = vec![0usize; self.instance.num_customers()];
        let capacity = self.instance.vehicle_capacity();

        for (route_index, route) in solution.routes().iter().enumerate() {
            let mut load = 0.0;
            let mut nodes = Vec::with_capacity(route.len());
            for &id in route.customer_ids() {
                match index.get(&id) {
                    Some(&i) => {
                        served[i] += 1;
                        load += self.instance.customers()[i].demand();
                        nodes.push(i + 1);
                    }
                    None => violations.push(Violation::new(ViolationType::UnknownCustomer {
                        customer_id: id,
                    })),
                }
            }

            if load > capacity + CAPACITY_TOLERANCE {
                violations.push(Violation::new(ViolationType::CapacityExceeded {
                    route_index,
                    load,
                    capacity,
                }));
            }

            if let Some(max_d) = max_route_distance {
                let distance = self.route_distance(&nodes);
                if distance > max_d + CAPACITY_TOLERANCE {
                    violations.push(Violation::new(ViolationType::MaxDistanceExceeded {
                        route_index,
                        distance,
                        max_distance: max_d,
                    }));
                }
            }
        }

        for (customer, &count) in self.instance.customers().iter().zip(&served) {
            if count == 0 {
                violations.push(Violation::new(ViolationType::MissingCustomer {
                    customer_id: customer.id(),
                }));
            } else if count > 1 {
                violations.push(Violation::new(ViolationType::DuplicateCustomer {
                    customer_id: customer.id(),
                }));
            }
        }

        violations
    }
}
