//! Solution and violation types.

use super::{round_to, Route, RouteRecord};
use crate::error::RoutingError;

/// What [`RouteEvaluator::validate`](crate::evaluation::RouteEvaluator::validate)
/// found wrong with a solution.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationType {
    /// Route load exceeds vehicle capacity.
    CapacityExceeded {
        /// Position of the route in [`Solution::routes`].
        route_index: usize,
        load: f64,
        capacity: f64,
    },
    /// Route length exceeds the requested maximum.
    MaxDistanceExceeded {
        route_index: usize,
        /// Unrounded depot-to-depot length.
        distance: f64,
        max_distance: f64,
    },
    /// Served more than once, on one route or several.
    DuplicateCustomer { customer_id: i64 },
    /// In the instance but on no route.
    MissingCustomer { customer_id: i64 },
    /// A route references an id that is not in the instance.
    UnknownCustomer { customer_id: i64 },
}

/// A single problem found by validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// What is wrong, with the route or customer it concerns.
    pub kind: ViolationType,
}

impl Violation {
    /// Wraps a violation kind.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// The partition of an instance's customers into routes.
///
/// # Examples
///
/// ```
/// use vrp_cost2serve::models::{Route, Solution};
///
/// let mut sol = Solution::new();
/// sol.add_route(Route::new(vec![1], 10.0, 5.0));
/// sol.add_route(Route::new(vec![2, 3], 20.12345, 8.0));
/// assert_eq!(sol.num_routes(), 2);
/// assert_eq!(sol.num_served(), 3);
/// assert_eq!(sol.rounded_total(2), 30.12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    routes: Vec<Route>,
    degenerate: bool,
}

impl Solution {
    /// Creates an empty solution.
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            degenerate: false,
        }
    }

    /// The placeholder returned when a construction ends with no routes.
    ///
    /// It holds one empty route of distance zero and reports
    /// [`is_degenerate`](Self::is_degenerate), so it cannot be mistaken for
    /// a real zero-length route.
    pub fn degenerate() -> Self {
        Self {
            routes: vec![Route::new(Vec::new(), 0.0, 0.0)],
            degenerate: true,
        }
    }

    /// Adds a route to this solution.
    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Returns the routes in this solution.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns the number of routes (vehicles used).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Total number of customers served.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.len()).sum()
    }

    /// Returns `true` for the no-route placeholder.
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    /// Sum of the route distances, each already rounded to 4 decimals.
    pub fn total_distance(&self) -> f64 {
        self.routes.iter().map(|r| r.distance()).sum()
    }

    /// Sum of the route distances rounded to `decimals` places.
    ///
    /// The sweep constructor reports its total as `rounded_total(2)`.
    pub fn rounded_total(&self, decimals: i32) -> f64 {
        round_to(self.total_distance(), decimals)
    }

    /// Output records, numbered in route order.
    pub fn to_records(&self) -> Vec<RouteRecord> {
        self.routes
            .iter()
            .enumerate()
            .map(|(i, r)| r.to_record(i))
            .collect()
    }

    /// Output records as a JSON array.
    pub fn to_json_string(&self) -> Result<String, RoutingError> {
        Ok(serde_json::to_string(&self.to_records())?)
    }
}

impl Default for Solution {
    fn default() -> Self {
        Self::new()
    }
}
