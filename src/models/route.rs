//! Route type and its output record.

use serde::{Deserialize, Serialize};

use super::DEPOT_SENTINEL;

/// An ordered sequence of customers served by one vehicle.
///
/// A route starts and ends at the depot (not stored in `customer_ids`).
/// Customers are referenced by their external ids.
///
/// # Examples
///
/// ```
/// use vrp_cost2serve::models::Route;
///
/// let route = Route::new(vec![4, 2], 34.1421, 10.0);
/// assert_eq!(route.len(), 2);
/// assert_eq!(route.customer_indices(), vec![-1, 4, 2, -1]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    customer_ids: Vec<i64>,
    distance: f64,
    load: f64,
}

impl Route {
    /// Creates a route from its visit order, depot-to-depot distance and load.
    pub fn new(customer_ids: Vec<i64>, distance: f64, load: f64) -> Self {
        Self {
            customer_ids,
            distance,
            load,
        }
    }

    /// Customer ids in visit order (depot excluded).
    pub fn customer_ids(&self) -> &[i64] {
        &self.customer_ids
    }

    /// Visit order with the depot legs written as [`DEPOT_SENTINEL`].
    pub fn customer_indices(&self) -> Vec<i64> {
        let mut out = Vec::with_capacity(self.customer_ids.len() + 2);
        out.push(DEPOT_SENTINEL);
        out.extend_from_slice(&self.customer_ids);
        out.push(DEPOT_SENTINEL);
        out
    }

    /// Number of customers on the route.
    pub fn len(&self) -> usize {
        self.customer_ids.len()
    }

    /// Returns `true` if the route serves no customer.
    pub fn is_empty(&self) -> bool {
        self.customer_ids.is_empty()
    }

    /// Depot-to-depot distance, rounded to 4 decimals.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Total demand served.
    pub fn load(&self) -> f64 {
        self.load
    }

    /// Output record for this route.
    pub fn to_record(&self, route_number: usize) -> RouteRecord {
        RouteRecord {
            route_number,
            customer_indices: self.customer_indices(),
            route_distance: self.distance,
        }
    }
}

/// Serialized form of a route:
/// `{route_number, customer_indices, route_distance}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRecord {
    /// Position of the route in the solution.
    pub route_number: usize,
    /// External ids in visit order, depot legs as `-1`.
    pub customer_indices: Vec<i64>,
    /// Depot-to-depot distance.
    pub route_distance: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_empty() {
        let r = Route::new(vec![], 0.0, 0.0);
        assert!(r.is_empty());
        assert_eq!(r.customer_indices(), vec![-1, -1]);
    }

    #[test]
    fn test_route_record() {
        let r = Route::new(vec![7, 3], 12.5, 8.0);
        let rec = r.to_record(2);
        assert_eq!(rec.route_number, 2);
        assert_eq!(rec.customer_indices, vec![-1, 7, 3, -1]);
        assert_eq!(rec.route_distance, 12.5);
        assert_eq!(r.load(), 8.0);
    }
}
