//! Routing instance: one depot, a customer set and a vehicle capacity.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::{Customer, Depot};
use crate::error::RoutingError;

/// A CVRP instance with a homogeneous, unbounded fleet.
///
/// The serialized form matches the instance records used by the data files:
/// `{instance_name, max_vehicle_number, vehicle_capacity, depot, customers}`.
///
/// # Examples
///
/// ```
/// use vrp_cost2serve::models::{Customer, Depot, Instance};
///
/// let instance = Instance::new(
///     Depot::new(0.0, 0.0),
///     vec![Customer::new(1, 10.0, 0.0, 5.0), Customer::new(2, 0.0, 10.0, 5.0)],
///     10.0,
/// )
/// .unwrap();
/// assert_eq!(instance.num_customers(), 2);
/// assert_eq!(instance.total_demand(), 10.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    instance_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_vehicle_number: Option<u32>,
    vehicle_capacity: f64,
    depot: Depot,
    customers: Vec<Customer>,
}

impl Instance {
    /// Creates and validates an instance.
    ///
    /// Fails if the capacity is not a positive finite number, or a customer
    /// has non-finite coordinates, a negative or non-finite demand, or a
    /// duplicated id. Customers heavier than the capacity are accepted here
    /// and rejected by the constructors.
    pub fn new(
        depot: Depot,
        customers: Vec<Customer>,
        vehicle_capacity: f64,
    ) -> Result<Self, RoutingError> {
        let instance = Self {
            instance_name: None,
            max_vehicle_number: None,
            vehicle_capacity,
            depot,
            customers,
        };
        instance.validate()?;
        Ok(instance)
    }

    /// Sets a descriptive instance name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.instance_name = Some(name.into());
        self
    }

    /// Parses and validates an instance from its JSON record.
    pub fn from_json_str(json: &str) -> Result<Self, RoutingError> {
        let instance: Self = serde_json::from_str(json)?;
        instance.validate()?;
        Ok(instance)
    }

    /// Serializes the instance to its JSON record.
    pub fn to_json_string(&self) -> Result<String, RoutingError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Generates a reproducible random instance.
    ///
    /// Coordinates are uniform in `[0, 100)`, demands are whole numbers in
    /// `[1, max_demand]` and the depot sits at the centre of the square.
    /// Customer ids run from 1 to `n`.
    pub fn random(n: usize, max_demand: u32, vehicle_capacity: f64, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let max_demand = max_demand.max(1);
        let customers = (1..=n)
            .map(|id| {
                let x = rng.random_range(0.0..100.0);
                let y = rng.random_range(0.0..100.0);
                let demand = rng.random_range(1..=max_demand) as f64;
                Customer::new(id as i64, x, y, demand)
            })
            .collect();
        Self {
            instance_name: Some(format!("random-{}-{}", n, seed)),
            max_vehicle_number: None,
            vehicle_capacity,
            depot: Depot::new(50.0, 50.0),
            customers,
        }
    }

    /// Checks capacity and customer records.
    pub fn validate(&self) -> Result<(), RoutingError> {
        if !self.has_usable_capacity() {
            return Err(RoutingError::InvalidCapacity(self.vehicle_capacity));
        }
        if !self.depot.position().is_finite() {
            return Err(RoutingError::InvalidCustomer {
                customer_id: crate::models::DEPOT_SENTINEL,
                reason: "depot coordinates are not finite".to_string(),
            });
        }
        let mut seen = HashSet::with_capacity(self.customers.len());
        for c in &self.customers {
            if !c.position().is_finite() {
                return Err(RoutingError::InvalidCustomer {
                    customer_id: c.id(),
                    reason: "coordinates are not finite".to_string(),
                });
            }
            if !c.demand().is_finite() || c.demand() < 0.0 {
                return Err(RoutingError::InvalidCustomer {
                    customer_id: c.id(),
                    reason: format!("demand {} is not a non-negative number", c.demand()),
                });
            }
            if !seen.insert(c.id()) {
                return Err(RoutingError::InvalidCustomer {
                    customer_id: c.id(),
                    reason: "duplicate id".to_string(),
                });
            }
        }
        Ok(())
    }

    /// `true` if the capacity is a positive finite number.
    pub fn has_usable_capacity(&self) -> bool {
        self.vehicle_capacity.is_finite() && self.vehicle_capacity > 0.0
    }

    /// Returns the first customer whose demand alone exceeds capacity.
    pub fn check_single_demands(&self) -> Result<(), RoutingError> {
        match self
            .customers
            .iter()
            .find(|c| c.demand() > self.vehicle_capacity)
        {
            Some(c) => Err(RoutingError::CapacityViolation {
                customer_id: c.id(),
                demand: c.demand(),
                capacity: self.vehicle_capacity,
            }),
            None => Ok(()),
        }
    }

    /// A copy of this instance without the customer at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn without(&self, index: usize) -> Self {
        let mut reduced = self.clone();
        reduced.customers.remove(index);
        reduced
    }

    /// Instance name, if any.
    pub fn name(&self) -> Option<&str> {
        self.instance_name.as_deref()
    }

    /// Fleet size hint carried by the data files; unused by the heuristics.
    pub fn max_vehicle_number(&self) -> Option<u32> {
        self.max_vehicle_number
    }

    /// Vehicle capacity.
    pub fn vehicle_capacity(&self) -> f64 {
        self.vehicle_capacity
    }

    /// The depot.
    pub fn depot(&self) -> &Depot {
        &self.depot
    }

    /// Customers in input order.
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Number of customers (depot excluded).
    pub fn num_customers(&self) -> usize {
        self.customers.len()
    }

    /// Sum of all customer demands.
    pub fn total_demand(&self) -> f64 {
        self.customers.iter().map(|c| c.demand()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Instance {
        Instance::new(
            Depot::new(0.0, 0.0),
            vec![
                Customer::new(10, 1.0, 0.0, 3.0),
                Customer::new(20, 2.0, 0.0, 4.0),
                Customer::new(30, 3.0, 0.0, 5.0),
            ],
            10.0,
        )
        .expect("valid instance")
    }

    #[test]
    fn test_new_valid() {
        let inst = sample();
        assert_eq!(inst.num_customers(), 3);
        assert_eq!(inst.vehicle_capacity(), 10.0);
        assert_eq!(inst.total_demand(), 12.0);
        assert!(inst.name().is_none());
    }

    #[test]
    fn test_invalid_capacity() {
        for cap in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let r = Instance::new(Depot::new(0.0, 0.0), vec![], cap);
            assert!(matches!(r, Err(RoutingError::InvalidCapacity(_))));
        }
    }

    #[test]
    fn test_invalid_customer_records() {
        let bad_coords = vec![Customer::new(1, f64::NAN, 0.0, 1.0)];
        let negative = vec![Customer::new(2, 0.0, 0.0, -1.0)];
        let duplicate = vec![
            Customer::new(3, 0.0, 1.0, 1.0),
            Customer::new(3, 1.0, 0.0, 1.0),
        ];
        for (customers, id) in [(bad_coords, 1), (negative, 2), (duplicate, 3)] {
            match Instance::new(Depot::new(0.0, 0.0), customers, 10.0) {
                Err(RoutingError::InvalidCustomer { customer_id, .. }) => {
                    assert_eq!(customer_id, id)
                }
                other => panic!("expected InvalidCustomer, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_check_single_demands() {
        let inst = Instance::new(
            Depot::new(0.0, 0.0),
            vec![Customer::new(1, 1.0, 0.0, 5.0), Customer::new(2, 2.0, 0.0, 15.0)],
            10.0,
        )
        .expect("valid");
        match inst.check_single_demands() {
            Err(RoutingError::CapacityViolation {
                customer_id,
                demand,
                capacity,
            }) => {
                assert_eq!(customer_id, 2);
                assert_eq!(demand, 15.0);
                assert_eq!(capacity, 10.0);
            }
            other => panic!("expected CapacityViolation, got {:?}", other),
        }
        assert!(sample().check_single_demands().is_ok());
    }

    #[test]
    fn test_without_is_independent() {
        let inst = sample();
        let reduced = inst.without(1);
        assert_eq!(reduced.num_customers(), 2);
        let ids: Vec<i64> = reduced.customers().iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec![10, 30]);
        assert_eq!(inst.num_customers(), 3);
    }

    #[test]
    fn test_json_record() {
        let json = r#"{
            "instance_name": "C5",
            "max_vehicle_number": 25,
            "vehicle_capacity": 200.0,
            "depot": {"x": 40.0, "y": 50.0, "demand": 0.0, "ready_time": 0.0,
                      "due_time": 1236.0, "service_time": 0.0},
            "customers": [
                {"id": 1, "x": 45.0, "y": 68.0, "demand": 10.0, "ready_time": 912.0,
                 "due_time": 967.0, "service_time": 90.0},
                {"id": 2, "x": 45.0, "y": 70.0, "demand": 30.0, "ready_time": 825.0,
                 "due_time": 870.0, "service_time": 90.0}
            ]
        }"#;
        let inst = Instance::from_json_str(json).expect("valid json");
        assert_eq!(inst.name(), Some("C5"));
        assert_eq!(inst.max_vehicle_number(), Some(25));
        assert_eq!(inst.num_customers(), 2);
        assert_eq!(inst.depot().due_time(), 1236.0);

        let back = Instance::from_json_str(&inst.to_json_string().expect("serializes"))
            .expect("parses back");
        assert_eq!(back.customers(), inst.customers());
    }

    #[test]
    fn test_json_rejects_bad_capacity() {
        let json = r#"{"vehicle_capacity": 0.0, "depot": {"x": 0.0, "y": 0.0}, "customers": []}"#;
        assert!(matches!(
            Instance::from_json_str(json),
            Err(RoutingError::InvalidCapacity(_))
        ));
        assert!(matches!(
            Instance::from_json_str("{"),
            Err(RoutingError::Json(_))
        ));
    }

    #[test]
    fn test_random_reproducible() {
        let a = Instance::random(20, 10, 50.0, 7);
        let b = Instance::random(20, 10, 50.0, 7);
        assert_eq!(a.customers(), b.customers());
        assert!(a.validate().is_ok());
        assert!(a.customers().iter().all(|c| c.demand() >= 1.0 && c.demand() <= 10.0));
    }
}
