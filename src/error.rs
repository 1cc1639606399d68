//! Error type shared by the constructors and the cost-to-serve engine.

use std::fmt;

/// Errors raised while building or solving a routing instance.
///
/// Infeasible savings merges are not errors; they are skipped and logged.
#[derive(Debug)]
pub enum RoutingError {
    /// The tour sequencer could not produce a closed tour.
    TourNotFound {
        /// Number of nodes (depot included) in the rejected matrix.
        nodes: usize,
    },
    /// A single customer's demand exceeds the vehicle capacity.
    CapacityViolation {
        /// External id of the offending customer.
        customer_id: i64,
        /// Its demand.
        demand: f64,
        /// Vehicle capacity of the instance.
        capacity: f64,
    },
    /// Vehicle capacity is zero, negative or not finite.
    InvalidCapacity(f64),
    /// A customer record failed validation.
    InvalidCustomer {
        /// External id of the customer.
        customer_id: i64,
        /// What was wrong with it.
        reason: String,
    },
    /// JSON (de)serialization of instance or result records failed.
    Json(serde_json::Error),
}

impl fmt::Display for RoutingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutingError::TourNotFound { nodes } => {
                write!(f, "no tour found over {} nodes", nodes)
            }
            RoutingError::CapacityViolation {
                customer_id,
                demand,
                capacity,
            } => write!(
                f,
                "customer {} has demand {} exceeding vehicle capacity {}",
                customer_id, demand, capacity
            ),
            RoutingError::InvalidCapacity(c) => write!(f, "invalid vehicle capacity: {}", c),
            RoutingError::InvalidCustomer {
                customer_id,
                reason,
            } => write!(f, "invalid customer {}: {}", customer_id, reason),
            RoutingError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for RoutingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RoutingError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for RoutingError {
    fn from(e: serde_json::Error) -> Self {
        RoutingError::Json(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_capacity_violation() {
        let e = RoutingError::CapacityViolation {
            customer_id: 7,
            demand: 30.0,
            capacity: 20.0,
        };
        assert_eq!(
            e.to_string(),
            "customer 7 has demand 30 exceeding vehicle capacity 20"
        );
    }

    #[test]
    fn test_display_tour_not_found() {
        let e = RoutingError::TourNotFound { nodes: 0 };
        assert_eq!(e.to_string(), "no tour found over 0 nodes");
    }

    #[test]
    fn test_json_error_source() {
        let err = serde_json::from_str::<f64>("not json").unwrap_err();
        let e = RoutingError::from(err);
        assert!(std::error::Error::source(&e).is_some());
    }
}
