//! Domain model types for the capacitated vehicle routing problem.
//!
//! Provides positions, customers and the depot, the validated instance
//! record, routes as ordered customer sequences, and solutions.

mod customer;
mod instance;
mod route;
mod solution;

pub use customer::{Customer, Depot, Position};
pub use instance::Instance;
pub use route::{Route, RouteRecord};
pub use solution::{Solution, Violation, ViolationType};

/// Id written in place of the depot in route records.
pub const DEPOT_SENTINEL: i64 = -1;

/// Rounds `value` to `decimals` places, half away from zero.
///
/// ```
/// use vrp_cost2serve::models::round_to;
///
/// assert_eq!(round_to(34.142135, 4), 34.1421);
/// assert_eq!(round_to(34.146, 2), 34.15);
/// ```
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
