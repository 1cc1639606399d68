//! # vrp-cost2serve
//!
//! Capacitated vehicle routing with two construction heuristics, and a
//! leave-one-out engine that estimates how much route distance each customer
//! adds to the solution.
//!
//! ## Modules
//!
//! - [`models`]: Domain model types (Customer, Depot, Instance, Route, Solution)
//! - [`distance`]: Euclidean distance matrix
//! - [`tour`]: Closed-tour sequencing over small node sets
//! - [`local_search`]: Intra-route operators (2-opt, Or-opt)
//! - [`constructive`]: Constructive heuristics (Sweep, Clarke-Wright savings)
//! - [`evaluation`]: Route building and solution validation
//! - [`cost_to_serve`]: Marginal cost-to-serve per customer
//! - [`error`]: Error type shared by all modules
//!
//! ## Example
//!
//! ```
//! use vrp_cost2serve::models::{Customer, Depot, Instance};
//! use vrp_cost2serve::constructive::Heuristic;
//! use vrp_cost2serve::cost_to_serve::CostToServe;
//!
//! let instance = Instance::new(
//!     Depot::new(0.0, 0.0),
//!     vec![
//!         Customer::new(1, 10.0, 0.0, 5.0),
//!         Customer::new(2, 0.0, 10.0, 5.0),
//!     ],
//!     10.0,
//! )
//! .unwrap();
//!
//! let report = CostToServe::new(Heuristic::Savings.constructor())
//!     .compute(&instance)
//!     .unwrap();
//! assert_eq!(report.baseline(), 34.1421);
//! assert_eq!(report.records().len(), 2);
//! ```

pub mod constructive;
pub mod cost_to_serve;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod local_search;
pub mod models;
pub mod tour;

pub use error::RoutingError;
