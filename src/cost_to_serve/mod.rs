//! Marginal cost-to-serve by leave-one-out re-solving.
//!
//! Each customer's cost-to-serve is the drop in total route distance when
//! that customer alone is removed and the instance is solved again with the
//! same constructor.

mod engine;
mod report;

pub use engine::{CostToServe, CostToServeConfig};
pub use report::{CostToServeReport, MarginalCost, MarginalCostRecord};
