//! Results of a cost-to-serve run.

use serde::{Deserialize, Serialize};

use crate::error::RoutingError;

/// Marginal distance of one customer, or the error its leave-one-out solve
/// raised.
#[derive(Debug)]
pub struct MarginalCost {
    /// External id of the removed customer.
    pub customer_id: i64,
    /// `baseline - total_without`, rounded to 4 decimals.
    pub outcome: Result<f64, RoutingError>,
}

impl MarginalCost {
    /// The marginal distance, if the solve succeeded.
    pub fn distance_to_serve(&self) -> Option<f64> {
        self.outcome.as_ref().ok().copied()
    }

    /// Output record for a successful entry.
    pub fn to_record(&self) -> Option<MarginalCostRecord> {
        self.distance_to_serve().map(|distance_to_serve| MarginalCostRecord {
            index: self.customer_id,
            distance_to_serve,
        })
    }
}

/// Serializable marginal cost record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginalCostRecord {
    /// External customer id.
    pub index: i64,
    /// Marginal route distance of the customer.
    pub distance_to_serve: f64,
}

/// Baseline distance and one [`MarginalCost`] per customer, in input order.
#[derive(Debug)]
pub struct CostToServeReport {
    baseline: f64,
    entries: Vec<MarginalCost>,
}

impl CostToServeReport {
    pub(crate) fn new(baseline: f64, entries: Vec<MarginalCost>) -> Self {
        Self { baseline, entries }
    }

    /// Total distance of the full instance, rounded to 4 decimals.
    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    /// One entry per customer, in input order.
    pub fn entries(&self) -> &[MarginalCost] {
        &self.entries
    }

    /// Records for the successful entries, in input order.
    pub fn records(&self) -> Vec<MarginalCostRecord> {
        self.entries.iter().filter_map(MarginalCost::to_record).collect()
    }

    /// Ids of the customers whose leave-one-out solve failed.
    pub fn failures(&self) -> Vec<i64> {
        self.entries
            .iter()
            .filter(|e| e.outcome.is_err())
            .map(|e| e.customer_id)
            .collect()
    }

    /// Sum of the successful marginal distances.
    pub fn total_marginal(&self) -> f64 {
        self.entries.iter().filter_map(MarginalCost::distance_to_serve).sum()
    }

    /// Serializes [`records`](Self::records) as a JSON array.
    pub fn to_json_string(&self) -> Result<String, RoutingError> {
        Ok(serde_json::to_string(&self.records())?)
    }
}
