//! Leave-one-out re-solve loop.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug_span, info, warn};

use super::report::{CostToServeReport, MarginalCost};
use crate::constructive::{Heuristic, RouteConstructor, SavingsConfig};
use crate::error::RoutingError;
use crate::models::{round_to, Instance};
use crate::tour::TourConfig;

/// Settings for a cost-to-serve run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostToServeConfig {
    /// Run the leave-one-out solves on the rayon pool.
    pub parallel: bool,
    /// Constructor used by [`CostToServe::from_config`].
    pub heuristic: Heuristic,
    /// Settings for the sweep tour sequencer.
    pub tour: TourConfig,
    /// Settings for the savings constructor.
    pub savings: SavingsConfig,
}

impl Default for CostToServeConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            heuristic: Heuristic::default(),
            tour: TourConfig::default(),
            savings: SavingsConfig::default(),
        }
    }
}

impl CostToServeConfig {
    /// Runs the leave-one-out solves in parallel or in turn.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the constructor used by [`CostToServe::from_config`].
    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Sets the tour sequencer settings.
    pub fn with_tour(mut self, tour: TourConfig) -> Self {
        self.tour = tour;
        self
    }

    /// Sets the savings constructor settings.
    pub fn with_savings(mut self, savings: SavingsConfig) -> Self {
        self.savings = savings;
        self
    }
}

/// Marginal cost-to-serve engine.
///
/// Solves the full instance once for a baseline, then re-solves it once per
/// customer with that customer removed. A customer's marginal cost is
/// `baseline - total_without`, rounded to 4 decimals. Removals are
/// independent: each starts from the full instance.
///
/// # Examples
///
/// ```
/// use vrp_cost2serve::models::{Customer, Depot, Instance};
/// use vrp_cost2serve::constructive::Savings;
/// use vrp_cost2serve::cost_to_serve::CostToServe;
///
/// let instance = Instance::new(
///     Depot::new(0.0, 0.0),
///     vec![Customer::new(1, 3.0, 4.0, 5.0)],
///     10.0,
/// )
/// .unwrap();
///
/// let report = CostToServe::new(Savings::default()).compute(&instance).unwrap();
/// assert_eq!(report.baseline(), 10.0);
/// assert_eq!(report.entries()[0].distance_to_serve(), Some(10.0));
/// ```
#[derive(Debug, Clone)]
pub struct CostToServe<C> {
    constructor: C,
    config: CostToServeConfig,
}

impl CostToServe<Box<dyn RouteConstructor>> {
    /// Engine using the heuristic and settings named in `config`.
    pub fn from_config(config: CostToServeConfig) -> Self {
        let constructor = config.heuristic.configured(config.tour, config.savings);
        Self {
            constructor,
            config,
        }
    }
}

impl<C: RouteConstructor> CostToServe<C> {
    /// Engine around `constructor` with the default configuration.
    pub fn new(constructor: C) -> Self {
        Self {
            constructor,
            config: CostToServeConfig::default(),
        }
    }

    /// Replaces the configuration. The `heuristic` field is ignored here;
    /// the constructor passed to [`new`](Self::new) stays in use.
    pub fn with_config(mut self, config: CostToServeConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &CostToServeConfig {
        &self.config
    }

    /// The constructor used for every solve.
    pub fn constructor(&self) -> &C {
        &self.constructor
    }

    /// Computes the baseline and every customer's marginal cost.
    ///
    /// A failing baseline solve is returned as the error. Failures of single
    /// leave-one-out solves are recorded in their entry and do not stop the
    /// others.
    pub fn compute(&self, instance: &Instance) -> Result<CostToServeReport, RoutingError> {
        let baseline = round_to(self.constructor.solve(instance)?.total_distance(), 4);
        info!(
            constructor = self.constructor.name(),
            customers = instance.num_customers(),
            baseline,
            "cost-to-serve baseline"
        );

        let indices = 0..instance.num_customers();
        let entries: Vec<MarginalCost> = if self.config.parallel {
            indices
                .into_par_iter()
                .map(|k| self.marginal(instance, baseline, k))
                .collect()
        } else {
            indices.map(|k| self.marginal(instance, baseline, k)).collect()
        };

        let report = CostToServeReport::new(baseline, entries);
        info!(
            served = report.records().len(),
            failed = report.failures().len(),
            "cost-to-serve done"
        );
        Ok(report)
    }

    fn marginal(&self, instance: &Instance, baseline: f64, index: usize) -> MarginalCost {
        let customer_id = instance.customers()[index].id();
        let _span = debug_span!("leave_one_out", customer_id).entered();

        let outcome = self
            .total_without(instance, index)
            .map(|without| round_to(baseline - without, 4));
        if let Err(err) = &outcome {
            warn!(customer_id, error = %err, "leave-one-out solve failed");
        }
        MarginalCost {
            customer_id,
            outcome,
        }
    }

    fn total_without(&self, instance: &Instance, index: usize) -> Result<f64, RoutingError> {
        let reduced = instance.without(index);
        if reduced.num_customers() == 0 {
            return Ok(0.0);
        }
        Ok(self.constructor.solve(&reduced)?.total_distance())
    }
}
