//! Constructive heuristics for building CVRP solutions.
//!
//! - [`Sweep`]: Bearing sweep clustering with per-cluster tour sequencing
//!   (Gillett & Miller, 1974), O(n log n) clustering
//! - [`Savings`]: Clarke-Wright parallel savings (1964), O(n² log n)
//!
//! Both implement [`RouteConstructor`], the seam used by the cost-to-serve
//! engine.

mod clarke_wright;
mod sweep;

pub use clarke_wright::{Savings, SavingsConfig};
pub use sweep::Sweep;

use serde::{Deserialize, Serialize};

use crate::error::RoutingError;
use crate::models::{Instance, Solution};
use crate::tour::TourConfig;

/// Builds a full solution for an instance.
pub trait RouteConstructor: Send + Sync {
    /// Partitions the instance's customers into capacity-feasible routes.
    fn solve(&self, instance: &Instance) -> Result<Solution, RoutingError>;

    /// Short name used in log events.
    fn name(&self) -> &'static str;
}

impl<C: RouteConstructor + ?Sized> RouteConstructor for Box<C> {
    fn solve(&self, instance: &Instance) -> Result<Solution, RoutingError> {
        (**self).solve(instance)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Selects one of the provided constructors.
///
/// # Examples
///
/// ```
/// use vrp_cost2serve::constructive::{Heuristic, RouteConstructor};
///
/// let constructor = Heuristic::Savings.constructor();
/// assert_eq!(constructor.name(), "savings");
/// assert_eq!(Heuristic::default(), Heuristic::Sweep);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heuristic {
    /// Bearing sweep + tour sequencing.
    #[default]
    Sweep,
    /// Clarke-Wright parallel savings.
    Savings,
}

impl Heuristic {
    /// The constructor with default settings.
    pub fn constructor(self) -> Box<dyn RouteConstructor> {
        self.configured(TourConfig::default(), SavingsConfig::default())
    }

    /// The constructor with explicit settings; each heuristic reads only its
    /// own configuration.
    pub fn configured(
        self,
        tour: TourConfig,
        savings: SavingsConfig,
    ) -> Box<dyn RouteConstructor> {
        match self {
            Heuristic::Sweep => Box::new(Sweep::with_tour_config(tour)),
            Heuristic::Savings => Box::new(Savings::new(savings)),
        }
    }
}
