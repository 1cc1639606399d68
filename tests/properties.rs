use proptest::prelude::*;

use vrp_cost2serve::constructive::{Heuristic, RouteConstructor, Savings, SavingsConfig, Sweep};
use vrp_cost2serve::cost_to_serve::{CostToServe, CostToServeConfig};
use vrp_cost2serve::distance::DistanceMatrix;
use vrp_cost2serve::evaluation::{RouteEvaluator, CAPACITY_TOLERANCE};
use vrp_cost2serve::models::Instance;

fn constructors() -> Vec<Box<dyn RouteConstructor>> {
    vec![Heuristic::Sweep.constructor(), Heuristic::Savings.constructor()]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn every_customer_served_once_within_capacity(
        n in 1..40usize,
        max_demand in 1..30u32,
        capacity in 30.0..120.0f64,
        seed in any::<u64>(),
    ) {
        let instance = Instance::random(n, max_demand, capacity, seed);
        let dm = DistanceMatrix::from_instance(&instance);
        let evaluator = RouteEvaluator::new(&instance, &dm);

        for constructor in constructors() {
            let solution = constructor.solve(&instance).expect("solves");
            prop_assert!(evaluator.validate(&solution, None).is_empty());
            prop_assert_eq!(solution.num_served(), n);
            for route in solution.routes() {
                prop_assert!(route.load() <= capacity + CAPACITY_TOLERANCE);
                prop_assert!(route.distance() >= 0.0);
            }
        }
    }

    #[test]
    fn matrix_is_symmetric_with_zero_diagonal(n in 0..30usize, seed in any::<u64>()) {
        let instance = Instance::random(n, 10, 50.0, seed);
        let dm = DistanceMatrix::from_instance(&instance);
        prop_assert_eq!(dm.size(), n + 1);
        prop_assert!(dm.is_symmetric(1e-12));
        prop_assert!(dm.has_zero_diagonal());
        prop_assert!(dm.is_finite());
    }

    #[test]
    fn solving_is_deterministic(n in 1..30usize, seed in any::<u64>()) {
        let instance = Instance::random(n, 20, 60.0, seed);
        for constructor in constructors() {
            let first = constructor.solve(&instance).expect("solves");
            let second = constructor.solve(&instance).expect("solves");
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn route_distance_bound_is_respected(n in 2..30usize, seed in any::<u64>()) {
        let instance = Instance::random(n, 10, 100.0, seed);
        let dm = DistanceMatrix::from_instance(&instance);
        let evaluator = RouteEvaluator::new(&instance, &dm);

        // Every singleton round trip fits within 2·max depot distance
        let limit = (1..=n).map(|k| 2.0 * dm.get(0, k)).fold(0.0, f64::max) + 1.0;
        let savings = Savings::new(SavingsConfig::default().with_max_route_distance(limit));
        let solution = savings.solve(&instance).expect("solves");
        prop_assert!(evaluator.validate(&solution, Some(limit)).is_empty());
    }

    #[test]
    fn lone_customers_cost_their_round_trip(n in 1..15usize, seed in any::<u64>()) {
        // Unit demands on unit capacity: no two customers share a route
        let instance = Instance::random(n, 1, 1.0, seed);
        let dm = DistanceMatrix::from_instance(&instance);
        let report = CostToServe::new(Savings::default())
            .with_config(CostToServeConfig::default().with_parallel(false))
            .compute(&instance)
            .expect("computes");
        prop_assert_eq!(report.entries().len(), n);
        prop_assert!(report.failures().is_empty());
        for (k, entry) in report.entries().iter().enumerate() {
            let round_trip = 2.0 * dm.get(0, k + 1);
            let marginal = entry.distance_to_serve().expect("succeeds");
            prop_assert!((marginal - round_trip).abs() < 1e-3);
        }
    }
}

#[test]
fn sweep_marginals_cover_all_customers() {
    let instance = Instance::random(20, 10, 35.0, 99);
    let report = CostToServe::new(Sweep::default()).compute(&instance).expect("computes");
    assert_eq!(report.records().len(), 20);
    assert!(report.baseline() > 0.0);
}
