use vrp_cost2serve::constructive::{Heuristic, RouteConstructor, Savings, Sweep};
use vrp_cost2serve::cost_to_serve::{CostToServe, CostToServeConfig, MarginalCostRecord};
use vrp_cost2serve::models::{RouteRecord, DEPOT_SENTINEL};
use vrp_cost2serve::{models::Instance, RoutingError};

const TWO_CUSTOMERS: &str = r#"{
    "instance_name": "two",
    "vehicle_capacity": 10,
    "depot": {"x": 0, "y": 0, "demand": 0, "ready_time": 0, "due_time": 1000, "service_time": 0},
    "customers": [
        {"id": 1, "x": 10, "y": 0, "demand": 5, "ready_time": 0, "due_time": 100, "service_time": 10},
        {"id": 2, "x": 0, "y": 10, "demand": 5}
    ]
}"#;

#[test]
fn two_customers_share_one_route() {
    let instance = Instance::from_json_str(TWO_CUSTOMERS).expect("parses");
    assert_eq!(instance.name(), Some("two"));

    for heuristic in [Heuristic::Sweep, Heuristic::Savings] {
        let solution = heuristic.constructor().solve(&instance).expect("solves");
        assert_eq!(solution.num_routes(), 1);
        assert_eq!(solution.routes()[0].distance(), 34.1421);
        assert!(solution.total_distance() <= 40.0);
    }
}

#[test]
fn route_records_wrap_ids_in_depot_sentinels() {
    let instance = Instance::from_json_str(TWO_CUSTOMERS).expect("parses");
    let solution = Savings::default().solve(&instance).expect("solves");

    let records: Vec<RouteRecord> = solution.to_records();
    assert_eq!(records.len(), 1);
    let indices = &records[0].customer_indices;
    assert_eq!(indices.len(), 4);
    assert_eq!(indices[0], DEPOT_SENTINEL);
    assert_eq!(indices[3], DEPOT_SENTINEL);
    assert_eq!(records[0].route_distance, 34.1421);

    let json = solution.to_json_string().expect("serializes");
    assert!(json.contains("\"route_distance\":34.1421"));
}

#[test]
fn marginal_records_from_json_instance() {
    let instance = Instance::from_json_str(TWO_CUSTOMERS).expect("parses");
    let report = CostToServe::from_config(
        CostToServeConfig::default().with_heuristic(Heuristic::Savings),
    )
    .compute(&instance)
    .expect("computes");

    // Without either customer the other one is a 20-unit round trip
    let expected = vec![
        MarginalCostRecord {
            index: 1,
            distance_to_serve: 14.1421,
        },
        MarginalCostRecord {
            index: 2,
            distance_to_serve: 14.1421,
        },
    ];
    assert_eq!(report.baseline(), 34.1421);
    assert_eq!(report.records(), expected);

    let parsed: Vec<MarginalCostRecord> =
        serde_json::from_str(&report.to_json_string().expect("serializes")).expect("parses");
    assert_eq!(parsed, expected);
}

#[test]
fn sweep_splits_by_bearing() {
    // Bearings 10°, 170° and 350° at radius 10, demand 5 each on capacity 10
    let point = |deg: f64| {
        let r = deg.to_radians();
        (10.0 * r.sin(), 10.0 * r.cos())
    };
    let (x1, y1) = point(10.0);
    let (x2, y2) = point(170.0);
    let (x3, y3) = point(350.0);
    let json = format!(
        r#"{{"vehicle_capacity": 10, "depot": {{"x": 0, "y": 0}},
            "customers": [
                {{"id": 1, "x": {x1}, "y": {y1}, "demand": 5}},
                {{"id": 2, "x": {x2}, "y": {y2}, "demand": 5}},
                {{"id": 3, "x": {x3}, "y": {y3}, "demand": 5}}
            ]}}"#
    );
    let instance = Instance::from_json_str(&json).expect("parses");
    let solution = Sweep::default().solve(&instance).expect("solves");

    let mut routes: Vec<Vec<i64>> = solution
        .routes()
        .iter()
        .map(|r| {
            let mut ids = r.customer_ids().to_vec();
            ids.sort_unstable();
            ids
        })
        .collect();
    routes.sort();
    assert_eq!(routes, vec![vec![1, 2], vec![3]]);
}

#[test]
fn invalid_records_are_rejected() {
    let zero_capacity = r#"{"vehicle_capacity": 0, "depot": {"x": 0, "y": 0}, "customers": []}"#;
    assert!(matches!(
        Instance::from_json_str(zero_capacity),
        Err(RoutingError::InvalidCapacity(_))
    ));

    let duplicate = r#"{"vehicle_capacity": 5, "depot": {"x": 0, "y": 0}, "customers": [
        {"id": 1, "x": 1, "y": 1, "demand": 1},
        {"id": 1, "x": 2, "y": 2, "demand": 1}
    ]}"#;
    assert!(matches!(
        Instance::from_json_str(duplicate),
        Err(RoutingError::InvalidCustomer { customer_id: 1, .. })
    ));

    assert!(matches!(
        Instance::from_json_str("{not json"),
        Err(RoutingError::Json(_))
    ));
}

#[test]
fn oversized_customer_fails_the_whole_run() {
    let json = r#"{"vehicle_capacity": 5, "depot": {"x": 0, "y": 0}, "customers": [
        {"id": 1, "x": 1, "y": 1, "demand": 1},
        {"id": 7, "x": 2, "y": 2, "demand": 6}
    ]}"#;
    let instance = Instance::from_json_str(json).expect("parses");
    let result = CostToServe::new(Sweep::default()).compute(&instance);
    assert!(matches!(
        result,
        Err(RoutingError::CapacityViolation { customer_id: 7, .. })
    ));
}
