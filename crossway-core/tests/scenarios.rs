use crossway_core::prelude::*;
use crossway_core::geodesy;
use geo::Point;

const A: (f64, f64) = (0.0, 0.0);
const B: (f64, f64) = (0.0, 0.001);
const C: (f64, f64) = (0.0, 0.002);

/// `(lat, lon)` to a geo point
fn pt((lat, lon): (f64, f64)) -> Point<f64> {
    Point::new(lon, lat)
}

fn straight_road(tags: &[(&str, &str)]) -> InMemoryNetwork {
    InMemoryNetwork::builder()
        .node(1, A.0, A.1)
        .node(2, B.0, B.1)
        .node(3, C.0, C.1)
        .way(100, &[1, 2, 3], tags)
        .build()
}

#[test]
fn test_straight_road_follows_way_geometry() {
    let planner =
        RoutePlanner::new(straight_road(&[("highway", "residential")]), RouterConfig::default())
            .unwrap();

    let route = planner
        .find_route(pt(A), pt(C), VehicleType::Car)
        .expect("Route should be found");

    assert_eq!(route.points, vec![pt(A), pt(B), pt(C)]);
    assert_eq!(route.nodes.first(), Some(&1));
    assert_eq!(route.nodes.last(), Some(&3));

    let expected = geodesy::distance(pt(A), pt(B)) + geodesy::distance(pt(B), pt(C));
    assert!(
        (route.distance_meters - expected).abs() < 1e-6,
        "distance {} != {}",
        route.distance_meters,
        expected
    );

    // residential at 30 km/h and no turn on the way
    let expected_cost = expected * 3.6 / 30.0;
    assert!((route.cost_seconds - expected_cost).abs() < 1e-6);
}

#[test]
fn test_oneway_cannot_be_driven_backwards() {
    let planner = RoutePlanner::new(
        straight_road(&[("highway", "residential"), ("oneway", "yes")]),
        RouterConfig::default(),
    )
    .unwrap();

    let err = planner
        .find_route(pt(C), pt(A), VehicleType::Car)
        .expect_err("Route against oneway must fail");
    assert!(err.is_no_route(), "unexpected error: {err}");

    let forward = planner.find_route(pt(A), pt(C), VehicleType::Car);
    assert!(forward.is_ok());
}

#[test]
fn test_parallel_ways_geometry_is_rederived() {
    // X and Y joined by a straight residential road and a bent motorway
    let x = (0.0, 0.0);
    let m = (0.001, 0.001);
    let y = (0.0, 0.002);
    let network = InMemoryNetwork::builder()
        .node(1, x.0, x.1)
        .node(2, m.0, m.1)
        .node(3, y.0, y.1)
        .way(10, &[1, 3], &[("highway", "residential")])
        .way(11, &[1, 2, 3], &[("highway", "motorway")])
        .build();
    let planner = RoutePlanner::new(network, RouterConfig::default()).unwrap();

    let route = planner
        .find_route(pt(x), pt(y), VehicleType::Car)
        .expect("Route should be found");
    assert_eq!(route.nodes, vec![1, 3]);

    // the search drives the faster motorway
    let bent = geodesy::distance(pt(x), pt(m)) + geodesy::distance(pt(m), pt(y));
    assert!((route.cost_seconds - bent * 3.6 / 160.0).abs() < 1e-6);

    // while the geometry is the shortest way joining both nodes
    let straight = geodesy::distance(pt(x), pt(y));
    assert!((route.distance_meters - straight).abs() < 1e-6);
    assert_eq!(route.points, vec![pt(x), pt(y)]);
}

#[test]
fn test_two_way_round_trip() {
    // 1 - 2 - 3 east, then 3 - 4 - 5 north
    let network = InMemoryNetwork::builder()
        .node(1, 0.0, 0.0)
        .node(2, 0.0, 0.001)
        .node(3, 0.0, 0.002)
        .node(4, 0.001, 0.002)
        .node(5, 0.002, 0.002)
        .way(10, &[1, 2, 3], &[("highway", "tertiary")])
        .way(20, &[3, 4, 5], &[("highway", "residential")])
        .build();
    let planner = RoutePlanner::new(network, RouterConfig::default()).unwrap();

    for vehicle in [VehicleType::Car, VehicleType::Bike, VehicleType::Pedestrian] {
        let route = planner
            .find_route(Point::new(0.0, 0.0), Point::new(0.002, 0.002), vehicle)
            .expect("Route should be found");

        assert_eq!(route.start(), Some(Point::new(0.0, 0.0)));
        assert_eq!(route.end(), Some(Point::new(0.002, 0.002)));
        assert_eq!(route.points.len(), 5);
        assert!(
            (geodesy::path_length(&route.points) - route.distance_meters).abs() < 1e-6,
            "{vehicle}: geometry and reported distance disagree"
        );
    }
}

#[test]
fn test_destination_in_the_middle_of_a_segment() {
    let planner =
        RoutePlanner::new(straight_road(&[("highway", "residential")]), RouterConfig::default())
            .unwrap();

    let route = planner
        .find_route(pt(A), pt(B), VehicleType::Bike)
        .expect("Route should be found");

    assert_eq!(route.nodes, vec![1, 2]);
    assert_eq!(route.points, vec![pt(A), pt(B)]);
}

#[test]
fn test_start_and_end_on_the_same_node() {
    let planner =
        RoutePlanner::new(straight_road(&[("highway", "residential")]), RouterConfig::default())
            .unwrap();

    let route = planner
        .find_route(pt(A), pt(A), VehicleType::Car)
        .expect("Route should be found");

    assert_eq!(route.points, vec![pt(A)]);
    assert_eq!(route.distance_meters, 0.0);
    assert_eq!(route.cost_seconds, 0.0);
}

#[test]
fn test_repeated_queries_are_identical() {
    let planner =
        RoutePlanner::new(straight_road(&[("highway", "residential")]), RouterConfig::default())
            .unwrap();

    let first = planner.find_route(pt(A), pt(C), VehicleType::Car).unwrap();
    for _ in 0..5 {
        assert_eq!(planner.find_route(pt(A), pt(C), VehicleType::Car).unwrap(), first);
    }
}

#[test]
fn test_route_encodes_as_geojson() {
    let planner =
        RoutePlanner::new(straight_road(&[("highway", "residential")]), RouterConfig::default())
            .unwrap();
    let route = planner.find_route(pt(A), pt(C), VehicleType::Car).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&route.to_geojson_string().unwrap()).unwrap();
    assert_eq!(json["type"], "FeatureCollection");
    assert_eq!(json["features"][0]["geometry"]["type"], "LineString");
    assert_eq!(
        json["features"][0]["geometry"]["coordinates"]
            .as_array()
            .map(Vec::len),
        Some(3)
    );
}
