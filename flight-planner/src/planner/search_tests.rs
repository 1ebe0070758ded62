//! Scenario and property tests for the planner as a whole.

use super::*;
use crate::domain::{Airport, AirportCode, Cabin, Coordinates, Itinerary, Provenance, Route};
use crate::graph::AirportGraph;
use crate::pricing;

fn code(s: &str) -> AirportCode {
    AirportCode::parse(s).unwrap()
}

fn paths(itineraries: &[Itinerary]) -> Vec<Vec<&str>> {
    itineraries
        .iter()
        .map(|i| i.path().iter().map(|c| c.as_str()).collect())
        .collect()
}

/// A -> B (500 km, 60 min), B -> C (700 km, 90 min), A -> C (1400 km, 150 min).
fn triangle() -> AirportGraph {
    let mut g = AirportGraph::new();
    g.add_route(code("AAA"), Route::new(code("BBB"), 500.0, 60, vec![]));
    g.add_route(code("BBB"), Route::new(code("CCC"), 700.0, 90, vec![]));
    g.add_route(code("AAA"), Route::new(code("CCC"), 1400.0, 150, vec![]));
    g
}

/// HAN flies to PUS and BKK only. ICN (same country as PUS) is not served
/// from HAN. PUS flies on to SIN.
fn korea() -> AirportGraph {
    let mut g = AirportGraph::new();
    for (c, country, lat, lon) in [
        ("HAN", "Vietnam", 21.22, 105.81),
        ("ICN", "South Korea", 37.46, 126.44),
        ("PUS", "South Korea", 35.18, 128.94),
        ("BKK", "Thailand", 13.69, 100.75),
        ("SIN", "Singapore", 1.36, 103.99),
    ] {
        g.add_airport(Airport::new(
            code(c),
            c,
            country,
            "XX",
            Coordinates::new(lat, lon),
        ));
    }
    g.add_route(code("HAN"), Route::new(code("PUS"), 2800.0, 260, vec![]));
    g.add_route(code("HAN"), Route::new(code("BKK"), 990.0, 105, vec![]));
    g.add_route(code("PUS"), Route::new(code("SIN"), 4600.0, 380, vec![]));
    g
}

const STRATEGIES: [Strategy; 3] = [
    Strategy::Enumerate,
    Strategy::Informed(Heuristic::GreatCircle),
    Strategy::Informed(Heuristic::Zero),
];

#[test]
fn triangle_enumerates_and_ranks() {
    let graph = triangle();
    let config = SearchConfig::default();
    let planner = Planner::new(&graph, &config);

    let request = SearchRequest::new(code("AAA"), code("CCC"), 1, Cabin::Economy);
    let found = planner.enumerate(&request).unwrap();

    assert_eq!(paths(&found), vec![vec!["AAA", "CCC"], vec!["AAA", "BBB", "CCC"]]);
    assert_eq!(found[0].price(), 420.0);
    assert_eq!(found[1].price(), 306.0);

    let ranked = rank_itineraries(found, RankCriterion::Cheapest);
    assert_eq!(paths(&ranked)[0], vec!["AAA", "CCC"]);
}

#[test]
fn triangle_all_strategies_agree() {
    let graph = triangle();
    let config = SearchConfig::default();
    let planner = Planner::new(&graph, &config);
    let request = SearchRequest::new(code("AAA"), code("CCC"), 1, Cabin::Business);

    for strategy in STRATEGIES {
        let result = planner.one_way(&request, strategy).unwrap();
        assert!(!result.used_fallback, "{strategy} fell back");
        assert_eq!(
            paths(&result.itineraries),
            vec![vec!["AAA", "CCC"], vec!["AAA", "BBB", "CCC"]],
            "{strategy}"
        );
        assert_eq!(result.itineraries[1].price(), 612.0);
    }
}

#[test]
fn departure_without_routes_is_empty_everywhere() {
    let graph = korea();
    let config = SearchConfig::default();
    let planner = Planner::new(&graph, &config);

    // SIN has no outgoing routes
    let request = SearchRequest::new(code("SIN"), code("ICN"), 2, Cabin::Economy);
    assert!(planner.enumerate(&request).unwrap().is_empty());
    assert!(planner.search(&request, Heuristic::GreatCircle).unwrap().is_empty());
    assert!(planner.fallback(&code("SIN"), &code("ICN"), Cabin::Economy).is_empty());

    let result = planner.one_way(&request, Strategy::Enumerate).unwrap();
    assert!(result.is_empty());
    assert!(!result.used_fallback);

    let multi = MultiCityRequest::new(code("SIN"), code("ICN"), code("HAN"), 2, Cabin::Economy);
    let composed = planner.compose_multi_city(&multi, Strategy::Enumerate).unwrap();
    assert!(composed.is_empty());
    assert!(rank_itineraries(composed.itineraries, RankCriterion::Cheapest).is_empty());
}

#[test]
fn unreachable_destination_falls_back() {
    let graph = korea();
    let config = SearchConfig::default();
    let planner = Planner::new(&graph, &config);
    let request = SearchRequest::new(code("HAN"), code("ICN"), 0, Cabin::Economy);

    for strategy in STRATEGIES {
        let result = planner.one_way(&request, strategy).unwrap();
        assert!(result.used_fallback);
        assert_eq!(paths(&result.itineraries), vec![vec!["HAN", "PUS"]]);
        assert_eq!(result.itineraries[0].price(), 1400.0);
        assert_eq!(result.itineraries[0].provenance(), Provenance::FallbackNeighbor);
    }
}

#[test]
fn multi_city_first_leg_via_fallback() {
    let graph = korea();
    let config = SearchConfig::default();
    let planner = Planner::new(&graph, &config);

    // HAN -> ICN is unreachable, so leg 1 lands at PUS and leg 2 leaves from there
    let request = MultiCityRequest::new(code("HAN"), code("ICN"), code("SIN"), 1, Cabin::Economy);
    let result = planner
        .compose_multi_city(&request, Strategy::Enumerate)
        .unwrap();

    assert!(result.used_fallback);
    assert_eq!(paths(&result.itineraries), vec![vec!["HAN", "PUS", "SIN"]]);

    let joined = &result.itineraries[0];
    assert_eq!(joined.provenance().as_str(), "fallback-neighbor");
    assert_eq!(joined.distance_km(), 7400.0);
    assert_eq!(joined.duration_min(), 640);
    // 1400.00 fallback + 1380.00 direct
    assert_eq!(joined.price(), 2780.0);
}

#[test]
fn multi_city_standard_legs() {
    let graph = triangle();
    let config = SearchConfig::default();
    let planner = Planner::new(&graph, &config);

    let request = MultiCityRequest::new(code("AAA"), code("BBB"), code("CCC"), 0, Cabin::Economy);
    let result = planner
        .compose_multi_city(&request, Strategy::Informed(Heuristic::Zero))
        .unwrap();

    assert!(!result.used_fallback);
    assert_eq!(paths(&result.itineraries), vec![vec!["AAA", "BBB", "CCC"]]);
    assert_eq!(result.itineraries[0].price(), 360.0);
}

#[test]
fn too_many_stops_rejected() {
    let graph = triangle();
    let config = SearchConfig::new(1, 10, None);
    let planner = Planner::new(&graph, &config);
    let request = SearchRequest::new(code("AAA"), code("CCC"), 2, Cabin::Economy);

    assert!(matches!(
        planner.enumerate(&request),
        Err(SearchError::InvalidRequest(_))
    ));
    assert!(matches!(
        planner.one_way(&request, Strategy::Enumerate),
        Err(SearchError::InvalidRequest(_))
    ));
}

#[test]
fn exhausted_budget_times_out() {
    let graph = triangle();
    let config = SearchConfig::new(3, 10, Some(0));
    let planner = Planner::new(&graph, &config);
    let request = SearchRequest::new(code("AAA"), code("CCC"), 1, Cabin::Economy);

    for strategy in STRATEGIES {
        assert_eq!(
            planner.one_way(&request, strategy),
            Err(SearchError::Timeout),
            "{strategy}"
        );
    }
}

mod proptests {
    use super::{
        Airport, AirportCode, AirportGraph, Cabin, Coordinates, Heuristic, Itinerary, Planner,
        Provenance, Route, SearchConfig, SearchRequest, code, pricing,
    };
    use crate::geo::great_circle_km;
    use crate::planner::Strategy as SearchStrategy;
    use proptest::prelude::*;

    const CODES: [&str; 7] = ["AAA", "BBB", "CCC", "DDD", "EEE", "FFF", "GGG"];

    /// A random graph where every route is longer than the great-circle
    /// distance between its ends, as real flights are.
    #[derive(Debug, Clone)]
    struct TestGraph {
        graph: AirportGraph,
        departure: AirportCode,
        destination: AirportCode,
    }

    fn graph_strategy() -> impl Strategy<Value = TestGraph> {
        (3usize..=CODES.len()).prop_flat_map(|n| {
            (
                prop::collection::vec((-30.0f64..30.0, 90.0f64..150.0), n),
                prop::collection::vec((0..n, 0..n, 1u32..500, 30u32..600), 0..n * 3),
            )
                .prop_map(move |(coords, edges)| {
                    let mut graph = AirportGraph::new();
                    for (c, (lat, lon)) in CODES.iter().zip(&coords) {
                        graph.add_airport(Airport::new(
                            code(c),
                            *c,
                            "Testland",
                            "TL",
                            Coordinates::new(*lat, *lon),
                        ));
                    }
                    for (from, to, extra, min) in edges {
                        if from == to {
                            continue;
                        }
                        let (lat1, lon1) = coords[from];
                        let (lat2, lon2) = coords[to];
                        let km = great_circle_km(lat1, lon1, lat2, lon2).ceil() + f64::from(extra);
                        graph.add_route(
                            code(CODES[from]),
                            Route::new(code(CODES[to]), km, min, vec![]),
                        );
                    }
                    TestGraph {
                        graph,
                        departure: code(CODES[0]),
                        destination: code(CODES[n - 1]),
                    }
                })
        })
    }

    fn check_itinerary(
        itinerary: &Itinerary,
        request: &SearchRequest,
    ) -> Result<(), TestCaseError> {
        let path = itinerary.path();
        prop_assert!(path.len() >= 2);
        prop_assert!(path.len() - 2 <= request.max_stops);
        prop_assert_eq!(itinerary.origin(), &request.departure);
        prop_assert_eq!(itinerary.destination(), &request.destination);

        let mut sorted = path.to_vec();
        sorted.sort();
        sorted.dedup();
        prop_assert_eq!(sorted.len(), path.len(), "revisits an airport: {}", itinerary);

        prop_assert_eq!(
            itinerary.price(),
            pricing::price(itinerary.distance_km(), itinerary.stop_count(), request.cabin)
        );
        Ok(())
    }

    fn min_distance(itineraries: &[Itinerary], stops: usize) -> Option<f64> {
        itineraries
            .iter()
            .filter(|i| i.stop_count() == stops)
            .map(Itinerary::distance_km)
            .min_by(f64::total_cmp)
    }

    proptest! {
        #[test]
        fn enumerated_itineraries_are_valid(
            tg in graph_strategy(),
            max_stops in 0usize..=3,
            cabin in prop::sample::select(Cabin::ALL.to_vec()),
        ) {
            let config = SearchConfig::default();
            let planner = Planner::new(&tg.graph, &config);
            let request = SearchRequest::new(tg.departure, tg.destination, max_stops, cabin);

            for itinerary in planner.enumerate(&request).unwrap() {
                check_itinerary(&itinerary, &request)?;
                prop_assert_eq!(itinerary.provenance(), Provenance::Standard);
            }
        }

        #[test]
        fn informed_itineraries_are_valid(
            tg in graph_strategy(),
            max_stops in 0usize..=3,
            dijkstra in any::<bool>(),
        ) {
            let config = SearchConfig::default();
            let planner = Planner::new(&tg.graph, &config);
            let request = SearchRequest::new(tg.departure, tg.destination, max_stops, Cabin::Economy);
            let heuristic = if dijkstra { Heuristic::Zero } else { Heuristic::GreatCircle };

            let found = planner.search(&request, heuristic).unwrap();
            for itinerary in &found {
                check_itinerary(itinerary, &request)?;
            }
            // At most one per stop count, in ascending order
            for window in found.windows(2) {
                prop_assert!(window[0].stop_count() < window[1].stop_count());
            }
        }

        #[test]
        fn strategies_agree_on_shortest_distance(
            tg in graph_strategy(),
            max_stops in 0usize..=3,
        ) {
            let config = SearchConfig::default();
            let planner = Planner::new(&tg.graph, &config);
            let request = SearchRequest::new(tg.departure, tg.destination, max_stops, Cabin::Economy);

            let enumerated = planner.enumerate(&request).unwrap();
            let astar = planner.search(&request, Heuristic::GreatCircle).unwrap();
            let dijkstra = planner.search(&request, Heuristic::Zero).unwrap();

            let overall = enumerated.iter().map(Itinerary::distance_km).min_by(f64::total_cmp);
            let informed = astar.iter().map(Itinerary::distance_km).min_by(f64::total_cmp);
            prop_assert_eq!(informed, overall);

            for stops in 0..=max_stops {
                let expected = min_distance(&enumerated, stops);
                prop_assert_eq!(min_distance(&astar, stops), expected, "A* at {} stops", stops);
                prop_assert_eq!(
                    min_distance(&dijkstra, stops),
                    expected,
                    "Dijkstra at {} stops",
                    stops
                );
            }
        }

        #[test]
        fn one_way_falls_back_only_when_search_is_empty(
            tg in graph_strategy(),
            max_stops in 0usize..=2,
        ) {
            let config = SearchConfig::default();
            let planner = Planner::new(&tg.graph, &config);
            let request = SearchRequest::new(tg.departure, tg.destination, max_stops, Cabin::Economy);

            let enumerated = planner.enumerate(&request).unwrap();
            let result = planner.one_way(&request, SearchStrategy::Enumerate).unwrap();

            if enumerated.is_empty() {
                prop_assert!(result.itineraries.iter().all(Itinerary::is_fallback));
                prop_assert_eq!(result.used_fallback, !result.itineraries.is_empty());
            } else {
                prop_assert!(!result.used_fallback);
                prop_assert_eq!(result.itineraries, enumerated);
            }
        }
    }
}
