mod common;

use common::{assert_valid_path, grid, load_fixture};
use hallroute_lib::{
    plan_route, resolve_anchor, Coord, LegFailure, PathMode, PlanRequest, ENTRANCE_CODE,
};

#[test]
fn open_hall_single_stop() {
    let hall = grid(&[&["ENTRANCE", "", ""], &["", "", ""], &["", "", "A"]]);
    let plan = plan_route(&hall, &PlanRequest::new(["A"])).expect("plan");

    assert_eq!(plan.order, vec![ENTRANCE_CODE, "A"]);
    // Manhattan distance between the booth cells drives the ordering estimate.
    assert_eq!(plan.estimated_cost, 4.0);

    let start = resolve_anchor(&hall, ENTRANCE_CODE).expect("entrance anchor");
    let goal = resolve_anchor(&hall, "A").expect("booth anchor");
    let path = plan.legs[0].path.as_ref().expect("leg walked");
    assert_valid_path(&hall, path, start, goal);
    assert_eq!(path.len() - 1, start.manhattan(&goal));
    assert!(plan.unreachable_legs.is_empty());
}

#[test]
fn enclosed_booth_only_breaks_its_own_legs() {
    let hall = load_fixture("enclosed.csv");
    let plan = plan_route(&hall, &PlanRequest::new(["A", "B", "C"])).expect("plan");

    assert_eq!(plan.order.len(), 4);
    assert_eq!(plan.order[0], ENTRANCE_CODE);
    for code in ["A", "B", "C"] {
        assert!(plan.order.iter().any(|c| c == code), "{code} is routed");
    }

    let mut untouched = 0;
    for leg in &plan.legs {
        if leg.from == "A" || leg.to == "A" {
            assert!(plan.unreachable_legs.contains(&leg.index));
            assert_eq!(
                leg.failure,
                Some(LegFailure::NoAisleAccess {
                    booth: "A".to_string()
                })
            );
        } else {
            untouched += 1;
            let path = leg.path.as_ref().expect("leg away from A is walked");
            assert_valid_path(
                &hall,
                path,
                leg.start.expect("start anchor"),
                leg.goal.expect("goal anchor"),
            );
        }
    }
    assert!(untouched >= 1);
}

#[test]
fn weighted_aisle_takes_cheaper_detour() {
    let hall = load_fixture("weighted_hall.csv");
    let plan = plan_route(&hall, &PlanRequest::new(["A"])).expect("plan");

    assert_eq!(plan.path_mode, PathMode::Dijkstra);
    let leg = &plan.legs[0];
    assert_eq!(leg.cost, Some(4.0));
    assert_eq!(
        leg.path.as_deref(),
        Some(
            &[
                Coord::new(1, 0),
                Coord::new(1, 1),
                Coord::new(2, 1),
                Coord::new(3, 1),
                Coord::new(3, 0)
            ][..]
        )
    );

    let hop_minimal = plan_route(
        &hall,
        &PlanRequest::new(["A"]).with_path_mode(PathMode::Bfs),
    )
    .expect("plan");
    assert_eq!(hop_minimal.legs[0].steps(), Some(2));
    assert_eq!(hop_minimal.legs[0].cost, Some(5.0));
}

#[test]
fn unknown_codes_do_not_block_known_stops() {
    let hall = grid(&[&["ENTRANCE", "", "A"], &["", "", ""]]);
    let plan = plan_route(&hall, &PlanRequest::new(["A", "ZZZ"])).expect("plan");

    assert_eq!(plan.unknown_codes, vec!["ZZZ"]);
    assert_eq!(plan.order, vec![ENTRANCE_CODE, "A"]);
    assert!(plan.legs[0].is_reachable());
    assert!(!plan.is_complete());
}

#[test]
fn full_hall_tour_visits_every_booth() {
    let hall = load_fixture("hall.csv");
    let stops: Vec<String> = hall
        .booths()
        .codes()
        .filter(|code| *code != ENTRANCE_CODE)
        .map(str::to_string)
        .collect();
    assert_eq!(stops.len(), 9);

    let plan = plan_route(&hall, &PlanRequest::new(stops.clone())).expect("plan");
    assert_eq!(plan.order[0], ENTRANCE_CODE);
    assert_eq!(plan.order.len(), stops.len() + 1);
    assert!(plan.is_complete());
    assert!(plan.estimated_cost <= plan.construction_cost);
    for leg in &plan.legs {
        let path = leg.path.as_ref().expect("every leg walked");
        assert_valid_path(
            &hall,
            path,
            leg.start.expect("start anchor"),
            leg.goal.expect("goal anchor"),
        );
    }
}
