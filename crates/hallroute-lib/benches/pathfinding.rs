use criterion::{criterion_group, criterion_main, Criterion};
use hallroute_lib::path::{find_path_bfs, find_path_dijkstra};
use hallroute_lib::{plan_route, Coord, GridModel, OrderingMetric, PlanRequest};
use once_cell::sync::Lazy;
use std::hint::black_box;

const SIDE: usize = 120;

/// Synthetic hall: a lattice of 2x2 booth blocks separated by single aisles,
/// with a band of weighted aisles across the middle.
fn synthetic_rows(weighted: bool) -> Vec<Vec<String>> {
    let mut booth = 0usize;
    (0..SIDE)
        .map(|y| {
            (0..SIDE)
                .map(|x| {
                    if x == 0 && y == 0 {
                        "ENTRANCE".to_string()
                    } else if x % 3 != 0 && y % 3 != 0 {
                        booth += 1;
                        format!("S{booth}")
                    } else if weighted && (SIDE / 3..SIDE / 2).contains(&y) {
                        "~3".to_string()
                    } else {
                        String::new()
                    }
                })
                .collect()
        })
        .collect()
}

static UNIFORM: Lazy<GridModel> =
    Lazy::new(|| GridModel::from_rows(&synthetic_rows(false)).expect("grid builds"));
static WEIGHTED: Lazy<GridModel> =
    Lazy::new(|| GridModel::from_rows(&synthetic_rows(true)).expect("grid builds"));
static STOPS: Lazy<Vec<String>> = Lazy::new(|| {
    UNIFORM
        .booths()
        .codes()
        .skip(1)
        .step_by(97)
        .take(25)
        .map(str::to_string)
        .collect()
});

fn benchmark_pathfinding(c: &mut Criterion) {
    let start = Coord::new(0, 1);
    let goal = Coord::new(SIDE - 3, SIDE - 3);

    c.bench_function("bfs_corner_to_corner", |b| {
        let grid = &*UNIFORM;
        b.iter(|| {
            let path = find_path_bfs(grid, start, goal).expect("path exists");
            black_box(path.len())
        });
    });

    c.bench_function("dijkstra_corner_to_corner", |b| {
        let grid = &*WEIGHTED;
        b.iter(|| {
            let path = find_path_dijkstra(grid, start, goal).expect("path exists");
            black_box(path.len())
        });
    });

    c.bench_function("plan_25_stops_heuristic", |b| {
        let grid = &*UNIFORM;
        let request = PlanRequest::new(STOPS.iter().cloned());
        b.iter(|| {
            let plan = plan_route(grid, &request).expect("plan");
            black_box(plan.total_steps())
        });
    });

    c.bench_function("plan_25_stops_path_cost", |b| {
        let grid = &*WEIGHTED;
        let request =
            PlanRequest::new(STOPS.iter().cloned()).with_ordering(OrderingMetric::PathCost);
        b.iter(|| {
            let plan = plan_route(grid, &request).expect("plan");
            black_box(plan.total_cost())
        });
    });
}

criterion_group!(benches, benchmark_pathfinding);
criterion_main!(benches);
