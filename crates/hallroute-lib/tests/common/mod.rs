//! Common test utilities and fixture helpers.
//!
//! Provides fixture loading, path validity checks, a seeded grid generator and
//! brute-force reference searches used to check the pathfinder on small halls.

use std::path::PathBuf;

use hallroute_lib::{load_floor_plan, Coord, GridModel, GridOptions};

/// Path to the fixtures directory shared with the CLI tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Load a floor plan from `docs/fixtures` with default options.
#[allow(dead_code)]
pub fn load_fixture(name: &str) -> GridModel {
    let path = fixtures_dir().join(name);
    load_floor_plan(&path, GridOptions::default()).expect("fixture floor plan loads")
}

#[allow(dead_code)]
pub fn grid(rows: &[&[&str]]) -> GridModel {
    GridModel::from_rows(rows).expect("grid builds")
}

/// Assert that `path` walks from `start` to `goal` in orthogonal unit steps
/// over traversable cells only.
#[allow(dead_code)]
pub fn assert_valid_path(grid: &GridModel, path: &[Coord], start: Coord, goal: Coord) {
    assert_eq!(path.first(), Some(&start), "path starts at {start}");
    assert_eq!(path.last(), Some(&goal), "path ends at {goal}");
    for pair in path.windows(2) {
        assert!(
            pair[0].is_adjacent(&pair[1]),
            "{} -> {} is not a unit step",
            pair[0],
            pair[1]
        );
    }
    for at in path {
        assert!(grid.is_traversable(*at), "{at} is not walkable");
    }
}

/// Every traversable coordinate, row-major.
#[allow(dead_code)]
pub fn traversable_cells(grid: &GridModel) -> Vec<Coord> {
    let mut cells = Vec::new();
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let at = Coord::new(x, y);
            if grid.is_traversable(at) {
                cells.push(at);
            }
        }
    }
    cells
}

/// Small deterministic xorshift generator so grid fixtures are reproducible.
#[allow(dead_code)]
pub struct SeededRng(u64);

#[allow(dead_code)]
impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self(seed.max(1))
    }

    pub fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    pub fn below(&mut self, bound: u64) -> u64 {
        self.next() % bound
    }
}

/// Build a random hall: roughly a quarter of the cells are booths and, when
/// `weighted`, another quarter are aisles costing 2 to 5.
#[allow(dead_code)]
pub fn random_grid(width: usize, height: usize, seed: u64, weighted: bool) -> GridModel {
    let mut rng = SeededRng::new(seed);
    let mut booth = 0;
    let rows: Vec<Vec<String>> = (0..height)
        .map(|_| {
            (0..width)
                .map(|_| match rng.below(4) {
                    0 => {
                        booth += 1;
                        format!("B{booth}")
                    }
                    1 if weighted => format!("~{}", 2 + rng.below(4)),
                    _ => String::new(),
                })
                .collect()
        })
        .collect();
    GridModel::from_rows(&rows).expect("random grid builds")
}

/// Exhaustive search over every simple path from `start` to `goal`, returning
/// the fewest steps and the lowest summed cost (each independently).
#[allow(dead_code)]
pub fn brute_force(grid: &GridModel, start: Coord, goal: Coord) -> Option<(usize, f64)> {
    let mut visited = vec![false; grid.width() * grid.height()];
    let mut best: Option<(usize, f64)> = None;
    visited[start.y * grid.width() + start.x] = true;
    explore(grid, start, goal, 0, 0.0, &mut visited, &mut best);
    best
}

#[allow(dead_code)]
fn explore(
    grid: &GridModel,
    current: Coord,
    goal: Coord,
    steps: usize,
    cost: f64,
    visited: &mut [bool],
    best: &mut Option<(usize, f64)>,
) {
    if current == goal {
        *best = Some(match *best {
            Some((best_steps, best_cost)) => (best_steps.min(steps), best_cost.min(cost)),
            None => (steps, cost),
        });
        return;
    }
    let neighbours: Vec<Coord> = grid.neighbors(current).collect();
    for next in neighbours {
        let index = next.y * grid.width() + next.x;
        if visited[index] {
            continue;
        }
        let Some(step_cost) = grid.traversal_cost(next) else {
            continue;
        };
        visited[index] = true;
        explore(grid, next, goal, steps + 1, cost + step_cost, visited, best);
        visited[index] = false;
    }
}
