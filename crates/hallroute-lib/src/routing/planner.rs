//! Leg planning strategies implementing the Strategy pattern.
//!
//! Each search mode is wrapped in its own planner so `plan_route` can pick one
//! per grid without knowing how the search works.

use crate::grid::{Coord, GridModel};
use crate::path::{find_path_bfs, find_path_dijkstra, PathMode, PathSegment};

/// Trait for single-leg path search strategies.
pub trait LegPlanner: Send + Sync {
    /// The concrete search mode this planner runs.
    fn mode(&self) -> PathMode;

    /// Search for a path between two aisle cells.
    ///
    /// Returns `Some(path)` if the goal is reachable, `None` otherwise.
    fn find_path(&self, grid: &GridModel, start: Coord, goal: Coord) -> Option<PathSegment>;
}

/// Breadth-first planner. Finds the path with the fewest steps and ignores
/// aisle weights.
#[derive(Debug, Clone, Default)]
pub struct BfsPlanner;

impl LegPlanner for BfsPlanner {
    fn mode(&self) -> PathMode {
        PathMode::Bfs
    }

    fn find_path(&self, grid: &GridModel, start: Coord, goal: Coord) -> Option<PathSegment> {
        find_path_bfs(grid, start, goal)
    }
}

/// Uniform-cost planner. Minimises the summed traversal cost.
#[derive(Debug, Clone, Default)]
pub struct DijkstraPlanner;

impl LegPlanner for DijkstraPlanner {
    fn mode(&self) -> PathMode {
        PathMode::Dijkstra
    }

    fn find_path(&self, grid: &GridModel, start: Coord, goal: Coord) -> Option<PathSegment> {
        find_path_dijkstra(grid, start, goal)
    }
}

/// Select the planner for a requested mode, resolving [`PathMode::Auto`]
/// against the grid's weights.
pub fn select_planner(mode: PathMode, grid: &GridModel) -> Box<dyn LegPlanner> {
    match mode.resolve(grid) {
        PathMode::Dijkstra => Box::new(DijkstraPlanner),
        _ => Box::new(BfsPlanner),
    }
}
