use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, VecDeque};
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::grid::{Coord, GridModel};

/// Walkable coordinates from a leg's start anchor to its end anchor inclusive.
pub type PathSegment = Vec<Coord>;

/// Search strategy used for a single leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PathMode {
    /// Breadth-first on uniform grids, Dijkstra as soon as any aisle is weighted.
    #[default]
    Auto,
    /// Breadth-first search; minimises the number of steps and ignores weights.
    Bfs,
    /// Uniform-cost search; minimises the summed traversal cost.
    Dijkstra,
}

impl PathMode {
    /// Replace [`PathMode::Auto`] with the concrete mode suited to `grid`.
    pub fn resolve(self, grid: &GridModel) -> Self {
        match self {
            PathMode::Auto if grid.is_uniform() => PathMode::Bfs,
            PathMode::Auto => PathMode::Dijkstra,
            other => other,
        }
    }
}

impl fmt::Display for PathMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            PathMode::Auto => "auto",
            PathMode::Bfs => "bfs",
            PathMode::Dijkstra => "dijkstra",
        };
        f.write_str(value)
    }
}

/// Find a minimum-cost path between two aisle cells, picking the search mode
/// from the grid's weights.
pub fn find_path(grid: &GridModel, start: Coord, goal: Coord) -> Option<PathSegment> {
    find_path_with(grid, start, goal, PathMode::Auto)
}

/// Find a path using an explicit search mode.
pub fn find_path_with(
    grid: &GridModel,
    start: Coord,
    goal: Coord,
    mode: PathMode,
) -> Option<PathSegment> {
    match mode.resolve(grid) {
        PathMode::Dijkstra => find_path_dijkstra(grid, start, goal),
        _ => find_path_bfs(grid, start, goal),
    }
}

/// Run breadth-first search over traversable cells. Every cell is enqueued at
/// most once, so the result has the fewest possible steps.
pub fn find_path_bfs(grid: &GridModel, start: Coord, goal: Coord) -> Option<PathSegment> {
    if !grid.is_traversable(start) || !grid.is_traversable(goal) {
        return None;
    }
    if start == goal {
        return Some(vec![start]);
    }

    let mut parents: HashMap<Coord, Option<Coord>> = HashMap::new();
    let mut queue = VecDeque::new();

    parents.insert(start, None);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for next in grid.neighbors(current) {
            if parents.contains_key(&next) || !grid.is_traversable(next) {
                continue;
            }

            parents.insert(next, Some(current));
            if next == goal {
                debug!(visited = parents.len(), %start, %goal, "bfs reached goal");
                return Some(reconstruct_path(&parents, start, goal));
            }
            queue.push_back(next);
        }
    }

    debug!(visited = parents.len(), %start, %goal, "bfs exhausted without reaching goal");
    None
}

/// Run Dijkstra's algorithm where stepping onto a cell costs its traversal
/// cost. Equal-cost frontier entries pop in insertion order.
pub fn find_path_dijkstra(grid: &GridModel, start: Coord, goal: Coord) -> Option<PathSegment> {
    if !grid.is_traversable(start) || !grid.is_traversable(goal) {
        return None;
    }
    if start == goal {
        return Some(vec![start]);
    }

    let mut distances: HashMap<Coord, f64> = HashMap::new();
    let mut parents: HashMap<Coord, Option<Coord>> = HashMap::new();
    let mut settled = vec![false; grid.cell_count()];
    let mut queue = BinaryHeap::new();
    let mut sequence = 0u64;

    distances.insert(start, 0.0);
    parents.insert(start, None);
    queue.push(QueueEntry::new(start, 0.0, sequence));

    while let Some(entry) = queue.pop() {
        let index = grid.index_of(entry.node);
        if settled[index] {
            continue;
        }
        settled[index] = true;

        if entry.node == goal {
            debug!(
                settled = settled.iter().filter(|s| **s).count(),
                cost = entry.cost.0,
                %start,
                %goal,
                "dijkstra reached goal"
            );
            return Some(reconstruct_path(&parents, start, goal));
        }

        for next in grid.neighbors(entry.node) {
            if settled[grid.index_of(next)] {
                continue;
            }
            let Some(step_cost) = grid.traversal_cost(next) else {
                continue;
            };

            let next_cost = entry.cost.0 + step_cost;
            if next_cost < *distances.get(&next).unwrap_or(&f64::INFINITY) {
                distances.insert(next, next_cost);
                parents.insert(next, Some(entry.node));
                sequence += 1;
                queue.push(QueueEntry::new(next, next_cost, sequence));
            }
        }
    }

    debug!(%start, %goal, "dijkstra exhausted without reaching goal");
    None
}

/// Summed traversal cost of a path: every cell after the first is paid for.
/// Returns `None` if the path touches a booth or leaves the grid.
pub fn path_cost(grid: &GridModel, path: &[Coord]) -> Option<f64> {
    if let Some(first) = path.first() {
        if !grid.is_traversable(*first) {
            return None;
        }
    }
    path.iter()
        .skip(1)
        .map(|at| grid.traversal_cost(*at))
        .sum()
}

fn reconstruct_path(
    parents: &HashMap<Coord, Option<Coord>>,
    start: Coord,
    goal: Coord,
) -> PathSegment {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node);
        if node == start {
            break;
        }
        current = parents.get(&node).copied().flatten();
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: Coord,
    cost: FloatOrd,
    sequence: u64,
}

impl QueueEntry {
    fn new(node: Coord, cost: f64, sequence: u64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
            sequence,
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost, then FIFO.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
