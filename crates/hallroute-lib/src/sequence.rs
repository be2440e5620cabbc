//! Ordering of the stops in a route.
//!
//! The visiting order is built in two phases over stop indices, where index 0
//! is the fixed anchor and indices `1..n` are the remaining stops in caller
//! order:
//!
//! 1. Greedy nearest-neighbour construction using
//!    [`StopMetric::construction`]. Ties go to the stop that came first in the
//!    caller's list.
//! 2. 2-opt improvement using [`StopMetric::improvement`]. Each pass scans
//!    every `i < j` with `i >= 1` and adopts a reversal of `order[i..=j]` only
//!    when it strictly lowers the open-path total. Passes repeat until one
//!    makes no change.
//!
//! The result is a local optimum, not a guaranteed shortest tour.

use std::collections::HashSet;

use tracing::debug;

use crate::error::{Error, Result};
use crate::grid::{BoothIndex, Coord, GridModel};
use crate::path::{find_path_with, path_cost, PathMode};

/// Improvements smaller than this are treated as ties so floating-point noise
/// cannot keep 2-opt cycling.
const IMPROVEMENT_EPSILON: f64 = 1e-9;

/// Price of a stop pair with no walkable connection in path-cost ordering.
pub const UNREACHABLE_PENALTY: f64 = 1.0e9;

/// Distance notion used by the sequencer, indexed by stop position.
pub trait StopMetric {
    /// Distance used while greedily constructing the order.
    fn construction(&self, from: usize, to: usize) -> f64;

    /// Distance used to price 2-opt candidates.
    fn improvement(&self, from: usize, to: usize) -> f64;

    /// Whether `improvement(a, b) == improvement(b, a)` for every pair.
    fn is_symmetric(&self) -> bool {
        true
    }
}

/// Straight-line construction and Manhattan improvement between booth
/// coordinates. Cheap, but blind to booths standing in the way and to aisle
/// weights.
#[derive(Debug, Clone)]
pub struct HeuristicMetric {
    positions: Vec<Coord>,
}

impl HeuristicMetric {
    pub fn new(positions: Vec<Coord>) -> Self {
        Self { positions }
    }
}

impl StopMetric for HeuristicMetric {
    fn construction(&self, from: usize, to: usize) -> f64 {
        self.positions[from].euclidean(&self.positions[to])
    }

    fn improvement(&self, from: usize, to: usize) -> f64 {
        self.positions[from].manhattan(&self.positions[to]) as f64
    }
}

/// Pairwise walking costs between stop anchors, as computed by the pathfinder.
#[derive(Debug, Clone)]
pub struct PathCostMetric {
    size: usize,
    costs: Vec<f64>,
}

impl PathCostMetric {
    /// Wrap a row-major `size * size` cost matrix. Returns `None` when the
    /// matrix has the wrong number of entries.
    pub fn from_matrix(size: usize, costs: Vec<f64>) -> Option<Self> {
        (size.checked_mul(size) == Some(costs.len())).then_some(Self { size, costs })
    }

    /// Price every ordered pair of anchors with a real path search. Missing
    /// anchors and disconnected pairs cost [`UNREACHABLE_PENALTY`].
    pub fn build(grid: &GridModel, anchors: &[Option<Coord>], mode: PathMode) -> Self {
        let size = anchors.len();
        let mut costs = vec![0.0; size * size];
        for (from, start) in anchors.iter().enumerate() {
            for (to, goal) in anchors.iter().enumerate() {
                if from == to {
                    continue;
                }
                costs[from * size + to] = match (start, goal) {
                    (Some(start), Some(goal)) => find_path_with(grid, *start, *goal, mode)
                        .and_then(|path| path_cost(grid, &path))
                        .unwrap_or(UNREACHABLE_PENALTY),
                    _ => UNREACHABLE_PENALTY,
                };
            }
        }
        debug!(stops = size, "priced stop pairs by walking cost");
        Self { size, costs }
    }

    fn cost(&self, from: usize, to: usize) -> f64 {
        self.costs[from * self.size + to]
    }
}

impl StopMetric for PathCostMetric {
    fn construction(&self, from: usize, to: usize) -> f64 {
        self.cost(from, to)
    }

    fn improvement(&self, from: usize, to: usize) -> f64 {
        self.cost(from, to)
    }

    fn is_symmetric(&self) -> bool {
        false
    }
}

/// Result of sequencing stop indices.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    /// Visiting order as stop indices; always starts with `0`.
    pub order: Vec<usize>,
    /// Improvement-metric total of the greedy order.
    pub construction_cost: f64,
    /// Improvement-metric total after 2-opt.
    pub improved_cost: f64,
    /// Number of full 2-opt passes run, including the final unchanged one.
    pub passes: usize,
}

/// Order `count` stops (index 0 fixed) using the given metric.
pub fn sequence<M: StopMetric>(count: usize, metric: &M) -> Sequence {
    let greedy = nearest_neighbor(count, metric);
    let construction_cost = route_cost(&greedy, metric);
    let (order, passes) = two_opt(greedy, metric);
    let improved_cost = route_cost(&order, metric);

    debug!(
        stops = count,
        passes,
        construction_cost,
        improved_cost,
        "sequenced stops"
    );

    Sequence {
        order,
        construction_cost,
        improved_cost,
        passes,
    }
}

/// Greedy construction from index 0.
pub fn nearest_neighbor<M: StopMetric>(count: usize, metric: &M) -> Vec<usize> {
    if count == 0 {
        return Vec::new();
    }

    let mut visited = vec![false; count];
    let mut order = Vec::with_capacity(count);
    let mut current = 0;
    visited[current] = true;
    order.push(current);

    for _ in 1..count {
        let mut best: Option<(usize, f64)> = None;
        for (candidate, seen) in visited.iter().enumerate() {
            if *seen {
                continue;
            }
            let distance = metric.construction(current, candidate);
            if best.map_or(true, |(_, best_distance)| distance < best_distance) {
                best = Some((candidate, distance));
            }
        }

        let Some((next, _)) = best else {
            break;
        };
        visited[next] = true;
        order.push(next);
        current = next;
    }

    order
}

/// Improve an order with 2-opt reversals until a local optimum is reached.
/// Position 0 is never moved. Returns the order and the number of passes.
pub fn two_opt<M: StopMetric>(mut order: Vec<usize>, metric: &M) -> (Vec<usize>, usize) {
    let len = order.len();
    let mut passes = 0;
    if len < 3 {
        return (order, passes);
    }

    loop {
        passes += 1;
        let mut improved = false;

        for i in 1..len - 1 {
            for j in i + 1..len {
                if reversal_delta(&order, i, j, metric) < -IMPROVEMENT_EPSILON {
                    order = reversed(&order, i, j);
                    improved = true;
                }
            }
        }

        if !improved {
            break;
        }
    }

    (order, passes)
}

/// Improvement-metric total of an open path (no return to the start).
pub fn route_cost<M: StopMetric>(order: &[usize], metric: &M) -> f64 {
    order
        .windows(2)
        .map(|pair| metric.improvement(pair[0], pair[1]))
        .sum()
}

/// Change in total cost if `order[i..=j]` were reversed.
fn reversal_delta<M: StopMetric>(order: &[usize], i: usize, j: usize, metric: &M) -> f64 {
    let before = order[i - 1];
    let first = order[i];
    let last = order[j];

    let mut delta = metric.improvement(before, last) - metric.improvement(before, first);
    if let Some(&after) = order.get(j + 1) {
        delta += metric.improvement(first, after) - metric.improvement(last, after);
    }
    if !metric.is_symmetric() {
        for k in i..j {
            delta += metric.improvement(order[k + 1], order[k])
                - metric.improvement(order[k], order[k + 1]);
        }
    }
    delta
}

fn reversed(order: &[usize], i: usize, j: usize) -> Vec<usize> {
    let mut next = Vec::with_capacity(order.len());
    next.extend_from_slice(&order[..i]);
    next.extend(order[i..=j].iter().rev());
    next.extend_from_slice(&order[j + 1..]);
    next
}

/// Order booth codes starting from `anchor` with the straight-line/Manhattan
/// heuristic. Codes equal to the anchor and repeated codes are dropped.
pub fn order_stops(anchor: &str, stops: &[String], booths: &BoothIndex) -> Result<Vec<String>> {
    let mut codes = vec![anchor.to_string()];
    let mut seen: HashSet<&str> = HashSet::from([anchor]);
    for code in stops {
        if seen.insert(code.as_str()) {
            codes.push(code.clone());
        }
    }

    let positions = codes
        .iter()
        .map(|code| {
            booths.position(code).ok_or_else(|| Error::UnknownBooth {
                code: code.clone(),
                suggestions: booths.fuzzy_matches(code, 3),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let metric = HeuristicMetric::new(positions);
    let result = sequence(codes.len(), &metric);
    Ok(result
        .order
        .into_iter()
        .map(|index| codes[index].clone())
        .collect())
}
