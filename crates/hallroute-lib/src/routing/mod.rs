//! Multi-stop route planning over a floor plan.
//!
//! This module provides:
//! - [`OrderingMetric`] - How stops are priced while ordering them
//! - [`PlanRequest`] - High-level planning request
//! - [`RoutePlan`] / [`RouteLeg`] - Planned route result
//! - [`plan_route`] - Main entry point for computing routes
//!
//! # Strategy Pattern
//!
//! Leg searches go through the [`LegPlanner`] trait. Each search mode lives in
//! its own planner struct and [`select_planner`] picks one per grid.
//!
//! # Example
//!
//! ```
//! use hallroute_lib::{plan_route, GridModel, PlanRequest};
//!
//! let rows: &[&[&str]] = &[&["ENTRANCE", "", ""], &["", "", ""], &["", "", "A"]];
//! let grid = GridModel::from_rows(rows)?;
//! let plan = plan_route(&grid, &PlanRequest::new(["A"]))?;
//! assert_eq!(plan.order, vec!["ENTRANCE", "A"]);
//! assert_eq!(plan.total_steps(), 2);
//! # Ok::<(), hallroute_lib::Error>(())
//! ```

mod planner;

pub use planner::{select_planner, BfsPlanner, DijkstraPlanner, LegPlanner};

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::{info, warn};

use crate::anchor::anchor_for;
use crate::error::{Error, LegFailure, Result};
use crate::grid::{Coord, GridModel, ENTRANCE_CODE};
use crate::path::{path_cost, PathMode, PathSegment};
use crate::selection::StopSet;
use crate::sequence::{sequence, HeuristicMetric, PathCostMetric, Sequence};

/// Maximum number of fuzzy suggestions kept per unknown code.
const MAX_SUGGESTIONS: usize = 3;

/// Distance notion used to order stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderingMetric {
    /// Straight-line construction, Manhattan 2-opt, both between booth cells.
    #[default]
    Heuristic,
    /// Real walking cost between booth anchors, priced with the leg search.
    PathCost,
}

impl fmt::Display for OrderingMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            OrderingMetric::Heuristic => "heuristic",
            OrderingMetric::PathCost => "path-cost",
        };
        f.write_str(value)
    }
}

/// High-level route planning request.
#[derive(Debug, Clone, Default)]
pub struct PlanRequest {
    /// Code of the fixed starting booth. Falls back to the first valid stop
    /// when absent or not on the floor plan.
    pub entrance: Option<String>,
    pub stops: Vec<String>,
    pub path_mode: PathMode,
    pub ordering: OrderingMetric,
}

impl PlanRequest {
    /// Request starting at the standard entrance with default search settings.
    pub fn new<I, S>(stops: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entrance: Some(ENTRANCE_CODE.to_string()),
            stops: stops.into_iter().map(Into::into).collect(),
            path_mode: PathMode::default(),
            ordering: OrderingMetric::default(),
        }
    }

    pub fn with_entrance(mut self, entrance: Option<String>) -> Self {
        self.entrance = entrance;
        self
    }

    pub fn with_path_mode(mut self, mode: PathMode) -> Self {
        self.path_mode = mode;
        self
    }

    pub fn with_ordering(mut self, ordering: OrderingMetric) -> Self {
        self.ordering = ordering;
        self
    }
}

/// One walk between consecutive stops.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteLeg {
    pub index: usize,
    pub from: String,
    pub to: String,
    /// Aisle cell the leg starts from, if the booth has one.
    pub start: Option<Coord>,
    /// Aisle cell the leg ends on, if the booth has one.
    pub goal: Option<Coord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathSegment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<LegFailure>,
}

impl RouteLeg {
    pub fn is_reachable(&self) -> bool {
        self.path.is_some()
    }

    /// Number of single-cell moves along the leg.
    pub fn steps(&self) -> Option<usize> {
        self.path.as_ref().map(|path| path.len().saturating_sub(1))
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RoutePlan {
    /// Search mode the legs actually ran with.
    pub path_mode: PathMode,
    pub ordering: OrderingMetric,
    /// Booth codes in visiting order, starting at the anchor.
    pub order: Vec<String>,
    /// One leg per consecutive pair in `order`.
    pub legs: Vec<RouteLeg>,
    /// Indices into `legs` that could not be walked.
    pub unreachable_legs: Vec<usize>,
    /// Selected codes that are not on the floor plan, in selection order.
    pub unknown_codes: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub suggestions: BTreeMap<String, Vec<String>>,
    /// Ordering-metric total of the greedy order.
    pub construction_cost: f64,
    /// Ordering-metric total after 2-opt.
    pub estimated_cost: f64,
}

impl RoutePlan {
    fn empty(path_mode: PathMode, ordering: OrderingMetric) -> Self {
        Self {
            path_mode,
            ordering,
            order: Vec::new(),
            legs: Vec::new(),
            unreachable_legs: Vec::new(),
            unknown_codes: Vec::new(),
            suggestions: BTreeMap::new(),
            construction_cost: 0.0,
            estimated_cost: 0.0,
        }
    }

    /// Per-leg coordinate paths, `None` where the leg is unreachable.
    pub fn segments(&self) -> Vec<Option<&[Coord]>> {
        self.legs.iter().map(|leg| leg.path.as_deref()).collect()
    }

    /// `true` when every selected code was known and every leg was walked.
    pub fn is_complete(&self) -> bool {
        self.unreachable_legs.is_empty() && self.unknown_codes.is_empty()
    }

    /// Total single-cell moves over all reachable legs.
    pub fn total_steps(&self) -> usize {
        self.legs.iter().filter_map(RouteLeg::steps).sum()
    }

    /// Total traversal cost over all reachable legs.
    pub fn total_cost(&self) -> f64 {
        self.legs.iter().filter_map(|leg| leg.cost).sum()
    }

    /// Unknown codes as structured errors, suggestions included.
    pub fn unknown_booth_errors(&self) -> Vec<Error> {
        self.unknown_codes
            .iter()
            .map(|code| Error::UnknownBooth {
                code: code.clone(),
                suggestions: self.suggestions.get(code).cloned().unwrap_or_default(),
            })
            .collect()
    }
}

fn canonical_code(code: &str) -> String {
    let code = code.trim();
    if code.eq_ignore_ascii_case(ENTRANCE_CODE) {
        ENTRANCE_CODE.to_string()
    } else {
        code.to_string()
    }
}

/// Pick the fixed first stop: the requested entrance when it is on the floor
/// plan, otherwise the first valid stop.
fn choose_anchor(grid: &GridModel, entrance: Option<&str>, valid: &[String]) -> Option<String> {
    if let Some(entrance) = entrance.map(canonical_code) {
        if grid.booths().contains(&entrance) {
            return Some(entrance);
        }
        warn!(entrance = %entrance, "entrance is not on the floor plan; starting from the first stop");
    }
    valid.first().cloned()
}

fn build_sequence(
    grid: &GridModel,
    request: &PlanRequest,
    positions: &[Coord],
    anchors: &[Option<Coord>],
) -> Sequence {
    match request.ordering {
        OrderingMetric::Heuristic => {
            sequence(positions.len(), &HeuristicMetric::new(positions.to_vec()))
        }
        OrderingMetric::PathCost => sequence(
            positions.len(),
            &PathCostMetric::build(grid, anchors, request.path_mode),
        ),
    }
}

fn walk_leg(
    grid: &GridModel,
    planner: &dyn LegPlanner,
    index: usize,
    (from, start): (&str, Option<Coord>),
    (to, goal): (&str, Option<Coord>),
) -> RouteLeg {
    let mut leg = RouteLeg {
        index,
        from: from.to_string(),
        to: to.to_string(),
        start,
        goal,
        path: None,
        cost: None,
        failure: None,
    };

    let (Some(start), Some(goal)) = (start, goal) else {
        let booth = if start.is_none() { from } else { to };
        leg.failure = Some(LegFailure::NoAisleAccess {
            booth: booth.to_string(),
        });
        return leg;
    };

    match planner.find_path(grid, start, goal) {
        Some(path) => {
            leg.cost = path_cost(grid, &path);
            leg.path = Some(path);
        }
        None => {
            leg.failure = Some(LegFailure::NoPath {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
    }
    leg
}

// =============================================================================
// Main Entry Point
// =============================================================================

/// Compute a multi-stop route across the floor plan.
///
/// This is the main entry point for route planning. It:
/// 1. Drops repeated codes and the entrance from the selection; an entrance
///    code selected on a plan without an entrance is reported as unknown
/// 2. Splits the selection into known and unknown codes
/// 3. Chooses the fixed anchor (entrance, else first known stop)
/// 4. Orders the stops with nearest-neighbour construction and 2-opt
/// 5. Walks every consecutive pair, recording unreachable legs
///
/// Fails with [`Error::NoAnchor`] only when stops were selected but none of
/// them, nor the entrance, is on the floor plan. Unknown codes and
/// unreachable legs never fail the plan.
pub fn plan_route(grid: &GridModel, request: &PlanRequest) -> Result<RoutePlan> {
    let path_mode = request.path_mode.resolve(grid);
    let booths = grid.booths();

    // Step 1-2: dedupe and validate the selection
    let mut selection = StopSet::default();
    let mut valid = Vec::new();
    let mut unknown_codes = Vec::new();
    let mut suggestions = BTreeMap::new();
    for code in request.stops.iter().map(|code| code.trim()) {
        if code.eq_ignore_ascii_case(ENTRANCE_CODE) {
            // Never a stop, but still unknown on a plan without one.
            if booths.entrance().is_none() && !unknown_codes.iter().any(|c| c == ENTRANCE_CODE)
            {
                unknown_codes.push(ENTRANCE_CODE.to_string());
            }
            continue;
        }
        if !selection.insert(code.to_string()) {
            continue;
        }
        if booths.contains(code) {
            valid.push(code.to_string());
        } else {
            let matches = booths.fuzzy_matches(code, MAX_SUGGESTIONS);
            if !matches.is_empty() {
                suggestions.insert(code.to_string(), matches);
            }
            unknown_codes.push(code.to_string());
        }
    }
    if !unknown_codes.is_empty() {
        warn!(unknown = ?unknown_codes, "selected booth codes are not on the floor plan");
    }

    // Step 3: anchor
    let Some(anchor) = choose_anchor(grid, request.entrance.as_deref(), &valid) else {
        if selection.is_empty() && unknown_codes.is_empty() {
            return Ok(RoutePlan::empty(path_mode, request.ordering));
        }
        return Err(Error::NoAnchor {
            unknown: unknown_codes,
        });
    };

    let mut codes = vec![anchor.clone()];
    codes.extend(valid.into_iter().filter(|code| *code != anchor));

    let positions: Vec<Coord> = codes
        .iter()
        .filter_map(|code| booths.position(code))
        .collect();
    let anchors: Vec<Option<Coord>> = positions
        .iter()
        .map(|position| anchor_for(grid, *position))
        .collect();

    // Step 4: ordering
    let ordered = build_sequence(grid, request, &positions, &anchors);

    // Step 5: legs
    let planner = select_planner(path_mode, grid);
    let legs: Vec<RouteLeg> = ordered
        .order
        .windows(2)
        .enumerate()
        .map(|(index, pair)| {
            let (from, to) = (pair[0], pair[1]);
            walk_leg(
                grid,
                planner.as_ref(),
                index,
                (codes[from].as_str(), anchors[from]),
                (codes[to].as_str(), anchors[to]),
            )
        })
        .collect();

    let unreachable_legs: Vec<usize> = legs
        .iter()
        .filter(|leg| !leg.is_reachable())
        .map(|leg| leg.index)
        .collect();
    for leg in legs.iter().filter(|leg| !leg.is_reachable()) {
        if let Some(failure) = &leg.failure {
            warn!(leg = leg.index, %failure, "leg is unreachable");
        }
    }

    let plan = RoutePlan {
        path_mode,
        ordering: request.ordering,
        order: ordered
            .order
            .iter()
            .map(|index| codes[*index].clone())
            .collect(),
        legs,
        unreachable_legs,
        unknown_codes,
        suggestions,
        construction_cost: ordered.construction_cost,
        estimated_cost: ordered.improved_cost,
    };

    info!(
        stops = plan.order.len(),
        legs = plan.legs.len(),
        unreachable = plan.unreachable_legs.len(),
        unknown = plan.unknown_codes.len(),
        steps = plan.total_steps(),
        mode = %path_mode,
        ordering = %request.ordering,
        "planned route"
    );

    Ok(plan)
}
