//! Hallroute library entry points.
//!
//! This crate classifies an exhibition-hall floor plan into a grid, finds
//! walking paths between aisle cells, orders a visitor's booth selection and
//! assembles the legs of the resulting route. Higher-level consumers (the CLI)
//! should only depend on the items exported here instead of reimplementing
//! behavior.

pub mod anchor;
pub mod error;
pub mod floorplan;
pub mod grid;
pub mod output;
pub mod path;
pub mod routing;
pub mod selection;
pub mod sequence;

pub use anchor::{anchor_for, resolve_anchor};
pub use error::{Error, LegFailure, Result};
pub use floorplan::{load_floor_plan, load_rows, read_rows};
pub use grid::{
    BoothIndex, Cell, Coord, DuplicatePolicy, GridModel, GridOptions, DEFAULT_WEIGHT_MARKER,
    ENTRANCE_CODE,
};
pub use output::{LegStatus, LegSummary, RouteRenderMode, RouteSummary};
pub use path::{find_path, find_path_with, path_cost, PathMode, PathSegment};
pub use routing::{plan_route, OrderingMetric, PlanRequest, RouteLeg, RoutePlan};
pub use selection::{parse_selection, StopSet};
pub use sequence::order_stops;
