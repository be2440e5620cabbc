//! Route command handler for planning a walk through the hall.

use anyhow::Result;
use clap::{Args, ValueEnum};

use hallroute_cli::output::{format_route, OutputFormat};
use hallroute_cli::terminal::{supports_unicode, ColorPalette};
use hallroute_lib::{
    parse_selection, plan_route, OrderingMetric, PathMode, PlanRequest, ENTRANCE_CODE,
};

use super::FloorPlanArgs;

/// Path search mode accepted by `--algorithm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AlgorithmArg {
    /// Breadth-first on uniform halls, Dijkstra once any aisle is weighted.
    #[default]
    Auto,
    Bfs,
    Dijkstra,
}

impl From<AlgorithmArg> for PathMode {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::Auto => PathMode::Auto,
            AlgorithmArg::Bfs => PathMode::Bfs,
            AlgorithmArg::Dijkstra => PathMode::Dijkstra,
        }
    }
}

/// Stop ordering metric accepted by `--ordering`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OrderingArg {
    /// Straight-line and grid distance between booths.
    #[default]
    Heuristic,
    /// Real walking cost between booths.
    PathCost,
}

impl From<OrderingArg> for OrderingMetric {
    fn from(value: OrderingArg) -> Self {
        match value {
            OrderingArg::Heuristic => OrderingMetric::Heuristic,
            OrderingArg::PathCost => OrderingMetric::PathCost,
        }
    }
}

/// Arguments for the route command.
#[derive(Debug, Clone, Args)]
pub struct RouteCommandArgs {
    #[command(flatten)]
    pub floor_plan: FloorPlanArgs,
    /// Booth the route starts from. Pass an empty string to start at the
    /// first selected stop.
    #[arg(long, default_value = ENTRANCE_CODE)]
    pub entrance: String,
    /// Booth codes separated by commas or newlines.
    #[arg(long)]
    pub stops: Option<String>,
    /// A single booth code; may be repeated.
    #[arg(long = "stop")]
    pub stop: Vec<String>,
    /// Search mode used for every leg.
    #[arg(long, value_enum, default_value_t = AlgorithmArg::Auto)]
    pub algorithm: AlgorithmArg,
    /// How stops are priced while ordering them.
    #[arg(long, value_enum, default_value_t = OrderingArg::Heuristic)]
    pub ordering: OrderingArg,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library PlanRequest.
    pub fn to_request(&self) -> PlanRequest {
        let mut stops = self
            .stops
            .as_deref()
            .map(parse_selection)
            .unwrap_or_default();
        stops.extend(self.stop.iter().flat_map(|code| parse_selection(code)));

        let entrance = self.entrance.trim();
        PlanRequest::new(stops)
            .with_entrance((!entrance.is_empty()).then(|| entrance.to_string()))
            .with_path_mode(self.algorithm.into())
            .with_ordering(self.ordering.into())
    }
}

/// Handle the route subcommand.
///
/// Unreachable legs and unknown codes are reported in the output and do not
/// fail the command.
pub fn handle_route_command(
    args: &RouteCommandArgs,
    format: OutputFormat,
    palette: &ColorPalette,
) -> Result<()> {
    let grid = args.floor_plan.load()?;
    let plan = plan_route(&grid, &args.to_request())?;
    let rendered = format_route(&plan, format, palette, supports_unicode())?;
    print!("{rendered}");
    Ok(())
}
