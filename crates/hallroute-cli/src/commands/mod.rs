// Module exports for CLI subcommands
//
// Each module handles a specific CLI subcommand. The main.rs dispatches to
// these handlers, keeping the entry point focused on parsing and coordination.

pub mod booths;
pub mod route;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use hallroute_lib::{load_floor_plan, DuplicatePolicy, GridModel, GridOptions, DEFAULT_WEIGHT_MARKER};

/// Floor-plan arguments shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct FloorPlanArgs {
    /// Floor plan CSV: one row per line, one cell per field.
    #[arg(long)]
    pub map: PathBuf,
    /// Keep the last cell for repeated booth codes instead of failing.
    #[arg(long)]
    pub allow_duplicates: bool,
    /// Prefix marking a weighted aisle cell, e.g. `~5`.
    #[arg(long, default_value_t = DEFAULT_WEIGHT_MARKER)]
    pub weight_marker: char,
}

impl FloorPlanArgs {
    pub fn grid_options(&self) -> GridOptions {
        GridOptions {
            weight_marker: self.weight_marker,
            duplicates: if self.allow_duplicates {
                DuplicatePolicy::LastWins
            } else {
                DuplicatePolicy::Reject
            },
        }
    }

    pub fn load(&self) -> Result<GridModel> {
        load_floor_plan(&self.map, self.grid_options())
            .with_context(|| format!("failed to load floor plan from {}", self.map.display()))
    }
}
