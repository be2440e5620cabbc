//! Booth listing command handler.

use anyhow::Result;
use clap::Args;

use hallroute_cli::output::{booth_entries, format_booths, OutputFormat};
use hallroute_cli::terminal::ColorPalette;

use super::FloorPlanArgs;

/// Arguments for the booths command.
#[derive(Debug, Clone, Args)]
pub struct BoothsCommandArgs {
    #[command(flatten)]
    pub floor_plan: FloorPlanArgs,
}

/// Handle the booths subcommand: list every booth with its position and the
/// aisle cell routes reach it from.
pub fn handle_booths_command(
    args: &BoothsCommandArgs,
    format: OutputFormat,
    palette: &ColorPalette,
) -> Result<()> {
    let grid = args.floor_plan.load()?;
    let entries = booth_entries(&grid);
    tracing::debug!(booths = entries.len(), "listing booths");
    print!("{}", format_booths(&entries, format, palette)?);
    Ok(())
}
