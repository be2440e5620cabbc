//! Output formatting for route rendering.
//!
//! Every formatter returns a `String` so the command handlers decide where it
//! goes and tests can inspect it without capturing stdout.

use std::fmt::Write;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use hallroute_lib::output::format_cost;
use hallroute_lib::{
    anchor_for, Coord, GridModel, LegStatus, RoutePlan, RouteRenderMode, RouteSummary,
    ENTRANCE_CODE,
};

use crate::terminal::{leg_arrow, ColorPalette};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Tagged, optionally colored listing.
    #[default]
    Text,
    /// Markdown.
    Rich,
    /// The single visit-order line.
    Order,
    /// Pretty-printed JSON of the full plan, paths included.
    Json,
}

/// Render a planned route in the requested format. Every format rejects a
/// plan with no stops.
pub fn format_route(
    plan: &RoutePlan,
    format: OutputFormat,
    palette: &ColorPalette,
    unicode: bool,
) -> Result<String> {
    let summary = RouteSummary::from_plan(plan)?;
    Ok(match format {
        OutputFormat::Json => to_json(plan)?,
        OutputFormat::Rich => summary.render(RouteRenderMode::RichText),
        OutputFormat::Order => summary.render(RouteRenderMode::VisitOrder),
        OutputFormat::Text => format_text(&summary, palette, unicode),
    })
}

/// Human-friendly route view with a badge per stop.
pub fn format_text(summary: &RouteSummary, palette: &ColorPalette, unicode: bool) -> String {
    let p = palette;
    let arrow = format!(" {} ", leg_arrow(unicode));
    let mut buffer = String::new();
    let _ = writeln!(
        buffer,
        "Route: {} ({} stops; mode: {}; ordering: {})",
        summary.order.join(arrow.as_str()),
        summary.order.len(),
        summary.path_mode,
        summary.ordering
    );

    for (position, code) in summary.order.iter().enumerate() {
        let Some(leg) = position.checked_sub(1).and_then(|index| summary.legs.get(index)) else {
            let _ = writeln!(
                buffer,
                " {}STRT{} {}{code}{}",
                p.tag_start, p.reset, p.white_bold, p.reset
            );
            continue;
        };
        match leg.status {
            LegStatus::Walked => {
                let _ = writeln!(
                    buffer,
                    " {}STOP{} {}{code}{} {}({} steps, cost {}){}",
                    p.tag_stop,
                    p.reset,
                    p.white_bold,
                    p.reset,
                    p.gray,
                    leg.steps.unwrap_or_default(),
                    format_cost(leg.cost.unwrap_or_default()),
                    p.reset
                );
            }
            LegStatus::Unreachable => {
                let _ = writeln!(
                    buffer,
                    " {}MISS{} {}{code}{} {}{}{}",
                    p.tag_miss,
                    p.reset,
                    p.white_bold,
                    p.reset,
                    p.red,
                    leg.reason.as_deref().unwrap_or("unreachable"),
                    p.reset
                );
            }
        }
    }

    let _ = writeln!(
        buffer,
        "\nTotal: {} steps, cost {}",
        summary.total_steps,
        format_cost(summary.total_cost)
    );
    if !summary.unreachable_legs.is_empty() {
        let _ = writeln!(
            buffer,
            "{}Unreachable legs: {}{}",
            p.red,
            summary.unreachable_legs.len(),
            p.reset
        );
    }
    for code in &summary.unknown_codes {
        let _ = write!(buffer, "{}Unknown booth: {code}{}", p.red, p.reset);
        match summary.suggestions.get(code) {
            Some(matches) if !matches.is_empty() => {
                let _ = writeln!(
                    buffer,
                    " {}(did you mean {}?){}",
                    p.yellow,
                    matches.join(", "),
                    p.reset
                );
            }
            _ => buffer.push('\n'),
        }
    }
    buffer
}

/// Booth listing entry.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BoothEntry {
    pub code: String,
    pub position: Coord,
    /// Aisle cell routes use to reach the booth.
    pub anchor: Option<Coord>,
}

/// Booths on the floor plan, entrance first, then in scan order.
pub fn booth_entries(grid: &GridModel) -> Vec<BoothEntry> {
    let booths = grid.booths();
    let entrance = booths.entrance().map(|_| ENTRANCE_CODE);
    entrance
        .into_iter()
        .chain(booths.codes().filter(|code| *code != ENTRANCE_CODE))
        .filter_map(|code| {
            booths.position(code).map(|position| BoothEntry {
                code: code.to_string(),
                position,
                anchor: anchor_for(grid, position),
            })
        })
        .collect()
}

/// Render the booth listing in the requested format.
pub fn format_booths(
    entries: &[BoothEntry],
    format: OutputFormat,
    palette: &ColorPalette,
) -> Result<String> {
    let p = palette;
    let mut buffer = String::new();
    match format {
        OutputFormat::Json => return to_json(entries),
        OutputFormat::Order => {
            let codes: Vec<&str> = entries
                .iter()
                .filter(|entry| entry.code != ENTRANCE_CODE)
                .map(|entry| entry.code.as_str())
                .collect();
            let _ = writeln!(buffer, "{}", codes.join(","));
        }
        OutputFormat::Rich => {
            for entry in entries {
                let _ = writeln!(buffer, "* **{}** at `{}`", entry.code, entry.position);
            }
        }
        OutputFormat::Text => {
            for entry in entries {
                let access = match entry.anchor {
                    Some(anchor) => format!("{}via {anchor}{}", p.gray, p.reset),
                    None => format!("{}no aisle access{}", p.red, p.reset),
                };
                let _ = writeln!(
                    buffer,
                    "{}{}{} {} {access}",
                    p.white_bold, entry.code, p.reset, entry.position
                );
            }
        }
    }
    Ok(buffer)
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}
