use std::collections::BTreeMap;
use std::fmt::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::path::PathMode;
use crate::routing::{OrderingMetric, RouteLeg, RoutePlan};

/// Separator used between stops in the visit-order line.
pub const VISIT_ORDER_ARROW: &str = " ➜ ";

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    PlainText,
    RichText,
    VisitOrder,
}

/// Whether a leg could be walked.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LegStatus {
    Walked,
    Unreachable,
}

/// Leg of a summarised route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LegSummary {
    pub index: usize,
    pub from: String,
    pub to: String,
    pub status: LegStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<&RouteLeg> for LegSummary {
    fn from(leg: &RouteLeg) -> Self {
        Self {
            index: leg.index,
            from: leg.from.clone(),
            to: leg.to.clone(),
            status: if leg.is_reachable() {
                LegStatus::Walked
            } else {
                LegStatus::Unreachable
            },
            steps: leg.steps(),
            cost: leg.cost,
            reason: leg.failure.as_ref().map(ToString::to_string),
        }
    }
}

/// Structured representation of a planned route that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub path_mode: PathMode,
    pub ordering: OrderingMetric,
    pub order: Vec<String>,
    pub legs: Vec<LegSummary>,
    pub total_steps: usize,
    pub total_cost: f64,
    pub unreachable_legs: Vec<usize>,
    pub unknown_codes: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub suggestions: BTreeMap<String, Vec<String>>,
}

impl RouteSummary {
    /// Convert a [`RoutePlan`] into a structured summary.
    pub fn from_plan(plan: &RoutePlan) -> Result<Self> {
        if plan.order.is_empty() {
            return Err(Error::EmptyRoutePlan);
        }

        Ok(Self {
            path_mode: plan.path_mode,
            ordering: plan.ordering,
            order: plan.order.clone(),
            legs: plan.legs.iter().map(LegSummary::from).collect(),
            total_steps: plan.total_steps(),
            total_cost: plan.total_cost(),
            unreachable_legs: plan.unreachable_legs.clone(),
            unknown_codes: plan.unknown_codes.clone(),
            suggestions: plan.suggestions.clone(),
        })
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::RichText => self.render_rich(),
            RouteRenderMode::VisitOrder => self.render_visit_order(),
        }
    }

    /// The single "Visit Order: A ➜ B" line.
    pub fn visit_order_line(&self) -> String {
        format!("Visit Order: {}", self.order.join(VISIT_ORDER_ARROW))
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route: {} ({} stops, {} steps, cost {}, mode: {}, ordering: {})",
            self.order.join(" -> "),
            self.order.len(),
            self.total_steps,
            format_cost(self.total_cost),
            self.path_mode,
            self.ordering
        );

        for leg in &self.legs {
            match leg.status {
                LegStatus::Walked => {
                    let _ = writeln!(
                        buffer,
                        "{:>3}: {} -> {} ({} steps, cost {})",
                        leg.index + 1,
                        leg.from,
                        leg.to,
                        leg.steps.unwrap_or_default(),
                        format_cost(leg.cost.unwrap_or_default())
                    );
                }
                LegStatus::Unreachable => {
                    let _ = writeln!(
                        buffer,
                        "{:>3}: {} -> {} unreachable: {}",
                        leg.index + 1,
                        leg.from,
                        leg.to,
                        leg.reason.as_deref().unwrap_or("no path")
                    );
                }
            }
        }

        self.write_unknown(&mut buffer, false);
        buffer
    }

    fn render_rich(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "**Route**: _{}_ ({} steps, cost {}, mode: `{}`, ordering: `{}`)",
            self.order.join(" → "),
            self.total_steps,
            format_cost(self.total_cost),
            self.path_mode,
            self.ordering
        );
        for leg in &self.legs {
            match leg.status {
                LegStatus::Walked => {
                    let _ = writeln!(
                        buffer,
                        "* {:>2}. **{}** → **{}** ({} steps, cost {})",
                        leg.index + 1,
                        leg.from,
                        leg.to,
                        leg.steps.unwrap_or_default(),
                        format_cost(leg.cost.unwrap_or_default())
                    );
                }
                LegStatus::Unreachable => {
                    let _ = writeln!(
                        buffer,
                        "* {:>2}. **{}** → **{}** _unreachable_: {}",
                        leg.index + 1,
                        leg.from,
                        leg.to,
                        leg.reason.as_deref().unwrap_or("no path")
                    );
                }
            }
        }
        self.write_unknown(&mut buffer, true);
        buffer
    }

    fn render_visit_order(&self) -> String {
        let mut buffer = self.visit_order_line();
        buffer.push('\n');
        buffer
    }

    fn write_unknown(&self, buffer: &mut String, rich: bool) {
        for code in &self.unknown_codes {
            let hint = match self.suggestions.get(code) {
                Some(matches) if !matches.is_empty() => {
                    format!(" (did you mean {}?)", matches.join(", "))
                }
                _ => String::new(),
            };
            if rich {
                let _ = writeln!(buffer, "* unknown booth `{code}`{hint}");
            } else {
                let _ = writeln!(buffer, "Unknown booth: {code}{hint}");
            }
        }
    }
}

/// Whole costs print without decimals, fractional ones with two.
pub fn format_cost(cost: f64) -> String {
    if cost.fract() == 0.0 {
        format!("{cost:.0}")
    } else {
        format!("{cost:.2}")
    }
}
