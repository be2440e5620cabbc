use serde::Serialize;
use thiserror::Error;

use crate::grid::Coord;

/// Convenient result alias for the hallroute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a booth code could not be found on the floor plan.
    #[error("unknown booth code: {code}{}", format_suggestions(.suggestions))]
    UnknownBooth {
        code: String,
        suggestions: Vec<String>,
    },

    /// Raised when neither an entrance nor any valid stop is available to
    /// start the route from.
    #[error("no anchor to start the route from{}", format_unknown(.unknown))]
    NoAnchor { unknown: Vec<String> },

    /// Raised when two cells on the floor plan carry the same booth code.
    #[error("duplicate booth code {code} at {first} and {second}")]
    DuplicateBoothCode {
        code: String,
        first: Coord,
        second: Coord,
    },

    /// Raised when the floor plan has no rows or no columns.
    #[error("floor plan contains no cells")]
    EmptyFloorPlan,

    /// Raised when a computed route plan lacks any stops.
    #[error("route plan was empty")]
    EmptyRoutePlan,

    /// Raised when the configured weight marker could never be told apart
    /// from booth text.
    #[error("invalid weight marker {marker:?}: must not be alphanumeric or whitespace")]
    InvalidWeightMarker { marker: char },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for CSV parsing errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Why a single leg of a route could not be walked. Stored on the leg rather
/// than returned as an error so the rest of the plan survives.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LegFailure {
    /// The booth is boxed in by other booths or the grid edge.
    #[error("booth {booth} has no adjacent aisle cell")]
    NoAisleAccess { booth: String },

    /// Both anchors exist but no walkable path joins them.
    #[error("no walkable path from {from} to {to}")]
    NoPath { from: String, to: String },
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

fn format_unknown(unknown: &[String]) -> String {
    if unknown.is_empty() {
        String::new()
    } else {
        format!(" (unknown booth codes: {})", unknown.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_booth_lists_single_suggestion() {
        let err = Error::UnknownBooth {
            code: "A1O".to_string(),
            suggestions: vec!["A10".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "unknown booth code: A1O. Did you mean 'A10'?"
        );
    }

    #[test]
    fn unknown_booth_lists_multiple_suggestions() {
        let err = Error::UnknownBooth {
            code: "B".to_string(),
            suggestions: vec!["B1".to_string(), "B2".to_string()],
        };
        assert!(err.to_string().ends_with("one of: 'B1', 'B2'?"));
    }

    #[test]
    fn leg_failures_describe_the_blocked_leg() {
        let failure = LegFailure::NoPath {
            from: "ENTRANCE".to_string(),
            to: "A".to_string(),
        };
        assert_eq!(failure.to_string(), "no walkable path from ENTRANCE to A");
        let failure = LegFailure::NoAisleAccess {
            booth: "B".to_string(),
        };
        assert_eq!(failure.to_string(), "booth B has no adjacent aisle cell");
    }

    #[test]
    fn no_anchor_mentions_unknown_codes() {
        let err = Error::NoAnchor {
            unknown: vec!["ZZZ".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "no anchor to start the route from (unknown booth codes: ZZZ)"
        );
    }
}
