use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Canonical code of the distinguished entrance booth.
pub const ENTRANCE_CODE: &str = "ENTRANCE";

/// Default prefix that marks a cell as a weighted aisle (`~`, `~5`, `~2.5`).
pub const DEFAULT_WEIGHT_MARKER: char = '~';

/// Minimum Jaro-Winkler similarity for a booth code to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// Column/row position of a cell on the floor plan. `x` grows to the right,
/// `y` grows downwards, `(0, 0)` is the top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Grid (taxicab) distance to another coordinate.
    pub fn manhattan(&self, other: &Self) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Straight-line distance to another coordinate.
    pub fn euclidean(&self, other: &Self) -> f64 {
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// Whether `other` is exactly one orthogonal step away.
    pub fn is_adjacent(&self, other: &Self) -> bool {
        self.manhattan(other) == 1
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Classification of a single floor-plan cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Plain aisle, traversal cost 1.
    Empty,
    /// Aisle with an explicit traversal cost.
    WeightedAisle(f64),
    /// Exhibit stand; never walkable.
    Booth(String),
}

impl Cell {
    /// Classify raw cell text using the given weight marker.
    pub fn classify_text(raw: &str, weight_marker: char) -> Self {
        let text = raw.trim();
        if text.is_empty() {
            return Cell::Empty;
        }
        if let Some(suffix) = text.strip_prefix(weight_marker) {
            return Cell::WeightedAisle(parse_weight(suffix.trim()));
        }
        if text.eq_ignore_ascii_case(ENTRANCE_CODE) {
            return Cell::Booth(ENTRANCE_CODE.to_string());
        }
        Cell::Booth(text.to_string())
    }

    pub fn is_traversable(&self) -> bool {
        !matches!(self, Cell::Booth(_))
    }

    /// Cost of stepping onto this cell, `None` for booths.
    pub fn traversal_cost(&self) -> Option<f64> {
        match self {
            Cell::Empty => Some(1.0),
            Cell::WeightedAisle(cost) => Some(*cost),
            Cell::Booth(_) => None,
        }
    }

    pub fn booth_code(&self) -> Option<&str> {
        match self {
            Cell::Booth(code) => Some(code),
            _ => None,
        }
    }

    pub fn is_entrance(&self) -> bool {
        self.booth_code() == Some(ENTRANCE_CODE)
    }
}

fn parse_weight(suffix: &str) -> f64 {
    if suffix.is_empty() {
        return 1.0;
    }
    match suffix.parse::<f64>() {
        Ok(cost) if cost.is_finite() && cost > 0.0 => cost,
        _ => {
            warn!(suffix, "invalid aisle weight; using default cost 1");
            1.0
        }
    }
}

/// How repeated booth codes on a floor plan are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Fail the build with [`Error::DuplicateBoothCode`].
    #[default]
    Reject,
    /// Keep the last cell scanned (row-major) for each code.
    LastWins,
}

/// Options applied while building a [`GridModel`].
#[derive(Debug, Clone, Copy)]
pub struct GridOptions {
    pub weight_marker: char,
    pub duplicates: DuplicatePolicy,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            weight_marker: DEFAULT_WEIGHT_MARKER,
            duplicates: DuplicatePolicy::Reject,
        }
    }
}

/// Booth code to coordinate lookup.
#[derive(Debug, Clone, Default)]
pub struct BoothIndex {
    positions: HashMap<String, Coord>,
    scan_order: Vec<String>,
}

impl BoothIndex {
    /// Lookup the coordinate of a booth by its case-sensitive code.
    pub fn position(&self, code: &str) -> Option<Coord> {
        self.positions.get(code).copied()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.positions.contains_key(code)
    }

    /// Position of the entrance booth, if the floor plan has one.
    pub fn entrance(&self) -> Option<Coord> {
        self.position(ENTRANCE_CODE)
    }

    /// Booth codes in the order they were first scanned (row-major).
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.scan_order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.scan_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scan_order.is_empty()
    }

    /// Return up to `limit` known booth codes that look like `code`, best first.
    pub fn fuzzy_matches(&self, code: &str, limit: usize) -> Vec<String> {
        let needle = code.to_ascii_uppercase();
        let mut scored: Vec<(f64, &str)> = self
            .scan_order
            .iter()
            .map(|candidate| {
                let score = strsim::jaro_winkler(&needle, &candidate.to_ascii_uppercase());
                (score, candidate.as_str())
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.1.cmp(b.1))
        });

        scored
            .into_iter()
            .take(limit)
            .map(|(_, candidate)| candidate.to_string())
            .collect()
    }

    fn insert(&mut self, code: &str, at: Coord, policy: DuplicatePolicy) -> Result<()> {
        match self.positions.get(code).copied() {
            Some(first) => match policy {
                DuplicatePolicy::Reject => Err(Error::DuplicateBoothCode {
                    code: code.to_string(),
                    first,
                    second: at,
                }),
                DuplicatePolicy::LastWins => {
                    warn!(code, %first, second = %at, "duplicate booth code; keeping last cell");
                    self.positions.insert(code.to_string(), at);
                    Ok(())
                }
            },
            None => {
                self.positions.insert(code.to_string(), at);
                self.scan_order.push(code.to_string());
                Ok(())
            }
        }
    }
}

/// Immutable, classified floor plan.
#[derive(Debug, Clone)]
pub struct GridModel {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    booths: BoothIndex,
    uniform: bool,
}

impl GridModel {
    /// Build a grid from raw rows using [`GridOptions::default`].
    pub fn from_rows<R, S>(rows: &[R]) -> Result<Self>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        Self::from_rows_with(rows, GridOptions::default())
    }

    /// Build a grid from raw rows. Short rows are padded with aisle cells up to
    /// the length of the longest row.
    pub fn from_rows_with<R, S>(rows: &[R], options: GridOptions) -> Result<Self>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let marker = options.weight_marker;
        if marker.is_alphanumeric() || marker.is_whitespace() {
            return Err(Error::InvalidWeightMarker { marker });
        }

        let height = rows.len();
        let width = rows
            .iter()
            .map(|row| row.as_ref().len())
            .max()
            .unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(Error::EmptyFloorPlan);
        }

        let mut cells = Vec::with_capacity(width * height);
        let mut booths = BoothIndex::default();
        let mut uniform = true;

        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            for x in 0..width {
                let cell = row
                    .get(x)
                    .map(|text| Cell::classify_text(text.as_ref(), marker))
                    .unwrap_or(Cell::Empty);
                match &cell {
                    Cell::Booth(code) => booths.insert(code, Coord::new(x, y), options.duplicates)?,
                    Cell::WeightedAisle(cost) if *cost != 1.0 => uniform = false,
                    _ => {}
                }
                cells.push(cell);
            }
        }

        debug!(
            width,
            height,
            booths = booths.len(),
            uniform,
            "built floor plan grid"
        );

        Ok(Self {
            width,
            height,
            cells,
            booths,
            uniform,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells (`width * height`).
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, at: Coord) -> bool {
        at.x < self.width && at.y < self.height
    }

    /// Cell at the given coordinate, `None` when out of bounds.
    pub fn classify(&self, at: Coord) -> Option<&Cell> {
        if self.contains(at) {
            self.cells.get(at.y * self.width + at.x)
        } else {
            None
        }
    }

    /// `false` for booths and for coordinates outside the grid.
    pub fn is_traversable(&self, at: Coord) -> bool {
        self.classify(at).is_some_and(Cell::is_traversable)
    }

    /// Cost of stepping onto `at`; `None` for booths and out-of-bounds cells.
    pub fn traversal_cost(&self, at: Coord) -> Option<f64> {
        self.classify(at).and_then(Cell::traversal_cost)
    }

    /// In-bounds orthogonal neighbours in the fixed order +x, -x, +y, -y.
    pub fn neighbors(&self, at: Coord) -> impl Iterator<Item = Coord> + '_ {
        let candidates = [
            at.x.checked_add(1).map(|x| Coord::new(x, at.y)),
            at.x.checked_sub(1).map(|x| Coord::new(x, at.y)),
            at.y.checked_add(1).map(|y| Coord::new(at.x, y)),
            at.y.checked_sub(1).map(|y| Coord::new(at.x, y)),
        ];
        candidates
            .into_iter()
            .flatten()
            .filter(move |candidate| self.contains(*candidate))
    }

    pub fn booth_position(&self, code: &str) -> Option<Coord> {
        self.booths.position(code)
    }

    pub fn booths(&self) -> &BoothIndex {
        &self.booths
    }

    /// `true` when every traversable cell costs exactly 1.
    pub fn is_uniform(&self) -> bool {
        self.uniform
    }

    /// Row-major index of a coordinate; only valid for in-bounds coordinates.
    pub(crate) fn index_of(&self, at: Coord) -> usize {
        at.y * self.width + at.x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> GridModel {
        GridModel::from_rows(rows).expect("grid builds")
    }

    fn build(rows: &[&[&str]], options: GridOptions) -> Result<GridModel> {
        GridModel::from_rows_with(rows, options)
    }

    #[test]
    fn classifies_cell_text() {
        assert_eq!(Cell::classify_text("  ", '~'), Cell::Empty);
        assert_eq!(Cell::classify_text("~", '~'), Cell::WeightedAisle(1.0));
        assert_eq!(Cell::classify_text("~5", '~'), Cell::WeightedAisle(5.0));
        assert_eq!(Cell::classify_text(" ~2.5 ", '~'), Cell::WeightedAisle(2.5));
        assert_eq!(Cell::classify_text("~abc", '~'), Cell::WeightedAisle(1.0));
        assert_eq!(Cell::classify_text("~-3", '~'), Cell::WeightedAisle(1.0));
        assert_eq!(
            Cell::classify_text("entrance", '~'),
            Cell::Booth(ENTRANCE_CODE.to_string())
        );
        assert_eq!(
            Cell::classify_text(" A12 ", '~'),
            Cell::Booth("A12".to_string())
        );
    }

    #[test]
    fn pads_short_rows_with_aisles() {
        let g = grid(&[&["A", "", "B"], &["C"]]);
        assert_eq!((g.width(), g.height()), (3, 2));
        assert_eq!(g.classify(Coord::new(2, 1)), Some(&Cell::Empty));
        assert!(g.is_traversable(Coord::new(1, 1)));
        assert!(!g.is_traversable(Coord::new(0, 1)));
        assert!(g.classify(Coord::new(3, 0)).is_none());
    }

    #[test]
    fn traversal_costs_follow_cells() {
        let g = grid(&[&["", "~4", "X"]]);
        assert_eq!(g.traversal_cost(Coord::new(0, 0)), Some(1.0));
        assert_eq!(g.traversal_cost(Coord::new(1, 0)), Some(4.0));
        assert_eq!(g.traversal_cost(Coord::new(2, 0)), None);
        assert!(!g.is_uniform());
    }

    #[test]
    fn unit_weights_keep_grid_uniform() {
        let g = grid(&[&["", "~", "~1"]]);
        assert!(g.is_uniform());
    }

    #[test]
    fn neighbors_use_fixed_order_and_stay_in_bounds() {
        let g = grid(&[&["", "", ""], &["", "", ""], &["", "", ""]]);
        let centre: Vec<Coord> = g.neighbors(Coord::new(1, 1)).collect();
        assert_eq!(
            centre,
            vec![
                Coord::new(2, 1),
                Coord::new(0, 1),
                Coord::new(1, 2),
                Coord::new(1, 0)
            ]
        );
        let corner: Vec<Coord> = g.neighbors(Coord::new(0, 0)).collect();
        assert_eq!(corner, vec![Coord::new(1, 0), Coord::new(0, 1)]);
    }

    #[test]
    fn indexes_booths_and_entrance() {
        let g = grid(&[&["Entrance", "", "A"], &["", "B", ""]]);
        assert_eq!(g.booths().entrance(), Some(Coord::new(0, 0)));
        assert_eq!(g.booth_position("A"), Some(Coord::new(2, 0)));
        assert_eq!(g.booth_position("B"), Some(Coord::new(1, 1)));
        assert_eq!(g.booth_position("Z"), None);
        let codes: Vec<&str> = g.booths().codes().collect();
        assert_eq!(codes, vec![ENTRANCE_CODE, "A", "B"]);
    }

    #[test]
    fn rejects_duplicate_codes_by_default() {
        let err = build(&[&["A", "", "A"]], GridOptions::default()).expect_err("duplicate");
        match err {
            Error::DuplicateBoothCode {
                code,
                first,
                second,
            } => {
                assert_eq!(code, "A");
                assert_eq!(first, Coord::new(0, 0));
                assert_eq!(second, Coord::new(2, 0));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn last_scanned_duplicate_wins_when_allowed() {
        let options = GridOptions {
            duplicates: DuplicatePolicy::LastWins,
            ..GridOptions::default()
        };
        let g = build(&[&["A", ""], &["", "A"]], options).expect("builds");
        assert_eq!(g.booth_position("A"), Some(Coord::new(1, 1)));
        assert_eq!(g.booths().len(), 1);
    }

    #[test]
    fn two_entrances_are_duplicates() {
        let err = build(&[&["ENTRANCE", "entrance"]], GridOptions::default()).expect_err("duplicate");
        assert!(matches!(err, Error::DuplicateBoothCode { .. }));
    }

    #[test]
    fn empty_rows_are_rejected() {
        let rows: Vec<Vec<String>> = Vec::new();
        assert!(matches!(
            GridModel::from_rows(&rows),
            Err(Error::EmptyFloorPlan)
        ));
        assert!(matches!(
            GridModel::from_rows(&[Vec::<String>::new()]),
            Err(Error::EmptyFloorPlan)
        ));
    }

    #[test]
    fn custom_weight_marker() {
        let options = GridOptions {
            weight_marker: '*',
            ..GridOptions::default()
        };
        let g = build(&[&["*3", "~3"]], options).expect("builds");
        assert_eq!(g.traversal_cost(Coord::new(0, 0)), Some(3.0));
        assert_eq!(g.booth_position("~3"), Some(Coord::new(1, 0)));
    }

    #[test]
    fn alphanumeric_weight_marker_is_rejected() {
        let options = GridOptions {
            weight_marker: 'W',
            ..GridOptions::default()
        };
        assert!(matches!(
            build(&[&[""]], options),
            Err(Error::InvalidWeightMarker { marker: 'W' })
        ));
    }

    #[test]
    fn fuzzy_matches_rank_similar_codes() {
        let g = grid(&[&["A10", "A11", "ZEBRA"]]);
        let matches = g.booths().fuzzy_matches("a10", 3);
        assert_eq!(matches.first().map(String::as_str), Some("A10"));
        assert!(!matches.contains(&"ZEBRA".to_string()));
    }

    #[test]
    fn coordinate_distances() {
        let a = Coord::new(0, 0);
        let b = Coord::new(3, 4);
        assert_eq!(a.manhattan(&b), 7);
        assert!((a.euclidean(&b) - 5.0).abs() < f64::EPSILON);
        assert!(a.is_adjacent(&Coord::new(0, 1)));
        assert!(!a.is_adjacent(&Coord::new(1, 1)));
        assert_eq!(b.to_string(), "(3, 4)");
    }
}
