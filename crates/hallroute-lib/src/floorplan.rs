//! Floor-plan loading from comma-separated text.
//!
//! Each record is one row of the hall, each field one cell. Rows may have
//! different lengths; the grid pads them. There is no header row.

use std::fs;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::error::Result;
use crate::grid::{GridModel, GridOptions};

/// Read raw cell text from a CSV reader.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<Vec<String>>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::Fields)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Read raw cell text from a CSV file.
pub fn load_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let file = fs::File::open(path)?;
    let rows = read_rows(file)?;
    debug!(path = %path.display(), rows = rows.len(), "loaded floor plan rows");
    Ok(rows)
}

/// Load and classify a floor plan from a CSV file.
pub fn load_floor_plan(path: &Path, options: GridOptions) -> Result<GridModel> {
    let rows = load_rows(path)?;
    GridModel::from_rows_with(&rows, options)
}
