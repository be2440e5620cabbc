//! Mapping booths onto the aisle cell a visitor actually walks to.
//!
//! Booths are obstacles, so every leg starts and ends on an aisle cell next to
//! the booth. Neighbours are probed in the fixed priority order +x, -x, +y, -y
//! (right, left, below, above) and the first walkable one is the anchor.

use crate::grid::{Coord, GridModel};

/// Resolve the walkable anchor cell for a booth code.
///
/// Returns `None` when the code is not on the floor plan or when every
/// orthogonal neighbour is a booth or lies outside the grid.
pub fn resolve_anchor(grid: &GridModel, code: &str) -> Option<Coord> {
    grid.booth_position(code)
        .and_then(|position| anchor_for(grid, position))
}

/// Resolve the walkable anchor next to an arbitrary cell.
pub fn anchor_for(grid: &GridModel, position: Coord) -> Option<Coord> {
    grid.neighbors(position)
        .find(|candidate| grid.is_traversable(*candidate))
}
