//! Placement validation: which cells a ship covers and whether it fits.
//!
//! Everything here is pure. Calling the validator repeatedly against an
//! unchanged board, e.g. on every drag-hover, always gives the same answer.

use alloc::vec::Vec;

use crate::board::BoardState;
use crate::common::{BoardError, Cell};
use crate::config::GridSize;
use crate::ship::{Orientation, ShipClass};

/// Ordered cells covered by `ship` anchored at `anchor`.
///
/// Horizontal ships extend along columns, vertical ships along rows. Cells
/// past the edge of the grid are still produced so they can be previewed.
pub fn cells_for_placement(ship: &ShipClass, anchor: Cell, orientation: Orientation) -> Vec<Cell> {
    (0..ship.length())
        .map(|i| match orientation {
            Orientation::Horizontal => Cell::new(anchor.row, anchor.col.saturating_add(i)),
            Orientation::Vertical => Cell::new(anchor.row.saturating_add(i), anchor.col),
        })
        .collect()
}

/// Validate a placement, returning the cells to record or the first reason
/// it is illegal. Bounds are checked before occupancy.
pub fn check_placement(
    board: &BoardState,
    ship: &ShipClass,
    anchor: Cell,
    orientation: Orientation,
    grid: GridSize,
) -> Result<Vec<Cell>, BoardError> {
    let cells = cells_for_placement(ship, anchor, orientation);
    if let Some(cell) = cells
        .iter()
        .find(|c| !grid.contains(c.row) || !grid.contains(c.col))
    {
        log::trace!("{} at {} runs off the {} grid", ship.name(), anchor, grid);
        return Err(BoardError::ShipOutOfBounds {
            row: cell.row,
            col: cell.col,
        });
    }
    for &cell in &cells {
        if let Some(occupant) = board.occupant_at(cell) {
            log::trace!("{} at {} overlaps {}", ship.name(), anchor, occupant.name());
            return Err(BoardError::ShipOverlaps {
                row: cell.row,
                col: cell.col,
                occupant: occupant.id(),
            });
        }
    }
    Ok(cells)
}

/// Returns `true` when `ship` fits at `anchor` without leaving the grid or
/// touching an occupied cell.
pub fn can_place(
    board: &BoardState,
    ship: &ShipClass,
    anchor: Cell,
    orientation: Orientation,
    grid: GridSize,
) -> bool {
    check_placement(board, ship, anchor, orientation, grid).is_ok()
}

/// Hover feedback for a candidate placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub cells: Vec<Cell>,
    pub valid: bool,
}

/// Cells a placement would cover together with its legality.
pub fn preview(
    board: &BoardState,
    ship: &ShipClass,
    anchor: Cell,
    orientation: Orientation,
    grid: GridSize,
) -> Preview {
    match check_placement(board, ship, anchor, orientation, grid) {
        Ok(cells) => Preview { cells, valid: true },
        Err(_) => Preview {
            cells: cells_for_placement(ship, anchor, orientation),
            valid: false,
        },
    }
}
