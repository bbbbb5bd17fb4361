#![cfg(feature = "std")]

//! Plain text rendering of the placement grid.

use std::fmt::Write;

use crate::board::BoardState;
use crate::common::Cell;
use crate::config::GridSize;
use crate::placement::Preview;

/// Draw `board` on a `grid`-sized table. Rows are lettered, columns numbered,
/// and occupied cells show the two-letter ship label.
pub fn render_board(board: &BoardState, grid: GridSize) -> String {
    render_with_preview(board, grid, None)
}

/// Like [`render_board`], with a hover preview overlaid: `++` where the ship
/// would fit, `!!` where the placement is illegal.
pub fn render_with_preview(board: &BoardState, grid: GridSize, preview: Option<&Preview>) -> String {
    let size = grid.get();
    let mut out = String::new();
    let _ = write!(out, "{:>5}", grid.to_string());
    for c in 0..size {
        let _ = write!(out, " {:>2}", c + 1);
    }
    out.push('\n');
    for r in 0..size {
        let _ = write!(out, "{:>5}", (b'A' + r as u8) as char);
        for c in 0..size {
            let cell = Cell::new(r, c);
            let hovered = preview.filter(|p| p.cells.contains(&cell));
            let mark = match (hovered, board.occupant_at(cell)) {
                (Some(p), _) if !p.valid => "!!",
                (Some(_), None) => "++",
                (_, Some(ship)) => ship.label(),
                (None, None) => "..",
            };
            let _ = write!(out, " {}", mark);
        }
        out.push('\n');
    }
    out
}
