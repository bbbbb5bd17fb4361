//! Common types: grid cells and board errors.

use core::fmt;
use core::str::FromStr;

use crate::ship::ShipId;

/// A square of the grid, addressed by zero-based row and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Cell { row, col }
    }
}

/// Rows are lettered from `A`, columns numbered from `1`: row 1, col 2 is `B3`.
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.row < 26 {
            write!(f, "{}{}", (b'A' + self.row as u8) as char, self.col + 1)
        } else {
            write!(f, "({}, {})", self.row, self.col)
        }
    }
}

impl FromStr for Cell {
    type Err = BoardError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        let mut chars = input.chars();
        let row_ch = chars
            .next()
            .filter(char::is_ascii_alphabetic)
            .ok_or(BoardError::InvalidCoordinate)?
            .to_ascii_uppercase();
        let col: usize = chars
            .as_str()
            .parse()
            .map_err(|_| BoardError::InvalidCoordinate)?;
        if col == 0 {
            return Err(BoardError::InvalidCoordinate);
        }
        Ok(Cell {
            row: (row_ch as u8 - b'A') as usize,
            col: col - 1,
        })
    }
}

/// Errors returned by board and session operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// Grid size outside the supported set.
    #[error("unsupported grid size {0}, expected 8, 10 or 12")]
    InvalidGridSize(usize),
    /// Ship id not present in the fleet catalog.
    #[error("no ship with id {0} in the fleet")]
    UnknownShip(ShipId),
    /// Attempted to place a ship that is already placed.
    #[error("ship {0} is already placed on the board")]
    ShipAlreadyPlaced(ShipId),
    /// A cell of the placement falls off the grid.
    #[error("cell ({row}, {col}) is off the board")]
    ShipOutOfBounds { row: usize, col: usize },
    /// A cell of the placement is taken by another ship.
    #[error("cell ({row}, {col}) is occupied by ship {occupant}")]
    ShipOverlaps {
        row: usize,
        col: usize,
        occupant: ShipId,
    },
    /// Random placement found no free position.
    #[error("unable to find a free position for ship {0}")]
    UnableToPlaceShip(ShipId),
    /// Setup cannot finish before the whole fleet is placed.
    #[error("only {placed} of {required} ships are placed")]
    FleetIncomplete { placed: usize, required: usize },
    /// Placement commands are only accepted during setup.
    #[error("the setup phase is over")]
    NotInSetup,
    /// Coordinate text could not be parsed.
    #[error("invalid coordinate, expected a row letter and column number such as B3")]
    InvalidCoordinate,
    /// A stored board does not satisfy the board invariants.
    #[error("invalid board snapshot: {0}")]
    InvalidSnapshot(&'static str),
}
