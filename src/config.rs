use core::fmt;

use crate::common::BoardError;
use crate::ship::ShipClass;

pub const NUM_SHIPS: usize = 5;
pub const FLEET: [ShipClass; NUM_SHIPS] = [
    ShipClass::new(1, "Carrier", "CA", 5, "#e63946"),
    ShipClass::new(2, "Battleship", "BS", 4, "#ff6b35"),
    ShipClass::new(3, "Cruiser", "CR", 3, "#ffb703"),
    ShipClass::new(4, "Submarine", "SM", 3, "#00ff41"),
    ShipClass::new(5, "Destroyer", "DE", 2, "#005275ff"),
];

/// Total number of ship segments in the standard fleet.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 3 + 2;

/// Grid sizes offered in the settings.
pub const GRID_SIZES: [usize; 3] = [8, 10, 12];
pub const DEFAULT_GRID_SIZE: GridSize = GridSize(10);

/// Side length of the square placement grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(try_from = "usize", into = "usize"))]
pub struct GridSize(usize);

impl GridSize {
    pub const SMALL: GridSize = GridSize(8);
    pub const STANDARD: GridSize = GridSize(10);
    pub const LARGE: GridSize = GridSize(12);

    pub fn get(self) -> usize {
        self.0
    }

    /// Returns `true` if `index` is a valid row or column.
    pub fn contains(self, index: usize) -> bool {
        index < self.0
    }
}

impl Default for GridSize {
    fn default() -> Self {
        DEFAULT_GRID_SIZE
    }
}

impl TryFrom<usize> for GridSize {
    type Error = BoardError;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        if GRID_SIZES.contains(&size) {
            Ok(GridSize(size))
        } else {
            Err(BoardError::InvalidGridSize(size))
        }
    }
}

impl From<GridSize> for usize {
    fn from(size: GridSize) -> Self {
        size.0
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}", self.0, self.0)
    }
}
