//! Board state of the setup phase: placed ships and the cells they occupy.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use rand::Rng;

use crate::common::{BoardError, Cell};
use crate::config::{GridSize, FLEET, NUM_SHIPS};
use crate::placement::check_placement;
use crate::ship::{Orientation, ShipClass, ShipId};

/// A catalog ship together with the cells it covers on the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedShip {
    class: &'static ShipClass,
    orientation: Orientation,
    cells: Vec<Cell>,
}

impl PlacedShip {
    pub fn class(&self) -> &'static ShipClass {
        self.class
    }

    pub fn id(&self) -> ShipId {
        self.class.id()
    }

    pub fn name(&self) -> &'static str {
        self.class.name()
    }

    pub fn label(&self) -> &'static str {
        self.class.label()
    }

    pub fn length(&self) -> usize {
        self.class.length()
    }

    pub fn color(&self) -> &'static str {
        self.class.color()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Covered cells, starting at the anchor.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The cell the ship was anchored at.
    pub fn anchor(&self) -> Cell {
        self.cells[0]
    }

    /// Returns `true` if every cell lies inside `grid`.
    pub fn fits(&self, grid: GridSize) -> bool {
        self.cells
            .iter()
            .all(|c| grid.contains(c.row) && grid.contains(c.col))
    }
}

/// How far the fleet setup has progressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum SetupProgress {
    Empty,
    PartiallyPlaced,
    Complete,
}

/// Placed ships keyed by id, plus a cell index for occupancy lookups.
///
/// No two ships share a cell and every ship appears at most once. The grid
/// size is not stored: callers pass the current size to each placement.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BoardState {
    ships: BTreeMap<ShipId, PlacedShip>,
    occupancy: BTreeMap<Cell, ShipId>,
}

impl BoardState {
    /// Create an empty board (no ships placed).
    pub fn new() -> Self {
        Self::default()
    }

    /// Ship covering `cell`, if any.
    pub fn occupant_at(&self, cell: Cell) -> Option<&PlacedShip> {
        self.occupancy.get(&cell).and_then(|id| self.ships.get(id))
    }

    pub fn get(&self, id: ShipId) -> Option<&PlacedShip> {
        self.ships.get(&id)
    }

    pub fn contains(&self, id: ShipId) -> bool {
        self.ships.contains_key(&id)
    }

    /// Placed ships in id order.
    pub fn ships(&self) -> impl Iterator<Item = &PlacedShip> {
        self.ships.values()
    }

    /// Number of placed ships.
    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    /// Place ship `id` at `anchor`.
    ///
    /// Fails without touching the board if the ship is unknown, already on the
    /// board, runs off the grid, or overlaps another ship.
    pub fn place(
        &mut self,
        id: ShipId,
        anchor: Cell,
        orientation: Orientation,
        grid: GridSize,
    ) -> Result<&PlacedShip, BoardError> {
        let class = ShipClass::by_id(id).ok_or(BoardError::UnknownShip(id))?;
        if self.contains(id) {
            return Err(BoardError::ShipAlreadyPlaced(id));
        }
        let cells = check_placement(self, class, anchor, orientation, grid)?;
        for &cell in &cells {
            self.occupancy.insert(cell, id);
        }
        log::debug!("placed {} at {} ({:?})", class.name(), anchor, orientation);
        let ship = self.ships.entry(id).or_insert(PlacedShip {
            class,
            orientation,
            cells,
        });
        Ok(&*ship)
    }

    /// Remove the ship covering `cell`. Empty cells are a no-op.
    pub fn remove(&mut self, cell: Cell) -> Option<PlacedShip> {
        let id = *self.occupancy.get(&cell)?;
        self.remove_ship(id)
    }

    /// Remove ship `id` if it is placed.
    pub fn remove_ship(&mut self, id: ShipId) -> Option<PlacedShip> {
        let ship = self.ships.remove(&id)?;
        for cell in &ship.cells {
            self.occupancy.remove(cell);
        }
        log::debug!("removed {} from {}", ship.name(), ship.anchor());
        Some(ship)
    }

    /// Remove every ship.
    pub fn clear(&mut self) {
        self.ships.clear();
        self.occupancy.clear();
    }

    /// Returns `true` when the whole fleet is on the board.
    pub fn is_complete(&self) -> bool {
        self.ships.len() == NUM_SHIPS
            && FLEET.iter().all(|class| {
                self.ships
                    .get(&class.id())
                    .is_some_and(|s| s.cells.len() == class.length())
            })
    }

    pub fn progress(&self) -> SetupProgress {
        if self.is_empty() {
            SetupProgress::Empty
        } else if self.is_complete() {
            SetupProgress::Complete
        } else {
            SetupProgress::PartiallyPlaced
        }
    }

    /// Catalog ships that still have to be placed, in catalog order.
    pub fn available_ships(&self) -> impl Iterator<Item = &'static ShipClass> + '_ {
        FLEET.iter().filter(move |class| !self.contains(class.id()))
    }

    /// Evict every ship that does not fit into `grid` and return them.
    pub fn retain_within(&mut self, grid: GridSize) -> Vec<PlacedShip> {
        let outside: Vec<ShipId> = self
            .ships
            .values()
            .filter(|s| !s.fits(grid))
            .map(PlacedShip::id)
            .collect();
        let evicted: Vec<PlacedShip> = outside
            .into_iter()
            .filter_map(|id| self.remove_ship(id))
            .collect();
        if !evicted.is_empty() {
            log::debug!("evicted {} ship(s) outside the {} grid", evicted.len(), grid);
        }
        evicted
    }

    /// Returns a random legal `(anchor, orientation)` for the unplaced ship `id`.
    pub fn random_placement<R: Rng>(
        &self,
        rng: &mut R,
        id: ShipId,
        grid: GridSize,
    ) -> Result<(Cell, Orientation), BoardError> {
        let class = ShipClass::by_id(id).ok_or(BoardError::UnknownShip(id))?;
        if self.contains(id) {
            return Err(BoardError::ShipAlreadyPlaced(id));
        }
        let size = grid.get();
        if class.length() > size {
            return Err(BoardError::UnableToPlaceShip(id));
        }
        let mut attempts = 0;
        while attempts < 100 {
            attempts += 1;
            let orient = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let max_r = if orient == Orientation::Vertical {
                size - class.length()
            } else {
                size - 1
            };
            let max_c = if orient == Orientation::Horizontal {
                size - class.length()
            } else {
                size - 1
            };
            let anchor = Cell::new(rng.random_range(0..=max_r), rng.random_range(0..=max_c));
            if check_placement(self, class, anchor, orient, grid).is_ok() {
                return Ok((anchor, orient));
            }
        }
        Err(BoardError::UnableToPlaceShip(id))
    }

    /// Randomly place every ship that is not on the board yet. Returns how
    /// many ships were placed. On error the board is left as it was.
    pub fn place_remaining_randomly<R: Rng>(
        &mut self,
        rng: &mut R,
        grid: GridSize,
    ) -> Result<usize, BoardError> {
        let pending: Vec<ShipId> = self.available_ships().map(ShipClass::id).collect();
        let mut filled = self.clone();
        for &id in &pending {
            let (anchor, orient) = filled.random_placement(rng, id, grid)?;
            filled.place(id, anchor, orient, grid)?;
        }
        *self = filled;
        Ok(pending.len())
    }

    /// Serializable copy of the board for the given grid.
    pub fn snapshot(&self, grid: GridSize) -> BoardSnapshot {
        BoardSnapshot {
            grid_size: grid,
            ships: self
                .ships
                .values()
                .map(|s| ShipRecord {
                    id: s.id(),
                    orientation: s.orientation,
                    cells: s.cells.clone(),
                })
                .collect(),
        }
    }
}

/// One placed ship as stored in a [`BoardSnapshot`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipRecord {
    pub id: ShipId,
    pub orientation: Orientation,
    pub cells: Vec<Cell>,
}

/// Serializable board state for saving or restoring a setup.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardSnapshot {
    pub grid_size: GridSize,
    pub ships: Vec<ShipRecord>,
}

impl TryFrom<BoardSnapshot> for BoardState {
    type Error = BoardError;

    /// Rebuild a board, re-checking every placement against the snapshot's grid.
    fn try_from(snapshot: BoardSnapshot) -> Result<Self, Self::Error> {
        let mut board = BoardState::new();
        for record in snapshot.ships {
            let anchor = *record
                .cells
                .first()
                .ok_or(BoardError::InvalidSnapshot("ship without cells"))?;
            let placed = board.place(record.id, anchor, record.orientation, snapshot.grid_size)?;
            if placed.cells != record.cells {
                return Err(BoardError::InvalidSnapshot(
                    "cells do not match the ship's length and orientation",
                ));
            }
        }
        Ok(board)
    }
}
