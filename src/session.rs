//! Input adapter for the setup screen.
//!
//! Click-to-select/click-to-place and drag-and-drop both end up in the same
//! [`BoardState::place`] call. Right-click or double-click removes a ship.

use alloc::vec::Vec;
use rand::Rng;

use crate::board::{BoardState, PlacedShip};
use crate::common::{BoardError, Cell};
use crate::config::{GridSize, NUM_SHIPS};
use crate::placement::{self, Preview};
use crate::ship::{Orientation, ShipClass, ShipId};

/// Supplies the grid size currently chosen in the settings.
///
/// The session asks for the latest value before every event, so a size
/// change made elsewhere takes effect on the next interaction.
pub trait GridSizeSource {
    fn latest(&mut self) -> GridSize;
}

impl GridSizeSource for GridSize {
    fn latest(&mut self) -> GridSize {
        *self
    }
}

/// Phase of the game screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Setup,
    /// Placeholder; the battle itself is not implemented.
    InProgress,
}

/// Pointer and keyboard input on the setup screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Ship picked from the fleet panel.
    Select(ShipId),
    /// Native drag of a fleet panel entry started.
    DragStart(ShipId),
    Rotate,
    Click(Cell),
    DragOver(Cell),
    Drop(Cell),
    RightClick(Cell),
    DoubleClick(Cell),
    Reset,
    FinishSetup,
}

/// What an event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Selected(ShipId),
    Rotated(Orientation),
    Placed { id: ShipId, cells: Vec<Cell> },
    Removed(ShipId),
    Preview(Preview),
    Cleared,
    SetupFinished,
    /// Nothing to act on, e.g. a click with no ship selected.
    Ignored,
    Rejected(BoardError),
}

/// Selection state and board of one setup screen.
pub struct PlacementSession<S: GridSizeSource> {
    board: BoardState,
    selected: Option<ShipId>,
    orientation: Orientation,
    phase: Phase,
    grid: GridSize,
    grid_source: S,
    evicted: Vec<PlacedShip>,
}

impl<S: GridSizeSource> PlacementSession<S> {
    /// Start a setup with an empty board.
    pub fn new(mut grid_source: S) -> Self {
        let grid = grid_source.latest();
        Self::with_board(BoardState::new(), grid, grid_source)
    }

    /// Resume a setup from an existing board laid out on `grid`.
    pub fn with_board(board: BoardState, grid: GridSize, grid_source: S) -> Self {
        let mut session = Self {
            board,
            selected: None,
            orientation: Orientation::default(),
            phase: Phase::Setup,
            grid,
            grid_source,
            evicted: Vec::new(),
        };
        session.refresh_grid();
        session
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn selected(&self) -> Option<&'static ShipClass> {
        self.selected.and_then(ShipClass::by_id)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Grid size the board was last validated against.
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    /// Ships dropped because they no longer fit after a grid size change.
    /// Draining clears the list.
    pub fn take_evicted(&mut self) -> Vec<PlacedShip> {
        core::mem::take(&mut self.evicted)
    }

    /// Handle a single input event.
    pub fn handle(&mut self, event: InputEvent) -> Outcome {
        if self.phase != Phase::Setup {
            return Outcome::Rejected(BoardError::NotInSetup);
        }
        self.refresh_grid();
        match event {
            InputEvent::Select(id) | InputEvent::DragStart(id) => self.select(id),
            InputEvent::Rotate => {
                self.orientation = self.orientation.toggled();
                Outcome::Rotated(self.orientation)
            }
            InputEvent::Click(cell) | InputEvent::Drop(cell) => self.place_selected(cell),
            InputEvent::DragOver(cell) => match self.selected() {
                Some(class) => Outcome::Preview(placement::preview(
                    &self.board,
                    class,
                    cell,
                    self.orientation,
                    self.grid,
                )),
                None => Outcome::Ignored,
            },
            InputEvent::RightClick(cell) | InputEvent::DoubleClick(cell) => {
                match self.board.remove(cell) {
                    Some(ship) => Outcome::Removed(ship.id()),
                    None => Outcome::Ignored,
                }
            }
            InputEvent::Reset => {
                self.board.clear();
                self.selected = None;
                Outcome::Cleared
            }
            InputEvent::FinishSetup => self.finish(),
        }
    }

    /// Quick setup: place every remaining ship at random.
    pub fn place_remaining_randomly<R: Rng>(&mut self, rng: &mut R) -> Result<usize, BoardError> {
        if self.phase != Phase::Setup {
            return Err(BoardError::NotInSetup);
        }
        self.refresh_grid();
        let placed = self.board.place_remaining_randomly(rng, self.grid)?;
        self.selected = None;
        Ok(placed)
    }

    fn select(&mut self, id: ShipId) -> Outcome {
        if ShipClass::by_id(id).is_none() {
            return Outcome::Rejected(BoardError::UnknownShip(id));
        }
        if self.board.contains(id) {
            return Outcome::Rejected(BoardError::ShipAlreadyPlaced(id));
        }
        self.selected = Some(id);
        Outcome::Selected(id)
    }

    fn place_selected(&mut self, cell: Cell) -> Outcome {
        let Some(id) = self.selected else {
            return Outcome::Ignored;
        };
        match self.board.place(id, cell, self.orientation, self.grid) {
            Ok(ship) => {
                let cells = ship.cells().to_vec();
                self.selected = None;
                Outcome::Placed { id, cells }
            }
            Err(err) => Outcome::Rejected(err),
        }
    }

    fn finish(&mut self) -> Outcome {
        if !self.board.is_complete() {
            return Outcome::Rejected(BoardError::FleetIncomplete {
                placed: self.board.len(),
                required: NUM_SHIPS,
            });
        }
        log::info!("fleet setup finished on a {} grid", self.grid);
        self.phase = Phase::InProgress;
        self.selected = None;
        Outcome::SetupFinished
    }

    /// Pick up the latest grid size now instead of on the next event.
    /// Ships that no longer fit are evicted; see [`Self::take_evicted`].
    /// Once setup has finished the grid is frozen with the fleet on it.
    pub fn refresh_grid(&mut self) -> GridSize {
        if self.phase != Phase::Setup {
            return self.grid;
        }
        let latest = self.grid_source.latest();
        let evicted = self.board.retain_within(latest);
        if latest != self.grid {
            log::info!("grid size changed from {} to {}", self.grid, latest);
            self.grid = latest;
        }
        if !evicted.is_empty() {
            log::warn!("{} ship(s) no longer fit the {} grid", evicted.len(), latest);
            self.evicted.extend(evicted);
        }
        self.grid
    }
}
