//! Commonly used types and utilities for ease of import.

pub use crate::{
    can_place, cells_for_placement, BoardError, BoardState, Cell, GridSize, GridSizeSource,
    InputEvent, Orientation, Outcome, PlacementSession, ShipClass, ShipId, FLEET,
};

#[cfg(feature = "std")]
pub use crate::preferences::{FileStore, MemoryStore, PreferenceStore, Preferences};
#[cfg(feature = "std")]
pub use crate::render::render_board;
