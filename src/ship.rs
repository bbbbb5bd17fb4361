//! Ship classes of the fleet and their orientation on the board.

use core::fmt;

use crate::config::FLEET;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum Orientation {
    /// Extends along columns, to the right of the anchor.
    #[default]
    Horizontal,
    /// Extends along rows, below the anchor.
    Vertical,
}

impl Orientation {
    /// The other orientation.
    pub fn toggled(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    /// Arrow shown on the rotate control.
    pub fn arrow(self) -> char {
        match self {
            Orientation::Horizontal => '→',
            Orientation::Vertical => '↓',
        }
    }
}

/// Identifier of a ship class in the fleet catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(transparent))]
pub struct ShipId(pub u8);

impl ShipId {
    /// Catalog entry for this id, if any.
    pub fn class(self) -> Option<&'static ShipClass> {
        ShipClass::by_id(self)
    }
}

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Immutable catalog entry: one kind of ship the player has to place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipClass {
    id: ShipId,
    name: &'static str,
    label: &'static str,
    length: usize,
    color: &'static str,
}

impl ShipClass {
    /// Create a new ship class.
    pub const fn new(
        id: u8,
        name: &'static str,
        label: &'static str,
        length: usize,
        color: &'static str,
    ) -> Self {
        Self {
            id: ShipId(id),
            name,
            label,
            length,
            color,
        }
    }

    /// Look up a catalog entry by id.
    pub fn by_id(id: ShipId) -> Option<&'static ShipClass> {
        FLEET.iter().find(|s| s.id == id)
    }

    /// Look up a catalog entry by name, ignoring ASCII case.
    pub fn by_name(name: &str) -> Option<&'static ShipClass> {
        FLEET.iter().find(|s| s.name.eq_ignore_ascii_case(name))
    }

    pub fn id(&self) -> ShipId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Two-letter label drawn on each segment.
    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Display color as a CSS hex string.
    pub fn color(&self) -> &'static str {
        self.color
    }
}

impl fmt::Display for ShipClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.length)
    }
}
