use crate::state::Position;

/// Tile query exposing the static layout of the loaded level.
pub trait GridOracle {
    fn dimensions(&self) -> MapDimensions;

    /// Returns `None` for coordinates outside the level.
    fn cell(&self, position: Position) -> Option<Cell>;

    fn contains(&self, position: Position) -> bool {
        self.dimensions().contains(position)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Movement class of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    #[default]
    Open,
    /// Wall. Never entered; walkers cling to its faces.
    Blocked,
    /// Vine. Reachable from any side and climbable vertically.
    Climbable,
}

impl CellKind {
    pub fn is_passable(self) -> bool {
        !matches!(self, CellKind::Blocked)
    }
}

/// Classification plus occupancy of a single tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub kind: CellKind,
    pub occupied: bool,
}

impl Cell {
    pub const fn new(kind: CellKind) -> Self {
        Self {
            kind,
            occupied: false,
        }
    }

    pub const fn occupied(kind: CellKind) -> Self {
        Self {
            kind,
            occupied: true,
        }
    }
}
