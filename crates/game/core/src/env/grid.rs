use thiserror::Error;

use super::map::{Cell, CellKind, GridOracle, MapDimensions};
use crate::state::Position;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("level text contains no rows")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown glyph {glyph:?} at row {row}, column {column}")]
    UnknownGlyph {
        glyph: char,
        row: usize,
        column: usize,
    },
}

/// Owned, row-major snapshot of a level's cell classification.
///
/// Coordinates outside the level classify as [`CellKind::Blocked`], so the
/// level boundary behaves like a wall for the movement rules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    dimensions: MapDimensions,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid where every cell has the given kind.
    pub fn filled(dimensions: MapDimensions, kind: CellKind) -> Self {
        Self {
            dimensions,
            cells: vec![Cell::new(kind); dimensions.area()],
        }
    }

    /// Copies the classification exposed by the host game.
    ///
    /// Cells the oracle does not report are treated as blocked.
    pub fn from_oracle(oracle: &dyn GridOracle) -> Self {
        let dimensions = oracle.dimensions();
        let mut grid = Self::filled(dimensions, CellKind::Blocked);
        for position in grid.positions() {
            if let Some(cell) = oracle.cell(position) {
                grid.set(position, cell);
            }
        }
        grid
    }

    /// Parses a level drawn as text, top row first.
    ///
    /// Glyphs: `.` open, `#` blocked, `H` climbable, `o` open and occupied.
    /// The first line is the northernmost row.
    pub fn from_ascii(text: &str) -> Result<Self, GridError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .collect();
        let width = rows.first().ok_or(GridError::Empty)?.chars().count();
        let height = rows.len();

        let mut grid = Self::filled(
            MapDimensions::new(width as u32, height as u32),
            CellKind::Open,
        );
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(GridError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }
            let y = (height - 1 - row) as i32;
            for (column, glyph) in line.chars().enumerate() {
                let cell = match glyph {
                    '.' => Cell::new(CellKind::Open),
                    '#' => Cell::new(CellKind::Blocked),
                    'H' => Cell::new(CellKind::Climbable),
                    'o' => Cell::occupied(CellKind::Open),
                    _ => return Err(GridError::UnknownGlyph { glyph, row, column }),
                };
                grid.set(Position::new(column as i32, y), cell);
            }
        }
        Ok(grid)
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    pub fn contains(&self, position: Position) -> bool {
        self.dimensions.contains(position)
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.y as usize * self.dimensions.width as usize + position.x as usize)
    }

    pub fn get(&self, position: Position) -> Option<Cell> {
        self.index(position).map(|index| self.cells[index])
    }

    /// Classification of `position`; outside the level is blocked.
    pub fn kind_at(&self, position: Position) -> CellKind {
        self.get(position)
            .map(|cell| cell.kind)
            .unwrap_or(CellKind::Blocked)
    }

    pub fn is_blocked(&self, position: Position) -> bool {
        self.kind_at(position) == CellKind::Blocked
    }

    pub fn is_passable(&self, position: Position) -> bool {
        self.kind_at(position).is_passable()
    }

    pub fn is_climbable(&self, position: Position) -> bool {
        self.kind_at(position) == CellKind::Climbable
    }

    pub fn is_occupied(&self, position: Position) -> bool {
        self.get(position).is_some_and(|cell| cell.occupied)
    }

    /// Overwrites a cell. Positions outside the level are ignored.
    pub fn set(&mut self, position: Position, cell: Cell) {
        if let Some(index) = self.index(position) {
            self.cells[index] = cell;
        }
    }

    pub fn set_occupied(&mut self, position: Position, occupied: bool) {
        if let Some(index) = self.index(position) {
            self.cells[index].occupied = occupied;
        }
    }

    /// All in-bounds positions in row-major order, starting at the origin.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let MapDimensions { width, height } = self.dimensions;
        (0..height as i32).flat_map(move |y| (0..width as i32).map(move |x| Position::new(x, y)))
    }
}

impl GridOracle for Grid {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn cell(&self, position: Position) -> Option<Cell> {
        self.get(position)
    }
}
