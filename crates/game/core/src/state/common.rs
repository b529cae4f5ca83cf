use std::fmt;

/// Unique identifier for any entity tracked by the host game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    /// Reserved identifier for the controllable player character.
    pub const PLAYER: Self = Self(0);

    /// Returns true if this entity represents the player.
    #[inline]
    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete grid position expressed in tile coordinates.
///
/// `y` grows towards [`CardinalDirection::North`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step in `direction`.
    #[inline]
    pub fn step(self, direction: CardinalDirection) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Manhattan distance to `other`.
    #[inline]
    pub fn manhattan(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Box test with independent X and Y bounds (not Euclidean).
    #[inline]
    pub fn within_box(self, other: Position, radius: u32) -> bool {
        self.x.abs_diff(other.x) <= radius && self.y.abs_diff(other.y) <= radius
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Continuous position in world units.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldPosition {
    pub x: f32,
    pub y: f32,
}

impl WorldPosition {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Grid cell containing this point for cells of size `scale`.
    pub fn to_grid(self, scale: f32) -> Position {
        Position::new((self.x / scale).floor() as i32, (self.y / scale).floor() as i32)
    }

    /// Center of `cell` for cells of size `scale`.
    pub fn from_grid(cell: Position, scale: f32) -> Self {
        Self::new(
            (cell.x as f32 + 0.5) * scale,
            (cell.y as f32 + 0.5) * scale,
        )
    }

    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Vector from `self` to `other`.
    pub fn offset_to(self, other: WorldPosition) -> WorldPosition {
        WorldPosition::new(other.x - self.x, other.y - self.y)
    }

    /// Unit vector in the same direction, or `None` for the zero vector.
    pub fn normalized(self) -> Option<WorldPosition> {
        let length = self.length();
        if length > 0.0 {
            Some(WorldPosition::new(self.x / length, self.y / length))
        } else {
            None
        }
    }

    pub fn scaled(self, factor: f32) -> WorldPosition {
        WorldPosition::new(self.x * factor, self.y * factor)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardinalDirection {
    North,
    South,
    East,
    West,
}

impl CardinalDirection {
    pub const ALL: [CardinalDirection; 4] = [
        CardinalDirection::North,
        CardinalDirection::South,
        CardinalDirection::East,
        CardinalDirection::West,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            CardinalDirection::North => (0, 1),
            CardinalDirection::South => (0, -1),
            CardinalDirection::East => (1, 0),
            CardinalDirection::West => (-1, 0),
        }
    }

    /// Direction of a unit step, or `None` for any other offset.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (0, 1) => Some(CardinalDirection::North),
            (0, -1) => Some(CardinalDirection::South),
            (1, 0) => Some(CardinalDirection::East),
            (-1, 0) => Some(CardinalDirection::West),
            _ => None,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            CardinalDirection::North => CardinalDirection::South,
            CardinalDirection::South => CardinalDirection::North,
            CardinalDirection::East => CardinalDirection::West,
            CardinalDirection::West => CardinalDirection::East,
        }
    }

    /// The two directions at right angles to this one.
    pub fn perpendicular(self) -> [CardinalDirection; 2] {
        match self {
            CardinalDirection::North | CardinalDirection::South => {
                [CardinalDirection::East, CardinalDirection::West]
            }
            CardinalDirection::East | CardinalDirection::West => {
                [CardinalDirection::North, CardinalDirection::South]
            }
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, CardinalDirection::North | CardinalDirection::South)
    }

    /// Single step from `from` towards `to`, preferring the vertical axis.
    ///
    /// Returns `None` when the two positions are equal.
    pub fn toward(from: Position, to: Position) -> Option<Self> {
        let dy = to.y - from.y;
        let dx = to.x - from.x;
        if dy > 0 {
            Some(CardinalDirection::North)
        } else if dy < 0 {
            Some(CardinalDirection::South)
        } else if dx > 0 {
            Some(CardinalDirection::East)
        } else if dx < 0 {
            Some(CardinalDirection::West)
        } else {
            None
        }
    }
}

impl fmt::Display for CardinalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CardinalDirection::North => "north",
            CardinalDirection::South => "south",
            CardinalDirection::East => "east",
            CardinalDirection::West => "west",
        };
        write!(f, "{}", label)
    }
}

/// Whose turn it is. AI trees only act during [`TurnPhase::Enemy`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnPhase {
    #[default]
    Player,
    Enemy,
}

impl TurnPhase {
    pub fn next(self) -> Self {
        match self {
            TurnPhase::Player => TurnPhase::Enemy,
            TurnPhase::Enemy => TurnPhase::Player,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_to_grid_floors_negative_coordinates() {
        assert_eq!(WorldPosition::new(33.0, 95.9).to_grid(32.0), Position::new(1, 2));
        assert_eq!(WorldPosition::new(-0.5, 0.0).to_grid(32.0), Position::new(-1, 0));
    }

    #[test]
    fn toward_prefers_vertical_axis() {
        let from = Position::new(0, 0);
        assert_eq!(
            CardinalDirection::toward(from, Position::new(3, -1)),
            Some(CardinalDirection::South)
        );
        assert_eq!(
            CardinalDirection::toward(from, Position::new(-2, 0)),
            Some(CardinalDirection::West)
        );
        assert_eq!(CardinalDirection::toward(from, from), None);
    }

    #[test]
    fn from_delta_inverts_delta() {
        for direction in CardinalDirection::ALL {
            let (dx, dy) = direction.delta();
            assert_eq!(CardinalDirection::from_delta(dx, dy), Some(direction));
        }
        assert_eq!(CardinalDirection::from_delta(1, 1), None);
    }

    #[test]
    fn box_distance_checks_axes_independently() {
        let origin = Position::ORIGIN;
        assert!(origin.within_box(Position::new(7, 7), 7));
        assert!(!origin.within_box(Position::new(8, 0), 7));
    }

    #[test]
    fn zero_vector_has_no_direction() {
        assert_eq!(WorldPosition::default().normalized(), None);
        let unit = WorldPosition::new(3.0, 4.0).normalized().unwrap();
        assert!((unit.length() - 1.0).abs() < 1e-6);
    }
}
