//! Movement ruleset for crawling walkers.
//!
//! Walkers cling to walls and vines. From a cell they may:
//!
//! | Rule | Gate | Move |
//! |---|---|---|
//! | vine entry | `c+d` climbable | `c+d`, any direction `d` |
//! | vine climb | `c` climbable | `c+N`, `c+S` |
//! | vine step-off | `c` climbable, landing has a blocked cell above or below | `c+E`, `c+W` |
//! | face step | `c+w` blocked, `c+p` passable, `c+p+w` blocked | `c+p` |
//! | corner hug | `c+w` blocked, `c+p` passable, `c+p+w` passable | `c+p`, then `c+p+w` |
//!
//! The last two rows apply for every wall orientation `w` in [`WALL_ORDER`]
//! and both perpendicular directions `p`, giving sixteen wall-relative
//! candidates. Cells outside the level count as blocked.

use arrayvec::ArrayVec;

use crate::env::Grid;
use crate::state::{CardinalDirection, Position};

/// Upper bound on candidates for one cell: 4 + 2 + 2 vine rules and 16 wall rules.
pub const MAX_CANDIDATES: usize = 24;

/// Orientation order in which wall-relative candidates are generated.
pub const WALL_ORDER: [CardinalDirection; 4] = [
    CardinalDirection::North,
    CardinalDirection::East,
    CardinalDirection::West,
    CardinalDirection::South,
];

/// Candidate moves from one cell, in generation order.
pub type Moves = ArrayVec<Step, MAX_CANDIDATES>;

/// One candidate extension of a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Step {
    /// Move to an orthogonal neighbour.
    Single(Position),
    /// Swing around an outer wall corner through `via`.
    Hug { via: Position, to: Position },
}

impl Step {
    /// Cell the step ends on.
    pub fn target(self) -> Position {
        match self {
            Step::Single(to) | Step::Hug { to, .. } => to,
        }
    }

    /// Cells appended to a path when taking this step.
    pub fn cells(self) -> ArrayVec<Position, 2> {
        let mut cells = ArrayVec::new();
        match self {
            Step::Single(to) => cells.push(to),
            Step::Hug { via, to } => {
                cells.push(via);
                cells.push(to);
            }
        }
        cells
    }
}

/// Whether `position` belongs in the move graph: a passable cell that is
/// either climbable or touches a blocked cell orthogonally.
pub fn is_anchor(grid: &Grid, position: Position) -> bool {
    if !grid.contains(position) || !grid.is_passable(position) {
        return false;
    }
    grid.is_climbable(position)
        || CardinalDirection::ALL
            .iter()
            .any(|&direction| grid.is_blocked(position.step(direction)))
}

/// All candidate moves out of `from`, before visited filtering.
///
/// Candidates may repeat when several rules allow the same move; the search
/// only takes the first.
pub fn candidates(grid: &Grid, from: Position) -> Moves {
    let mut moves = Moves::new();
    let enterable = |position: Position| grid.contains(position) && grid.is_passable(position);

    for direction in CardinalDirection::ALL {
        let next = from.step(direction);
        if grid.is_climbable(next) {
            moves.push(Step::Single(next));
        }
    }

    if grid.is_climbable(from) {
        for direction in [CardinalDirection::North, CardinalDirection::South] {
            let next = from.step(direction);
            if enterable(next) {
                moves.push(Step::Single(next));
            }
        }
        for direction in [CardinalDirection::East, CardinalDirection::West] {
            let next = from.step(direction);
            let ledge = grid.is_blocked(next.step(CardinalDirection::North))
                || grid.is_blocked(next.step(CardinalDirection::South));
            if enterable(next) && ledge {
                moves.push(Step::Single(next));
            }
        }
    }

    for wall in WALL_ORDER {
        if !grid.is_blocked(from.step(wall)) {
            continue;
        }
        let sides = wall.perpendicular();

        for side in sides {
            let along = from.step(side);
            if enterable(along) && grid.is_blocked(along.step(wall)) {
                moves.push(Step::Single(along));
            }
        }
        for side in sides {
            let via = from.step(side);
            let around = via.step(wall);
            if enterable(via) && enterable(around) {
                moves.push(Step::Hug { via, to: around });
            }
        }
    }

    moves
}
