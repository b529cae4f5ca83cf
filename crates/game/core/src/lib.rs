//! Grid model and pathfinding shared by the AI runtime and tools.
//!
//! `game-core` defines the level classification (open, blocked, climbable
//! cells), the movement ruleset derived from it, and the frontier search that
//! NPC behavior trees use to chase their target. It performs no I/O and holds
//! no global state; a level is loaded by building a [`Navigator`].
pub mod env;
pub mod nav;
pub mod state;

pub use env::{Cell, CellKind, Grid, GridError, GridOracle, MapDimensions};
pub use nav::{MoveGraph, Navigator, Path, SearchError, SearchMode, Step, search};
pub use state::{CardinalDirection, EntityId, Position, TurnPhase, WorldPosition};
