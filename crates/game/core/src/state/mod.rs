//! Value types describing entities and coordinates.
mod common;

pub use common::{CardinalDirection, EntityId, Position, TurnPhase, WorldPosition};
