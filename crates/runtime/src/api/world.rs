//! Capabilities the host game exposes to the AI.
//!
//! The engine never owns world state. It reads positions and the turn phase
//! through [`WorldView`] and emits effects through the two sinks.

use game_core::{CardinalDirection, EntityId, TurnPhase, WorldPosition};

/// Continuous placement of an entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: WorldPosition,
    /// Direction of the entity's last move.
    pub facing: CardinalDirection,
}

impl Pose {
    pub fn new(position: WorldPosition, facing: CardinalDirection) -> Self {
        Self { position, facing }
    }
}

/// Read-only view of the host world.
pub trait WorldView {
    /// Current turn phase.
    fn phase(&self) -> TurnPhase;

    /// Entity every NPC is hunting.
    fn target(&self) -> EntityId;

    /// Pose of `entity`, or `None` if the world no longer knows it.
    fn pose(&self, entity: EntityId) -> Option<Pose>;

    /// Cell size in world units.
    fn scale(&self) -> f32;
}

/// Receives directional step requests.
pub trait MovementSink {
    fn move_entity(&mut self, entity: EntityId, direction: CardinalDirection);
}

/// Receives projectile spawn requests.
pub trait ProjectileSink {
    fn spawn(&mut self, origin: WorldPosition, velocity: WorldPosition);
}

/// Records movement commands in dispatch order.
impl MovementSink for Vec<(EntityId, CardinalDirection)> {
    fn move_entity(&mut self, entity: EntityId, direction: CardinalDirection) {
        self.push((entity, direction));
    }
}

/// Records projectiles in spawn order.
impl ProjectileSink for Vec<(WorldPosition, WorldPosition)> {
    fn spawn(&mut self, origin: WorldPosition, velocity: WorldPosition) {
        self.push((origin, velocity));
    }
}
