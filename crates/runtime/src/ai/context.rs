//! Blackboard handed to every node during one entity's tick.
//!
//! The [`AiContext`] bundles what a leaf may read (world view, navigator,
//! config) and the only ways it may act (movement and projectile sinks). It
//! also carries the per-phase [`TickState`] so the single-mover rule is
//! enforced without process-wide state.

use behavior_tree::Chance;
use game_core::{CardinalDirection, EntityId, Navigator, Position, TurnPhase, WorldPosition};
use rand::Rng;
use rand::rngs::StdRng;

use crate::api::{MovementSink, Pose, ProjectileSink, WorldView};
use crate::config::AiConfig;

/// Bookkeeping shared by all entities ticked in one enemy phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickState {
    /// First entity that dispatched a movement command this phase.
    pub moved: Option<EntityId>,
}

impl TickState {
    pub fn has_moved(&self) -> bool {
        self.moved.is_some()
    }
}

/// Context for one entity's tree evaluation.
///
/// # Lifetime
///
/// Built by the engine for a single entity and dropped before the next one is
/// ticked. The `'a` lifetime ties every borrow to that tick.
pub struct AiContext<'a> {
    /// The entity whose tree is being ticked.
    pub entity: EntityId,

    pub world: &'a dyn WorldView,

    /// Level classification and move graph for `SeekTarget`.
    pub navigator: &'a Navigator,

    pub config: &'a AiConfig,

    /// Shared across every entity ticked this phase.
    pub tick: &'a mut TickState,

    movement: &'a mut dyn MovementSink,
    projectiles: &'a mut dyn ProjectileSink,
    rng: &'a mut StdRng,
}

impl<'a> AiContext<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        entity: EntityId,
        world: &'a dyn WorldView,
        navigator: &'a Navigator,
        config: &'a AiConfig,
        tick: &'a mut TickState,
        movement: &'a mut dyn MovementSink,
        projectiles: &'a mut dyn ProjectileSink,
        rng: &'a mut StdRng,
    ) -> Self {
        Self {
            entity,
            world,
            navigator,
            config,
            tick,
            movement,
            projectiles,
            rng,
        }
    }

    /// Pose of the entity being ticked.
    pub fn own_pose(&self) -> Option<Pose> {
        let pose = self.world.pose(self.entity);
        if pose.is_none() {
            tracing::warn!("NPC {} is missing from the world", self.entity);
        }
        pose
    }

    /// Pose of the hunted entity.
    pub fn target_pose(&self) -> Option<Pose> {
        let target = self.world.target();
        let pose = self.world.pose(target);
        if pose.is_none() {
            tracing::warn!("NPC {} has no target: {} is missing", self.entity, target);
        }
        pose
    }

    /// Grid cell containing a world point at the current scale.
    pub fn cell_of(&self, position: WorldPosition) -> Position {
        position.to_grid(self.world.scale())
    }

    /// Dispatches a step for this entity if the phase allows one.
    ///
    /// Only the first entity to move in an enemy phase gets through; later
    /// calls are dropped. Returns whether the command was sent.
    pub fn dispatch_move(&mut self, direction: CardinalDirection) -> bool {
        if self.world.phase() != TurnPhase::Enemy {
            return false;
        }
        if let Some(mover) = self.tick.moved {
            tracing::debug!("NPC {} holds: {} already moved this phase", self.entity, mover);
            return false;
        }

        self.movement.move_entity(self.entity, direction);
        self.tick.moved = Some(self.entity);
        tracing::debug!("NPC {} moves {}", self.entity, direction);
        true
    }

    pub fn spawn_projectile(&mut self, origin: WorldPosition, velocity: WorldPosition) {
        self.projectiles.spawn(origin, velocity);
        tracing::debug!(
            "NPC {} fires with velocity ({:.2}, {:.2})",
            self.entity,
            velocity.x,
            velocity.y
        );
    }
}

impl Chance for AiContext<'_> {
    fn roll_d100(&mut self) -> u32 {
        self.rng.gen_range(1..=100)
    }
}
