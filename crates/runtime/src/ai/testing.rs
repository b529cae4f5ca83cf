//! Fixtures for node unit tests.

use std::collections::HashMap;

use game_core::{
    CardinalDirection, CellKind, EntityId, Grid, MapDimensions, Navigator, Position, TurnPhase,
    WorldPosition,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::ai::{AiContext, TickState};
use crate::api::{Pose, WorldView};
use crate::config::AiConfig;

/// World with unit-sized cells, hunting the player, in the enemy phase.
pub(crate) struct StubWorld {
    pub phase: TurnPhase,
    pub poses: HashMap<EntityId, Pose>,
}

impl StubWorld {
    /// Puts `entity` at the centre of cell `(x, y)`, facing east unless
    /// it was already placed.
    pub fn place(&mut self, entity: EntityId, x: i32, y: i32) {
        let position = WorldPosition::from_grid(Position::new(x, y), 1.0);
        let facing = self
            .poses
            .get(&entity)
            .map_or(CardinalDirection::East, |pose| pose.facing);
        self.poses.insert(entity, Pose::new(position, facing));
    }

    pub fn face(&mut self, entity: EntityId, facing: CardinalDirection) {
        if let Some(pose) = self.poses.get_mut(&entity) {
            pose.facing = facing;
        }
    }
}

impl WorldView for StubWorld {
    fn phase(&self) -> TurnPhase {
        self.phase
    }

    fn target(&self) -> EntityId {
        EntityId::PLAYER
    }

    fn pose(&self, entity: EntityId) -> Option<Pose> {
        self.poses.get(&entity).copied()
    }

    fn scale(&self) -> f32 {
        1.0
    }
}

pub(crate) struct Harness {
    pub world: StubWorld,
    pub navigator: Navigator,
    pub config: AiConfig,
    pub tick: TickState,
    pub moves: Vec<(EntityId, CardinalDirection)>,
    pub shots: Vec<(WorldPosition, WorldPosition)>,
    pub rng: StdRng,
}

impl Harness {
    pub fn open(width: u32, height: u32) -> Self {
        Self::with_grid(Grid::filled(
            MapDimensions::new(width, height),
            CellKind::Open,
        ))
    }

    pub fn level(text: &str) -> Self {
        Self::with_grid(Grid::from_ascii(text).expect("test level parses"))
    }

    fn with_grid(grid: Grid) -> Self {
        Self {
            world: StubWorld {
                phase: TurnPhase::Enemy,
                poses: HashMap::new(),
            },
            navigator: Navigator::new(grid),
            config: AiConfig::default(),
            tick: TickState::default(),
            moves: Vec::new(),
            shots: Vec::new(),
            rng: StdRng::seed_from_u64(0),
        }
    }

    /// Runs `f` with a context for `entity`, sharing this harness' tick state.
    pub fn run<R>(&mut self, entity: EntityId, f: impl FnOnce(&mut AiContext<'_>) -> R) -> R {
        let mut ctx = AiContext::new(
            entity,
            &self.world,
            &self.navigator,
            &self.config,
            &mut self.tick,
            &mut self.moves,
            &mut self.shots,
            &mut self.rng,
        );
        f(&mut ctx)
    }
}
