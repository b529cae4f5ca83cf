//! Per-entity tree driver.
//!
//! [`AiEngine`] owns one tree per NPC and ticks them in registration order
//! during the enemy phase. Each tick builds a fresh [`AiContext`] per entity
//! around a shared [`TickState`], so only the first entity to step actually
//! moves while all trees still advance.

use behavior_tree::{Behavior, Status};
use game_core::{EntityId, Grid, Navigator, Position, TurnPhase};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::snapshot::TreeRecord;
use super::{AiContext, BehaviorTree, TickState, presets};
use crate::api::{MovementSink, ProjectileSink, Result, RuntimeError, WorldView};
use crate::config::AiConfig;
use crate::repository::TreeRepository;

/// Outcome of one engine tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Root outcome per entity, in registration order. Empty when the tick
    /// was skipped because it was not the enemy phase.
    pub outcomes: Vec<(EntityId, Status)>,
    /// Entity whose movement command went through, if any.
    pub mover: Option<EntityId>,
}

impl TickReport {
    pub fn skipped(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Tree handle for one NPC.
#[derive(Clone, Debug)]
struct Agent {
    entity: EntityId,
    tree: BehaviorTree,
    /// False until the root has been armed with `init`.
    initialized: bool,
}

pub struct AiEngine {
    config: AiConfig,
    navigator: Navigator,
    rng: StdRng,
    agents: Vec<Agent>,
}

impl AiEngine {
    pub fn new(config: AiConfig, navigator: Navigator) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            config,
            navigator,
            rng,
            agents: Vec::new(),
        }
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Replaces the level and rebuilds its move graph. Trees are kept.
    pub fn load_level(&mut self, grid: Grid) {
        let dimensions = grid.dimensions();
        self.navigator = Navigator::new(grid);
        tracing::info!(
            "Loaded {}x{} level with {} graph nodes",
            dimensions.width,
            dimensions.height,
            self.navigator.graph().len()
        );
    }

    /// Updates a cell's occupancy without rebuilding the move graph.
    pub fn set_occupied(&mut self, position: Position, occupied: bool) {
        self.navigator.set_occupied(position, occupied);
    }

    /// Registers `entity` with its own tree. It ticks after every entity
    /// registered before it.
    pub fn spawn(&mut self, entity: EntityId, tree: BehaviorTree) -> Result<()> {
        if self.contains(entity) {
            return Err(RuntimeError::DuplicateEntity(entity));
        }
        tree.validate()
            .map_err(|e| RuntimeError::MalformedTree(e.to_string()))?;

        self.agents.push(Agent {
            entity,
            tree,
            initialized: false,
        });
        tracing::debug!("Spawned NPC {}", entity);
        Ok(())
    }

    /// Registers `entity` with [`presets::ranged_skirmisher`].
    pub fn spawn_default(&mut self, entity: EntityId) -> Result<()> {
        let tree = presets::ranged_skirmisher(&self.config);
        self.spawn(entity, tree)
    }

    /// Removes `entity` and returns its tree.
    pub fn despawn(&mut self, entity: EntityId) -> Option<BehaviorTree> {
        let Some(index) = self.index_of(entity) else {
            tracing::warn!("Despawn of unknown NPC {}", entity);
            return None;
        };
        tracing::debug!("Despawned NPC {}", entity);
        Some(self.agents.remove(index).tree)
    }

    pub fn contains(&self, entity: EntityId) -> bool {
        self.index_of(entity).is_some()
    }

    pub fn tree(&self, entity: EntityId) -> Option<&BehaviorTree> {
        self.agents
            .iter()
            .find(|agent| agent.entity == entity)
            .map(|agent| &agent.tree)
    }

    /// Registered entities in tick order.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.agents.iter().map(|agent| agent.entity)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    fn index_of(&self, entity: EntityId) -> Option<usize> {
        self.agents.iter().position(|agent| agent.entity == entity)
    }

    /// Ticks every registered tree once.
    ///
    /// Does nothing outside [`TurnPhase::Enemy`]. A root that reports
    /// `Success` is re-armed right away so the next tick starts a fresh
    /// cycle. `Running` and `Failure` roots keep their state.
    pub fn tick(
        &mut self,
        world: &dyn WorldView,
        movement: &mut dyn MovementSink,
        projectiles: &mut dyn ProjectileSink,
    ) -> TickReport {
        if world.phase() != TurnPhase::Enemy {
            return TickReport::default();
        }

        let mut state = TickState::default();
        let mut outcomes = Vec::with_capacity(self.agents.len());

        for agent in &mut self.agents {
            let mut ctx = AiContext::new(
                agent.entity,
                world,
                &self.navigator,
                &self.config,
                &mut state,
                &mut *movement,
                &mut *projectiles,
                &mut self.rng,
            );

            if !agent.initialized {
                agent.tree.init(&mut ctx);
                agent.initialized = true;
            }

            let status = agent.tree.tick(&mut ctx);
            tracing::debug!("NPC {} tree -> {:?}", agent.entity, status);

            if status.is_success() {
                agent.tree.init(&mut ctx);
            }
            outcomes.push((agent.entity, status));
        }

        TickReport {
            outcomes,
            mover: state.moved,
        }
    }

    /// Captures `entity`'s tree in its current state.
    pub fn snapshot(&self, entity: EntityId) -> Result<TreeRecord> {
        let agent = self
            .agents
            .iter()
            .find(|agent| agent.entity == entity)
            .ok_or(RuntimeError::UnknownEntity(entity))?;
        Ok(TreeRecord::new(
            entity,
            agent.tree.clone(),
            agent.initialized,
        ))
    }

    /// Installs `record` as `entity`'s tree, replacing any current one.
    ///
    /// Unknown entities are registered at the end of the tick order.
    pub fn restore(&mut self, entity: EntityId, record: TreeRecord) -> Result<()> {
        check_record(entity, &record)?;
        self.install(record);
        Ok(())
    }

    fn install(&mut self, record: TreeRecord) {
        let entity = record.entity;
        let agent = Agent {
            entity,
            tree: record.tree,
            initialized: record.initialized,
        };
        match self.index_of(entity) {
            Some(index) => self.agents[index] = agent,
            None => self.agents.push(agent),
        }
        tracing::debug!("Restored NPC {}", entity);
    }

    /// Saves every tree. Returns how many were written.
    pub fn save_all(&self, repo: &dyn TreeRepository) -> Result<usize> {
        for agent in &self.agents {
            repo.save(&self.snapshot(agent.entity)?)?;
        }
        tracing::info!("Saved {} NPC trees", self.agents.len());
        Ok(self.agents.len())
    }

    /// Restores every tree found in `repo`. Returns how many were loaded.
    ///
    /// Every record is read and checked before any is installed, so a bad
    /// record leaves the engine untouched.
    pub fn load_all(&mut self, repo: &dyn TreeRepository) -> Result<usize> {
        let mut records = Vec::new();
        for entity in repo.list_entities()? {
            match repo.load(entity)? {
                Some(record) => {
                    check_record(entity, &record)?;
                    records.push(record);
                }
                None => tracing::warn!("Tree for NPC {} vanished during load", entity),
            }
        }

        let loaded = records.len();
        for record in records {
            self.install(record);
        }
        tracing::info!("Loaded {} NPC trees", loaded);
        Ok(loaded)
    }
}

fn check_record(entity: EntityId, record: &TreeRecord) -> Result<()> {
    if record.entity != entity {
        return Err(RuntimeError::EntityMismatch {
            expected: entity,
            found: record.entity,
        });
    }
    record.validate()
}

#[cfg(test)]
mod tests {
    use behavior_tree::Node;
    use behavior_tree::builder::{leaf, random_choice, repeat};
    use game_core::{CardinalDirection, WorldPosition};

    use super::*;
    use crate::ai::nodes::{NpcAction, SeekTarget};
    use crate::ai::testing::Harness;

    fn engine_for(harness: &Harness) -> AiEngine {
        AiEngine::new(harness.config.clone(), harness.navigator.clone())
    }

    fn seeker() -> BehaviorTree {
        leaf(NpcAction::SeekTarget(SeekTarget))
    }

    #[test]
    fn duplicate_spawn_is_rejected() {
        let harness = Harness::open(4, 4);
        let mut engine = engine_for(&harness);

        engine.spawn_default(EntityId(1)).unwrap();
        assert!(matches!(
            engine.spawn(EntityId(1), seeker()),
            Err(RuntimeError::DuplicateEntity(EntityId(1)))
        ));
    }

    #[test]
    fn ticks_in_registration_order() {
        let mut harness = Harness::level("......\n......\n######\n");
        harness.world.place(EntityId::PLAYER, 5, 1);
        harness.world.place(EntityId(7), 0, 1);
        harness.world.place(EntityId(3), 1, 1);

        let mut engine = engine_for(&harness);
        engine.spawn(EntityId(7), seeker()).unwrap();
        engine.spawn(EntityId(3), seeker()).unwrap();

        let mut moves: Vec<(EntityId, CardinalDirection)> = Vec::new();
        let mut shots: Vec<(WorldPosition, WorldPosition)> = Vec::new();
        let report = engine.tick(&harness.world, &mut moves, &mut shots);

        assert_eq!(
            report.outcomes,
            vec![(EntityId(7), Status::Failure), (EntityId(3), Status::Failure)]
        );
        assert_eq!(report.mover, Some(EntityId(7)));
        assert_eq!(moves, vec![(EntityId(7), CardinalDirection::East)]);
    }

    #[test]
    fn despawn_returns_tree_and_forgets_entity() {
        let harness = Harness::open(4, 4);
        let mut engine = engine_for(&harness);
        engine.spawn(EntityId(2), seeker()).unwrap();

        assert_eq!(engine.despawn(EntityId(2)), Some(seeker()));
        assert!(engine.is_empty());
        assert_eq!(engine.despawn(EntityId(2)), None);
    }

    #[test]
    fn restore_rejects_foreign_record() {
        let harness = Harness::open(4, 4);
        let mut engine = engine_for(&harness);
        let record = TreeRecord::new(EntityId(5), seeker(), false);

        assert!(matches!(
            engine.restore(EntityId(6), record),
            Err(RuntimeError::EntityMismatch { .. })
        ));
    }

    #[test]
    fn failed_root_keeps_failing_until_it_succeeds() {
        // No poses are placed, so the seeker fails on every tick.
        let harness = Harness::level("......\n......\n######\n");
        let mut engine = engine_for(&harness);
        engine.spawn(EntityId(4), repeat(seeker(), 1)).unwrap();

        let mut moves: Vec<(EntityId, CardinalDirection)> = Vec::new();
        let mut shots: Vec<(WorldPosition, WorldPosition)> = Vec::new();
        let statuses: Vec<Status> = (0..4)
            .map(|_| engine.tick(&harness.world, &mut moves, &mut shots).outcomes[0].1)
            .collect();

        assert_eq!(
            statuses,
            vec![
                Status::Running,
                Status::Failure,
                Status::Failure,
                Status::Failure
            ]
        );
        let Some(Node::RepeatForN(root)) = engine.tree(EntityId(4)) else {
            panic!("root should still be a RepeatForN");
        };
        assert!(root.remaining() < 0);
    }

    #[test]
    fn restore_rejects_armed_record_without_rolled_branch() {
        let harness = Harness::open(4, 4);
        let mut engine = engine_for(&harness);
        let tree = random_choice(50, seeker(), seeker());
        let record = TreeRecord::new(EntityId(5), tree.clone(), true);

        assert!(matches!(
            engine.restore(EntityId(5), record),
            Err(RuntimeError::MalformedTree(_))
        ));
        assert!(engine.is_empty());

        let unarmed = TreeRecord::new(EntityId(5), tree, false);
        engine.restore(EntityId(5), unarmed).unwrap();
        assert_eq!(engine.len(), 1);
    }

    #[test]
    fn snapshot_of_unknown_entity_fails() {
        let harness = Harness::open(4, 4);
        let engine = engine_for(&harness);
        assert!(matches!(
            engine.snapshot(EntityId(9)),
            Err(RuntimeError::UnknownEntity(_))
        ));
    }
}
