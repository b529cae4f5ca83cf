//! End-to-end engine behavior against the sandbox world.

use ai_runtime::{AiConfig, AiEngine, Sandbox, TickReport};
use behavior_tree::Status;
use game_core::{CardinalDirection, EntityId, Navigator, TurnPhase, WorldPosition};

type Moves = Vec<(EntityId, CardinalDirection)>;
type Shots = Vec<(WorldPosition, WorldPosition)>;

const NEAR: &str = "\
........
.E..P...
########
";

const FAR: &str = "\
............
EE........P.
############
";

fn setup(level: &str, config: AiConfig) -> (Sandbox, AiEngine) {
    let mut sandbox = Sandbox::from_ascii(level, 1.0).expect("level parses");
    sandbox.set_phase(TurnPhase::Enemy);

    let mut engine = AiEngine::new(config, Navigator::new(sandbox.grid().clone()));
    for enemy in sandbox.enemies().collect::<Vec<_>>() {
        engine.spawn_default(enemy).unwrap();
    }
    (sandbox, engine)
}

fn tick(engine: &mut AiEngine, world: &Sandbox, moves: &mut Moves, shots: &mut Shots) -> TickReport {
    engine.tick(world, moves, shots)
}

fn status_of(report: &TickReport, entity: EntityId) -> Option<Status> {
    report
        .outcomes
        .iter()
        .find(|(id, _)| *id == entity)
        .map(|(_, status)| *status)
}

#[test]
fn nothing_runs_outside_the_enemy_phase() {
    let (mut sandbox, mut engine) = setup(NEAR, AiConfig::default());
    sandbox.set_phase(TurnPhase::Player);
    let (mut moves, mut shots) = (Moves::new(), Shots::new());

    for _ in 0..10 {
        let report = tick(&mut engine, &sandbox, &mut moves, &mut shots);
        assert!(report.skipped());
        assert_eq!(report.mover, None);
    }
    assert!(moves.is_empty());
    assert!(shots.is_empty());
}

#[test]
fn in_range_enemy_fires_after_cooldown_and_restarts() {
    let (sandbox, mut engine) = setup(NEAR, AiConfig::default());
    let enemy = EntityId(1);
    let (mut moves, mut shots) = (Moves::new(), Shots::new());

    let mut statuses = Vec::new();
    for _ in 0..5 {
        let report = tick(&mut engine, &sandbox, &mut moves, &mut shots);
        statuses.push(status_of(&report, enemy).unwrap());
        if statuses.len() < 5 {
            assert!(shots.is_empty());
        }
    }

    // Arm the volley, predict, two cooldown ticks, fire.
    assert_eq!(
        statuses,
        vec![
            Status::Running,
            Status::Running,
            Status::Running,
            Status::Running,
            Status::Success
        ]
    );
    assert_eq!(shots.len(), 1);
    assert!(shots[0].1.x > 0.0);
    assert!(moves.is_empty());

    // The root was re-armed: a fresh cycle starts over.
    let report = tick(&mut engine, &sandbox, &mut moves, &mut shots);
    assert_eq!(status_of(&report, enemy), Some(Status::Running));
}

#[test]
fn far_enemies_seek_and_only_the_first_moves() {
    let config = AiConfig::default().with_approach_percent(0);
    let (sandbox, mut engine) = setup(FAR, config);
    let (mut moves, mut shots) = (Moves::new(), Shots::new());

    // Range check fails; the selector falls through to its random choice.
    let first = tick(&mut engine, &sandbox, &mut moves, &mut shots);
    assert_eq!(first.outcomes.len(), 2);
    assert_eq!(first.mover, None);

    let second = tick(&mut engine, &sandbox, &mut moves, &mut shots);
    assert_eq!(
        second.outcomes,
        vec![(EntityId(1), Status::Running), (EntityId(2), Status::Running)]
    );
    assert_eq!(second.mover, Some(EntityId(1)));
    assert_eq!(moves.len(), 1);
}

#[test]
fn movement_commands_drive_the_sandbox() {
    let config = AiConfig::default().with_approach_percent(0);
    let (mut sandbox, mut engine) = setup(FAR, config);
    engine.despawn(EntityId(1));

    for _ in 0..4 {
        let (mut moves, mut shots) = (Moves::new(), Shots::new());
        engine.tick(&sandbox, &mut moves, &mut shots);
        sandbox.apply_moves(&moves);
    }

    // One tick to arm the choice, then one step per tick.
    assert_eq!(
        sandbox.cell_of(EntityId(2)),
        Some(game_core::Position::new(4, 1))
    );
}

#[test]
fn restored_tree_continues_where_it_left_off() {
    let (sandbox, mut original) = setup(NEAR, AiConfig::default());
    let enemy = EntityId(1);
    let (mut moves, mut shots) = (Moves::new(), Shots::new());

    for _ in 0..3 {
        tick(&mut original, &sandbox, &mut moves, &mut shots);
    }
    let record = original.snapshot(enemy).unwrap();
    assert!(record.initialized);

    let mut restored = AiEngine::new(
        AiConfig::default(),
        Navigator::new(sandbox.grid().clone()),
    );
    restored.restore(enemy, record).unwrap();
    assert_eq!(restored.tree(enemy), original.tree(enemy));

    let (mut restored_moves, mut restored_shots) = (Moves::new(), Shots::new());
    let mut shots = Shots::new();
    for _ in 0..2 {
        let a = tick(&mut original, &sandbox, &mut moves, &mut shots);
        let b = tick(&mut restored, &sandbox, &mut restored_moves, &mut restored_shots);
        assert_eq!(a, b);
    }
    assert_eq!(shots, restored_shots);
    assert_eq!(restored_shots.len(), 1);
}

#[test]
fn reloading_a_level_rebuilds_the_graph() {
    let (sandbox, mut engine) = setup(NEAR, AiConfig::default());
    let before = engine.navigator().graph().len();

    let bigger = Sandbox::from_ascii(FAR, 1.0).unwrap();
    engine.load_level(bigger.grid().clone());

    assert_ne!(engine.navigator().graph().len(), before);
    assert_eq!(engine.len(), sandbox.enemies().count());
}
