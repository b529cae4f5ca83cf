//! Complete trees for NPC archetypes.
//!
//! Every selector in these trees ends with a child that cannot fail, so a
//! selector never runs out of children. Each root is a bounded
//! [`RepeatForN`](behavior_tree::RepeatForN) that eventually reports a
//! terminal outcome, after which the engine re-arms it.
//!
//! ```text
//! ranged_skirmisher()
//!   └─ RepeatForN(patrol_repeat)
//!       └─ Selector
//!           ├─ Sequence                       ← shoot while in range
//!           │   ├─ TargetInRange(engage_radius)
//!           │   └─ RepeatForN(burst_repeat)
//!           │       └─ Sequence
//!           │           ├─ PredictShot
//!           │           └─ FireProjectileBurst(burst_skip_ticks)
//!           └─ RandomChoice(approach_percent) ← otherwise close in
//!               ├─ ApproachTarget
//!               └─ SeekTarget
//! ```

use behavior_tree::builder::{leaf, random_choice, repeat, selector, sequence};

use super::BehaviorTree;
use super::nodes::{
    ApproachTarget, FireProjectileBurst, NpcAction, PredictShot, SeekTarget, TargetInRange,
};
use crate::config::AiConfig;

fn node(action: impl Into<NpcAction>) -> BehaviorTree {
    leaf(action.into())
}

/// Burst of shots, each preceded by a shot prediction.
fn volley(config: &AiConfig) -> BehaviorTree {
    repeat(
        sequence(vec![
            node(PredictShot),
            node(FireProjectileBurst::new(config.burst_skip_ticks)),
        ]),
        config.burst_repeat,
    )
}

/// Shoots when the target is in range, otherwise walks toward it.
///
/// This is the default tree for spawned NPCs.
pub fn ranged_skirmisher(config: &AiConfig) -> BehaviorTree {
    repeat(
        selector(vec![
            sequence(vec![
                node(TargetInRange::new(config.engage_radius)),
                volley(config),
            ]),
            random_choice(
                config.approach_percent,
                node(ApproachTarget),
                node(SeekTarget),
            ),
        ]),
        config.patrol_repeat,
    )
}

/// Holds its ground and only shoots.
pub fn sentry(config: &AiConfig) -> BehaviorTree {
    repeat(
        selector(vec![
            sequence(vec![
                node(TargetInRange::new(config.engage_radius)),
                volley(config),
            ]),
            node(PredictShot),
        ]),
        config.patrol_repeat,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf_kinds(tree: &BehaviorTree) -> Vec<&'static str> {
        let mut kinds = Vec::new();
        tree.for_each_leaf(&mut |leaf: &NpcAction| kinds.push(leaf.kind()));
        kinds
    }

    #[test]
    fn presets_are_well_formed() {
        let config = AiConfig::default();
        assert_eq!(ranged_skirmisher(&config).validate(), Ok(()));
        assert_eq!(sentry(&config).validate(), Ok(()));
    }

    #[test]
    fn skirmisher_carries_config_into_leaves() {
        let config = AiConfig::default().with_engage_radius(3).with_burst(5, 4);
        let tree = ranged_skirmisher(&config);

        assert_eq!(
            leaf_kinds(&tree),
            vec![
                "TargetInRange",
                "PredictShot",
                "FireProjectileBurst",
                "ApproachTarget",
                "SeekTarget"
            ]
        );

        let mut leaves = Vec::new();
        tree.for_each_leaf(&mut |leaf: &NpcAction| leaves.push(*leaf));
        assert!(leaves.contains(&NpcAction::TargetInRange(TargetInRange::new(3))));
        assert!(leaves.contains(&NpcAction::FireProjectileBurst(
            FireProjectileBurst::new(5)
        )));
    }

    #[test]
    fn sentry_never_walks() {
        let tree = sentry(&AiConfig::default());
        assert!(!leaf_kinds(&tree).contains(&"SeekTarget"));
    }
}
