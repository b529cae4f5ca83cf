//! Condition nodes for NPC behavior trees.
//!
//! Condition nodes check the world and return Success or Failure.
//! They never dispatch commands.

use behavior_tree::{Behavior, Status};
use serde::{Deserialize, Serialize};

use crate::ai::AiContext;

/// Checks whether the target stands inside a square box around this entity.
///
/// Distance is measured in grid cells, independently per axis: a target at
/// `(dx, dy)` is in range when both `|dx|` and `|dy|` are at most `radius`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetInRange {
    pub radius: u32,
}

impl TargetInRange {
    pub fn new(radius: u32) -> Self {
        Self { radius }
    }
}

impl Behavior<AiContext<'_>> for TargetInRange {
    fn tick(&mut self, ctx: &mut AiContext<'_>) -> Status {
        let (Some(own), Some(target)) = (ctx.own_pose(), ctx.target_pose()) else {
            return Status::Failure;
        };

        let own_cell = ctx.cell_of(own.position);
        let target_cell = ctx.cell_of(target.position);

        if own_cell.within_box(target_cell, self.radius) {
            Status::Success
        } else {
            Status::Failure
        }
    }
}

#[cfg(test)]
mod tests {
    use game_core::EntityId;

    use super::*;
    use crate::ai::testing::Harness;

    const NPC: EntityId = EntityId(1);

    fn check(radius: u32, npc: (i32, i32), target: (i32, i32)) -> Status {
        let mut harness = Harness::open(10, 10);
        harness.world.place(NPC, npc.0, npc.1);
        harness.world.place(EntityId::PLAYER, target.0, target.1);
        harness.run(NPC, |ctx| TargetInRange::new(radius).tick(ctx))
    }

    #[test]
    fn corner_of_the_box_is_in_range() {
        assert_eq!(check(7, (0, 0), (7, 7)), Status::Success);
    }

    #[test]
    fn one_axis_out_of_range_fails() {
        assert_eq!(check(7, (0, 0), (8, 0)), Status::Failure);
    }

    #[test]
    fn same_cell_is_in_range() {
        assert_eq!(check(0, (3, 3), (3, 3)), Status::Success);
    }

    #[test]
    fn missing_target_fails() {
        let mut harness = Harness::open(10, 10);
        harness.world.place(NPC, 0, 0);
        let status = harness.run(NPC, |ctx| TargetInRange::new(7).tick(ctx));
        assert_eq!(status, Status::Failure);
    }
}
