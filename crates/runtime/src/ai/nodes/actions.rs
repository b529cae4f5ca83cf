//! Action nodes for NPC behavior trees.
//!
//! Action nodes emit effects through the context sinks: a movement command
//! or a projectile spawn.

use behavior_tree::{Behavior, Status};
use game_core::CardinalDirection;
use serde::{Deserialize, Serialize};

use crate::ai::AiContext;

/// Steps one cell along a path to the target.
///
/// Searches from the entity's cell to the target's cell with the configured
/// [`game_core::SearchMode`] and dispatches one step toward the second cell of
/// the path, favouring vertical movement. When the path has a single cell
/// (already there, or no route) the entity repeats its last facing instead.
///
/// Always reports `Failure`: there is more walking to do next tick. The
/// step is withheld outside the enemy phase, when another entity already
/// moved this phase, or when the next cell is occupied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeekTarget;

impl Behavior<AiContext<'_>> for SeekTarget {
    fn tick(&mut self, ctx: &mut AiContext<'_>) -> Status {
        let (Some(own), Some(target)) = (ctx.own_pose(), ctx.target_pose()) else {
            return Status::Failure;
        };

        let start = ctx.cell_of(own.position);
        let goal = ctx.cell_of(target.position);

        let path = match ctx.navigator.search(start, goal, ctx.config.search_mode) {
            Ok(path) => path,
            Err(error) => {
                tracing::warn!("NPC {} cannot search: {}", ctx.entity, error);
                return Status::Failure;
            }
        };

        let direction = match path.next_cell() {
            Some(next) => {
                if ctx.navigator.grid().is_occupied(next) {
                    tracing::debug!("NPC {} waits: {} is occupied", ctx.entity, next);
                    return Status::Failure;
                }
                CardinalDirection::toward(start, next).unwrap_or(own.facing)
            }
            None => own.facing,
        };

        ctx.dispatch_move(direction);
        Status::Failure
    }
}

/// Fires one projectile at the target after a cooldown.
///
/// `init` arms the cooldown with `skip_ticks`. Each tick while cooldown
/// remains decrements it and reports `Failure`. After that, every tick fires
/// along the unit vector from self to target scaled by
/// [`AiConfig::projectile_speed`](crate::AiConfig::projectile_speed) and
/// reports `Success`. Nothing spawns when both stand on the same point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FireProjectileBurst {
    pub skip_ticks: u32,
    /// Cooldown ticks left before the next shot.
    pub remaining: u32,
}

impl FireProjectileBurst {
    pub fn new(skip_ticks: u32) -> Self {
        Self {
            skip_ticks,
            remaining: skip_ticks,
        }
    }
}

impl Behavior<AiContext<'_>> for FireProjectileBurst {
    fn init(&mut self, _ctx: &mut AiContext<'_>) {
        self.remaining = self.skip_ticks;
    }

    fn tick(&mut self, ctx: &mut AiContext<'_>) -> Status {
        if self.remaining > 0 {
            self.remaining -= 1;
            return Status::Failure;
        }

        let (Some(own), Some(target)) = (ctx.own_pose(), ctx.target_pose()) else {
            return Status::Failure;
        };

        let heading = own.position.offset_to(target.position).normalized();
        if let Some(heading) = heading {
            let velocity = heading.scaled(ctx.config.projectile_speed);
            ctx.spawn_projectile(own.position, velocity);
        }
        Status::Success
    }
}

/// Reserved hook for leading shots; currently always succeeds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictShot;

impl Behavior<AiContext<'_>> for PredictShot {
    fn tick(&mut self, _ctx: &mut AiContext<'_>) -> Status {
        Status::Success
    }
}

/// Reserved hook for closing distance; currently always succeeds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApproachTarget;

impl Behavior<AiContext<'_>> for ApproachTarget {
    fn tick(&mut self, _ctx: &mut AiContext<'_>) -> Status {
        Status::Success
    }
}
