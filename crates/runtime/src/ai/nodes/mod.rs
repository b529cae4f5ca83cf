//! Game-specific behavior tree leaves.
//!
//! This module contains the concrete leaves NPC trees are built from. Nodes
//! are divided into:
//!
//! - `conditions`: Nodes that check the world (Success/Failure, no effects)
//! - `actions`: Nodes that dispatch movement or spawn projectiles
//!
//! [`NpcAction`] closes the set so trees can be persisted and restored.

pub mod actions;
pub mod conditions;

pub use actions::*;
pub use conditions::*;

use behavior_tree::{Behavior, Status};
use serde::{Deserialize, Serialize};

use crate::ai::AiContext;

/// Every leaf an NPC tree may contain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NpcAction {
    TargetInRange(TargetInRange),
    SeekTarget(SeekTarget),
    FireProjectileBurst(FireProjectileBurst),
    PredictShot(PredictShot),
    ApproachTarget(ApproachTarget),
}

impl NpcAction {
    /// Type tag used in logs and summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            NpcAction::TargetInRange(_) => "TargetInRange",
            NpcAction::SeekTarget(_) => "SeekTarget",
            NpcAction::FireProjectileBurst(_) => "FireProjectileBurst",
            NpcAction::PredictShot(_) => "PredictShot",
            NpcAction::ApproachTarget(_) => "ApproachTarget",
        }
    }
}

impl Behavior<AiContext<'_>> for NpcAction {
    fn init(&mut self, ctx: &mut AiContext<'_>) {
        match self {
            NpcAction::TargetInRange(node) => node.init(ctx),
            NpcAction::SeekTarget(node) => node.init(ctx),
            NpcAction::FireProjectileBurst(node) => node.init(ctx),
            NpcAction::PredictShot(node) => node.init(ctx),
            NpcAction::ApproachTarget(node) => node.init(ctx),
        }
    }

    fn tick(&mut self, ctx: &mut AiContext<'_>) -> Status {
        match self {
            NpcAction::TargetInRange(node) => node.tick(ctx),
            NpcAction::SeekTarget(node) => node.tick(ctx),
            NpcAction::FireProjectileBurst(node) => node.tick(ctx),
            NpcAction::PredictShot(node) => node.tick(ctx),
            NpcAction::ApproachTarget(node) => node.tick(ctx),
        }
    }
}

impl From<TargetInRange> for NpcAction {
    fn from(node: TargetInRange) -> Self {
        NpcAction::TargetInRange(node)
    }
}

impl From<SeekTarget> for NpcAction {
    fn from(node: SeekTarget) -> Self {
        NpcAction::SeekTarget(node)
    }
}

impl From<FireProjectileBurst> for NpcAction {
    fn from(node: FireProjectileBurst) -> Self {
        NpcAction::FireProjectileBurst(node)
    }
}

impl From<PredictShot> for NpcAction {
    fn from(node: PredictShot) -> Self {
        NpcAction::PredictShot(node)
    }
}

impl From<ApproachTarget> for NpcAction {
    fn from(node: ApproachTarget) -> Self {
        NpcAction::ApproachTarget(node)
    }
}
