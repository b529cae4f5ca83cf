//! Behavior-tree driven NPC control.
//!
//! # Architecture
//!
//! - [`nodes`]: leaves (conditions and actions) closed under [`NpcAction`]
//! - [`presets`]: complete trees assembled from those leaves
//! - [`AiContext`]: per-entity blackboard for one tick
//! - [`AiEngine`]: owns one tree per NPC and ticks them each enemy phase
//! - [`TreeRecord`]: persisted tree state

mod context;
mod engine;
pub mod nodes;
pub mod presets;
mod snapshot;

#[cfg(test)]
pub(crate) mod testing;

pub use context::{AiContext, TickState};
pub use engine::{AiEngine, TickReport};
pub use nodes::NpcAction;
pub use snapshot::TreeRecord;

/// Tree type driven by [`AiEngine`].
pub type BehaviorTree = behavior_tree::Node<NpcAction>;
