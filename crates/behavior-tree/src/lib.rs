//! Stateful behavior tree library for turn-based games.
//!
//! Trees are evaluated incrementally: a node may report [`Status::Running`]
//! and resume from the same child on the next turn. All progress lives in the
//! nodes themselves (cursors, counters, the chosen branch), so a tree can be
//! serialized mid-decision and restored later.
//!
//! - **Closed node set**: [`Node`] is an enum over the composite kinds plus a
//!   game-supplied leaf type `L`
//! - **Explicit lifecycle**: `init` arms a node, `tick` advances it
//! - **Owned tree**: each node exclusively owns its children
//!
//! # Architecture
//!
//! - [`Behavior`]: `init`/`tick` capability shared by nodes and leaves
//! - [`Status`]: Running, Success or Failure
//! - Composite nodes: [`Sequence`], [`Selector`], [`RandomChoice`]
//! - Decorator nodes: [`RepeatForN`]
//! - [`Node::validate`]: structural checks for trees restored from snapshots

pub mod behavior;
pub mod builder;
pub mod composite;
pub mod decorator;
pub mod error;
pub mod node;
pub mod status;

// Re-export core types for ergonomic API
pub use behavior::{Behavior, Chance};
pub use composite::{Branch, RandomChoice, Selector, Sequence};
pub use decorator::RepeatForN;
pub use error::TreeError;
pub use node::Node;
pub use status::Status;
