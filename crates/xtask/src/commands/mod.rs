//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod inspect_tree;
mod simulate;

pub use inspect_tree::InspectTree;
pub use simulate::Simulate;
