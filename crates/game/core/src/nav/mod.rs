//! Grid pathfinding for wall-crawling and vine-climbing walkers.
//!
//! - [`rules`]: the movement ruleset, evaluated per cell
//! - [`MoveGraph`]: rule results precomputed once per level load
//! - [`search`]: breadth-first or greedy frontier expansion over the graph
//! - [`Navigator`]: a loaded level bundling grid and graph
pub mod rules;

mod graph;
mod search;

pub use graph::MoveGraph;
pub use rules::Step;
pub use search::{Navigator, Path, SearchError, SearchMode, search};
