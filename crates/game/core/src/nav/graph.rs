use std::collections::HashMap;

use super::rules::{self, Moves};
use crate::env::Grid;
use crate::state::Position;

/// Level-derived adjacency: every anchor cell mapped to its candidate moves.
///
/// Built once per level load and never mutated. Each search consumes a
/// call-scoped copy of the key set, so independent searches over the same
/// graph cannot affect each other.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveGraph {
    edges: HashMap<Position, Moves>,
}

impl MoveGraph {
    pub fn build(grid: &Grid) -> Self {
        let edges = grid
            .positions()
            .filter(|&position| rules::is_anchor(grid, position))
            .map(|position| (position, rules::candidates(grid, position)))
            .collect();
        Self { edges }
    }

    pub fn contains(&self, position: Position) -> bool {
        self.edges.contains_key(&position)
    }

    pub fn moves(&self, position: Position) -> Option<&Moves> {
        self.edges.get(&position)
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.edges.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
