use std::collections::{HashSet, VecDeque};

use thiserror::Error;

use super::graph::MoveGraph;
use super::rules::{self, Moves, Step};
use crate::env::Grid;
use crate::state::Position;

/// Frontier ordering used by [`search`].
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::EnumString, strum::Display,
)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SearchMode {
    /// Plain first-in, first-out expansion.
    #[default]
    #[strum(to_string = "breadth", serialize = "bfs")]
    Breadth,
    /// After every expansion, the whole frontier is stably re-sorted by
    /// path length plus Manhattan distance to the goal.
    #[strum(to_string = "greedy", serialize = "astar")]
    Greedy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("search start {0} is outside the level")]
    StartOutOfBounds(Position),

    #[error("search goal {0} is outside the level")]
    GoalOutOfBounds(Position),
}

/// Ordered cells from start to goal, both inclusive.
///
/// A single-cell path means the goal could not be reached, unless the
/// search started on the goal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path(Vec<Position>);

impl Path {
    /// The "no path found" result.
    pub fn sentinel(start: Position) -> Self {
        Self(vec![start])
    }

    pub fn cells(&self) -> &[Position] {
        &self.0
    }

    pub fn start(&self) -> Position {
        self.0[0]
    }

    pub fn end(&self) -> Position {
        self.0[self.0.len() - 1]
    }

    /// The cell after the start, if the path has one.
    pub fn next_cell(&self) -> Option<Position> {
        self.0.get(1).copied()
    }

    /// Number of cells, not steps.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_cells(self) -> Vec<Position> {
        self.0
    }
}

/// Finds a path from `start` to `goal` over `graph`.
///
/// The frontier holds partial paths seeded with `[start]`. Each expansion
/// pops the front path, stops if it ends on the goal, and otherwise appends
/// one new path per candidate step whose end cell has not been queued yet.
/// Queued cells are consumed from a call-scoped copy of the graph's key set,
/// so no cell is ever queued twice. In [`SearchMode::Greedy`] the frontier is
/// then stably re-sorted by `len + |dx| + |dy|`; ties keep their order.
///
/// An exhausted frontier yields [`Path::sentinel`].
pub fn search(
    grid: &Grid,
    graph: &MoveGraph,
    start: Position,
    goal: Position,
    mode: SearchMode,
) -> Result<Path, SearchError> {
    if !grid.contains(start) {
        return Err(SearchError::StartOutOfBounds(start));
    }
    if !grid.contains(goal) {
        return Err(SearchError::GoalOutOfBounds(goal));
    }

    let mut unvisited: HashSet<Position> = graph.positions().collect();
    unvisited.remove(&start);

    let mut frontier: VecDeque<Vec<Position>> = VecDeque::from([vec![start]]);

    while let Some(path) = frontier.pop_front() {
        let Some(&last) = path.last() else {
            continue;
        };
        if last == goal {
            return Ok(Path(path));
        }

        // Only the start can be off-graph, e.g. a walker caught mid-fall.
        let computed: Moves;
        let moves = match graph.moves(last) {
            Some(moves) => moves,
            None => {
                computed = rules::candidates(grid, last);
                &computed
            }
        };

        for &step in moves {
            if !unvisited.remove(&step.target()) {
                continue;
            }
            if let Step::Hug { via, .. } = step {
                unvisited.remove(&via);
            }
            let mut extended = path.clone();
            extended.extend(step.cells());
            frontier.push_back(extended);
        }

        if mode == SearchMode::Greedy {
            frontier
                .make_contiguous()
                .sort_by_key(|candidate| score(candidate, goal));
        }
    }

    Ok(Path::sentinel(start))
}

fn score(path: &[Position], goal: Position) -> usize {
    let distance = path.last().map_or(0, |last| last.manhattan(goal) as usize);
    path.len() + distance
}

/// A loaded level: its classification and the move graph derived from it.
#[derive(Clone, Debug)]
pub struct Navigator {
    grid: Grid,
    graph: MoveGraph,
}

impl Navigator {
    pub fn new(grid: Grid) -> Self {
        let graph = MoveGraph::build(&grid);
        Self { grid, graph }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn graph(&self) -> &MoveGraph {
        &self.graph
    }

    /// Occupancy does not affect the move graph, so no rebuild is needed.
    pub fn set_occupied(&mut self, position: Position, occupied: bool) {
        self.grid.set_occupied(position, occupied);
    }

    pub fn search(
        &self,
        start: Position,
        goal: Position,
        mode: SearchMode,
    ) -> Result<Path, SearchError> {
        search(&self.grid, &self.graph, start, goal, mode)
    }
}
