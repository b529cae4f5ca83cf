//! Minimal host world for tools and tests.
//!
//! [`Sandbox`] stands in for the real game: it knows where entities are,
//! whose turn it is, and applies the step and spawn requests an
//! [`AiEngine`](crate::AiEngine) tick produced. Movement is a plain
//! cell-to-cell hop with no falling or collision response.

use std::collections::BTreeMap;

use game_core::{
    CardinalDirection, EntityId, Grid, GridError, Position, TurnPhase, WorldPosition,
};

use crate::api::{Pose, WorldView};

/// A shot in flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projectile {
    pub position: WorldPosition,
    pub velocity: WorldPosition,
}

/// A step the sandbox actually performed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hop {
    pub entity: EntityId,
    pub from: Position,
    pub to: Position,
}

#[derive(Clone, Debug)]
pub struct Sandbox {
    grid: Grid,
    scale: f32,
    phase: TurnPhase,
    poses: BTreeMap<EntityId, Pose>,
    projectiles: Vec<Projectile>,
}

impl Sandbox {
    /// Parses a level with actors drawn in.
    ///
    /// On top of the [`Grid::from_ascii`] glyphs, `P` places the player and
    /// each `E` places an enemy; both stand on open cells. Enemies are
    /// numbered from 1 in reading order.
    pub fn from_ascii(text: &str, scale: f32) -> Result<Self, GridError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .collect();
        let height = rows.len() as i32;

        let mut poses = BTreeMap::new();
        let mut next_enemy = 1;
        for (row, line) in rows.iter().enumerate() {
            let y = height - 1 - row as i32;
            for (column, glyph) in line.chars().enumerate() {
                let entity = match glyph {
                    'P' => EntityId::PLAYER,
                    'E' => {
                        let id = EntityId(next_enemy);
                        next_enemy += 1;
                        id
                    }
                    _ => continue,
                };
                let position = WorldPosition::from_grid(Position::new(column as i32, y), scale);
                // A second `P` is drawn as open floor.
                poses
                    .entry(entity)
                    .or_insert_with(|| Pose::new(position, CardinalDirection::East));
            }
        }

        let terrain = rows
            .iter()
            .map(|line| line.replace(['P', 'E'], "."))
            .collect::<Vec<_>>()
            .join("\n");
        let grid = Grid::from_ascii(&terrain)?;

        Ok(Self {
            grid,
            scale,
            phase: TurnPhase::Player,
            poses,
            projectiles: Vec::new(),
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn set_phase(&mut self, phase: TurnPhase) {
        self.phase = phase;
    }

    pub fn advance_phase(&mut self) {
        self.phase = self.phase.next();
    }

    /// Every non-player entity, in id order.
    pub fn enemies(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.poses.keys().copied().filter(|entity| !entity.is_player())
    }

    pub fn cell_of(&self, entity: EntityId) -> Option<Position> {
        self.poses
            .get(&entity)
            .map(|pose| pose.position.to_grid(self.scale))
    }

    pub fn place(&mut self, entity: EntityId, cell: Position) {
        let facing = self
            .poses
            .get(&entity)
            .map_or(CardinalDirection::East, |pose| pose.facing);
        self.poses.insert(
            entity,
            Pose::new(WorldPosition::from_grid(cell, self.scale), facing),
        );
    }

    fn is_free(&self, cell: Position) -> bool {
        self.grid.contains(cell)
            && self.grid.is_passable(cell)
            && !self.grid.is_occupied(cell)
            && self.poses.keys().all(|&other| self.cell_of(other) != Some(cell))
    }

    /// Applies step requests in order. A blocked step still turns the entity.
    pub fn apply_moves(&mut self, moves: &[(EntityId, CardinalDirection)]) -> Vec<Hop> {
        let mut hops = Vec::new();
        for &(entity, direction) in moves {
            let Some(from) = self.cell_of(entity) else {
                tracing::warn!("Move for unknown entity {}", entity);
                continue;
            };
            let to = from.step(direction);
            let free = self.is_free(to);

            if let Some(pose) = self.poses.get_mut(&entity) {
                pose.facing = direction;
                if free {
                    pose.position = WorldPosition::from_grid(to, self.scale);
                    hops.push(Hop { entity, from, to });
                }
            }
        }
        hops
    }

    pub fn launch(&mut self, shots: &[(WorldPosition, WorldPosition)]) {
        self.projectiles
            .extend(shots.iter().map(|&(position, velocity)| Projectile { position, velocity }));
    }

    /// Moves every projectile by its velocity. Projectiles that enter a
    /// wall or leave the level are dropped; those reaching the player's cell
    /// are counted as hits and dropped.
    pub fn advance_projectiles(&mut self) -> usize {
        let player = self.cell_of(EntityId::PLAYER);
        let scale = self.scale;
        let grid = &self.grid;
        let mut hits = 0;

        self.projectiles.retain_mut(|projectile| {
            projectile.position = WorldPosition::new(
                projectile.position.x + projectile.velocity.x,
                projectile.position.y + projectile.velocity.y,
            );
            let cell = projectile.position.to_grid(scale);
            if Some(cell) == player {
                hits += 1;
                return false;
            }
            grid.contains(cell) && grid.is_passable(cell)
        });
        hits
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    /// Draws the level top row first in the glyphs [`Sandbox::from_ascii`]
    /// reads, plus `*` for projectiles.
    pub fn render(&self) -> String {
        let dimensions = self.grid.dimensions();
        let mut out = String::new();
        for y in (0..dimensions.height as i32).rev() {
            for x in 0..dimensions.width as i32 {
                let cell = Position::new(x, y);
                let glyph = if self.cell_of(EntityId::PLAYER) == Some(cell) {
                    'P'
                } else if self.enemies().any(|enemy| self.cell_of(enemy) == Some(cell)) {
                    'E'
                } else if self
                    .projectiles
                    .iter()
                    .any(|shot| shot.position.to_grid(self.scale) == cell)
                {
                    '*'
                } else if self.grid.is_blocked(cell) {
                    '#'
                } else if self.grid.is_climbable(cell) {
                    'H'
                } else if self.grid.is_occupied(cell) {
                    'o'
                } else {
                    '.'
                };
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }
}

impl WorldView for Sandbox {
    fn phase(&self) -> TurnPhase {
        self.phase
    }

    fn target(&self) -> EntityId {
        EntityId::PLAYER
    }

    fn pose(&self, entity: EntityId) -> Option<Pose> {
        self.poses.get(&entity).copied()
    }

    fn scale(&self) -> f32 {
        self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVEL: &str = "\
P....
...E.
#####
";

    #[test]
    fn parses_actors_and_terrain() {
        let sandbox = Sandbox::from_ascii(LEVEL, 16.0).unwrap();

        assert_eq!(sandbox.cell_of(EntityId::PLAYER), Some(Position::new(0, 2)));
        assert_eq!(sandbox.enemies().collect::<Vec<_>>(), vec![EntityId(1)]);
        assert_eq!(sandbox.cell_of(EntityId(1)), Some(Position::new(3, 1)));
        assert!(sandbox.grid().is_passable(Position::new(3, 1)));
        assert_eq!(sandbox.render(), LEVEL);
    }

    #[test]
    fn blocked_moves_turn_but_do_not_hop() {
        let mut sandbox = Sandbox::from_ascii(LEVEL, 1.0).unwrap();

        let hops = sandbox.apply_moves(&[
            (EntityId(1), CardinalDirection::South),
            (EntityId(1), CardinalDirection::West),
        ]);

        assert_eq!(hops, vec![Hop {
            entity: EntityId(1),
            from: Position::new(3, 1),
            to: Position::new(2, 1),
        }]);
        assert_eq!(
            sandbox.pose(EntityId(1)).map(|pose| pose.facing),
            Some(CardinalDirection::West)
        );
    }

    #[test]
    fn projectiles_hit_the_player_or_walls() {
        let mut sandbox = Sandbox::from_ascii(LEVEL, 1.0).unwrap();
        sandbox.launch(&[
            (WorldPosition::new(1.5, 2.5), WorldPosition::new(-1.0, 0.0)),
            (WorldPosition::new(1.5, 1.5), WorldPosition::new(0.0, -1.0)),
        ]);

        assert_eq!(sandbox.advance_projectiles(), 1);
        assert!(sandbox.projectiles().is_empty());
    }
}
