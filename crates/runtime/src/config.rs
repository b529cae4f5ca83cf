//! AI tuning knobs and their environment overrides.
use std::env;

use game_core::SearchMode;
use serde::{Deserialize, Serialize};

/// Configuration shared by every tree the engine drives.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Frontier ordering for `SeekTarget` searches.
    pub search_mode: SearchMode,
    /// Projectile speed in world units per tick.
    pub projectile_speed: f32,
    /// Seed for the `RandomChoice` rolls.
    pub seed: u64,
    /// Box radius, in cells, inside which the preset tree starts shooting.
    pub engage_radius: u32,
    /// Cooldown ticks before each burst shot.
    pub burst_skip_ticks: u32,
    pub burst_repeat: i32,
    pub patrol_repeat: i32,
    /// Chance, in percent, that the preset picks `ApproachTarget` over `SeekTarget`.
    pub approach_percent: u32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            search_mode: SearchMode::Breadth,
            projectile_speed: 6.0,
            seed: 0,
            engage_radius: 7,
            burst_skip_ticks: 2,
            burst_repeat: 25,
            patrol_repeat: 8,
            approach_percent: 25,
        }
    }
}

impl AiConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `AI_SEARCH_MODE` - `breadth`/`bfs` or `greedy`/`astar` (default: breadth)
    /// - `AI_PROJECTILE_SPEED` - Projectile speed (default: 6.0)
    /// - `AI_SEED` - RNG seed (default: 0)
    /// - `AI_ENGAGE_RADIUS` - Engage radius in cells (default: 7)
    ///
    /// Unparseable values are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(mode) = read_env::<SearchMode>("AI_SEARCH_MODE") {
            config.search_mode = mode;
        }
        if let Some(speed) = read_env::<f32>("AI_PROJECTILE_SPEED") {
            config.projectile_speed = speed;
        }
        if let Some(seed) = read_env::<u64>("AI_SEED") {
            config.seed = seed;
        }
        if let Some(radius) = read_env::<u32>("AI_ENGAGE_RADIUS") {
            config.engage_radius = radius;
        }

        config
    }

    pub fn with_search_mode(mut self, mode: SearchMode) -> Self {
        self.search_mode = mode;
        self
    }

    pub fn with_projectile_speed(mut self, speed: f32) -> Self {
        self.projectile_speed = speed;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_engage_radius(mut self, radius: u32) -> Self {
        self.engage_radius = radius;
        self
    }

    pub fn with_burst(mut self, skip_ticks: u32, repeat: i32) -> Self {
        self.burst_skip_ticks = skip_ticks;
        self.burst_repeat = repeat;
        self
    }

    pub fn with_patrol_repeat(mut self, repeat: i32) -> Self {
        self.patrol_repeat = repeat;
        self
    }

    pub fn with_approach_percent(mut self, percent: u32) -> Self {
        self.approach_percent = percent.min(100);
        self
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
