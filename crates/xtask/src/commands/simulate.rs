//! Run NPC behavior trees against an ASCII level
//!
//! Loads a level, spawns the default tree for every enemy glyph, and plays
//! player/enemy phase pairs while printing the board after each round.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;

use ai_runtime::{AiConfig, AiEngine, FileTreeRepository, Sandbox};
use game_core::{CardinalDirection, EntityId, Navigator, SearchMode, TurnPhase, WorldPosition};

use crate::dirs;

/// Run NPC trees against an ASCII level
#[derive(Parser)]
pub struct Simulate {
    /// Level file: `.` open, `#` wall, `H` vine, `o` occupied, `P` player, `E` enemy
    #[arg(short, long, value_name = "FILE")]
    level: PathBuf,

    /// Number of rounds to play (one player and one enemy phase each)
    #[arg(short, long, default_value_t = 10)]
    rounds: u32,

    /// Path search mode: breadth or greedy (overrides AI_SEARCH_MODE)
    #[arg(short, long, value_name = "MODE", value_parser = parse_mode)]
    mode: Option<SearchMode>,

    /// World units per grid cell
    #[arg(long, default_value_t = 1.0)]
    scale: f32,

    /// Save every tree after the run (defaults to the platform data directory)
    #[arg(long, value_name = "DIR", num_args = 0..=1)]
    save: Option<Option<PathBuf>>,

    /// Only print the final board
    #[arg(short, long)]
    quiet: bool,
}

/// Totals printed once the run ends.
#[derive(Default)]
struct RunStats {
    steps: usize,
    shots: usize,
    hits: usize,
}

impl Simulate {
    pub fn execute(self) -> Result<()> {
        let text = std::fs::read_to_string(&self.level)
            .with_context(|| format!("Failed to read level file: {}", self.level.display()))?;
        let mut sandbox = Sandbox::from_ascii(&text, self.scale)
            .with_context(|| format!("Failed to parse level: {}", self.level.display()))?;

        let mut config = AiConfig::from_env();
        if let Some(mode) = self.mode {
            config = config.with_search_mode(mode);
        }

        let enemies: Vec<EntityId> = sandbox.enemies().collect();
        if enemies.is_empty() {
            anyhow::bail!("Level has no enemies: {}", self.level.display());
        }

        let mut engine = AiEngine::new(config, Navigator::new(sandbox.grid().clone()));
        for &enemy in &enemies {
            engine.spawn_default(enemy)?;
        }
        for entity in enemies.iter().copied().chain([EntityId::PLAYER]) {
            if let Some(cell) = sandbox.cell_of(entity) {
                engine.set_occupied(cell, true);
            }
        }

        println!("{} {}", style("Level:").bold().cyan(), self.level.display());
        println!("{} {}", style("Enemies:").bold().cyan(), enemies.len());
        println!(
            "{} {}",
            style("Search Mode:").bold().cyan(),
            engine.config().search_mode
        );
        println!("{} {}", style("Seed:").bold().cyan(), engine.config().seed);
        println!();
        print!("{}", sandbox.render());
        println!();

        let mut stats = RunStats::default();
        for round in 1..=self.rounds {
            let mut mover = None;
            for phase in [TurnPhase::Player, TurnPhase::Enemy] {
                sandbox.set_phase(phase);

                let mut moves: Vec<(EntityId, CardinalDirection)> = Vec::new();
                let mut shots: Vec<(WorldPosition, WorldPosition)> = Vec::new();
                let report = engine.tick(&sandbox, &mut moves, &mut shots);
                if report.skipped() {
                    continue;
                }

                for hop in sandbox.apply_moves(&moves) {
                    engine.set_occupied(hop.from, false);
                    engine.set_occupied(hop.to, true);
                    stats.steps += 1;
                }
                sandbox.launch(&shots);
                stats.shots += shots.len();
                mover = report.mover;
            }
            let hits = sandbox.advance_projectiles();
            stats.hits += hits;

            if !self.quiet {
                print_round(round, mover, hits, &sandbox);
            }
        }

        if self.quiet {
            print!("{}", sandbox.render());
            println!();
        }

        println!("{}", style("=== Run Summary ===").bold().green());
        println!("  Rounds: {}", self.rounds);
        println!("  Steps Taken: {}", stats.steps);
        println!("  Shots Fired: {}", stats.shots);
        println!("  Player Hits: {}", stats.hits);

        if let Some(dir) = self.save {
            let dir = match dir {
                Some(dir) => dir,
                None => dirs::trees_dir()?,
            };
            let repo = FileTreeRepository::new(&dir)
                .with_context(|| format!("Failed to open save directory: {}", dir.display()))?;
            let saved = engine.save_all(&repo)?;
            println!();
            println!(
                "{} {} trees to {}",
                style("Saved").bold().green(),
                saved,
                dir.display()
            );
        }

        Ok(())
    }
}

fn parse_mode(value: &str) -> std::result::Result<SearchMode, String> {
    value
        .parse()
        .map_err(|_| format!("unknown search mode '{}' (expected breadth or greedy)", value))
}

fn print_round(round: u32, mover: Option<EntityId>, hits: usize, sandbox: &Sandbox) {
    let mover = match mover {
        Some(entity) => format!("NPC {}", entity),
        None => "none".to_string(),
    };
    println!(
        "{} mover: {}, projectiles: {}, hits: {}",
        style(format!("Round {}:", round)).bold().yellow(),
        mover,
        sandbox.projectiles().len(),
        hits
    );
    print!("{}", sandbox.render());
    println!();
}
