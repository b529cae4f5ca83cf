//! Platform-specific directory utilities
//!
//! Provides consistent directory paths across different operating systems,
//! following platform conventions for data directories.

use anyhow::Result;
use std::path::PathBuf;

/// Get the platform-specific data directory for the NPC AI tools
///
/// `SAVE_DATA_DIR` overrides the platform default.
///
/// Follows platform conventions:
/// - macOS: `~/Library/Application Support/npc-ai`
/// - Linux: `~/.local/share/npc-ai` (or `$XDG_DATA_HOME/npc-ai`)
/// - Windows: `%APPDATA%\npc-ai`
/// - Fallback: `./save_data`
pub fn data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("SAVE_DATA_DIR") {
        return Ok(PathBuf::from(dir));
    }

    let dir = directories::ProjectDirs::from("", "", "npc-ai")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./save_data"));

    Ok(dir)
}

/// Directory saved tree records go to when no other is given
pub fn trees_dir() -> Result<PathBuf> {
    Ok(data_dir()?.join("trees"))
}
