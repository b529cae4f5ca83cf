//! Level classification supplied by the host game.
//!
//! The host exposes its tiles through [`GridOracle`]; on level load the AI
//! copies them into an owned [`Grid`] that stays fixed until the next load.
mod grid;
mod map;

pub use grid::{Grid, GridError};
pub use map::{Cell, CellKind, GridOracle, MapDimensions};
