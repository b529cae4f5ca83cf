//! Public runtime API surface.
//!
//! Error types and the host-world capabilities the engine is driven through.

pub mod errors;
pub mod world;

pub use errors::{Result, RuntimeError};
pub use world::{MovementSink, Pose, ProjectileSink, WorldView};
