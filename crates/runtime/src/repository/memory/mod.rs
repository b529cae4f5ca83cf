//! In-memory repository implementations for testing and development.

mod trees;

pub use trees::InMemoryTreeRepo;
