//! Repository layer for in-flight NPC trees.
//!
//! Repositories hold data that CHANGES during play: the per-entity tree
//! records produced by [`crate::AiEngine::save_all`]. Level classification is
//! not persisted here; it comes from the host game.

mod error;
mod file;
mod memory;
mod traits;

pub use error::RepositoryError;
pub use file::FileTreeRepository;
pub use memory::InMemoryTreeRepo;
pub use traits::TreeRepository;
