//! File-based repository implementations.

mod trees;

pub use trees::FileTreeRepository;
