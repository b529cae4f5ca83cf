//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from repositories, snapshot decoding, and entity lookup so
//! callers can bubble them up with consistent context.
use game_core::EntityId;
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("entity {0} has no behavior tree")]
    UnknownEntity(EntityId),

    #[error("entity {0} already has a behavior tree")]
    DuplicateEntity(EntityId),

    /// Unknown node tag, missing field, or a structurally invalid tree.
    #[error("tree record is malformed: {0}")]
    MalformedTree(String),

    #[error("record belongs to entity {found}, expected {expected}")]
    EntityMismatch { expected: EntityId, found: EntityId },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
