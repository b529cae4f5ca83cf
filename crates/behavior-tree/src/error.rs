//! Structural errors detected when validating a tree.

use thiserror::Error;

/// Invariant violations found in a tree that was not built by the builder
/// helpers, typically one restored from a snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("{kind} has no children")]
    EmptyComposite { kind: &'static str },

    #[error("{kind} cursor {cursor} exceeds child count {len}")]
    CursorOutOfBounds {
        kind: &'static str,
        cursor: usize,
        len: usize,
    },

    #[error("random choice percent {0} is outside 0..=100")]
    InvalidPercent(u32),

    #[error("armed {kind} has already run all {len} children")]
    Finished { kind: &'static str, len: usize },

    #[error("armed random choice has no chosen branch")]
    Unrolled,
}
