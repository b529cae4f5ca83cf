//! Core behavior traits.
//!
//! This module defines the [`Behavior`] trait, which is the fundamental
//! abstraction for all behavior tree nodes. The trait is generic over a
//! context type `C`, allowing nodes to access game state and make decisions.

use crate::Status;

/// A behavior tree node that can be evaluated against a context.
pub trait Behavior<C> {
    /// Arms the node before its first tick.
    ///
    /// Composites reset their cursor and arm their first child here. Leaves
    /// without per-activation state keep the default no-op.
    fn init(&mut self, _ctx: &mut C) {}

    /// Advance this behavior node by one tick.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Mutable reference to the context/blackboard. Nodes can read
    ///   game state and emit side effects through it (e.g., movement commands).
    fn tick(&mut self, ctx: &mut C) -> Status;
}

/// Source of percentage rolls for probabilistic nodes.
///
/// Any context that evaluates a [`crate::RandomChoice`] must supply one.
pub trait Chance {
    /// Roll a d100 (1-100 inclusive).
    fn roll_d100(&mut self) -> u32;
}

impl<C, B> Behavior<C> for Box<B>
where
    B: Behavior<C> + ?Sized,
{
    #[inline]
    fn init(&mut self, ctx: &mut C) {
        (**self).init(ctx)
    }

    #[inline]
    fn tick(&mut self, ctx: &mut C) -> Status {
        (**self).tick(ctx)
    }
}
