//! Decorator behavior nodes.
//!
//! Decorators wrap a single child behavior and modify its result or execution.
//! This module provides [`RepeatForN`], a bounded retry budget.

use crate::{Behavior, Chance, Node, Status};

/// Budget consumed by a child `Failure`, versus 1 for a child `Running`.
pub const FAILURE_PENALTY: i32 = 10;

/// Keeps ticking its child while a budget of `count` lasts.
///
/// # Semantics
///
/// - `init` refills the budget and arms the child
/// - While budget remains, child `Running` costs 1 and child `Failure` costs
///   [`FAILURE_PENALTY`]; both report `Running` (failures are tolerated but
///   exhaust the budget faster)
/// - Child `Success` reports `Success`
/// - Once the budget is spent, any non-success outcome reports `Failure`
///
/// A child that always runs therefore yields `Running` exactly `count` times
/// and `Failure` on the following tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RepeatForN<L> {
    child: Box<Node<L>>,
    count: i32,
    remaining: i32,
}

impl<L> RepeatForN<L> {
    /// Creates a new repeat decorator around the given child behavior.
    pub fn new(child: Node<L>, count: i32) -> Self {
        Self {
            child: Box::new(child),
            count,
            remaining: count,
        }
    }

    pub fn child(&self) -> &Node<L> {
        &self.child
    }

    /// Budget restored by `init`.
    pub fn count(&self) -> i32 {
        self.count
    }

    /// Budget left in the current activation; may be negative.
    pub fn remaining(&self) -> i32 {
        self.remaining
    }
}

impl<C, L> Behavior<C> for RepeatForN<L>
where
    C: Chance,
    L: Behavior<C>,
{
    fn init(&mut self, ctx: &mut C) {
        self.remaining = self.count;
        self.child.init(ctx);
    }

    fn tick(&mut self, ctx: &mut C) -> Status {
        let status = self.child.tick(ctx);

        if self.remaining > 0 {
            match status {
                Status::Running => {
                    self.remaining -= 1;
                    return Status::Running;
                }
                Status::Failure => {
                    self.remaining -= FAILURE_PENALTY;
                    return Status::Running;
                }
                Status::Success => {}
            }
        }

        if status.is_success() {
            Status::Success
        } else {
            Status::Failure
        }
    }
}
