//! Composite behavior nodes.
//!
//! Composite nodes control the execution flow of multiple child behaviors.
//! Each keeps a cursor to its active child so evaluation can resume on the
//! next tick: [`Sequence`] (AND logic), [`Selector`] (OR logic) and
//! [`RandomChoice`] (weighted coin flip between two branches).

use crate::{Behavior, Chance, Node, Status};

/// Executes child behaviors in order, one step per tick.
///
/// # Semantics
///
/// - `init` activates child 0
/// - The active child is ticked; on `Success` the cursor advances and the next
///   child is armed, returning `Running`, or `Success` if no children remain
/// - `Failure` and `Running` from the active child propagate unchanged, and
///   the cursor stays put so the same child is resumed next tick
///
/// A cursor equal to the child count marks the sequence as complete.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sequence<L> {
    children: Vec<Node<L>>,
    cursor: usize,
}

impl<L> Sequence<L> {
    /// Creates a new sequence with the given child behaviors.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty. A sequence with no children is
    /// meaningless and likely indicates a programming error.
    pub fn new(children: Vec<Node<L>>) -> Self {
        assert!(
            !children.is_empty(),
            "Sequence must have at least one child"
        );
        Self {
            children,
            cursor: 0,
        }
    }

    pub fn children(&self) -> &[Node<L>] {
        &self.children
    }

    /// Index of the active child.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_complete(&self) -> bool {
        self.cursor == self.children.len()
    }
}

impl<C, L> Behavior<C> for Sequence<L>
where
    C: Chance,
    L: Behavior<C>,
{
    fn init(&mut self, ctx: &mut C) {
        self.cursor = 0;
        self.children[0].init(ctx);
    }

    fn tick(&mut self, ctx: &mut C) -> Status {
        assert!(
            self.cursor < self.children.len(),
            "Sequence ticked with cursor {} of {} children",
            self.cursor,
            self.children.len()
        );

        match self.children[self.cursor].tick(ctx) {
            Status::Success => {
                self.cursor += 1;
                match self.children.get_mut(self.cursor) {
                    Some(next) => {
                        next.init(ctx);
                        Status::Running
                    }
                    None => Status::Success,
                }
            }
            other => other,
        }
    }
}

/// Tries child behaviors in order, one step per tick, until one succeeds.
///
/// # Semantics
///
/// - `init` activates child 0
/// - `Success` from the active child returns `Success` immediately
/// - `Failure` advances the cursor, arms the next child and returns `Running`
/// - `Running` returns `Running`
///
/// There is no "all children failed" outcome: after the last child fails the
/// selector still reports `Running` with its cursor at the child count, and
/// ticking it again is an assertion failure. Well-formed trees end every
/// selector with a child that cannot fail.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selector<L> {
    children: Vec<Node<L>>,
    cursor: usize,
}

impl<L> Selector<L> {
    /// Creates a new selector with the given child behaviors.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty. A selector with no children is
    /// meaningless and likely indicates a programming error.
    pub fn new(children: Vec<Node<L>>) -> Self {
        assert!(
            !children.is_empty(),
            "Selector must have at least one child"
        );
        Self {
            children,
            cursor: 0,
        }
    }

    pub fn children(&self) -> &[Node<L>] {
        &self.children
    }

    /// Index of the active child.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor == self.children.len()
    }
}

impl<C, L> Behavior<C> for Selector<L>
where
    C: Chance,
    L: Behavior<C>,
{
    fn init(&mut self, ctx: &mut C) {
        self.cursor = 0;
        self.children[0].init(ctx);
    }

    fn tick(&mut self, ctx: &mut C) -> Status {
        assert!(
            self.cursor < self.children.len(),
            "Selector ticked with cursor {} of {} children",
            self.cursor,
            self.children.len()
        );

        match self.children[self.cursor].tick(ctx) {
            Status::Success => Status::Success,
            Status::Failure => {
                self.cursor += 1;
                if let Some(next) = self.children.get_mut(self.cursor) {
                    next.init(ctx);
                }
                Status::Running
            }
            Status::Running => Status::Running,
        }
    }
}

/// Which branch a [`RandomChoice`] committed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Branch {
    First,
    Second,
}

/// Picks one of two branches at `init` and sticks with it until it succeeds.
///
/// # Semantics
///
/// - `init` rolls a d100; a roll `<= percent` selects `first`, otherwise
///   `second`, and the selected branch is armed
/// - `Success` from the selected branch returns `Success`
/// - Any other outcome returns `Running`, so this node never fails
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RandomChoice<L> {
    percent: u32,
    first: Box<Node<L>>,
    second: Box<Node<L>>,
    chosen: Option<Branch>,
}

impl<L> RandomChoice<L> {
    /// Creates a new random choice taking `first` with probability `percent`%.
    ///
    /// # Panics
    ///
    /// Panics if `percent` exceeds 100.
    pub fn new(percent: u32, first: Node<L>, second: Node<L>) -> Self {
        assert!(percent <= 100, "RandomChoice percent must be within 0..=100");
        Self {
            percent,
            first: Box::new(first),
            second: Box::new(second),
            chosen: None,
        }
    }

    pub fn percent(&self) -> u32 {
        self.percent
    }

    pub fn first(&self) -> &Node<L> {
        &self.first
    }

    pub fn second(&self) -> &Node<L> {
        &self.second
    }

    /// The branch selected by the last `init`, if any.
    pub fn chosen(&self) -> Option<Branch> {
        self.chosen
    }

    fn branch_mut(&mut self, branch: Branch) -> &mut Node<L> {
        match branch {
            Branch::First => &mut self.first,
            Branch::Second => &mut self.second,
        }
    }
}

impl<C, L> Behavior<C> for RandomChoice<L>
where
    C: Chance,
    L: Behavior<C>,
{
    fn init(&mut self, ctx: &mut C) {
        let branch = if ctx.roll_d100() <= self.percent {
            Branch::First
        } else {
            Branch::Second
        };
        self.chosen = Some(branch);
        self.branch_mut(branch).init(ctx);
    }

    fn tick(&mut self, ctx: &mut C) -> Status {
        let Some(branch) = self.chosen else {
            panic!("RandomChoice ticked before init");
        };

        match self.branch_mut(branch).tick(ctx) {
            Status::Success => Status::Success,
            _ => Status::Running,
        }
    }
}
