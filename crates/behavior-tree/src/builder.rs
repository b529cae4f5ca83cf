//! Builder utilities for ergonomic behavior tree construction.
//!
//! This module provides helper functions to reduce boilerplate when building
//! behavior trees. Instead of writing verbose
//! `Node::Sequence(Sequence::new(vec![...]))`, you can use shorter functions
//! like `sequence(vec![...])`.

use crate::{Node, RandomChoice, RepeatForN, Selector, Sequence};

/// Creates a sequence node.
///
/// Shorthand for `Node::Sequence(Sequence::new(children))`.
#[inline]
pub fn sequence<L>(children: Vec<Node<L>>) -> Node<L> {
    Node::Sequence(Sequence::new(children))
}

/// Creates a selector node.
///
/// Shorthand for `Node::Selector(Selector::new(children))`.
#[inline]
pub fn selector<L>(children: Vec<Node<L>>) -> Node<L> {
    Node::Selector(Selector::new(children))
}

/// Creates a repeat decorator with a budget of `count`.
#[inline]
pub fn repeat<L>(child: Node<L>, count: i32) -> Node<L> {
    Node::RepeatForN(RepeatForN::new(child, count))
}

/// Creates a random choice taking `first` with probability `percent`%.
#[inline]
pub fn random_choice<L>(percent: u32, first: Node<L>, second: Node<L>) -> Node<L> {
    Node::RandomChoice(RandomChoice::new(percent, first, second))
}

/// Wraps a game-specific leaf.
#[inline]
pub fn leaf<L>(leaf: L) -> Node<L> {
    Node::Leaf(leaf)
}
