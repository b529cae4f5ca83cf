//! The closed set of node variants.
//!
//! A tree is a `Node<L>`: composites and decorators are provided by this
//! crate, while `L` is the game's own leaf enum. Keeping the set closed lets
//! serialization resolve every type tag at compile time.

use crate::composite::{Branch, RandomChoice, Selector, Sequence};
use crate::decorator::RepeatForN;
use crate::{Behavior, Chance, Status, TreeError};

/// A behavior tree node.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Node<L> {
    Sequence(Sequence<L>),
    Selector(Selector<L>),
    RepeatForN(RepeatForN<L>),
    RandomChoice(RandomChoice<L>),
    Leaf(L),
}

impl<L> Node<L> {
    /// Type tag used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Sequence(_) => "Sequence",
            Node::Selector(_) => "Selector",
            Node::RepeatForN(_) => "RepeatForN",
            Node::RandomChoice(_) => "RandomChoice",
            Node::Leaf(_) => "Leaf",
        }
    }

    /// Returns the leaf payload, if this node is a leaf.
    pub fn as_leaf(&self) -> Option<&L> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            _ => None,
        }
    }

    /// Checks the structural invariants of this subtree.
    ///
    /// Trees built with [`crate::builder`] always pass. Trees restored from
    /// external records must be validated before they are ticked: a failure
    /// here means the record is malformed and must not be resumed.
    pub fn validate(&self) -> Result<(), TreeError> {
        match self {
            Node::Sequence(node) => {
                check_cursor("Sequence", node.cursor(), node.children().len())?;
                node.children().iter().try_for_each(Node::validate)
            }
            Node::Selector(node) => {
                check_cursor("Selector", node.cursor(), node.children().len())?;
                node.children().iter().try_for_each(Node::validate)
            }
            Node::RepeatForN(node) => node.child().validate(),
            Node::RandomChoice(node) => {
                if node.percent() > 100 {
                    return Err(TreeError::InvalidPercent(node.percent()));
                }
                node.first().validate()?;
                node.second().validate()
            }
            Node::Leaf(_) => Ok(()),
        }
    }

    /// Checks that this subtree can be ticked without a fresh `init`.
    ///
    /// Runs [`Node::validate`], then walks the active path: every composite
    /// on it must have a child left to tick and every random choice on it
    /// must have rolled a branch. Use this for trees restored as armed.
    pub fn validate_armed(&self) -> Result<(), TreeError> {
        self.validate()?;
        self.check_active_path()
    }

    fn check_active_path(&self) -> Result<(), TreeError> {
        match self {
            Node::Sequence(node) => active_child("Sequence", node.children(), node.cursor()),
            Node::Selector(node) => active_child("Selector", node.children(), node.cursor()),
            Node::RepeatForN(node) => node.child().check_active_path(),
            Node::RandomChoice(node) => match node.chosen() {
                Some(Branch::First) => node.first().check_active_path(),
                Some(Branch::Second) => node.second().check_active_path(),
                None => Err(TreeError::Unrolled),
            },
            Node::Leaf(_) => Ok(()),
        }
    }

    /// Visits every leaf in depth-first order.
    pub fn for_each_leaf<'a>(&'a self, visit: &mut impl FnMut(&'a L)) {
        match self {
            Node::Sequence(node) => node.children().iter().for_each(|c| c.for_each_leaf(visit)),
            Node::Selector(node) => node.children().iter().for_each(|c| c.for_each_leaf(visit)),
            Node::RepeatForN(node) => node.child().for_each_leaf(visit),
            Node::RandomChoice(node) => {
                node.first().for_each_leaf(visit);
                node.second().for_each_leaf(visit);
            }
            Node::Leaf(leaf) => visit(leaf),
        }
    }
}

fn check_cursor(kind: &'static str, cursor: usize, len: usize) -> Result<(), TreeError> {
    if len == 0 {
        return Err(TreeError::EmptyComposite { kind });
    }
    if cursor > len {
        return Err(TreeError::CursorOutOfBounds { kind, cursor, len });
    }
    Ok(())
}

fn active_child<L>(
    kind: &'static str,
    children: &[Node<L>],
    cursor: usize,
) -> Result<(), TreeError> {
    match children.get(cursor) {
        Some(child) => child.check_active_path(),
        None => Err(TreeError::Finished {
            kind,
            len: children.len(),
        }),
    }
}

impl<C, L> Behavior<C> for Node<L>
where
    C: Chance,
    L: Behavior<C>,
{
    fn init(&mut self, ctx: &mut C) {
        match self {
            Node::Sequence(node) => node.init(ctx),
            Node::Selector(node) => node.init(ctx),
            Node::RepeatForN(node) => node.init(ctx),
            Node::RandomChoice(node) => node.init(ctx),
            Node::Leaf(leaf) => leaf.init(ctx),
        }
    }

    fn tick(&mut self, ctx: &mut C) -> Status {
        match self {
            Node::Sequence(node) => node.tick(ctx),
            Node::Selector(node) => node.tick(ctx),
            Node::RepeatForN(node) => node.tick(ctx),
            Node::RandomChoice(node) => node.tick(ctx),
            Node::Leaf(leaf) => leaf.tick(ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{leaf, random_choice, repeat, selector, sequence};

    #[derive(Clone, Debug, PartialEq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    enum TestLeaf {
        Succeed,
        Fail,
    }

    struct NoDice;
    impl Chance for NoDice {
        fn roll_d100(&mut self) -> u32 {
            1
        }
    }

    impl Behavior<NoDice> for TestLeaf {
        fn tick(&mut self, _ctx: &mut NoDice) -> Status {
            match self {
                TestLeaf::Succeed => Status::Success,
                TestLeaf::Fail => Status::Failure,
            }
        }
    }

    fn sample_tree() -> Node<TestLeaf> {
        repeat(
            selector(vec![
                sequence(vec![leaf(TestLeaf::Fail), leaf(TestLeaf::Succeed)]),
                random_choice(40, leaf(TestLeaf::Succeed), leaf(TestLeaf::Fail)),
            ]),
            5,
        )
    }

    #[test]
    fn builder_trees_validate() {
        assert_eq!(sample_tree().validate(), Ok(()));
    }

    #[test]
    fn collects_leaves_in_depth_first_order() {
        let tree = sample_tree();
        let mut seen = Vec::new();
        tree.for_each_leaf(&mut |leaf| seen.push(leaf.clone()));
        assert_eq!(
            seen,
            vec![TestLeaf::Fail, TestLeaf::Succeed, TestLeaf::Succeed, TestLeaf::Fail]
        );
    }

    #[test]
    fn kind_reports_type_tag() {
        assert_eq!(sample_tree().kind(), "RepeatForN");
        assert_eq!(leaf::<TestLeaf>(TestLeaf::Fail).kind(), "Leaf");
    }

    #[test]
    fn armed_tree_passes_armed_check() {
        let mut tree = sample_tree();
        tree.init(&mut NoDice);
        assert_eq!(tree.validate_armed(), Ok(()));
        // Sequence fails, selector moves on to the random choice it just armed.
        assert_eq!(tree.tick(&mut NoDice), Status::Running);
        assert_eq!(tree.validate_armed(), Ok(()));
    }

    #[test]
    fn unrolled_choice_on_active_path_is_not_armed() {
        let tree: Node<TestLeaf> = random_choice(50, leaf(TestLeaf::Succeed), leaf(TestLeaf::Fail));
        assert_eq!(tree.validate(), Ok(()));
        assert_eq!(tree.validate_armed(), Err(TreeError::Unrolled));
    }

    #[test]
    fn unrolled_choice_off_active_path_is_ignored() {
        let mut tree: Node<TestLeaf> = sequence(vec![
            leaf(TestLeaf::Succeed),
            random_choice(50, leaf(TestLeaf::Succeed), leaf(TestLeaf::Fail)),
        ]);
        tree.init(&mut NoDice);
        assert_eq!(tree.validate_armed(), Ok(()));
    }

    #[test]
    fn finished_sequence_is_not_armed() {
        let mut tree: Node<TestLeaf> = sequence(vec![leaf(TestLeaf::Succeed)]);
        tree.init(&mut NoDice);
        assert_eq!(tree.tick(&mut NoDice), Status::Success);

        assert_eq!(tree.validate(), Ok(()));
        assert_eq!(
            tree.validate_armed(),
            Err(TreeError::Finished {
                kind: "Sequence",
                len: 1
            })
        );
    }

    #[cfg(feature = "serde")]
    mod serde_records {
        use super::*;

        #[test]
        fn round_trip_preserves_in_progress_state() {
            let mut tree = sample_tree();
            let mut ctx = NoDice;
            tree.init(&mut ctx);
            // Sequence fails, selector advances to the random choice.
            assert_eq!(tree.tick(&mut ctx), Status::Running);

            let record = serde_json::to_value(&tree).unwrap();
            let restored: Node<TestLeaf> = serde_json::from_value(record.clone()).unwrap();
            assert_eq!(restored, tree);
            assert_eq!(serde_json::to_value(&restored).unwrap(), record);
        }

        #[test]
        fn unknown_type_tag_is_rejected() {
            let record = serde_json::json!({ "Parallel": { "children": [] } });
            assert!(serde_json::from_value::<Node<TestLeaf>>(record).is_err());
        }

        #[test]
        fn missing_field_is_rejected() {
            let record = serde_json::json!({ "Sequence": { "children": [{ "Leaf": "Fail" }] } });
            assert!(serde_json::from_value::<Node<TestLeaf>>(record).is_err());
        }

        #[test]
        fn out_of_range_cursor_fails_validation() {
            let record = serde_json::json!({
                "Selector": { "children": [{ "Leaf": "Fail" }], "cursor": 3 }
            });
            let node: Node<TestLeaf> = serde_json::from_value(record).unwrap();
            assert_eq!(
                node.validate(),
                Err(TreeError::CursorOutOfBounds {
                    kind: "Selector",
                    cursor: 3,
                    len: 1
                })
            );
        }

        #[test]
        fn empty_composite_fails_validation() {
            let record = serde_json::json!({ "Sequence": { "children": [], "cursor": 0 } });
            let node: Node<TestLeaf> = serde_json::from_value(record).unwrap();
            assert_eq!(
                node.validate(),
                Err(TreeError::EmptyComposite { kind: "Sequence" })
            );
        }
    }
}
