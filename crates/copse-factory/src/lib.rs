//! Construction dispatcher for copse trees.
//!
//! Maps a [`TreeKind`] tag to a concrete variant behind the shared
//! [`Tree`] contract. Only the plain and red-black variants are backed
//! by this workspace; the remaining tags name variants it does not ship
//! and fall back to the plain tree.

use copse_bst::BinarySearchTree;
use copse_core::Tree;
use copse_rbtree::RedBlackTree;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Display;

/// Tag set accepted by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeKind {
    BTree,
    TtTree,
    Binary,
    RedBlack,
    Avl,
}

impl fmt::Display for TreeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeKind::BTree => write!(f, "b_tree"),
            TreeKind::TtTree => write!(f, "tt_tree"),
            TreeKind::Binary => write!(f, "binary"),
            TreeKind::RedBlack => write!(f, "red_black"),
            TreeKind::Avl => write!(f, "avl"),
        }
    }
}

/// Builds an empty tree of the requested kind.
pub fn create<T>(kind: TreeKind) -> Box<dyn Tree<T>>
where
    T: Ord + Clone + Display + 'static,
{
    match kind {
        TreeKind::RedBlack => Box::new(RedBlackTree::new()),
        TreeKind::Binary | TreeKind::BTree | TreeKind::TtTree | TreeKind::Avl => {
            Box::new(BinarySearchTree::new())
        }
    }
}

/// Builds a one-node tree of the requested kind around `initial`.
pub fn create_with<T>(kind: TreeKind, initial: T) -> Box<dyn Tree<T>>
where
    T: Ord + Clone + Display + 'static,
{
    match kind {
        TreeKind::RedBlack => Box::new(RedBlackTree::with_root(initial)),
        TreeKind::Binary | TreeKind::BTree | TreeKind::TtTree | TreeKind::Avl => {
            Box::new(BinarySearchTree::with_root(initial))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use copse_core::Traversal;

    fn fill_ascending(tree: &mut dyn Tree<i32>, n: i32) {
        for key in 1..=n {
            tree.insert(key).unwrap();
        }
    }

    #[test]
    fn test_create_is_empty() {
        for kind in [
            TreeKind::BTree,
            TreeKind::TtTree,
            TreeKind::Binary,
            TreeKind::RedBlack,
            TreeKind::Avl,
        ] {
            let tree = create::<i32>(kind);
            assert!(tree.is_empty(), "{kind} did not start empty");
        }
    }

    #[test]
    fn test_create_with_initial_value() {
        let tree = create_with(TreeKind::Binary, 10);
        assert_eq!(tree.len(), 1);
        assert!(tree.contains(&10));

        let tree = create_with(TreeKind::RedBlack, 10);
        assert_eq!(tree.len(), 1);
        assert!(tree.contains(&10));
    }

    #[test]
    fn test_red_black_kind_balances() {
        let mut tree = create::<i32>(TreeKind::RedBlack);
        fill_ascending(tree.as_mut(), 16);
        assert!(tree.height() < 16, "height {} is not balanced", tree.height());
    }

    #[test]
    fn test_unbacked_kinds_fall_back_to_the_plain_tree() {
        for kind in [TreeKind::BTree, TreeKind::TtTree, TreeKind::Avl] {
            let mut tree = create::<i32>(kind);
            fill_ascending(tree.as_mut(), 16);
            assert_eq!(
                tree.height(),
                16,
                "{kind} should behave like the unbalanced tree"
            );
        }
    }

    #[test]
    fn test_dispatched_trees_share_the_contract() {
        for kind in [TreeKind::Binary, TreeKind::RedBlack] {
            let mut tree = create::<i32>(kind);
            for key in [10, 9, 8, 7, 13, 11, 19] {
                tree.insert(key).unwrap();
            }
            assert_eq!(tree.len(), 7);
            assert_eq!(tree.text(Traversal::Inorder), "7 8 9 10 11 13 19 ");
            tree.erase(&13).unwrap();
            assert_eq!(tree.len(), 6);
            assert!(!tree.contains(&13));
        }
    }

    #[test]
    fn test_kind_serde_tags() {
        assert_eq!(
            serde_json::to_string(&TreeKind::RedBlack).unwrap(),
            "\"red_black\""
        );
        let kind: TreeKind = serde_json::from_str("\"b_tree\"").unwrap();
        assert_eq!(kind, TreeKind::BTree);
    }
}
