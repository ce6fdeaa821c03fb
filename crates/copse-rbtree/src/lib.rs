//! Red-black tree for copse.
//!
//! A colored binary search tree over the shared node arena. Insert
//! attaches a red node at the usual position and walks upward recoloring
//! and rotating until the structural invariants hold again: every node
//! red or black, the root black, no red node with a red child, and a
//! uniform black-height along every path to an empty child. Erase
//! splices the node out transplant-style and repairs black-heights with
//! the double-black fixup.
//!
//! Rotations relink a constant number of indices; the parent-side relink
//! must find the rotated node among its recorded parent's children and
//! reports [`TreeError::NotChildOfParent`] when it cannot. That failure
//! means the linkage is already corrupt and is propagated, never
//! retried.

use copse_core::{engine, Color, Node, NodeArena, NodeId, Traversal, Tree, TreeError};
use copse_observe::{NullObserver, TreeEvent, TreeObserver};
use copse_render::{render, TreeSource};
use std::cmp::Ordering;
use std::fmt::Display;
use std::sync::Arc;

/// Self-balancing binary search tree with red-black coloring.
pub struct RedBlackTree<T> {
    arena: NodeArena<T>,
    root: Option<NodeId>,
    len: usize,
    observer: Arc<dyn TreeObserver>,
}

impl<T: Ord> RedBlackTree<T> {
    pub fn new() -> Self {
        Self {
            arena: NodeArena::new(),
            root: None,
            len: 0,
            observer: Arc::new(NullObserver),
        }
    }

    /// Builds a one-node tree around `initial`. The root is black from
    /// the start.
    pub fn with_root(initial: T) -> Self {
        let mut tree = Self::new();
        tree.root = Some(
            tree.arena
                .alloc(Node::with_color(initial, Color::Black, None)),
        );
        tree.len = 1;
        tree
    }

    /// Replaces the event sink. Observers are diagnostics only and never
    /// influence the structure.
    pub fn with_observer(mut self, observer: Arc<dyn TreeObserver>) -> Self {
        self.observer = observer;
        self
    }

    fn find(&self, key: &T) -> Option<NodeId> {
        let mut cur = self.root;
        while let Some(id) = cur {
            cur = match key.cmp(&self.arena[id].value) {
                Ordering::Equal => return Some(id),
                Ordering::Less => self.arena[id].left,
                Ordering::Greater => self.arena[id].right,
            };
        }
        None
    }

    fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.arena[id].left {
            id = left;
        }
        id
    }

    /// Empty positions count as black.
    fn is_black(&self, node: Option<NodeId>) -> bool {
        !self.is_red(node)
    }

    fn is_red(&self, node: Option<NodeId>) -> bool {
        node.is_some_and(|id| self.arena[id].color == Color::Red)
    }

    fn set_color(&mut self, node: Option<NodeId>, color: Color) {
        if let Some(id) = node {
            self.arena[id].color = color;
        }
    }

    /// Points the child slot of `parent` that currently holds `old` at
    /// `new` instead, or replaces the root when `parent` is absent, and
    /// restores `new`'s parent back-reference. Not finding `old` under
    /// `parent` means the linkage has already diverged.
    fn replace_child(
        &mut self,
        parent: Option<NodeId>,
        old: NodeId,
        new: Option<NodeId>,
    ) -> Result<(), TreeError> {
        match parent {
            None => self.root = new,
            Some(p) => {
                if self.arena[p].left == Some(old) {
                    self.arena[p].left = new;
                } else if self.arena[p].right == Some(old) {
                    self.arena[p].right = new;
                } else {
                    return Err(TreeError::NotChildOfParent);
                }
            }
        }
        if let Some(n) = new {
            self.arena[n].parent = parent;
        }
        Ok(())
    }

    /// Replaces the subtree rooted at `old` with the subtree rooted at
    /// `new` in `old`'s parent.
    fn transplant(&mut self, old: NodeId, new: Option<NodeId>) -> Result<(), TreeError> {
        let parent = self.arena[old].parent;
        self.replace_child(parent, old, new)
    }

    /// Left rotation at `node`: its right child is promoted into its
    /// position and `node` becomes that child's left subtree. Touches a
    /// constant number of links; never walks the subtrees.
    fn rotate_left(&mut self, node: NodeId) -> Result<(), TreeError> {
        let parent = self.arena[node].parent;
        let pivot = self.arena[node].right.ok_or(TreeError::MissingPivot)?;

        let inner = self.arena[pivot].left;
        self.arena[node].right = inner;
        if let Some(i) = inner {
            self.arena[i].parent = Some(node);
        }

        self.arena[pivot].left = Some(node);
        self.arena[node].parent = Some(pivot);

        self.replace_child(parent, node, Some(pivot))
    }

    /// Mirror image of [`Self::rotate_left`].
    fn rotate_right(&mut self, node: NodeId) -> Result<(), TreeError> {
        let parent = self.arena[node].parent;
        let pivot = self.arena[node].left.ok_or(TreeError::MissingPivot)?;

        let inner = self.arena[pivot].right;
        self.arena[node].left = inner;
        if let Some(i) = inner {
            self.arena[i].parent = Some(node);
        }

        self.arena[pivot].right = Some(node);
        self.arena[node].parent = Some(pivot);

        self.replace_child(parent, node, Some(pivot))
    }

    /// BST descent; attaches and returns a fresh red node (black when it
    /// becomes the root), or `None` when the key is already present.
    fn attach(&mut self, value: T) -> Option<NodeId> {
        let mut cur = self.root;
        let mut parent = None;
        let mut to_left = false;

        while let Some(id) = cur {
            match value.cmp(&self.arena[id].value) {
                Ordering::Equal => return None,
                Ordering::Less => {
                    parent = Some(id);
                    to_left = true;
                    cur = self.arena[id].left;
                }
                Ordering::Greater => {
                    parent = Some(id);
                    to_left = false;
                    cur = self.arena[id].right;
                }
            }
        }

        let color = if parent.is_none() {
            Color::Black
        } else {
            Color::Red
        };
        let id = self.arena.alloc(Node::with_color(value, color, parent));

        match parent {
            None => self.root = Some(id),
            Some(p) if to_left => self.arena[p].left = Some(id),
            Some(p) => self.arena[p].right = Some(id),
        }
        Some(id)
    }

    fn uncle_of(&self, parent: NodeId, grand: NodeId) -> Result<Option<NodeId>, TreeError> {
        if self.arena[grand].left == Some(parent) {
            Ok(self.arena[grand].right)
        } else if self.arena[grand].right == Some(parent) {
            Ok(self.arena[grand].left)
        } else {
            Err(TreeError::NotChildOfParent)
        }
    }

    /// Restores the invariants upward from a freshly attached red node.
    /// Terminates at the root or at the first definitively resolved
    /// case; the red-uncle case recurses at the grandparent, which may
    /// now clash with its own parent.
    fn fix_insert(&mut self, node: NodeId) -> Result<(), TreeError> {
        let Some(parent) = self.arena[node].parent else {
            self.arena[node].color = Color::Black;
            return Ok(());
        };

        if self.arena[parent].color == Color::Black {
            return Ok(());
        }

        // Parent is red from here on.
        let Some(grand) = self.arena[parent].parent else {
            // Red parent at the root: recolor and stop.
            self.arena[parent].color = Color::Black;
            return Ok(());
        };

        let uncle = self.uncle_of(parent, grand)?;
        if self.is_red(uncle) {
            self.set_color(uncle, Color::Black);
            self.arena[parent].color = Color::Black;
            self.arena[grand].color = Color::Red;
            return self.fix_insert(grand);
        }

        if self.arena[grand].left == Some(parent) {
            let mut top = parent;
            if self.arena[parent].right == Some(node) {
                // Inner grandchild: rotate it into the outer form first.
                self.rotate_left(parent)?;
                top = node;
            }
            self.rotate_right(grand)?;
            self.arena[top].color = Color::Black;
            self.arena[grand].color = Color::Red;
        } else {
            let mut top = parent;
            if self.arena[parent].left == Some(node) {
                self.rotate_right(parent)?;
                top = node;
            }
            self.rotate_left(grand)?;
            self.arena[top].color = Color::Black;
            self.arena[grand].color = Color::Red;
        }
        Ok(())
    }

    /// Splices `node` out. A node with at most one child is replaced by
    /// that child; a node with two children by its in-order successor,
    /// which inherits its color. When the spliced-out position loses a
    /// black node the double-black fixup repairs the black-heights.
    fn detach(&mut self, node: NodeId) -> Result<(), TreeError> {
        let left = self.arena[node].left;
        let right = self.arena[node].right;

        let (lost_black, fix_child, fix_parent) = match (left, right) {
            (None, _) => {
                let parent = self.arena[node].parent;
                self.transplant(node, right)?;
                (self.arena[node].color == Color::Black, right, parent)
            }
            (_, None) => {
                let parent = self.arena[node].parent;
                self.transplant(node, left)?;
                (self.arena[node].color == Color::Black, left, parent)
            }
            (Some(l), Some(r)) => {
                let successor = self.leftmost(r);
                let successor_color = self.arena[successor].color;
                let fix_child = self.arena[successor].right;
                let fix_parent;

                if self.arena[successor].parent == Some(node) {
                    fix_parent = Some(successor);
                } else {
                    fix_parent = self.arena[successor].parent;
                    self.transplant(successor, fix_child)?;
                    self.arena[successor].right = Some(r);
                    self.arena[r].parent = Some(successor);
                }

                self.transplant(node, Some(successor))?;
                self.arena[successor].left = Some(l);
                self.arena[l].parent = Some(successor);
                let color = self.arena[node].color;
                self.arena[successor].color = color;

                (successor_color == Color::Black, fix_child, fix_parent)
            }
        };

        self.arena.remove(node);

        if lost_black {
            self.fix_delete(fix_child, fix_parent)?;
        }
        Ok(())
    }

    /// Double-black repair. `node` is the subtree that took the spliced
    /// position (possibly empty) and `parent` the node above that
    /// position. Walks upward until the extra black is absorbed by a red
    /// node, reshuffled away through the sibling, or reaches the root.
    fn fix_delete(
        &mut self,
        mut node: Option<NodeId>,
        mut parent: Option<NodeId>,
    ) -> Result<(), TreeError> {
        while node != self.root && self.is_black(node) {
            if let Some(n) = node {
                parent = self.arena[n].parent;
            }
            let Some(p) = parent else { break };

            if self.arena[p].left == node {
                let mut sibling = self.arena[p].right.ok_or(TreeError::MissingSibling)?;

                if self.arena[sibling].color == Color::Red {
                    // Red sibling: rotate it up to expose a black one.
                    self.arena[sibling].color = Color::Black;
                    self.arena[p].color = Color::Red;
                    self.rotate_left(p)?;
                    sibling = self.arena[p].right.ok_or(TreeError::MissingSibling)?;
                }

                let near = self.arena[sibling].left;
                let far = self.arena[sibling].right;
                if self.is_black(near) && self.is_black(far) {
                    // Both nephews black: push the extra black upward.
                    self.arena[sibling].color = Color::Red;
                    node = Some(p);
                    parent = self.arena[p].parent;
                } else {
                    if self.is_black(far) {
                        // Near nephew red: rotate it into the far slot.
                        self.set_color(near, Color::Black);
                        self.arena[sibling].color = Color::Red;
                        self.rotate_right(sibling)?;
                        sibling = self.arena[p].right.ok_or(TreeError::MissingSibling)?;
                    }
                    let parent_color = self.arena[p].color;
                    self.arena[sibling].color = parent_color;
                    self.arena[p].color = Color::Black;
                    let far = self.arena[sibling].right;
                    self.set_color(far, Color::Black);
                    self.rotate_left(p)?;
                    node = self.root;
                }
            } else if self.arena[p].right == node {
                let mut sibling = self.arena[p].left.ok_or(TreeError::MissingSibling)?;

                if self.arena[sibling].color == Color::Red {
                    self.arena[sibling].color = Color::Black;
                    self.arena[p].color = Color::Red;
                    self.rotate_right(p)?;
                    sibling = self.arena[p].left.ok_or(TreeError::MissingSibling)?;
                }

                let near = self.arena[sibling].right;
                let far = self.arena[sibling].left;
                if self.is_black(near) && self.is_black(far) {
                    self.arena[sibling].color = Color::Red;
                    node = Some(p);
                    parent = self.arena[p].parent;
                } else {
                    if self.is_black(far) {
                        self.set_color(near, Color::Black);
                        self.arena[sibling].color = Color::Red;
                        self.rotate_left(sibling)?;
                        sibling = self.arena[p].left.ok_or(TreeError::MissingSibling)?;
                    }
                    let parent_color = self.arena[p].color;
                    self.arena[sibling].color = parent_color;
                    self.arena[p].color = Color::Black;
                    let far = self.arena[sibling].left;
                    self.set_color(far, Color::Black);
                    self.rotate_right(p)?;
                    node = self.root;
                }
            } else {
                return Err(TreeError::NotChildOfParent);
            }
        }

        self.set_color(node, Color::Black);
        Ok(())
    }
}

impl<T: Ord> Default for RedBlackTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone + Display> Tree<T> for RedBlackTree<T> {
    fn contains(&self, key: &T) -> bool {
        engine::contains(&self.arena, self.root, key)
    }

    fn insert(&mut self, value: T) -> Result<(), TreeError> {
        let rendered = value.to_string();
        match self.attach(value) {
            Some(id) => {
                self.fix_insert(id)?;
                self.len += 1;
                self.observer.on_event(&TreeEvent::inserted(rendered));
            }
            None => self.observer.on_event(&TreeEvent::duplicate(rendered)),
        }
        Ok(())
    }

    fn erase(&mut self, key: &T) -> Result<(), TreeError> {
        match self.find(key) {
            Some(id) => {
                self.detach(id)?;
                self.len -= 1;
                self.observer.on_event(&TreeEvent::removed(key.to_string()));
            }
            None => self.observer.on_event(&TreeEvent::missing(key.to_string())),
        }
        Ok(())
    }

    fn clear(&mut self) {
        let dropped = self.len;
        self.arena.clear();
        self.root = None;
        self.len = 0;
        self.observer.on_event(&TreeEvent::cleared(dropped));
    }

    fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    fn len(&self) -> usize {
        self.len
    }

    fn height(&self) -> usize {
        engine::height(&self.arena, self.root)
    }

    fn elements(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len);
        engine::collect_elements(&self.arena, self.root, &mut out);
        out
    }

    fn text(&self, traversal: Traversal) -> String {
        let mut out = String::new();
        engine::write_traversal(&self.arena, self.root, traversal, &mut out);
        out
    }

    fn pretty(&self) -> String {
        render(self)
    }
}

impl<T: Display> TreeSource for RedBlackTree<T> {
    type Id = NodeId;

    fn root(&self) -> Option<NodeId> {
        self.root
    }

    fn left(&self, id: NodeId) -> Option<NodeId> {
        self.arena[id].left
    }

    fn right(&self, id: NodeId) -> Option<NodeId> {
        self.arena[id].right
    }

    fn label(&self, id: NodeId) -> String {
        format!("{} {}", self.arena[id].value, self.arena[id].color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use copse_observe::{Outcome, RecordingObserver, Severity};
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    /// Checks every structural invariant at once: parent back-links,
    /// ordering, black root, no red-red edge, uniform black-height, and
    /// the length counter.
    fn assert_valid(tree: &RedBlackTree<i32>) {
        if let Some(root) = tree.root {
            assert!(tree.arena[root].parent.is_none(), "root has a parent");
            assert_eq!(tree.arena[root].color, Color::Black, "root is not black");
        }
        let black_height = check_subtree(tree, tree.root, None, None);
        assert!(black_height.is_some(), "black-height differs between paths");

        let mut inorder = Vec::new();
        collect_inorder(tree, tree.root, &mut inorder);
        assert!(inorder.is_sorted(), "ordering invariant violated");
        assert_eq!(inorder.len(), tree.len(), "length counter drifted");
    }

    /// Returns the black-height of the subtree, or `None` when any
    /// invariant fails below `node`.
    fn check_subtree(
        tree: &RedBlackTree<i32>,
        node: Option<NodeId>,
        min: Option<i32>,
        max: Option<i32>,
    ) -> Option<usize> {
        let Some(id) = node else { return Some(1) };
        let n = &tree.arena[id];

        if min.is_some_and(|m| n.value <= m) || max.is_some_and(|m| n.value >= m) {
            return None;
        }
        if n.color == Color::Red && (tree.is_red(n.left) || tree.is_red(n.right)) {
            return None;
        }
        for child in [n.left, n.right] {
            if let Some(c) = child {
                if tree.arena[c].parent != Some(id) {
                    return None;
                }
            }
        }

        let left = check_subtree(tree, n.left, min, Some(n.value))?;
        let right = check_subtree(tree, n.right, Some(n.value), max)?;
        if left != right {
            return None;
        }
        Some(left + usize::from(n.color == Color::Black))
    }

    fn collect_inorder(tree: &RedBlackTree<i32>, node: Option<NodeId>, out: &mut Vec<i32>) {
        if let Some(id) = node {
            collect_inorder(tree, tree.arena[id].left, out);
            out.push(tree.arena[id].value);
            collect_inorder(tree, tree.arena[id].right, out);
        }
    }

    fn tree_of(keys: &[i32]) -> RedBlackTree<i32> {
        let mut tree = RedBlackTree::new();
        for &key in keys {
            tree.insert(key).unwrap();
        }
        tree
    }

    fn as_set(tree: &RedBlackTree<i32>) -> BTreeSet<i32> {
        tree.elements().into_iter().collect()
    }

    #[test]
    fn test_new_tree_is_empty() {
        let tree: RedBlackTree<i32> = RedBlackTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), 0);
    }

    #[test]
    fn test_with_root_is_black() {
        let tree = RedBlackTree::with_root(17);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.height(), 1);
        assert_valid(&tree);
    }

    #[test]
    fn test_invariants_hold_after_every_insert() {
        let mut tree = RedBlackTree::new();
        for key in [10, 9, 8, 7, 13, 11, 19] {
            tree.insert(key).unwrap();
            assert_valid(&tree);
        }
        assert_eq!(tree.len(), 7);
    }

    #[test]
    fn test_duplicate_insert_is_a_no_op() {
        let mut tree = tree_of(&[10, 9, 8, 7, 13, 11, 19]);
        let height_before = tree.height();

        tree.insert(7).unwrap();

        assert_eq!(tree.len(), 7);
        assert_eq!(tree.height(), height_before);
        assert_valid(&tree);
    }

    #[test]
    fn test_outer_grandchild_rebalance() {
        let mut tree = tree_of(&[17, 9, 19, 71]);

        tree.insert(171).unwrap();

        assert_eq!(tree.height(), 3);
        assert_eq!(as_set(&tree), BTreeSet::from([9, 17, 19, 71, 171]));
        assert_valid(&tree);
    }

    #[test]
    fn test_inner_grandchild_rebalance_left_right() {
        // 7 lands as the right child of left-child 5: double rotation.
        let mut tree = tree_of(&[10, 5]);
        tree.insert(7).unwrap();

        assert_eq!(tree.height(), 2);
        assert_eq!(tree.text(Traversal::Inorder), "5 7 10 ");
        assert_valid(&tree);
    }

    #[test]
    fn test_inner_grandchild_rebalance_right_left() {
        // Mirror image: 12 lands as the left child of right-child 15.
        let mut tree = tree_of(&[10, 15]);
        tree.insert(12).unwrap();

        assert_eq!(tree.height(), 2);
        assert_eq!(tree.text(Traversal::Inorder), "10 12 15 ");
        assert_valid(&tree);
    }

    #[test]
    fn test_red_uncle_recolor_cascades_to_root() {
        let mut tree = tree_of(&[17, 9, 19]);
        tree.insert(71).unwrap();
        assert_valid(&tree);
        assert_eq!(tree.height(), 3);
    }

    #[test]
    fn test_ascending_inserts_stay_balanced() {
        let mut tree = RedBlackTree::new();
        for key in 1..=64 {
            tree.insert(key).unwrap();
        }
        assert_valid(&tree);
        // 2 * log2(n + 1) for n = 64
        assert!(tree.height() <= 12, "height {} too large", tree.height());
    }

    #[test]
    fn test_text_is_sorted_inorder() {
        let tree = tree_of(&[17, 9, 19, 71, 171]);
        assert_eq!(tree.text(Traversal::Inorder), "9 17 19 71 171 ");
    }

    #[test]
    fn test_contains() {
        let tree = tree_of(&[17, 9, 19, 71, 171]);
        assert!(tree.contains(&71));
        assert!(!tree.contains(&70));
    }

    #[test]
    fn test_erase_leaf() {
        let mut tree = tree_of(&[17, 9, 19, 71]);

        tree.erase(&71).unwrap();

        assert_eq!(tree.len(), 3);
        assert!(!tree.contains(&71));
        assert_valid(&tree);
    }

    #[test]
    fn test_erase_node_with_one_child() {
        let mut tree = tree_of(&[17, 9, 19, 71]);

        tree.erase(&19).unwrap();

        assert_eq!(as_set(&tree), BTreeSet::from([9, 17, 71]));
        assert_valid(&tree);
    }

    #[test]
    fn test_erase_node_with_two_children() {
        let mut tree = tree_of(&[17, 9, 19, 71, 171, 3, 12]);

        tree.erase(&9).unwrap();

        assert_eq!(as_set(&tree), BTreeSet::from([3, 12, 17, 19, 71, 171]));
        assert_valid(&tree);
    }

    #[test]
    fn test_erase_root() {
        let mut tree = tree_of(&[17, 9, 19, 71, 171]);

        tree.erase(&17).unwrap();

        assert!(!tree.contains(&17));
        assert_eq!(tree.len(), 4);
        assert_valid(&tree);
    }

    #[test]
    fn test_erase_absent_key_is_a_no_op() {
        let mut tree = tree_of(&[17, 9, 19]);

        tree.erase(&100).unwrap();

        assert_eq!(tree.len(), 3);
        assert_valid(&tree);
    }

    #[test]
    fn test_erase_until_empty() {
        let mut tree = tree_of(&[17, 9, 19, 71, 171, 3, 12, 50]);
        for key in [17, 3, 171, 9, 50, 19, 12, 71] {
            tree.erase(&key).unwrap();
            assert_valid(&tree);
        }
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);
    }

    #[test]
    fn test_clear() {
        let mut tree = tree_of(&[17, 9, 19]);
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert!(tree.elements().is_empty());
    }

    #[test]
    fn test_pretty_labels_carry_colors() {
        let tree = tree_of(&[17, 9, 19]);
        let art = tree.pretty();
        assert!(art.contains("17 black"));
        assert!(art.contains("9 red"));
        assert!(art.contains("19 red"));
    }

    #[test]
    fn test_observer_sees_mutation_outcomes() {
        let observer = Arc::new(RecordingObserver::new());
        let mut tree = RedBlackTree::new().with_observer(observer.clone());

        tree.insert(17).unwrap();
        tree.insert(17).unwrap();
        tree.erase(&17).unwrap();
        tree.erase(&17).unwrap();
        tree.insert(9).unwrap();
        tree.clear();

        let outcomes: Vec<Outcome> = observer.events().iter().map(|e| e.outcome).collect();
        assert_eq!(
            outcomes,
            vec![
                Outcome::Inserted,
                Outcome::DuplicateIgnored,
                Outcome::Removed,
                Outcome::Missing,
                Outcome::Inserted,
                Outcome::Cleared,
            ]
        );
        assert_eq!(observer.events()[3].severity, Severity::Warn);
    }

    proptest! {
        #[test]
        fn invariants_hold_after_arbitrary_inserts(keys in proptest::collection::vec(0i32..1000, 0..64)) {
            let mut tree = RedBlackTree::new();
            let mut expected = BTreeSet::new();
            for key in keys {
                tree.insert(key).unwrap();
                expected.insert(key);
            }
            assert_valid(&tree);
            prop_assert_eq!(as_set(&tree), expected.clone());
            prop_assert_eq!(tree.len(), expected.len());
        }

        #[test]
        fn invariants_hold_after_arbitrary_erases(keys in proptest::collection::vec(0i32..1000, 1..64)) {
            let mut tree = RedBlackTree::new();
            let mut expected = BTreeSet::new();
            for &key in &keys {
                tree.insert(key).unwrap();
                expected.insert(key);
            }
            for key in keys.iter().step_by(2) {
                tree.erase(key).unwrap();
                expected.remove(key);
                assert_valid(&tree);
            }
            prop_assert_eq!(as_set(&tree), expected);
        }

        #[test]
        fn height_stays_logarithmic(n in 1usize..256) {
            let mut tree = RedBlackTree::new();
            for key in 0..n as i32 {
                tree.insert(key).unwrap();
            }
            let bound = 2.0 * ((n + 1) as f64).log2();
            prop_assert!(tree.height() as f64 <= bound.ceil());
        }
    }
}
