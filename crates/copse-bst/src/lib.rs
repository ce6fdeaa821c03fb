//! Unbalanced binary search tree for copse.
//!
//! Keeps the ordering invariant and nothing else: there is no
//! rebalancing, so adversarial insertion orders (e.g. strictly
//! ascending keys) degrade the height to O(n) and every recursive
//! operation's stack depth with it. Erase replaces the removed node by
//! the merge of its two subtrees, re-inserting the right side into the
//! left key by key.

use copse_core::{engine, Node, NodeArena, NodeId, Traversal, Tree, TreeError};
use copse_observe::{NullObserver, TreeEvent, TreeObserver};
use copse_render::{render, TreeSource};
use std::cmp::Ordering;
use std::fmt::Display;
use std::sync::Arc;

/// Plain binary search tree over the shared node arena.
pub struct BinarySearchTree<T> {
    arena: NodeArena<T>,
    root: Option<NodeId>,
    len: usize,
    observer: Arc<dyn TreeObserver>,
}

impl<T: Ord> BinarySearchTree<T> {
    pub fn new() -> Self {
        Self {
            arena: NodeArena::new(),
            root: None,
            len: 0,
            observer: Arc::new(NullObserver),
        }
    }

    /// Builds a one-node tree around `initial`.
    pub fn with_root(initial: T) -> Self {
        let mut tree = Self::new();
        tree.root = Some(tree.arena.alloc(Node::new(initial, None)));
        tree.len = 1;
        tree
    }

    /// Replaces the event sink. Observers are diagnostics only and never
    /// influence the structure.
    pub fn with_observer(mut self, observer: Arc<dyn TreeObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Recursive descent insert. Returns the (possibly new) subtree root
    /// and whether a node was created; an equal key is left untouched.
    fn insert_at(
        &mut self,
        node: Option<NodeId>,
        parent: Option<NodeId>,
        value: T,
    ) -> (NodeId, bool) {
        let Some(id) = node else {
            return (self.arena.alloc(Node::new(value, parent)), true);
        };

        match value.cmp(&self.arena[id].value) {
            Ordering::Less => {
                let left = self.arena[id].left;
                let (child, added) = self.insert_at(left, Some(id), value);
                self.arena[id].left = Some(child);
                (id, added)
            }
            Ordering::Greater => {
                let right = self.arena[id].right;
                let (child, added) = self.insert_at(right, Some(id), value);
                self.arena[id].right = Some(child);
                (id, added)
            }
            Ordering::Equal => (id, false),
        }
    }

    /// Recursive descent erase. Returns the replacement subtree root and
    /// whether a node was removed.
    fn erase_at(&mut self, node: Option<NodeId>, key: &T) -> (Option<NodeId>, bool) {
        let Some(id) = node else {
            return (None, false);
        };

        match key.cmp(&self.arena[id].value) {
            Ordering::Equal => {
                let Node { left, right, .. } = self.arena.remove(id);
                (self.merge(left, right), true)
            }
            Ordering::Less => {
                let left = self.arena[id].left;
                let (child, removed) = self.erase_at(left, key);
                self.arena[id].left = child;
                if let Some(c) = child {
                    self.arena[c].parent = Some(id);
                }
                (Some(id), removed)
            }
            Ordering::Greater => {
                let right = self.arena[id].right;
                let (child, removed) = self.erase_at(right, key);
                self.arena[id].right = child;
                if let Some(c) = child {
                    self.arena[c].parent = Some(id);
                }
                (Some(id), removed)
            }
        }
    }

    /// Merge that backs erase: if either side is empty the other is the
    /// result, otherwise every key of `right` is re-inserted into `left`
    /// (subtree root first, then left, then right) and `left` is the
    /// result. O(k log k) to O(k²) in the size of `right`; the cost is
    /// inherent to this strategy.
    fn merge(&mut self, left: Option<NodeId>, right: Option<NodeId>) -> Option<NodeId> {
        let Some(anchor) = left else {
            return right;
        };
        self.fold_into(anchor, right);
        Some(anchor)
    }

    /// Re-inserts every key under `node` into the subtree at `anchor`,
    /// vacating the old slots as it goes.
    fn fold_into(&mut self, anchor: NodeId, node: Option<NodeId>) {
        if let Some(id) = node {
            let Node { value, left, right, .. } = self.arena.remove(id);
            let parent = self.arena[anchor].parent;
            self.insert_at(Some(anchor), parent, value);
            self.fold_into(anchor, left);
            self.fold_into(anchor, right);
        }
    }
}

impl<T: Ord> Default for BinarySearchTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone + Display> Tree<T> for BinarySearchTree<T> {
    fn contains(&self, key: &T) -> bool {
        engine::contains(&self.arena, self.root, key)
    }

    fn insert(&mut self, value: T) -> Result<(), TreeError> {
        let rendered = value.to_string();
        let (new_root, added) = self.insert_at(self.root, None, value);
        self.root = Some(new_root);

        if added {
            self.len += 1;
            self.observer.on_event(&TreeEvent::inserted(rendered));
        } else {
            self.observer.on_event(&TreeEvent::duplicate(rendered));
        }
        Ok(())
    }

    fn erase(&mut self, key: &T) -> Result<(), TreeError> {
        let (new_root, removed) = self.erase_at(self.root, key);
        self.root = new_root;
        if let Some(id) = self.root {
            self.arena[id].parent = None;
        }

        if removed {
            self.len -= 1;
            self.observer.on_event(&TreeEvent::removed(key.to_string()));
        } else {
            self.observer.on_event(&TreeEvent::missing(key.to_string()));
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

impl<T: Display> TreeSource for BinarySearchTree<T> {
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
        self.arena[id].value.to_string()
    }
}
