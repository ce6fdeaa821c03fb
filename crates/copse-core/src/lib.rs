//! Core contract and shared engine for the copse tree family.
//!
//! Every two-child variant stores its nodes in an index-addressed arena
//! and exposes the same ordered-container surface through the [`Tree`]
//! trait. The recursive walks that do not depend on a balancing policy
//! (membership search, height, element collection, traversal text) live
//! in [`engine`] and are reused by each variant.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use thiserror::Error;

/// Stable handle of a node inside a [`NodeArena`].
pub type NodeId = usize;

/// Node color. Every node carries one so the shared engine works for all
/// variants; only the red-black tree gives it meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Black,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => write!(f, "red"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// Order in which [`Tree::text`] visits the keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Traversal {
    Inorder,
    Preorder,
    Postorder,
}

/// Internal-consistency failures raised by link surgery.
///
/// Any of these means the tree's linkage has already diverged from its
/// invariants. Callers must propagate them; recovery is not possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("node is not a child of its recorded parent")]
    NotChildOfParent,
    #[error("rotation requested at a node with no child on the pivot side")]
    MissingPivot,
    #[error("delete fixup found no sibling for a doubly-black position")]
    MissingSibling,
}

/// A single tree node.
///
/// Children and the parent back-reference are arena indices. The child
/// links own their subtrees; the parent link is bookkeeping only and
/// always names the node whose child slot currently points here.
#[derive(Debug, Clone)]
pub struct Node<T> {
    pub value: T,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    pub parent: Option<NodeId>,
    pub color: Color,
}

impl<T> Node<T> {
    /// A black, childless node attached under `parent`.
    pub fn new(value: T, parent: Option<NodeId>) -> Self {
        Self::with_color(value, Color::Black, parent)
    }

    pub fn with_color(value: T, color: Color, parent: Option<NodeId>) -> Self {
        Self {
            value,
            left: None,
            right: None,
            parent,
            color,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Slab-backed node store.
///
/// Slots are reused through a free list; an id stays valid until the node
/// is removed or the arena cleared. Removing a node hands it back by
/// value, so erase paths can move keys out without cloning.
#[derive(Debug, Clone)]
pub struct NodeArena<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<NodeId>,
}

impl<T> NodeArena<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn alloc(&mut self, node: Node<T>) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.slots[id] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    /// Vacates the slot at `id` and hands the node back by value.
    ///
    /// The caller is responsible for unlinking `id` from any live node
    /// first; the arena only manages storage.
    pub fn remove(&mut self, id: NodeId) -> Node<T> {
        let node = self.slots[id].take().expect("removed a vacant arena slot");
        self.free.push(id);
        node
    }

    /// Drops every node at once.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

impl<T> Default for NodeArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<NodeId> for NodeArena<T> {
    type Output = Node<T>;

    fn index(&self, id: NodeId) -> &Node<T> {
        self.slots[id].as_ref().expect("indexed a vacant arena slot")
    }
}

impl<T> IndexMut<NodeId> for NodeArena<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut Node<T> {
        self.slots[id].as_mut().expect("indexed a vacant arena slot")
    }
}

/// Recursive walks shared by every variant.
///
/// All of these tolerate the empty subtree by returning the neutral
/// value (0, false, nothing appended) so call sites never special-case.
/// Recursion depth follows the tree height: logarithmic for balanced
/// variants, linear in the worst case for the plain tree.
pub mod engine {
    use super::{NodeArena, NodeId, Traversal};
    use std::cmp::Ordering;
    use std::fmt::Display;
    use std::fmt::Write as _;

    /// Height of the subtree at `node`; an empty subtree has height 0, a
    /// single node height 1.
    pub fn height<T>(arena: &NodeArena<T>, node: Option<NodeId>) -> usize {
        match node {
            None => 0,
            Some(id) => {
                1 + height(arena, arena[id].left).max(height(arena, arena[id].right))
            }
        }
    }

    /// Three-way-comparison membership search.
    pub fn contains<T: Ord>(arena: &NodeArena<T>, node: Option<NodeId>, key: &T) -> bool {
        match node {
            None => false,
            Some(id) => match key.cmp(&arena[id].value) {
                Ordering::Equal => true,
                Ordering::Less => contains(arena, arena[id].left, key),
                Ordering::Greater => contains(arena, arena[id].right, key),
            },
        }
    }

    /// Collects every key under `node` into `out`, subtree root first,
    /// then left, then right.
    pub fn collect_elements<T: Clone>(
        arena: &NodeArena<T>,
        node: Option<NodeId>,
        out: &mut Vec<T>,
    ) {
        if let Some(id) = node {
            out.push(arena[id].value.clone());
            collect_elements(arena, arena[id].left, out);
            collect_elements(arena, arena[id].right, out);
        }
    }

    /// Appends the requested rendering of the subtree at `node` to `out`.
    ///
    /// Keys are space-separated and space-terminated. Both subtrees are
    /// always rendered in key order; the traversal selects where the
    /// subtree root appears relative to them.
    pub fn write_traversal<T: Display>(
        arena: &NodeArena<T>,
        node: Option<NodeId>,
        traversal: Traversal,
        out: &mut String,
    ) {
        let Some(id) = node else { return };
        match traversal {
            Traversal::Inorder => write_inorder(arena, node, out),
            Traversal::Preorder => {
                push_key(&arena[id].value, out);
                write_inorder(arena, arena[id].left, out);
                write_inorder(arena, arena[id].right, out);
            }
            Traversal::Postorder => {
                write_inorder(arena, arena[id].left, out);
                write_inorder(arena, arena[id].right, out);
                push_key(&arena[id].value, out);
            }
        }
    }

    fn write_inorder<T: Display>(arena: &NodeArena<T>, node: Option<NodeId>, out: &mut String) {
        if let Some(id) = node {
            write_inorder(arena, arena[id].left, out);
            push_key(&arena[id].value, out);
            write_inorder(arena, arena[id].right, out);
        }
    }

    fn push_key<T: Display>(value: &T, out: &mut String) {
        let _ = write!(out, "{value} ");
    }
}

/// Capability set shared by every tree variant.
///
/// `T` is `Clone` so [`Tree::elements`] can hand the caller an owned
/// collection, and `Display` so [`Tree::text`] and [`Tree::pretty`] can
/// render keys. The trait is object-safe; the factory returns
/// `Box<dyn Tree<T>>`.
pub trait Tree<T: Ord + Clone + fmt::Display> {
    /// Three-way-comparison membership test.
    fn contains(&self, key: &T) -> bool;

    /// Inserts `value` unless an equal key is already present. A
    /// duplicate leaves the tree, its length and its height untouched.
    fn insert(&mut self, value: T) -> Result<(), TreeError>;

    /// Removes the node holding a key equal to `key`, if any. Erasing an
    /// absent key is a no-op.
    fn erase(&mut self, key: &T) -> Result<(), TreeError>;

    /// Unconditionally discards every node and resets the length.
    fn clear(&mut self);

    fn is_empty(&self) -> bool;

    /// Number of live nodes.
    fn len(&self) -> usize;

    /// Empty tree 0, single node 1, otherwise one more than the taller
    /// subtree.
    fn height(&self) -> usize;

    /// Fresh, caller-owned collection of every key, subtree root first.
    fn elements(&self) -> Vec<T>;

    /// Space-terminated rendering of the keys in the requested order.
    fn text(&self, traversal: Traversal) -> String;

    /// Graphical rendering of the tree structure.
    fn pretty(&self) -> String;

    /// Writes the graphical rendering to stdout.
    fn pretty_print(&self) {
        print!("{}", self.pretty());
    }
}
