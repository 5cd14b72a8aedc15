//! Nodes and read-only views onto them.

use std::fmt;

use generational_arena::Index;

use crate::arena::Tree;

/// A stored node. Children and parent are arena indices; the parent is only a
/// back-link and never keeps a node alive.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) value: i64,
    pub(crate) left: Option<Index>,
    pub(crate) right: Option<Index>,
    pub(crate) parent: Option<Index>,
}

impl Node {
    pub(crate) fn new(value: i64) -> Self {
        Self {
            value,
            left: None,
            right: None,
            parent: None,
        }
    }

    pub(crate) fn has_children(&self) -> bool {
        self.left.is_some() || self.right.is_some()
    }
}

/// Opaque handle to a node. Two handles are equal exactly when they name the
/// same node, so duplicates can be told apart by their position in the tree.
///
/// A handle to a deleted node never resolves again, even if its arena slot is
/// reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) Index);

/// A borrowed, read-only view of a node in a [`Tree`].
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a Tree,
    idx: Index,
}

impl<'a> NodeRef<'a> {
    pub(crate) fn new(tree: &'a Tree, idx: Index) -> Self {
        Self { tree, idx }
    }

    fn node(&self) -> &'a Node {
        self.tree.node(self.idx)
    }

    fn link(&self, link: Option<Index>) -> Option<NodeRef<'a>> {
        link.map(|idx| Self::new(self.tree, idx))
    }

    /// The handle for this node.
    pub fn id(&self) -> NodeId {
        NodeId(self.idx)
    }

    /// The value stored in this node. It never changes after insertion.
    pub fn value(&self) -> i64 {
        self.node().value
    }

    /// The node's parent, or `None` for the root.
    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.link(self.node().parent)
    }

    /// The node's left child.
    pub fn left(&self) -> Option<NodeRef<'a>> {
        self.link(self.node().left)
    }

    /// The node's right child.
    pub fn right(&self) -> Option<NodeRef<'a>> {
        self.link(self.node().right)
    }

    /// Takes an owned snapshot of this node and its neighbours' values.
    ///
    /// # Examples
    ///
    /// ```
    /// use arena_bst::{NodeDescription, Tree};
    ///
    /// let tree: Tree = [2, 1, 3].into_iter().collect();
    /// let one = tree.search(1).unwrap().describe();
    ///
    /// assert_eq!(
    ///     one,
    ///     NodeDescription { value: 1, parent: Some(2), left: None, right: None }
    /// );
    /// assert_eq!(one.to_string(), "Value = 1; Parent = 2");
    /// ```
    pub fn describe(&self) -> NodeDescription {
        let node = self.node();
        let value_of = |link: Option<Index>| link.map(|idx| self.tree.node(idx).value);
        NodeDescription {
            value: node.value,
            parent: value_of(node.parent),
            left: value_of(node.left),
            right: value_of(node.right),
        }
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.idx == other.idx
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.idx)
            .field("node", &self.describe())
            .finish()
    }
}

impl fmt::Display for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.describe().fmt(f)
    }
}

/// A node's value along with the values of its parent and children, if any.
///
/// Its `Display` form is a single stable line such as
/// `Value = 4; Parent = 8; Left Child = 3`, meant to be printed verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeDescription {
    /// The node's own value.
    pub value: i64,
    /// The parent's value, absent for the root.
    pub parent: Option<i64>,
    /// The left child's value.
    pub left: Option<i64>,
    /// The right child's value.
    pub right: Option<i64>,
}

impl fmt::Display for NodeDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value = {}", self.value)?;
        if let Some(parent) = self.parent {
            write!(f, "; Parent = {}", parent)?;
        }
        if let Some(left) = self.left {
            write!(f, "; Left Child = {}", left)?;
        }
        if let Some(right) = self.right {
            write!(f, "; Right Child = {}", right)?;
        }
        Ok(())
    }
}
