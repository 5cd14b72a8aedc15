//! An unbalanced BST whose nodes live in an arena. Each node links to its
//! children and back to its parent by index.
//!
//! # Examples
//!
//! ```
//! use arena_bst::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(tree.search(1).is_none());
//!
//! tree.insert(1);
//! assert_eq!(tree.search(1).map(|n| n.value()), Some(1));
//!
//! // Inserting the same value again adds a second node to the left.
//! tree.insert(1);
//! assert_eq!(tree.len(), 2);
//!
//! // Deleting removes one node at a time.
//! assert!(tree.delete(1));
//! assert!(tree.delete(1));
//! assert!(!tree.delete(1));
//! assert!(tree.is_empty());
//! ```

use std::cmp::Ordering;
use std::fmt;

use generational_arena::{Arena, Index};
use tracing::{debug, error, instrument};

use crate::error::{TreeError, TreeResult};
use crate::iter::Iter;
use crate::node::{Node, NodeId, NodeRef};

/// An unbalanced Binary Search Tree of `i64`s that keeps duplicates.
///
/// Equal values go to the left, so repeated inserts of one value form a chain
/// of left children. [`search`][Tree::search] and [`delete`][Tree::delete]
/// both pick the leftmost node of that chain.
#[derive(Clone)]
pub struct Tree {
    nodes: Arena<Node>,
    root: Option<Index>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("len", &self.len())
            .field(
                "nodes",
                &self.iter().map(|n| n.describe()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Tree {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// The number of nodes in the tree, duplicates included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The root node, if the tree isn't empty.
    pub fn root(&self) -> Option<NodeRef<'_>> {
        self.root.map(|idx| NodeRef::new(self, idx))
    }

    /// Looks up a node by handle. Handles of deleted nodes return `None`.
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        self.nodes.contains(id.0).then(|| NodeRef::new(self, id.0))
    }

    /// Removes every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Inserts a new node holding `value`. Values are never rejected; a
    /// duplicate is placed below and to the left of the existing ones.
    ///
    /// ## Panics
    ///
    /// When the tree's structure is corrupt and no free slot can be found for
    /// the new node. See [`try_insert`][Tree::try_insert].
    ///
    /// # Examples
    ///
    /// ```
    /// use arena_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(2);
    /// tree.insert(2);
    ///
    /// let root = tree.root().unwrap();
    /// assert_eq!(root.left().map(|n| n.value()), Some(2));
    /// assert!(root.right().is_none());
    /// ```
    #[instrument(level = "trace", skip(self))]
    pub fn insert(&mut self, value: i64) {
        if let Err(err) = self.try_insert(value) {
            error!(%err, "tree structure is corrupt");
            panic!("{}", err);
        }
    }

    /// Inserts a new node holding `value` and returns its handle.
    ///
    /// Descends from the root going left when `value` is less than or equal to
    /// a node's value and right otherwise, then hangs the new node in the first
    /// free slot. An error means the descent found no free slot, which can only
    /// happen if the tree is corrupt. Nothing is changed in that case.
    #[instrument(level = "trace", skip(self))]
    pub fn try_insert(&mut self, value: i64) -> TreeResult<NodeId> {
        let parent = match self.root {
            None => None,
            Some(_) => Some(
                self.find_parent(value)
                    .ok_or(TreeError::NoAttachmentPoint { value })?,
            ),
        };

        let idx = self.nodes.insert(Node::new(value));
        match parent {
            Some(parent) => self.attach(parent, idx),
            None => self.root = Some(idx),
        }

        self.debug_validate();
        Ok(NodeId(idx))
    }

    /// Finds the leftmost node holding `value`.
    ///
    /// On a match the search keeps going left for as long as the left child
    /// holds the same value. Only the immediate left child is checked: a
    /// duplicate sitting further down the left subtree (behind a smaller
    /// value) is not reached.
    ///
    /// # Examples
    ///
    /// ```
    /// use arena_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// let first = tree.try_insert(5).unwrap();
    /// let second = tree.try_insert(5).unwrap();
    ///
    /// let found = tree.search(5).unwrap();
    /// assert_eq!(found.id(), second);
    /// assert_eq!(found.parent().unwrap().id(), first);
    ///
    /// assert!(tree.search(42).is_none());
    /// ```
    #[instrument(level = "trace", skip(self))]
    pub fn search(&self, value: i64) -> Option<NodeRef<'_>> {
        self.search_index(value).map(|idx| NodeRef::new(self, idx))
    }

    /// Whether any node holds `value`.
    pub fn contains(&self, value: i64) -> bool {
        self.search_index(value).is_some()
    }

    /// The node that would take `id`'s place if it were deleted.
    ///
    /// A leaf has no successor. A node with one child is replaced by that
    /// child. A node with two children is replaced by the largest node in its
    /// _left_ subtree. Returns `None` as well if `id` is stale.
    pub fn successor(&self, id: NodeId) -> Option<NodeRef<'_>> {
        if !self.nodes.contains(id.0) {
            return None;
        }
        self.successor_index(id.0).map(|idx| NodeRef::new(self, idx))
    }

    /// Deletes the node [`search`][Tree::search] would find for `value` and
    /// returns whether there was one. Missing values are a no-op.
    ///
    /// Only links change: every surviving node keeps its value, and a node
    /// with two children is physically replaced by its
    /// [`successor`][Tree::successor].
    ///
    /// # Examples
    ///
    /// ```
    /// use arena_bst::Tree;
    ///
    /// let mut tree: Tree = [2, 1].into_iter().collect();
    ///
    /// assert!(tree.delete(2));
    /// let root = tree.root().unwrap();
    /// assert_eq!(root.value(), 1);
    /// assert!(root.parent().is_none());
    ///
    /// assert!(!tree.delete(2));
    /// ```
    #[instrument(level = "trace", skip(self))]
    pub fn delete(&mut self, value: i64) -> bool {
        let Some(target) = self.search_index(value) else {
            return false;
        };

        match self.successor_index(target) {
            None => {
                debug!(value, "deleting leaf");
                match self.nodes[target].parent {
                    Some(parent) => self.detach(parent, target),
                    None => self.root = None,
                }
            }
            Some(successor) => self.splice(target, successor),
        }
        self.nodes.remove(target);

        self.debug_validate();
        true
    }

    /// An in-order iterator over the tree's nodes.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// The in-order node sequence, for printing one
    /// [`NodeDescription`][crate::NodeDescription] per line. Each call is a
    /// fresh pass.
    ///
    /// # Examples
    ///
    /// ```
    /// use arena_bst::Tree;
    ///
    /// let tree: Tree = [2, 1, 3].into_iter().collect();
    /// let lines: Vec<String> = tree.dump().map(|n| n.to_string()).collect();
    ///
    /// assert_eq!(
    ///     lines,
    ///     [
    ///         "Value = 1; Parent = 2",
    ///         "Value = 2; Left Child = 1; Right Child = 3",
    ///         "Value = 3; Parent = 2",
    ///     ]
    /// );
    /// ```
    pub fn dump(&self) -> Iter<'_> {
        self.iter()
    }

    /// The tree's values in ascending order.
    pub fn values(&self) -> impl Iterator<Item = i64> + '_ {
        self.iter().map(|n| n.value())
    }

    /// The number of nodes on the longest path from the root to a leaf. An
    /// empty tree has height 0.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(Index, usize)> = self.root.into_iter().map(|r| (r, 1)).collect();
        while let Some((idx, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.nodes[idx];
            for child in [node.left, node.right].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }
        height
    }

    /// Checks every structural invariant: ordering, parent/child links,
    /// a parentless root, and that every stored node is reachable exactly once
    /// from the root.
    pub fn validate(&self) -> TreeResult<()> {
        let stored = self.nodes.len();
        let Some(root) = self.root else {
            return match stored {
                0 => Ok(()),
                _ => Err(TreeError::Unreachable {
                    reachable: 0,
                    stored,
                }),
            };
        };
        if self.nodes[root].parent.is_some() {
            return Err(TreeError::RootHasParent {
                value: self.nodes[root].value,
            });
        }

        // Lower bounds are exclusive, upper bounds inclusive.
        let mut stack: Vec<(Index, Option<i64>, Option<i64>)> = vec![(root, None, None)];
        let mut reachable = 0;
        while let Some((idx, lower, upper)) = stack.pop() {
            reachable += 1;
            if reachable > stored {
                return Err(TreeError::Unreachable { reachable, stored });
            }

            let node = &self.nodes[idx];
            if let Some(lower) = lower.filter(|&lower| node.value <= lower) {
                return Err(TreeError::OutOfOrder {
                    value: node.value,
                    ancestor: lower,
                });
            }
            if let Some(upper) = upper.filter(|&upper| node.value > upper) {
                return Err(TreeError::OutOfOrder {
                    value: node.value,
                    ancestor: upper,
                });
            }

            let children = [
                (node.left, lower, Some(node.value)),
                (node.right, Some(node.value), upper),
            ];
            for (child, lower, upper) in children {
                let Some(child) = child else { continue };
                let child_node = &self.nodes[child];
                if child_node.parent != Some(idx) {
                    return Err(TreeError::BrokenParentLink {
                        value: child_node.value,
                        parent: node.value,
                    });
                }
                stack.push((child, lower, upper));
            }
        }

        if reachable != stored {
            return Err(TreeError::Unreachable { reachable, stored });
        }
        Ok(())
    }

    pub(crate) fn root_index(&self) -> Option<Index> {
        self.root
    }

    pub(crate) fn node(&self, idx: Index) -> &Node {
        &self.nodes[idx]
    }

    /// The node a new `value` should hang from, or `None` if the descent runs
    /// off the tree.
    fn find_parent(&self, value: i64) -> Option<Index> {
        let mut cursor = self.root;
        while let Some(idx) = cursor {
            let node = self.nodes.get(idx)?;
            let next = if value <= node.value {
                node.left
            } else {
                node.right
            };
            if next.is_none() {
                return Some(idx);
            }
            cursor = next;
        }
        None
    }

    fn search_index(&self, value: i64) -> Option<Index> {
        let mut cursor = self.root;
        while let Some(idx) = cursor {
            let node = &self.nodes[idx];
            cursor = match value.cmp(&node.value) {
                Ordering::Equal => match node.left {
                    Some(left) if self.nodes[left].value == value => Some(left),
                    _ => return Some(idx),
                },
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        None
    }

    fn successor_index(&self, idx: Index) -> Option<Index> {
        let node = &self.nodes[idx];
        if !node.has_children() {
            return None;
        }
        match (node.left, node.right) {
            (Some(left), Some(_)) => {
                let mut largest = left;
                while let Some(right) = self.nodes[largest].right {
                    largest = right;
                }
                Some(largest)
            }
            (only, None) | (None, only) => only,
        }
    }

    /// Puts `successor` where `target` is and moves `target`'s remaining
    /// children under it. `target` is left fully unlinked.
    ///
    /// # Diagram
    ///
    /// With `successor` deep in the left subtree (it can't have a right child):
    ///
    /// ```text
    ///        parent                   parent
    ///          |                        |
    ///        target                 successor
    ///        /    \                  /     \
    ///       a      b    splice ->   a       b
    ///        \                       \
    ///         s_parent                s_parent
    ///            \                       \
    ///          successor                  orphan
    ///            /
    ///         orphan
    /// ```
    ///
    /// When `successor` is a direct child of `target` it keeps its own
    /// subtree and only adopts `target`'s other child.
    fn splice(&mut self, target: Index, successor: Index) {
        debug!(
            deleted = self.nodes[target].value,
            successor = self.nodes[successor].value,
            "splicing successor into place"
        );

        match self.nodes[successor].parent {
            Some(successor_parent) if successor_parent != target => {
                self.detach(successor_parent, successor);
                if let Some(orphan) = self.nodes[successor].left {
                    debug!(
                        orphan = self.nodes[orphan].value,
                        adopter = self.nodes[successor_parent].value,
                        "re-homing successor's child"
                    );
                    self.detach(successor, orphan);
                    self.attach(successor_parent, orphan);
                }
            }
            _ => self.detach(target, successor),
        }

        match self.nodes[target].parent {
            Some(parent) => {
                self.detach(parent, target);
                self.attach(parent, successor);
            }
            None => self.root = Some(successor),
        }

        let (left, right) = (self.nodes[target].left, self.nodes[target].right);
        for child in [left, right].into_iter().flatten() {
            self.detach(target, child);
            self.attach(successor, child);
        }
    }

    /// Hangs `child` under `parent`: on the left if `child`'s value is less
    /// than or equal to `parent`'s, otherwise on the right. The slot must be
    /// free. Attaching a node to itself does nothing.
    fn attach(&mut self, parent: Index, child: Index) {
        if parent == child {
            return;
        }

        let child_value = self.nodes[child].value;
        let parent_node = &mut self.nodes[parent];
        let slot = if child_value <= parent_node.value {
            &mut parent_node.left
        } else {
            &mut parent_node.right
        };
        debug_assert!(slot.is_none(), "attaching over an occupied slot");
        *slot = Some(child);
        self.nodes[child].parent = Some(parent);
    }

    /// Unlinks `child` from `parent` in both directions. Does nothing to
    /// `parent` if `child` isn't one of its children.
    fn detach(&mut self, parent: Index, child: Index) {
        let parent_node = &mut self.nodes[parent];
        if parent_node.left == Some(child) {
            parent_node.left = None;
        } else if parent_node.right == Some(child) {
            parent_node.right = None;
        }
        self.nodes[child].parent = None;
    }

    /// In debug builds, assert the tree's invariants hold after a mutation.
    fn debug_validate(&self) {
        if cfg!(debug_assertions) {
            if let Err(err) = self.validate() {
                panic!("tree invariant broken: {}", err);
            }
        }
    }
}

impl Extend<i64> for Tree {
    fn extend<I: IntoIterator<Item = i64>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl FromIterator<i64> for Tree {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}
