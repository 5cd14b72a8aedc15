//! In-order traversal.

use std::iter::FusedIterator;

use generational_arena::Index;

use crate::arena::Tree;
use crate::node::NodeRef;

/// An in-order iterator over the nodes of a [`Tree`]: left subtree, node,
/// right subtree. Values come out in ascending order.
///
/// Created by [`Tree::iter`] and [`Tree::dump`]. The walk keeps its own stack
/// so a degenerate tree doesn't grow the call stack.
#[derive(Clone)]
pub struct Iter<'a> {
    tree: &'a Tree,
    stack: Vec<Index>,
    remaining: usize,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(tree: &'a Tree) -> Self {
        let mut iter = Self {
            tree,
            stack: Vec::new(),
            remaining: tree.len(),
        };
        iter.push_left_spine(tree.root_index());
        iter
    }

    /// Pushes `from` and every left descendant reachable from it.
    fn push_left_spine(&mut self, mut from: Option<Index>) {
        while let Some(idx) = from {
            self.stack.push(idx);
            from = self.tree.node(idx).left;
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        self.push_left_spine(self.tree.node(idx).right);
        self.remaining -= 1;
        Some(NodeRef::new(self.tree, idx))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Tree {
    type Item = NodeRef<'a>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
