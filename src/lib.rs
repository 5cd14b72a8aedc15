//! An unbalanced Binary Search Tree over integers that keeps duplicates and
//! stores parent back-links.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. This one is built from `Node`s
//! that each hold an integer value, up to two children and a link back to
//! their parent. The invariants of this BST are:
//!
//! 1. For every `Node` in the tree, all the `Node`s in its left subtree have a
//!    value less than _or equal to_ its own value.
//! 2. For every `Node` in the tree, all the `Node`s in its right subtree have a
//!    value strictly greater than its own value.
//! 3. Every child points back at its parent and the root has no parent.
//!
//! Because equal values always go left, inserting the same value repeatedly
//! builds a chain of duplicates down the left side. Lookups and deletions
//! always pick the _leftmost_ node of such a chain.
//!
//! The tree never rebalances. Inserting sorted input gives a tree whose height
//! equals its size, so every walk in this crate is iterative rather than
//! recursive.
//!
//! Nodes live in a [`generational_arena::Arena`] and refer to each other by
//! index. A parent link is just an index so there is no ownership cycle, and a
//! deleted node's index can never be confused with a node inserted later.
//!
//! # Examples
//!
//! ```
//! use arena_bst::Tree;
//!
//! let mut tree: Tree = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
//!
//! // 5 has two children so it is replaced by the largest node on its left.
//! assert!(tree.delete(5));
//! assert_eq!(tree.values().collect::<Vec<_>>(), [1, 3, 4, 7, 8, 9]);
//!
//! let root = tree.root().unwrap();
//! assert_eq!(root.to_string(), "Value = 4; Left Child = 3; Right Child = 8");
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod arena;
pub mod error;
pub mod iter;
pub mod node;

#[cfg(test)]
mod test;

pub use arena::Tree;
pub use error::{TreeError, TreeResult};
pub use iter::Iter;
pub use node::{NodeDescription, NodeId, NodeRef};
