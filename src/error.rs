//! Errors reported by the tree.
//!
//! None of these are user-facing "not found" conditions. Missing values are
//! reported through `Option` and `bool` returns. A `TreeError` always means
//! the tree's structure is corrupt.

use thiserror::Error;

/// A broken structural invariant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The tree is non-empty but the descent for an insert fell off the tree
    /// without finding a free child slot.
    #[error("no attachment point found for value {value} in a non-empty tree")]
    NoAttachmentPoint {
        /// The value being inserted.
        value: i64,
    },

    /// A node sits on the wrong side of one of its ancestors.
    #[error("node {value} violates the ordering bound set by ancestor {ancestor}")]
    OutOfOrder {
        /// The misplaced node's value.
        value: i64,
        /// The value of the ancestor whose bound is broken.
        ancestor: i64,
    },

    /// A child does not point back at the node that holds it.
    #[error("node {value} does not point back at its parent {parent}")]
    BrokenParentLink {
        /// The child's value.
        value: i64,
        /// The value of the node holding the child.
        parent: i64,
    },

    /// The root has a parent link.
    #[error("root {value} has a parent")]
    RootHasParent {
        /// The root's value.
        value: i64,
    },

    /// The number of nodes reachable from the root differs from the number of
    /// nodes stored. Either a subtree was lost or a cycle was walked.
    #[error("{reachable} nodes reachable from the root but {stored} stored")]
    Unreachable {
        /// Nodes visited walking down from the root.
        reachable: usize,
        /// Nodes held by the tree.
        stored: usize,
    },
}

/// Shorthand for results carrying a [`TreeError`].
pub type TreeResult<T> = Result<T, TreeError>;
