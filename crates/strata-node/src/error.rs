//! Error types for node tree operations.

use strata_style::StyleError;
use thiserror::Error;

use crate::tree::NodeId;

/// Errors raised by [`NodeTree`](crate::NodeTree) operations.
///
/// Structural errors are reported before the tree is changed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NodeError {
    /// The node is a leaf and cannot hold children.
    #[error("{0:?} is a leaf and cannot have children")]
    CannotHaveChildren(NodeId),

    /// The node to remove is not a child of the given parent.
    #[error("{child:?} is not a child of {parent:?}")]
    NotAChild {
        /// The parent the child was removed from.
        parent: NodeId,
        /// The node that was not found among its children.
        child: NodeId,
    },

    /// Adding the child would make a node its own ancestor.
    #[error("adding {child:?} to {parent:?} would create a cycle")]
    WouldCreateCycle {
        /// The prospective parent.
        parent: NodeId,
        /// The prospective child.
        child: NodeId,
    },

    /// The id does not belong to this tree.
    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),

    /// Layout was requested for a root without a style.
    #[error("{0:?} has no style to lay out with")]
    MissingStyle(NodeId),

    /// A style operation failed.
    #[error(transparent)]
    Style(#[from] StyleError),
}

/// Result type for node tree operations.
pub type Result<T> = std::result::Result<T, NodeError>;
