//! Layout node tree for the strata style engine.
//!
//! Nodes live in an arena ([`NodeTree`]) and refer to each other through
//! [`NodeId`] indices. Each node owns a private copy of a style and shares a
//! host-owned applicator; once a node has both, the style's set properties
//! are replayed to the applicator, and later writes flow through
//! incrementally.
//!
//! # Design
//!
//! - **Binding** - [`NodeTree::set_style`] and [`NodeTree::set_applicator`]
//!   bring a new pairing up to date with exactly one reapply
//! - **Structure** - leaves are structurally childless; every node of a
//!   subtree agrees on its root
//! - **Refresh** - [`NodeTree::refresh`] on any node lays out the whole tree
//!   from its root through the style type's [`Layout`]

/// Tree configuration.
pub mod config;
/// Error types.
pub mod error;
/// Geometry shared by layout implementations.
pub mod geometry;
/// Layout and applicator collaborators.
pub mod layout;
/// The arena node tree.
pub mod tree;

// Re-exports for convenience
pub use config::TreeConfig;
pub use error::{NodeError, Result};
pub use geometry::{BaseBox, Dimension, EdgeSizes, IntrinsicSize, Rect, Viewport};
pub use layout::{Applicator, Layout};
pub use tree::{AncestorIterator, Node, NodeId, NodeTree};
