//! Collaborators of the node tree: the renderer-side applicator and the
//! style-side layout algorithm.

use strata_style::StyleDeclaration;

use crate::geometry::Viewport;
use crate::tree::{NodeId, NodeTree};

/// The renderer handle a node's style pushes values to.
///
/// Property values reach the applicator through the style type's
/// [`StyleDeclaration::apply`]; the tree itself only tells it when a
/// refresh has finished.
pub trait Applicator {
    /// Commit the node's freshly computed layout to the renderer.
    fn set_bounds(&self);
}

/// A style type that can lay out a tree of nodes.
pub trait Layout: StyleDeclaration<Applicator: Applicator> {
    /// Per-node intrinsic size, created fresh whenever a style is assigned.
    type IntrinsicSize: Default;

    /// Per-node layout result, created fresh whenever a style is assigned.
    type LayoutBox;

    /// An empty layout box for `node`.
    fn layout_box(node: NodeId) -> Self::LayoutBox;

    /// Lay out the tree rooted at `root` into `viewport`.
    ///
    /// Called only for roots that have a style.
    fn layout(tree: &mut NodeTree<Self>, root: NodeId, viewport: &Viewport);
}
