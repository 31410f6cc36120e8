//! Arena-based node tree.
//!
//! The tree uses arena allocation with [`NodeId`] indices for all
//! relationships, providing O(1) access and traversal without borrow checker
//! issues. Nodes are never freed; a removed node becomes the root of its own
//! subtree and can be attached again.

use std::rc::Rc;

use serde::Serialize;
use strata_common::warning;
use strata_style::StyleError;

use crate::config::TreeConfig;
use crate::error::{NodeError, Result};
use crate::geometry::Viewport;
use crate::layout::{Applicator, Layout};

/// Message reported when a reapply after a style assignment hits an
/// applicator that is not ready.
const STYLE_ASSIGNED: &str = "failed to apply style when a new style was assigned and an \
     applicator was already present; a node should be able to apply its style before it has \
     both a style and an applicator";

/// Message reported when a reapply after an applicator assignment hits an
/// applicator that is not ready.
const APPLICATOR_ASSIGNED: &str = "failed to apply style when a new applicator was assigned \
     and a style was already present; a node should be able to apply its style before it has \
     both a style and an applicator";

/// A type-safe index into a [`NodeTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub usize);

/// One node of the tree.
///
/// Leaves are structurally childless: structural operations on them fail
/// rather than silently doing nothing.
pub struct Node<S: Layout> {
    style: Option<S>,
    applicator: Option<Rc<S::Applicator>>,
    parent: Option<NodeId>,
    /// `None` when the node is its own root.
    root: Option<NodeId>,
    /// `None` for a leaf; an empty list for a branch without children.
    children: Option<Vec<NodeId>>,
    intrinsic: Option<S::IntrinsicSize>,
    layout: Option<S::LayoutBox>,
}

impl<S: Layout> Node<S> {
    /// The node's private copy of its style.
    #[must_use]
    pub const fn style(&self) -> Option<&S> {
        self.style.as_ref()
    }

    /// The applicator shared with the host.
    #[must_use]
    pub const fn applicator(&self) -> Option<&Rc<S::Applicator>> {
        self.applicator.as_ref()
    }

    /// The node's parent, if it is attached.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The node's children. Always a slice, even for a leaf.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Whether children are allowed at all, regardless of whether there are
    /// any.
    #[must_use]
    pub const fn can_have_children(&self) -> bool {
        self.children.is_some()
    }

    /// The intrinsic size created with the current style.
    #[must_use]
    pub const fn intrinsic(&self) -> Option<&S::IntrinsicSize> {
        self.intrinsic.as_ref()
    }

    /// The layout box created with the current style.
    #[must_use]
    pub const fn layout_box(&self) -> Option<&S::LayoutBox> {
        self.layout.as_ref()
    }
}

/// Arena of nodes sharing one style type.
pub struct NodeTree<S: Layout> {
    nodes: Vec<Node<S>>,
    config: TreeConfig,
}

impl<S: Layout> NodeTree<S> {
    /// An empty tree with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    /// An empty tree.
    #[must_use]
    pub const fn with_config(config: TreeConfig) -> Self {
        Self {
            nodes: Vec::new(),
            config,
        }
    }

    /// The tree's configuration.
    #[must_use]
    pub const fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Number of nodes ever created in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no node has been created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node<S>> {
        self.nodes.get(id.0)
    }

    fn node(&self, id: NodeId) -> Result<&Node<S>> {
        self.nodes.get(id.0).ok_or(NodeError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node<S>> {
        self.nodes.get_mut(id.0).ok_or(NodeError::UnknownNode(id))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Creation
    // ─────────────────────────────────────────────────────────────────────

    /// Create a node.
    ///
    /// The applicator is assigned first, then the style, then the children
    /// are added in order, so a node created with both a style and an
    /// applicator is brought up to date by exactly one reapply. `children`
    /// of `None` creates a leaf.
    ///
    /// # Errors
    ///
    /// Any error of [`set_style`](Self::set_style) or [`add`](Self::add).
    /// The node has been allocated by then and stays in the tree.
    pub fn create(
        &mut self,
        style: Option<&S>,
        applicator: Option<Rc<S::Applicator>>,
        children: Option<&[NodeId]>,
    ) -> Result<NodeId> {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            style: None,
            applicator: None,
            parent: None,
            root: None,
            children: children.map(|_| Vec::new()),
            intrinsic: None,
            layout: None,
        });

        self.set_applicator(id, applicator)?;
        self.set_style(id, style)?;
        for &child in children.unwrap_or_default() {
            self.add(id, child)?;
        }
        Ok(id)
    }

    /// Create a leaf with a style and no applicator.
    ///
    /// # Errors
    ///
    /// As [`create`](Self::create).
    pub fn leaf(&mut self, style: &S) -> Result<NodeId> {
        self.create(Some(style), None, None)
    }

    /// Create a branch with a style and no applicator.
    ///
    /// # Errors
    ///
    /// As [`create`](Self::create).
    pub fn branch(&mut self, style: &S, children: &[NodeId]) -> Result<NodeId> {
        self.create(Some(style), None, Some(children))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Style and applicator binding
    // ─────────────────────────────────────────────────────────────────────

    /// The node's style.
    #[must_use]
    pub fn style(&self, id: NodeId) -> Option<&S> {
        self.get(id).and_then(Node::style)
    }

    /// The node's style, mutably. Writes through it reach the bound
    /// applicator as they happen.
    #[must_use]
    pub fn style_mut(&mut self, id: NodeId) -> Option<&mut S> {
        self.nodes.get_mut(id.0).and_then(|n| n.style.as_mut())
    }

    /// The node's applicator.
    #[must_use]
    pub fn applicator(&self, id: NodeId) -> Option<&Rc<S::Applicator>> {
        self.get(id).and_then(Node::applicator)
    }

    /// Assign a style to a node, storing a private copy.
    ///
    /// A fresh intrinsic size and layout box are created with it. If the
    /// node already has an applicator, the copy is bound to it and every set
    /// property is applied. Assigning `None` drops the style.
    ///
    /// # Errors
    ///
    /// [`NodeError::UnknownNode`], or any style error from copying or
    /// reapplying. [`StyleError::IncompleteBinding`] is reported as a
    /// deprecation warning instead when
    /// [`TreeConfig::allow_incomplete_binding`] is set.
    pub fn set_style(&mut self, id: NodeId, style: Option<&S>) -> Result<()> {
        let allow_incomplete = self.config.allow_incomplete_binding;
        let node = self.node_mut(id)?;
        let Some(style) = style else {
            node.style = None;
            return Ok(());
        };

        let mut style = style.copy()?;
        node.intrinsic = Some(S::IntrinsicSize::default());
        node.layout = Some(S::layout_box(id));

        let result = match &node.applicator {
            Some(applicator) => {
                style.bind_applicator(Some(Rc::clone(applicator)));
                style.reapply()
            }
            None => Ok(()),
        };
        node.style = Some(style);
        downgrade(result, allow_incomplete, STYLE_ASSIGNED)
    }

    /// Assign (or clear) a node's applicator.
    ///
    /// The applicator is shared, not copied. If the node has a style, the
    /// style is rebound to it; a non-`None` applicator then receives every
    /// set property.
    ///
    /// # Errors
    ///
    /// As [`set_style`](Self::set_style).
    pub fn set_applicator(
        &mut self,
        id: NodeId,
        applicator: Option<Rc<S::Applicator>>,
    ) -> Result<()> {
        let allow_incomplete = self.config.allow_incomplete_binding;
        let node = self.node_mut(id)?;
        node.applicator.clone_from(&applicator);

        let Some(style) = node.style.as_mut() else {
            return Ok(());
        };
        let bound = applicator.is_some();
        style.bind_applicator(applicator);
        if !bound {
            return Ok(());
        }
        downgrade(style.reapply(), allow_incomplete, APPLICATOR_ASSIGNED)
    }

    /// The node's intrinsic size.
    #[must_use]
    pub fn intrinsic(&self, id: NodeId) -> Option<&S::IntrinsicSize> {
        self.get(id).and_then(Node::intrinsic)
    }

    /// The node's intrinsic size, mutably, for renderers to report into.
    #[must_use]
    pub fn intrinsic_mut(&mut self, id: NodeId) -> Option<&mut S::IntrinsicSize> {
        self.nodes.get_mut(id.0).and_then(|n| n.intrinsic.as_mut())
    }

    /// The node's layout box.
    #[must_use]
    pub fn layout_box(&self, id: NodeId) -> Option<&S::LayoutBox> {
        self.get(id).and_then(Node::layout_box)
    }

    /// The node's layout box, mutably, for layout implementations.
    #[must_use]
    pub fn layout_box_mut(&mut self, id: NodeId) -> Option<&mut S::LayoutBox> {
        self.nodes.get_mut(id.0).and_then(|n| n.layout.as_mut())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Structure
    // ─────────────────────────────────────────────────────────────────────

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(Node::parent)
    }

    /// The root of the tree containing a node; the node itself if it has no
    /// parent.
    #[must_use]
    pub fn root(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.root.unwrap_or(id))
    }

    /// Get all children of a node. Empty for leaves and unknown ids.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(Node::children).unwrap_or_default()
    }

    /// Whether the node may have children.
    #[must_use]
    pub fn can_have_children(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Node::can_have_children)
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(id)?);
        let index = siblings.iter().position(|&c| c == id)?;
        siblings.get(index + 1).copied()
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(id)?);
        let index = siblings.iter().position(|&c| c == id)?;
        index.checked_sub(1).map(|i| siblings[i])
    }

    /// Check if `descendant` is a descendant of `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_, S> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// A child attached elsewhere is detached from its old parent first.
    /// The child's subtree takes on `parent`'s root.
    ///
    /// # Errors
    ///
    /// [`NodeError::CannotHaveChildren`] if `parent` is a leaf,
    /// [`NodeError::WouldCreateCycle`] if `child` is `parent` or one of its
    /// ancestors, [`NodeError::UnknownNode`] for a foreign id.
    pub fn add(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let len = self.children(parent).len();
        self.insert(parent, len, child)
    }

    /// Insert `child` among `parent`'s children at `index`, clamped to the
    /// number of children.
    ///
    /// # Errors
    ///
    /// As [`add`](Self::add).
    pub fn insert(&mut self, parent: NodeId, index: usize, child: NodeId) -> Result<()> {
        self.check_branch(parent)?;
        let _ = self.node(child)?;
        if child == parent || self.is_descendant_of(parent, child) {
            return Err(NodeError::WouldCreateCycle { parent, child });
        }

        self.detach(child)?;
        let siblings = self.children_mut(parent)?;
        let index = index.min(siblings.len());
        siblings.insert(index, child);
        self.node_mut(child)?.parent = Some(parent);

        let root = self.root(parent).unwrap_or(parent);
        self.propagate_root(child, Some(root))
    }

    /// Detach `child` from `parent`, making it the root of its own subtree.
    ///
    /// # Errors
    ///
    /// [`NodeError::CannotHaveChildren`] if `parent` is a leaf,
    /// [`NodeError::NotAChild`] if `child` is not one of its children,
    /// [`NodeError::UnknownNode`] for a foreign id.
    pub fn remove(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.check_branch(parent)?;
        if self.parent(child) != Some(parent) {
            return Err(NodeError::NotAChild { parent, child });
        }
        self.detach(child)?;
        self.propagate_root(child, None)
    }

    /// Detach every child of `parent`.
    ///
    /// # Errors
    ///
    /// [`NodeError::CannotHaveChildren`] if `parent` is a leaf,
    /// [`NodeError::UnknownNode`] for a foreign id.
    pub fn clear(&mut self, parent: NodeId) -> Result<()> {
        self.check_branch(parent)?;
        let children = std::mem::take(self.children_mut(parent)?);
        for child in children {
            self.node_mut(child)?.parent = None;
            self.propagate_root(child, None)?;
        }
        Ok(())
    }

    fn check_branch(&self, id: NodeId) -> Result<()> {
        if self.node(id)?.can_have_children() {
            Ok(())
        } else {
            Err(NodeError::CannotHaveChildren(id))
        }
    }

    fn children_mut(&mut self, id: NodeId) -> Result<&mut Vec<NodeId>> {
        self.node_mut(id)?
            .children
            .as_mut()
            .ok_or(NodeError::CannotHaveChildren(id))
    }

    /// Unlink a node from its parent's child list, if it has a parent.
    fn detach(&mut self, child: NodeId) -> Result<()> {
        let Some(parent) = self.node_mut(child)?.parent.take() else {
            return Ok(());
        };
        self.children_mut(parent)?.retain(|&c| c != child);
        Ok(())
    }

    /// Set the root of every node in a subtree, depth first.
    ///
    /// With `root` of `None` the subtree becomes its own tree, rooted at
    /// `subtree`. Only the root itself stores `None`.
    fn propagate_root(&mut self, subtree: NodeId, root: Option<NodeId>) -> Result<()> {
        let shared = root.unwrap_or(subtree);
        let mut stack = vec![subtree];
        while let Some(id) = stack.pop() {
            let node = self.node_mut(id)?;
            node.root = (id != shared).then_some(shared);
            stack.extend(node.children().iter().rev());
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Refresh
    // ─────────────────────────────────────────────────────────────────────

    /// Refresh the layout and appearance of the tree containing `id`.
    ///
    /// The whole tree is laid out from its root, whichever node the refresh
    /// was requested on; then the root's applicator commits the bounds.
    ///
    /// # Errors
    ///
    /// [`NodeError::UnknownNode`] for a foreign id,
    /// [`NodeError::MissingStyle`] if the root has no style.
    pub fn refresh(&mut self, id: NodeId, viewport: &Viewport) -> Result<()> {
        let root = self.root(id).ok_or(NodeError::UnknownNode(id))?;

        #[cfg(feature = "refresh-trace")]
        if root != id {
            eprintln!("[REFRESH] {id:?} redirected to root {root:?}");
        }

        if self.node(root)?.style.is_none() {
            return Err(NodeError::MissingStyle(root));
        }

        #[cfg(feature = "refresh-trace")]
        eprintln!(
            "[REFRESH] layout {root:?} into {}x{} @ {}dpi",
            viewport.width, viewport.height, viewport.dpi
        );

        S::layout(self, root, viewport);

        if let Some(applicator) = self.applicator(root) {
            applicator.set_bounds();
        }
        Ok(())
    }
}

impl<S: Layout> Default for NodeTree<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Downgrade an incomplete binding to a deprecation warning when the tree
/// allows it.
fn downgrade(
    result: strata_style::Result<()>,
    allow_incomplete: bool,
    message: &str,
) -> Result<()> {
    match result {
        Err(StyleError::IncompleteBinding(_)) if allow_incomplete => {
            warning::deprecated("Node", message);
            Ok(())
        }
        other => other.map_err(NodeError::from),
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a, S: Layout> {
    tree: &'a NodeTree<S>,
    current: Option<NodeId>,
}

impl<S: Layout> Iterator for AncestorIterator<'_, S> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}
