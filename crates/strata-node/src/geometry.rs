//! Geometry shared by layout implementations.
//!
//! These are base companions for hosts: a [`Layout`](crate::Layout)
//! implementation may use [`IntrinsicSize`] and [`BaseBox`] directly or
//! substitute its own types.

use std::fmt;

use serde::Serialize;

use crate::tree::NodeId;

/// The area a tree is laid out into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    /// Available width.
    pub width: f32,
    /// Available height.
    pub height: f32,
    /// Resolution of the display, in dots per inch.
    pub dpi: f32,
}

impl Viewport {
    /// The reference resolution of a CSS pixel.
    pub const DEFAULT_DPI: f32 = 96.0;

    /// A viewport at the default resolution.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            dpi: Self::DEFAULT_DPI,
        }
    }

    /// The same viewport at a different resolution.
    #[must_use]
    pub const fn with_dpi(mut self, dpi: f32) -> Self {
        self.dpi = dpi;
        self
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// One intrinsic dimension of a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Dimension {
    /// The node is exactly this size.
    Exact(f32),
    /// The node is at least this size and can grow.
    AtLeast(f32),
}

impl Dimension {
    /// The size, ignoring whether it may grow.
    #[must_use]
    pub const fn value(self) -> f32 {
        match self {
            Self::Exact(v) | Self::AtLeast(v) => v,
        }
    }

    /// Whether the node may grow past this size.
    #[must_use]
    pub const fn is_minimum(self) -> bool {
        matches!(self, Self::AtLeast(_))
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Self::Exact(0.0)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(v) => write!(f, "{v}"),
            Self::AtLeast(v) => write!(f, "at least {v}"),
        }
    }
}

/// The size a node would like to be, as reported by its renderer.
///
/// Changing a dimension marks the size dirty so layout knows it has to run
/// again; setting a dimension to its current value does not.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IntrinsicSize {
    width: Dimension,
    height: Dimension,
    ratio: Option<f32>,
    #[serde(skip)]
    dirty: bool,
}

impl IntrinsicSize {
    /// Intrinsic width.
    #[must_use]
    pub const fn width(&self) -> Dimension {
        self.width
    }

    /// Intrinsic height.
    #[must_use]
    pub const fn height(&self) -> Dimension {
        self.height
    }

    /// Intrinsic aspect ratio (width / height), if the node has one.
    #[must_use]
    pub const fn ratio(&self) -> Option<f32> {
        self.ratio
    }

    /// Set the width. Returns whether it changed.
    pub fn set_width(&mut self, width: Dimension) -> bool {
        let changed = self.width != width;
        self.width = width;
        self.dirty |= changed;
        changed
    }

    /// Set the height. Returns whether it changed.
    pub fn set_height(&mut self, height: Dimension) -> bool {
        let changed = self.height != height;
        self.height = height;
        self.dirty |= changed;
        changed
    }

    /// Set the aspect ratio. Returns whether it changed.
    pub fn set_ratio(&mut self, ratio: Option<f32>) -> bool {
        let changed = self.ratio != ratio;
        self.ratio = ratio;
        self.dirty |= changed;
        changed
    }

    /// Whether a dimension changed since the last [`take_dirty`](Self::take_dirty).
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag, returning its previous state.
    pub const fn take_dirty(&mut self) -> bool {
        let dirty = self.dirty;
        self.dirty = false;
        dirty
    }
}

/// Renders as `(width, height)`.
impl fmt::Display for IntrinsicSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.width, self.height)
    }
}

/// A rectangle positioned in 2D space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rect {
    /// Horizontal position of the top-left corner.
    pub x: f32,
    /// Vertical position of the top-left corner.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

/// Sizes of the four edges around a content area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EdgeSizes {
    /// Top edge size.
    pub top: f32,
    /// Right edge size.
    pub right: f32,
    /// Bottom edge size.
    pub bottom: f32,
    /// Left edge size.
    pub left: f32,
}

impl EdgeSizes {
    /// The same size on every edge.
    #[must_use]
    pub const fn uniform(size: f32) -> Self {
        Self {
            top: size,
            right: size,
            bottom: size,
            left: size,
        }
    }

    /// Left plus right.
    #[must_use]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Top plus bottom.
    #[must_use]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// The laid-out geometry of one node.
///
/// The content area sits inside the node's box, inset by `offsets`; the box
/// itself is positioned at `origin` relative to the tree's root.
///
/// ```text
/// origin ┌───────────────────────────────┐
///        │          offsets.top          │
///        │      ┌───────────────┐        │
///        │ left │    content    │ right  │
///        │      └───────────────┘        │
///        │         offsets.bottom        │
///        └───────────────────────────────┘
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaseBox {
    /// The node this box belongs to.
    pub node: NodeId,
    /// Distance of the box from the root's top edge.
    pub origin_top: f32,
    /// Distance of the box from the root's left edge.
    pub origin_left: f32,
    /// Width of the content area.
    pub content_width: f32,
    /// Height of the content area.
    pub content_height: f32,
    /// Space between the box edges and the content area.
    pub offsets: EdgeSizes,
}

impl BaseBox {
    /// An empty box at the origin.
    #[must_use]
    pub fn new(node: NodeId) -> Self {
        Self {
            node,
            origin_top: 0.0,
            origin_left: 0.0,
            content_width: 0.0,
            content_height: 0.0,
            offsets: EdgeSizes::default(),
        }
    }

    /// Full width of the box.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.content_width + self.offsets.horizontal()
    }

    /// Full height of the box.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.content_height + self.offsets.vertical()
    }

    /// Left edge of the content area relative to the root.
    #[must_use]
    pub fn absolute_content_left(&self) -> f32 {
        self.origin_left + self.offsets.left
    }

    /// Top edge of the content area relative to the root.
    #[must_use]
    pub fn absolute_content_top(&self) -> f32 {
        self.origin_top + self.offsets.top
    }

    /// The content area relative to the root.
    #[must_use]
    pub fn content_rect(&self) -> Rect {
        Rect {
            x: self.absolute_content_left(),
            y: self.absolute_content_top(),
            width: self.content_width,
            height: self.content_height,
        }
    }
}

/// Renders as `<Box (WxH @ left,top)>`.
impl fmt::Display for BaseBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Box ({}x{} @ {},{})>",
            self.width(),
            self.height(),
            self.absolute_content_left(),
            self.absolute_content_top()
        )
    }
}
