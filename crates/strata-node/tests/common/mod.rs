//! A small style type and a recording applicator shared by the node tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::LazyLock;

use strata_node::{Applicator, BaseBox, IntrinsicSize, Layout, NodeId, NodeTree, Viewport};
use strata_style::{ChoiceSet, Declaration, Schema, StyleDeclaration, StyleError, Value};

static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder("Style")
        .property("int_prop", ChoiceSet::new(&[]).with_integer(), Some(0.into()))
        .build()
        .expect("valid schema")
});

/// Records what a style pushes to it.
#[derive(Debug, Default)]
pub struct Recorder {
    applied: RefCell<Vec<(String, Value)>>,
    bounds: Cell<usize>,
    not_ready: bool,
}

impl Recorder {
    /// An applicator that accepts values.
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// An applicator whose renderer isn't wired up yet.
    pub fn not_ready() -> Rc<Self> {
        Rc::new(Self {
            not_ready: true,
            ..Self::default()
        })
    }

    /// Everything applied so far, clearing the record.
    pub fn take_applied(&self) -> Vec<(String, Value)> {
        self.applied.take()
    }

    /// Number of `set_bounds` calls.
    pub fn bounds_calls(&self) -> usize {
        self.bounds.get()
    }
}

impl Applicator for Recorder {
    fn set_bounds(&self) {
        self.bounds.set(self.bounds.get() + 1);
    }
}

/// A style with one integer property.
pub struct Style(Declaration<Recorder>);

impl Default for Style {
    fn default() -> Self {
        Self(Declaration::new(&SCHEMA))
    }
}

impl StyleDeclaration for Style {
    type Applicator = Recorder;

    fn declaration(&self) -> &Declaration<Recorder> {
        &self.0
    }

    fn declaration_mut(&mut self) -> &mut Declaration<Recorder> {
        &mut self.0
    }

    fn apply(&self, name: &str, value: &Value) -> strata_style::Result<()> {
        if let Some(applicator) = self.applicator() {
            if applicator.not_ready {
                return Err(StyleError::IncompleteBinding(name.to_string()));
            }
            applicator
                .applied
                .borrow_mut()
                .push((name.to_string(), value.clone()));
        }
        Ok(())
    }
}

impl Layout for Style {
    type IntrinsicSize = IntrinsicSize;
    type LayoutBox = BaseBox;

    fn layout_box(node: NodeId) -> BaseBox {
        BaseBox::new(node)
    }

    /// Allocates twice the viewport to the root.
    fn layout(tree: &mut NodeTree<Self>, root: NodeId, viewport: &Viewport) {
        if let Some(layout) = tree.layout_box_mut(root) {
            layout.content_width = viewport.width * 2.0;
            layout.content_height = viewport.height * 2.0;
        }
    }
}

/// A style with `int_prop` set.
pub fn style_with(value: i64) -> Style {
    let mut style = Style::default();
    style.set("int_prop", value).expect("valid value");
    style
}

/// The record of one `int_prop` application.
pub fn int_prop(value: i64) -> (String, Value) {
    ("int_prop".to_string(), Value::from(value))
}
