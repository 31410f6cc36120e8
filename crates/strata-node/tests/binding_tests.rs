//! Tests for binding styles and applicators to nodes.

mod common;

use std::rc::Rc;

use common::{Recorder, Style, int_prop, style_with};
use strata_common::warning::has_warned;
use strata_node::{NodeError, NodeTree, TreeConfig};
use strata_style::{StyleDeclaration, StyleError};

// ========== reapply on binding ==========

#[test]
fn test_style_without_applicator_is_not_applied() {
    let mut tree = NodeTree::<Style>::new();
    let node = tree.leaf(&style_with(5)).unwrap();
    assert!(tree.style(node).unwrap().applicator().is_none());
}

#[test]
fn test_applicator_after_style_reapplies_once() {
    let mut tree = NodeTree::<Style>::new();
    let node = tree.leaf(&style_with(5)).unwrap();

    let applicator = Recorder::new();
    tree.set_applicator(node, Some(Rc::clone(&applicator))).unwrap();

    // The applicator is shared, not copied, and the style is bound to it.
    assert!(Rc::ptr_eq(tree.applicator(node).unwrap(), &applicator));
    assert!(Rc::ptr_eq(
        tree.style(node).unwrap().applicator().unwrap(),
        &applicator
    ));
    assert_eq!(applicator.take_applied(), vec![int_prop(5)]);
}

#[test]
fn test_style_after_applicator_reapplies_once() {
    let mut tree = NodeTree::<Style>::new();
    let applicator = Recorder::new();
    let node = tree.create(None, Some(Rc::clone(&applicator)), None).unwrap();
    assert!(applicator.take_applied().is_empty());

    tree.set_style(node, Some(&style_with(6))).unwrap();
    assert_eq!(applicator.take_applied(), vec![int_prop(6)]);
}

#[test]
fn test_create_with_both_reapplies_once() {
    let mut tree = NodeTree::<Style>::new();
    let applicator = Recorder::new();
    let _node = tree
        .create(Some(&style_with(5)), Some(Rc::clone(&applicator)), None)
        .unwrap();
    assert_eq!(applicator.take_applied(), vec![int_prop(5)]);
}

#[test]
fn test_replacing_style_reapplies_new_values() {
    let mut tree = NodeTree::<Style>::new();
    let applicator = Recorder::new();
    let node = tree
        .create(Some(&style_with(5)), Some(Rc::clone(&applicator)), None)
        .unwrap();
    let _ = applicator.take_applied();

    tree.set_style(node, Some(&style_with(6))).unwrap();
    assert_eq!(applicator.take_applied(), vec![int_prop(6)]);
    assert_eq!(tree.style(node).unwrap().get("int_prop").unwrap(), 6);
}

#[test]
fn test_second_applicator_reapplies_again() {
    let mut tree = NodeTree::<Style>::new();
    let first = Recorder::new();
    let node = tree
        .create(Some(&style_with(5)), Some(Rc::clone(&first)), None)
        .unwrap();

    let second = Recorder::new();
    tree.set_applicator(node, Some(Rc::clone(&second))).unwrap();
    assert_eq!(first.take_applied(), vec![int_prop(5)]);
    assert_eq!(second.take_applied(), vec![int_prop(5)]);
}

#[test]
fn test_clearing_applicator_does_not_reapply() {
    let mut tree = NodeTree::<Style>::new();
    let applicator = Recorder::new();
    let node = tree
        .create(Some(&style_with(5)), Some(Rc::clone(&applicator)), None)
        .unwrap();
    let _ = applicator.take_applied();

    tree.set_applicator(node, None).unwrap();
    assert!(tree.applicator(node).is_none());
    assert!(tree.style(node).unwrap().applicator().is_none());
    assert!(applicator.take_applied().is_empty());
}

#[test]
fn test_applicator_without_style() {
    let mut tree = NodeTree::<Style>::new();
    let node = tree.create(None, None, None).unwrap();
    tree.set_style(node, None).unwrap();

    let applicator = Recorder::new();
    tree.set_applicator(node, Some(Rc::clone(&applicator))).unwrap();
    assert!(applicator.take_applied().is_empty());
}

#[test]
fn test_writes_after_binding_apply_incrementally() {
    let mut tree = NodeTree::<Style>::new();
    let applicator = Recorder::new();
    let node = tree
        .create(Some(&Style::default()), Some(Rc::clone(&applicator)), None)
        .unwrap();
    assert!(applicator.take_applied().is_empty());

    tree.style_mut(node).unwrap().set("int_prop", 9).unwrap();
    tree.style_mut(node).unwrap().set("int_prop", 9).unwrap();
    assert_eq!(applicator.take_applied(), vec![int_prop(9)]);
}

// ========== incomplete bindings ==========

#[test]
fn test_incomplete_binding_propagates_by_default() {
    let mut tree = NodeTree::<Style>::new();
    let node = tree.leaf(&style_with(5)).unwrap();

    let result = tree.set_applicator(node, Some(Recorder::not_ready()));
    assert_eq!(
        result,
        Err(NodeError::Style(StyleError::IncompleteBinding(
            "int_prop".to_string()
        )))
    );
}

#[test]
fn test_incomplete_binding_on_create_propagates() {
    let mut tree: NodeTree<Style> = NodeTree::with_config(TreeConfig::default());
    let result = tree.create(Some(&style_with(5)), Some(Recorder::not_ready()), None);
    assert!(matches!(
        result,
        Err(NodeError::Style(StyleError::IncompleteBinding(_)))
    ));
}

#[test]
fn test_incomplete_binding_warns_when_allowed() {
    let mut tree = NodeTree::<Style>::with_config(TreeConfig::lenient());

    let node = tree.leaf(&style_with(5)).unwrap();
    tree.set_applicator(node, Some(Recorder::not_ready())).unwrap();
    assert!(has_warned(
        "Node",
        "failed to apply style when a new applicator was assigned and a style was already \
         present; a node should be able to apply its style before it has both a style and an \
         applicator"
    ));

    let node = tree.create(None, Some(Recorder::not_ready()), None).unwrap();
    tree.set_style(node, Some(&style_with(5))).unwrap();
    assert!(has_warned(
        "Node",
        "failed to apply style when a new style was assigned and an applicator was already \
         present; a node should be able to apply its style before it has both a style and an \
         applicator"
    ));

    // The node keeps both even though nothing could be applied.
    assert!(tree.style(node).is_some());
    assert!(tree.applicator(node).is_some());
}

#[test]
fn test_other_style_errors_still_propagate() {
    let mut tree = NodeTree::<Style>::with_config(TreeConfig::lenient());
    let node = tree.create(None, None, None).unwrap();
    assert!(tree.set_style(node, Some(&Style::default())).is_ok());
    let err = tree
        .style_mut(node)
        .unwrap()
        .set("int_prop", "not a number")
        .unwrap_err();
    assert!(matches!(err, StyleError::InvalidValue { .. }));
}
