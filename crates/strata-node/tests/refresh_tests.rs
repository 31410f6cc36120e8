//! Tests for refreshing a tree's layout.

mod common;

use std::rc::Rc;

use common::{Recorder, Style};
use strata_node::{NodeError, NodeId, NodeTree, Viewport};

/// A root with three leaf children, each with its own applicator.
fn two_level_tree() -> (NodeTree<Style>, NodeId, Vec<(NodeId, Rc<Recorder>)>) {
    let mut tree = NodeTree::new();
    let style = Style::default();
    let mut children = Vec::new();
    for _ in 0..3 {
        let applicator = Recorder::new();
        let id = tree
            .create(Some(&style), Some(Rc::clone(&applicator)), None)
            .unwrap();
        children.push((id, applicator));
    }
    let ids: Vec<NodeId> = children.iter().map(|(id, _)| *id).collect();
    let root = tree
        .create(Some(&style), Some(Recorder::new()), Some(ids.as_slice()))
        .unwrap();
    (tree, root, children)
}

fn content_size(tree: &NodeTree<Style>, id: NodeId) -> (f32, f32) {
    let layout = tree.layout_box(id).unwrap();
    (layout.content_width, layout.content_height)
}

// ========== refresh ==========

#[test]
fn test_refresh_root() {
    let (mut tree, root, children) = two_level_tree();

    tree.refresh(root, &Viewport::new(10.0, 20.0)).unwrap();

    assert_eq!(content_size(&tree, root), (20.0, 40.0));
    assert_eq!(tree.applicator(root).unwrap().bounds_calls(), 1);
    for (child, applicator) in &children {
        assert_eq!(applicator.bounds_calls(), 0);
        assert_eq!(content_size(&tree, *child), (0.0, 0.0));
    }
}

#[test]
fn test_refresh_child_lays_out_root() {
    let (mut tree, root, children) = two_level_tree();
    let (child, child_applicator) = &children[0];

    tree.refresh(*child, &Viewport::new(15.0, 25.0)).unwrap();

    assert_eq!(content_size(&tree, root), (30.0, 50.0));
    assert_eq!(tree.applicator(root).unwrap().bounds_calls(), 1);
    assert_eq!(child_applicator.bounds_calls(), 0);
    assert_eq!(content_size(&tree, *child), (0.0, 0.0));
}

#[test]
fn test_refresh_child_matches_refresh_root() {
    let viewport = Viewport::new(8.0, 4.0).with_dpi(192.0);

    let (mut from_root, root_a, _) = two_level_tree();
    from_root.refresh(root_a, &viewport).unwrap();

    let (mut from_child, root_b, children) = two_level_tree();
    from_child.refresh(children[2].0, &viewport).unwrap();

    assert_eq!(root_a, root_b);
    assert_eq!(from_root.layout_box(root_a), from_child.layout_box(root_b));
}

#[test]
fn test_refresh_detached_subtree_lays_out_its_root() {
    let mut tree = NodeTree::new();
    let style = Style::default();
    let grandchild = tree.leaf(&style).unwrap();
    let applicator = Recorder::new();
    let child = tree
        .create(Some(&style), Some(Rc::clone(&applicator)), Some(&[grandchild][..]))
        .unwrap();
    let root_applicator = Recorder::new();
    let root = tree
        .create(Some(&style), Some(Rc::clone(&root_applicator)), Some(&[child][..]))
        .unwrap();

    tree.clear(root).unwrap();
    tree.refresh(grandchild, &Viewport::new(3.0, 4.0)).unwrap();

    assert_eq!(applicator.bounds_calls(), 1);
    assert_eq!(root_applicator.bounds_calls(), 0);
    assert_eq!(content_size(&tree, child), (6.0, 8.0));
    assert_eq!(content_size(&tree, grandchild), (0.0, 0.0));
}

#[test]
fn test_refresh_without_applicator() {
    let mut tree = NodeTree::new();
    let root = tree.branch(&Style::default(), &[]).unwrap();
    tree.refresh(root, &Viewport::default()).unwrap();
    assert_eq!(content_size(&tree, root), (0.0, 0.0));
}

#[test]
fn test_refresh_root_without_style() {
    let mut tree: NodeTree<Style> = NodeTree::new();
    let child = tree.leaf(&Style::default()).unwrap();
    let root = tree.create(None, None, Some(&[child][..])).unwrap();

    assert_eq!(
        tree.refresh(child, &Viewport::default()),
        Err(NodeError::MissingStyle(root))
    );
}

#[test]
fn test_refresh_unknown_node() {
    let mut tree: NodeTree<Style> = NodeTree::new();
    assert_eq!(
        tree.refresh(NodeId(0), &Viewport::default()),
        Err(NodeError::UnknownNode(NodeId(0)))
    );
}
