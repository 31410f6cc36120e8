//! Tests for node creation and structural mutation: add, insert, remove, clear.

mod common;

use common::Style;
use strata_node::{NodeError, NodeId, NodeTree, TreeConfig};
use strata_style::StyleDeclaration;

fn tree() -> NodeTree<Style> {
    NodeTree::new()
}

/// Assert that every node of `nodes` reports `root` as its root.
fn assert_root(tree: &NodeTree<Style>, nodes: &[NodeId], root: NodeId) {
    for &node in nodes {
        assert_eq!(tree.root(node), Some(root), "root of {node:?}");
    }
}

// ========== creation ==========

#[test]
fn test_create_leaf() {
    let mut tree = tree();
    let leaf = tree.leaf(&Style::default()).unwrap();

    assert!(tree.style(leaf).is_some());
    assert!(tree.applicator(leaf).is_none());
    assert_eq!(tree.parent(leaf), None);
    assert_eq!(tree.root(leaf), Some(leaf));
    assert!(tree.children(leaf).is_empty());
    assert!(!tree.can_have_children(leaf));
}

#[test]
fn test_create_branch() {
    let mut tree = tree();
    let style = Style::default();
    let a = tree.leaf(&style).unwrap();
    let b = tree.leaf(&style).unwrap();
    let node = tree.branch(&style, &[a, b]).unwrap();

    assert!(tree.can_have_children(node));
    assert_eq!(tree.children(node), &[a, b]);
    assert_eq!(tree.parent(a), Some(node));
    assert_eq!(tree.parent(b), Some(node));
    assert_root(&tree, &[node, a, b], node);
}

#[test]
fn test_empty_branch_can_have_children() {
    let mut tree = tree();
    let node = tree.branch(&Style::default(), &[]).unwrap();
    assert!(tree.can_have_children(node));
    assert!(tree.children(node).is_empty());
}

#[test]
fn test_create_without_style() {
    let mut tree = tree();
    let node = tree.create(None, None, None).unwrap();
    assert!(tree.style(node).is_none());
    assert!(tree.intrinsic(node).is_none());
    assert!(tree.layout_box(node).is_none());
}

#[test]
fn test_style_is_copied() {
    let mut tree = tree();
    let mut style = common::style_with(5);
    let node = tree.leaf(&style).unwrap();

    style.set("int_prop", 6).unwrap();
    assert_eq!(tree.style(node).unwrap().get("int_prop").unwrap(), 5);
}

#[test]
fn test_style_creates_fresh_layout_state() {
    let mut tree = tree();
    let node = tree.leaf(&Style::default()).unwrap();
    assert_eq!(tree.layout_box(node).map(|b| b.node), Some(node));
    assert_eq!(tree.intrinsic(node).map(ToString::to_string).as_deref(), Some("(0, 0)"));
}

// ========== add / insert ==========

#[test]
fn test_add() {
    let mut tree = tree();
    let style = Style::default();
    let node = tree.branch(&style, &[]).unwrap();
    let child = tree.leaf(&style).unwrap();

    tree.add(node, child).unwrap();
    assert_eq!(tree.children(node), &[child]);
    assert_eq!(tree.parent(child), Some(node));
    assert_root(&tree, &[node, child], node);
}

#[test]
fn test_add_propagates_root_transitively() {
    let mut tree = tree();
    let style = Style::default();
    let grandchild = tree.leaf(&style).unwrap();
    let child = tree.branch(&style, &[grandchild]).unwrap();
    let root = tree.branch(&style, &[]).unwrap();
    assert_root(&tree, &[child, grandchild], child);

    tree.add(root, child).unwrap();
    assert_root(&tree, &[root, child, grandchild], root);

    let top = tree.branch(&style, &[root]).unwrap();
    assert_root(&tree, &[top, root, child, grandchild], top);
}

#[test]
fn test_insert_positions() {
    let mut tree = tree();
    let style = Style::default();
    let a = tree.leaf(&style).unwrap();
    let b = tree.leaf(&style).unwrap();
    let c = tree.leaf(&style).unwrap();
    let d = tree.leaf(&style).unwrap();
    let node = tree.branch(&style, &[a, b]).unwrap();

    tree.insert(node, 1, c).unwrap();
    assert_eq!(tree.children(node), &[a, c, b]);

    tree.insert(node, 99, d).unwrap();
    assert_eq!(tree.children(node), &[a, c, b, d]);
    assert_root(&tree, &[a, b, c, d], node);
}

#[test]
fn test_add_moves_child_between_parents() {
    let mut tree = tree();
    let style = Style::default();
    let child = tree.leaf(&style).unwrap();
    let first = tree.branch(&style, &[child]).unwrap();
    let second = tree.branch(&style, &[]).unwrap();

    tree.add(second, child).unwrap();
    assert!(tree.children(first).is_empty());
    assert_eq!(tree.children(second), &[child]);
    assert_eq!(tree.parent(child), Some(second));
    assert_eq!(tree.root(child), Some(second));
}

#[test]
fn test_insert_reorders_existing_child() {
    let mut tree = tree();
    let style = Style::default();
    let a = tree.leaf(&style).unwrap();
    let b = tree.leaf(&style).unwrap();
    let c = tree.leaf(&style).unwrap();
    let node = tree.branch(&style, &[a, b, c]).unwrap();

    tree.insert(node, 0, c).unwrap();
    assert_eq!(tree.children(node), &[c, a, b]);
}

#[test]
fn test_add_rejects_cycles() {
    let mut tree = tree();
    let style = Style::default();
    let inner = tree.branch(&style, &[]).unwrap();
    let outer = tree.branch(&style, &[inner]).unwrap();

    assert_eq!(
        tree.add(inner, outer),
        Err(NodeError::WouldCreateCycle {
            parent: inner,
            child: outer
        })
    );
    assert_eq!(
        tree.add(outer, outer),
        Err(NodeError::WouldCreateCycle {
            parent: outer,
            child: outer
        })
    );
    assert_eq!(tree.children(outer), &[inner]);
    assert!(tree.children(inner).is_empty());
}

#[test]
fn test_siblings_and_ancestors() {
    let mut tree = tree();
    let style = Style::default();
    let a = tree.leaf(&style).unwrap();
    let b = tree.leaf(&style).unwrap();
    let mid = tree.branch(&style, &[a, b]).unwrap();
    let top = tree.branch(&style, &[mid]).unwrap();

    assert_eq!(tree.next_sibling(a), Some(b));
    assert_eq!(tree.prev_sibling(b), Some(a));
    assert_eq!(tree.prev_sibling(a), None);
    assert_eq!(tree.next_sibling(top), None);
    assert_eq!(tree.ancestors(b).collect::<Vec<_>>(), vec![mid, top]);
    assert!(tree.is_descendant_of(a, top));
    assert!(!tree.is_descendant_of(top, a));
}

// ========== remove / clear ==========

#[test]
fn test_remove() {
    let mut tree = tree();
    let style = Style::default();
    let grandchild = tree.leaf(&style).unwrap();
    let child = tree.branch(&style, &[grandchild]).unwrap();
    let other = tree.leaf(&style).unwrap();
    let node = tree.branch(&style, &[child, other]).unwrap();

    tree.remove(node, child).unwrap();
    assert_eq!(tree.children(node), &[other]);
    assert_eq!(tree.parent(child), None);
    assert_root(&tree, &[child, grandchild], child);
    assert_root(&tree, &[node, other], node);
}

#[test]
fn test_remove_non_child() {
    let mut tree = tree();
    let style = Style::default();
    let stranger = tree.leaf(&style).unwrap();
    let node = tree.branch(&style, &[]).unwrap();

    assert_eq!(
        tree.remove(node, stranger),
        Err(NodeError::NotAChild {
            parent: node,
            child: stranger
        })
    );
}

#[test]
fn test_clear() {
    let mut tree = tree();
    let style = Style::default();
    let grandchild = tree.leaf(&style).unwrap();
    let children = [
        tree.leaf(&style).unwrap(),
        tree.branch(&style, &[grandchild]).unwrap(),
        tree.leaf(&style).unwrap(),
    ];
    let node = tree.branch(&style, &children).unwrap();
    assert_eq!(tree.children(node), &children);
    assert_eq!(tree.root(grandchild), Some(node));

    tree.clear(node).unwrap();
    assert!(tree.children(node).is_empty());
    for child in children {
        assert_eq!(tree.parent(child), None);
        assert_eq!(tree.root(child), Some(child));
    }

    // The cleared subtree keeps its shape, rooted at the detached child.
    assert_eq!(tree.parent(grandchild), Some(children[1]));
    assert_eq!(tree.root(grandchild), Some(children[1]));
}

// ========== leaf invariant ==========

#[test]
fn test_leaf_rejects_structural_changes() {
    let mut tree = tree();
    let style = Style::default();
    let leaf = tree.leaf(&style).unwrap();
    let other = tree.leaf(&style).unwrap();

    let expected = Err(NodeError::CannotHaveChildren(leaf));
    assert_eq!(tree.add(leaf, other), expected);
    assert_eq!(tree.insert(leaf, 0, other), expected);
    assert_eq!(tree.remove(leaf, other), expected);
    assert_eq!(tree.clear(leaf), expected);

    assert_eq!(tree.parent(other), None);
    assert_eq!(tree.root(other), Some(other));
}

#[test]
fn test_unknown_node() {
    let mut tree = tree();
    let node = tree.branch(&Style::default(), &[]).unwrap();
    let bogus = NodeId(42);

    assert_eq!(tree.add(node, bogus), Err(NodeError::UnknownNode(bogus)));
    assert_eq!(tree.clear(bogus), Err(NodeError::UnknownNode(bogus)));
    assert!(tree.set_style(bogus, None).is_err());
    assert_eq!(tree.root(bogus), None);
}

// ========== configuration ==========

#[test]
fn test_config_defaults_strict() {
    let tree = tree();
    assert!(!tree.config().allow_incomplete_binding);

    let config: TreeConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, TreeConfig::default());

    let config: TreeConfig =
        serde_json::from_str(r#"{"allow_incomplete_binding": true}"#).unwrap();
    assert_eq!(config, TreeConfig::lenient());
}
