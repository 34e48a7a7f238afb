mod common;

use treeview::prelude::*;

use common::{ids, sample, tree, SAMPLE_JSON};

// ============================================================================
// Building
// ============================================================================

#[test]
fn test_ids_are_dense_pre_order() {
    let index = TreeIndex::build(&sample());
    assert_eq!(index.len(), 9);
    let texts: Vec<&str> = index.iter().map(|n| n.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "Parent 1",
            "Child 1",
            "Grandchild 1",
            "Grandchild 2",
            "Child 2",
            "Parent 2",
            "Parent 3",
            "Parent 4",
            "Parent 5"
        ]
    );
    for (i, node) in index.iter().enumerate() {
        assert_eq!(node.id, NodeId(i));
    }
}

#[test]
fn test_parent_ids_and_levels() {
    let index = TreeIndex::build(&sample());
    assert_eq!(index.roots(), &[NodeId(0), NodeId(5), NodeId(6), NodeId(7), NodeId(8)]);
    assert_eq!(index.get(NodeId(3)).unwrap().parent_id, Some(NodeId(1)));
    assert_eq!(index.get(NodeId(3)).unwrap().level, 3);
    assert_eq!(index.get(NodeId(4)).unwrap().parent_id, Some(NodeId(0)));
    assert!(index.get(NodeId(5)).unwrap().is_root());
    assert_eq!(index.children(NodeId(0)), &[NodeId(1), NodeId(4)]);
}

#[test]
fn test_json_and_native_definitions_agree() {
    let from_json = TreeView::new(SAMPLE_JSON, TreeOptions::new()).unwrap();
    let native = tree(2);
    assert_eq!(from_json.to_specs(), native.to_specs());
}

#[test]
fn test_empty_definition() {
    let tree = TreeView::new(Vec::new(), TreeOptions::new()).unwrap();
    assert!(tree.is_empty());
    assert_eq!(tree.row_count(), 0);
}

// ============================================================================
// Lookup
// ============================================================================

#[test]
fn test_get_parent_and_siblings() {
    let tree = tree(2);
    assert_eq!(tree.get_parent(2).unwrap().text, "Child 1");
    assert!(tree.get_parent(0).is_none());
    assert_eq!(ids(tree.get_siblings(2)), vec![3]);
    assert_eq!(ids(tree.get_siblings(0)), vec![5, 6, 7, 8]);
}

#[test]
fn test_out_of_range_resolves_to_nothing() {
    let tree = tree(2);
    assert!(tree.get_node(99).is_none());
    assert!(tree.get_parent(99).is_none());
    assert!(tree.get_siblings(99).is_empty());
}

#[test]
fn test_ancestors_and_descendants() {
    let index = TreeIndex::build(&sample());
    assert_eq!(index.ancestors(NodeId(3)), vec![NodeId(1), NodeId(0)]);
    assert_eq!(
        index.descendants(NodeId(0)),
        vec![NodeId(1), NodeId(2), NodeId(3), NodeId(4)]
    );
    assert!(index.descendants(NodeId(8)).is_empty());
}

#[test]
fn test_node_reference_resolves_to_its_id() {
    let tree = tree(2);
    let child = tree.get_node(4).unwrap().clone();
    assert_eq!(tree.get_node(&child).unwrap().text, "Child 2");
}

// ============================================================================
// Targets
// ============================================================================

#[test]
fn test_targets_from_json_single_or_many() {
    let one: Targets = serde_json::from_str("3").unwrap();
    assert_eq!(one.ids(), &[NodeId(3)]);
    let many: Targets = serde_json::from_str("[1, 4]").unwrap();
    assert_eq!(many.ids(), &[NodeId(1), NodeId(4)]);
    assert_eq!(serde_json::to_string(&many).unwrap(), "[1,4]");
}

#[test]
fn test_targets_from_native_forms() {
    assert_eq!(Targets::from(vec![1usize, 2]).ids(), &[NodeId(1), NodeId(2)]);
    assert_eq!(Targets::from([NodeId(0)]).ids(), &[NodeId(0)]);
    assert_eq!(Targets::from(&[5usize, 6][..]).ids(), &[NodeId(5), NodeId(6)]);
}

// ============================================================================
// Round trip
// ============================================================================

#[test]
fn test_to_specs_round_trip_preserves_state() {
    let mut tree = tree(2);
    tree.check_node(2, ChangeOptions::new());
    tree.select_node(4, ChangeOptions::new());
    tree.disable_node(6, ChangeOptions::new());
    tree.expand_node(1, ChangeOptions::new());

    let specs = tree.to_specs();
    assert_eq!(specs[0].nodes[0].nodes[0].state.visible, Some(true));
    let json = serde_json::to_string(&specs).unwrap();
    let reloaded = TreeView::new(json.as_str(), TreeOptions::new().levels(1)).unwrap();

    for (a, b) in tree.index().iter().zip(reloaded.index().iter()) {
        assert_eq!(a.state, b.state, "state of node {}", a.id);
        assert_eq!(a.visible, b.visible, "visibility of node {}", a.id);
        assert_eq!(a.text, b.text);
    }
}
