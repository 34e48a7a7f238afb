mod common;

use treeview::prelude::*;

use common::{ids, kinds, record, rows, tree, tree_with};

fn none() -> ChangeOptions {
    ChangeOptions::new()
}

// ============================================================================
// Defaults
// ============================================================================

#[test]
fn test_levels_control_initial_rows() {
    assert_eq!(tree(1).row_count(), 5);
    assert_eq!(tree(2).row_count(), 7);
    assert_eq!(tree(3).row_count(), 9);
}

#[test]
fn test_explicit_state_wins_over_defaults() {
    let specs = vec![
        NodeSpec::new("A")
            .expanded(false)
            .child(NodeSpec::new("B")),
        NodeSpec::new("C").checked(true).selectable(false),
    ];
    let tree = TreeView::new(specs, TreeOptions::new()).unwrap();
    assert!(!tree.get_node(0).unwrap().state.expanded);
    assert!(tree.get_node(2).unwrap().state.checked);
    assert!(!tree.get_node(2).unwrap().selectable);
    assert_eq!(tree.row_count(), 2);
}

// ============================================================================
// Expansion
// ============================================================================

#[test]
fn test_expand_node_adds_children_rows() {
    let mut tree = tree(1);
    let events = record(&mut tree);
    tree.expand_node(0, none());
    assert_eq!(tree.row_count(), 7);
    assert_eq!(
        rows(&tree)[..4],
        ["Parent 1", "Child 1", "Child 2", "Parent 2"]
    );
    assert_eq!(kinds(&events), vec![(EventKind::NodeExpanded, Some(0))]);
    assert!(tree.get_node(1).unwrap().visible);
}

#[test]
fn test_expand_is_a_no_op_when_already_expanded() {
    let mut tree = tree(2);
    let events = record(&mut tree);
    tree.expand_node(0, none());
    assert!(kinds(&events).is_empty());
}

#[test]
fn test_expanding_a_leaf_does_nothing() {
    let mut tree = tree(2);
    let events = record(&mut tree);
    tree.expand_node(4, none());
    assert!(!tree.get_node(4).unwrap().state.expanded);
    assert!(kinds(&events).is_empty());
}

#[test]
fn test_collapse_cascades_to_descendants() {
    let mut tree = tree(3);
    let events = record(&mut tree);
    tree.collapse_node(0, none());

    assert_eq!(tree.row_count(), 5);
    assert!(!tree.get_node(1).unwrap().state.expanded);
    assert!(!tree.get_node(1).unwrap().visible);
    assert_eq!(
        kinds(&events),
        vec![
            (EventKind::NodeCollapsed, Some(0)),
            (EventKind::NodeCollapsed, Some(1)),
        ]
    );

    tree.expand_node(0, none());
    assert_eq!(rows(&tree)[..4], ["Parent 1", "Child 1", "Child 2", "Parent 2"]);
}

#[test]
fn test_collapse_ignoring_children_restores_subtree_on_expand() {
    let mut tree = tree(3);
    tree.collapse_node(0, none().ignore_children());
    assert_eq!(tree.row_count(), 5);
    assert!(tree.get_node(1).unwrap().state.expanded);

    tree.expand_node(0, none());
    assert_eq!(
        rows(&tree)[..6],
        ["Parent 1", "Child 1", "Grandchild 1", "Grandchild 2", "Child 2", "Parent 2"]
    );
}

#[test]
fn test_expand_node_with_levels() {
    let mut tree = tree(1);
    tree.expand_node(0, none().levels(2));
    assert!(tree.get_node(1).unwrap().state.expanded);
    assert_eq!(tree.row_count(), 9);

    let mut tree = common::tree(3);
    tree.expand_node(0, none().levels(1));
    assert!(!tree.get_node(1).unwrap().state.expanded);
    assert_eq!(tree.row_count(), 7);
}

#[test]
fn test_expand_all_and_collapse_all() {
    let mut tree = tree(1);
    tree.expand_all(none());
    assert_eq!(tree.row_count(), 9);
    assert_eq!(ids(tree.get_expanded()), vec![0, 1]);

    tree.collapse_all(none());
    assert_eq!(tree.row_count(), 5);
    assert!(tree.get_expanded().is_empty());
}

#[test]
fn test_expand_all_with_levels() {
    let mut tree = tree(1);
    tree.expand_all(none().levels(1));
    assert_eq!(ids(tree.get_expanded()), vec![0]);
    assert_eq!(tree.row_count(), 7);
}

#[test]
fn test_zero_levels_expands_everything() {
    let mut tree = tree(1);
    tree.expand_all(none().levels(0));
    assert_eq!(ids(tree.get_expanded()), vec![0, 1]);
    assert_eq!(tree.row_count(), 9);

    let mut tree = tree_with(TreeOptions::new().levels(1));
    tree.invoke(r#"{"method": "expandAll", "args": {"options": {"levels": 0}}}"#)
        .unwrap();
    assert_eq!(tree.row_count(), 9);
}

#[test]
fn test_zero_levels_leaves_descendants_alone() {
    let mut tree = tree(3);
    tree.collapse_node(0, none().ignore_children());
    tree.expand_node(0, none().levels(0));
    assert_eq!(ids(tree.get_expanded()), vec![0, 1]);
    assert_eq!(tree.row_count(), 9);
}

#[test]
fn test_toggle_expanded() {
    let mut tree = tree(1);
    tree.toggle_node_expanded(0, none());
    assert!(tree.get_node(0).unwrap().state.expanded);
    tree.toggle_node_expanded(0, none());
    assert!(!tree.get_node(0).unwrap().state.expanded);
    assert_eq!(tree.row_count(), 5);
}

#[test]
fn test_reveal_expands_ancestors_only() {
    let mut tree = tree(1);
    tree.reveal_node(3, none());
    assert_eq!(ids(tree.get_expanded()), vec![0, 1]);
    assert!(!tree.get_node(3).unwrap().state.expanded);
    assert_eq!(tree.row_count(), 9);
}

#[test]
fn test_silent_suppresses_events() {
    let mut tree = tree(1);
    let events = record(&mut tree);
    tree.expand_node(0, none().silent());
    tree.select_node(1, none().silent());
    assert!(kinds(&events).is_empty());
    assert_eq!(tree.row_count(), 7);
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn test_single_select_hands_over() {
    let mut tree = tree(2);
    let events = record(&mut tree);
    tree.select_node(0, none());
    tree.select_node(1, none());

    assert_eq!(ids(tree.get_selected()), vec![1]);
    assert_eq!(
        kinds(&events),
        vec![
            (EventKind::NodeSelected, Some(0)),
            (EventKind::NodeUnselected, Some(0)),
            (EventKind::NodeSelected, Some(1)),
        ]
    );
}

#[test]
fn test_multi_select_keeps_all() {
    let mut tree = tree_with(TreeOptions::new().multi_select(true));
    tree.select_node(vec![0usize, 1, 5], none());
    assert_eq!(ids(tree.get_selected()), vec![0, 1, 5]);
    tree.unselect_node(1, none());
    assert_eq!(ids(tree.get_selected()), vec![0, 5]);
}

#[test]
fn test_prevent_unselect_refuses_last_selection() {
    let mut tree = tree_with(TreeOptions::new().prevent_unselect(true));
    tree.select_node(0, none());
    let events = record(&mut tree);

    tree.unselect_node(0, none());
    assert_eq!(ids(tree.get_selected()), vec![0]);
    assert!(kinds(&events).is_empty());

    tree.select_node(5, none());
    assert_eq!(ids(tree.get_selected()), vec![5]);
}

#[test]
fn test_allow_reselect_reemits_selected() {
    let mut tree = tree_with(TreeOptions::new().prevent_unselect(true).allow_reselect(true));
    tree.select_node(0, none());
    let events = record(&mut tree);
    tree.toggle_node_selected(0, none());
    assert!(tree.get_node(0).unwrap().state.selected);
    assert_eq!(kinds(&events), vec![(EventKind::NodeSelected, Some(0))]);
}

#[test]
fn test_toggle_selected() {
    let mut tree = tree(2);
    tree.toggle_node_selected(4, none());
    assert_eq!(ids(tree.get_selected()), vec![4]);
    tree.toggle_node_selected(4, none());
    assert!(tree.get_selected().is_empty());
    assert_eq!(tree.get_unselected().len(), 9);
}

// ============================================================================
// Checking
// ============================================================================

#[test]
fn test_check_and_uncheck() {
    let mut tree = tree(2);
    let events = record(&mut tree);
    tree.check_node(vec![0usize, 4], none());
    assert_eq!(ids(tree.get_checked()), vec![0, 4]);
    tree.uncheck_node(0, none());
    tree.toggle_node_checked(4, none());
    assert!(tree.get_checked().is_empty());
    assert_eq!(
        kinds(&events),
        vec![
            (EventKind::NodeChecked, Some(0)),
            (EventKind::NodeChecked, Some(4)),
            (EventKind::NodeUnchecked, Some(0)),
            (EventKind::NodeUnchecked, Some(4)),
        ]
    );
}

#[test]
fn test_check_all_and_uncheck_all() {
    let mut tree = tree(2);
    tree.check_all(none());
    assert_eq!(tree.get_checked().len(), 9);
    assert!(tree.get_unchecked().is_empty());
    tree.uncheck_all(none());
    assert_eq!(tree.get_unchecked().len(), 9);
}

// ============================================================================
// Disabling
// ============================================================================

#[test]
fn test_disable_cascades_on_the_node() {
    let mut tree = tree(3);
    tree.select_node(0, none());
    tree.check_node(0, none());
    let events = record(&mut tree);

    tree.disable_node(0, none());
    let node = tree.get_node(0).unwrap();
    assert!(node.state.disabled);
    assert!(!node.state.selected);
    assert!(!node.state.checked);
    assert!(!node.state.expanded);
    assert_eq!(tree.row_count(), 5);
    assert_eq!(
        kinds(&events),
        vec![
            (EventKind::NodeUnselected, Some(0)),
            (EventKind::NodeUnchecked, Some(0)),
            (EventKind::NodeCollapsed, Some(0)),
            (EventKind::NodeCollapsed, Some(1)),
            (EventKind::NodeDisabled, Some(0)),
        ]
    );
}

#[test]
fn test_disable_overrides_prevent_unselect() {
    let mut tree = tree_with(TreeOptions::new().prevent_unselect(true));
    tree.select_node(5, none());
    tree.disable_node(5, none());
    assert!(tree.get_selected().is_empty());
}

#[test]
fn test_disabled_nodes_reject_changes() {
    let mut tree = tree(1);
    tree.disable_node(0, none());
    let events = record(&mut tree);

    tree.select_node(0, none());
    tree.check_node(0, none());
    tree.expand_node(0, none());
    let node = tree.get_node(0).unwrap();
    assert!(!node.state.selected && !node.state.checked && !node.state.expanded);
    assert!(kinds(&events).is_empty());
}

#[test]
fn test_enable_and_toggle_disabled() {
    let mut tree = tree(2);
    tree.disable_all(none());
    assert_eq!(tree.get_disabled().len(), 9);
    assert_eq!(tree.row_count(), 5);

    tree.enable_all(none());
    assert_eq!(tree.get_enabled().len(), 9);

    tree.toggle_node_disabled(5, none());
    assert_eq!(ids(tree.get_disabled()), vec![5]);
    tree.enable_node(5, none());
    assert!(tree.get_disabled().is_empty());
}

#[test]
fn test_unknown_targets_are_skipped() {
    let mut tree = tree(2);
    tree.select_node(vec![42usize, 4], none());
    assert_eq!(ids(tree.get_selected()), vec![4]);
}
