//! Property tests over randomly shaped trees and operation sequences.

use proptest::prelude::*;
use treeview::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn arb_flags() -> impl Strategy<Value = [Option<bool>; 4]> {
    any::<[Option<bool>; 4]>()
}

fn with_flags(mut spec: NodeSpec, flags: [Option<bool>; 4]) -> NodeSpec {
    let [expanded, selected, checked, disabled] = flags;
    spec.state.expanded = expanded;
    spec.state.selected = selected;
    spec.state.checked = checked;
    spec.state.disabled = disabled;
    spec
}

fn arb_spec() -> impl Strategy<Value = NodeSpec> {
    let leaf = ("[a-z]{1,6}", arb_flags()).prop_map(|(text, flags)| with_flags(NodeSpec::new(text), flags));
    leaf.prop_recursive(4, 32, 4, |inner| {
        ("[a-z]{1,6}", prop::collection::vec(inner, 1..4), arb_flags()).prop_map(
            |(text, children, flags)| with_flags(NodeSpec::new(text).children(children), flags),
        )
    })
}

fn arb_forest() -> impl Strategy<Value = Vec<NodeSpec>> {
    prop::collection::vec(arb_spec(), 0..5)
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Select(usize),
    Unselect(usize),
    Check(usize),
    Expand(usize),
    ExpandLevels(usize, usize),
    Collapse(usize),
    CollapseShallow(usize),
    Toggle(usize),
    Reveal(usize),
    Disable(usize),
    Enable(usize),
    ExpandAll,
    CollapseAll,
}

fn arb_op() -> impl Strategy<Value = Op> {
    let n = 0usize..64;
    let state = prop_oneof![
        n.clone().prop_map(Op::Select),
        n.clone().prop_map(Op::Unselect),
        n.clone().prop_map(Op::Check),
        n.clone().prop_map(Op::Disable),
        n.clone().prop_map(Op::Enable),
    ];
    let expansion = prop_oneof![
        n.clone().prop_map(Op::Expand),
        (n.clone(), 1usize..4).prop_map(|(id, levels)| Op::ExpandLevels(id, levels)),
        n.clone().prop_map(Op::Collapse),
        n.clone().prop_map(Op::CollapseShallow),
        n.clone().prop_map(Op::Toggle),
        n.prop_map(Op::Reveal),
        Just(Op::ExpandAll),
        Just(Op::CollapseAll),
    ];
    prop_oneof![state, expansion]
}

fn apply(tree: &mut TreeView, op: Op) {
    let len = tree.len().max(1);
    let none = ChangeOptions::new();
    match op {
        Op::Select(id) => tree.select_node(id % len, none),
        Op::Unselect(id) => tree.unselect_node(id % len, none),
        Op::Check(id) => tree.toggle_node_checked(id % len, none),
        Op::Expand(id) => tree.expand_node(id % len, none),
        Op::ExpandLevels(id, levels) => tree.expand_node(id % len, none.levels(levels)),
        Op::Collapse(id) => tree.collapse_node(id % len, none),
        Op::CollapseShallow(id) => tree.collapse_node(id % len, none.ignore_children()),
        Op::Toggle(id) => tree.toggle_node_expanded(id % len, none),
        Op::Reveal(id) => tree.reveal_node(id % len, none),
        Op::Disable(id) => tree.disable_node(id % len, none),
        Op::Enable(id) => tree.enable_node(id % len, none),
        Op::ExpandAll => tree.expand_all(none),
        Op::CollapseAll => tree.collapse_all(none),
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn displayed(tree: &TreeView) -> Vec<usize> {
    let index = tree.index();
    index
        .iter()
        .filter(|node| {
            index.ancestors(node.id).into_iter().all(|a| {
                index
                    .get(a)
                    .is_some_and(|p| p.state.expanded && !p.state.disabled)
            })
        })
        .map(|node| node.id.0)
        .collect()
}

fn lines(tree: &TreeView) -> Vec<(String, Vec<String>)> {
    tree.lines(&terminal_glyphs(tree.options()))
        .into_iter()
        .map(|line| {
            let mut classes = line.classes;
            classes.retain(|c| !c.starts_with("node-treeview-"));
            classes.sort();
            (line.text, classes)
        })
        .collect()
}

fn check_state(tree: &TreeView) -> std::result::Result<(), TestCaseError> {
    for node in tree.index().iter() {
        if node.state.disabled {
            prop_assert!(!node.state.selected, "disabled node {} selected", node.id);
            prop_assert!(!node.state.checked, "disabled node {} checked", node.id);
            prop_assert!(!node.state.expanded, "disabled node {} expanded", node.id);
        }
        if node.state.expanded {
            prop_assert!(node.has_children(), "leaf {} expanded", node.id);
        }
    }
    if !tree.options().multi_select {
        prop_assert!(tree.get_selected().len() <= 1);
    }
    prop_assert_eq!(tree.row_count(), displayed(tree).len());
    Ok(())
}

// =============================================================================
// Index
// =============================================================================

proptest! {
    #[test]
    fn test_ids_are_dense_pre_order(specs in arb_forest()) {
        let tree = TreeView::new(specs.clone(), TreeOptions::new()).unwrap();
        let total: usize = specs.iter().map(NodeSpec::count).sum();
        prop_assert_eq!(tree.len(), total);

        for (i, node) in tree.index().iter().enumerate() {
            prop_assert_eq!(node.id.0, i);
            for child in &node.children {
                let child = tree.get_node(*child).unwrap();
                prop_assert_eq!(child.parent_id, Some(node.id));
                prop_assert_eq!(child.level, node.level + 1);
                prop_assert!(child.id > node.id);
            }
            match node.parent_id {
                Some(parent) => {
                    prop_assert!(tree.get_node(parent).is_some());
                }
                None => {
                    prop_assert_eq!(node.level, 1);
                }
            }
        }
    }

    #[test]
    fn test_definition_round_trips(specs in arb_forest(), levels in 1usize..4) {
        let tree = TreeView::new(specs, TreeOptions::new().levels(levels)).unwrap();
        let again = TreeView::new(tree.to_specs(), TreeOptions::new().levels(levels)).unwrap();
        let states = |t: &TreeView| t.index().iter().map(|n| n.state).collect::<Vec<_>>();
        prop_assert_eq!(states(&tree), states(&again));
        prop_assert_eq!(lines(&tree), lines(&again));
    }
}

// =============================================================================
// Transitions
// =============================================================================

proptest! {
    #[test]
    fn test_defaults_hold_invariants(specs in arb_forest(), levels in 1usize..4, multi in any::<bool>()) {
        let options = TreeOptions::new().levels(levels).multi_select(multi);
        let tree = TreeView::new(specs, options).unwrap();
        check_state(&tree)?;
    }

    #[test]
    fn test_operations_hold_invariants(
        specs in arb_forest(),
        ops in prop::collection::vec(arb_op(), 0..24),
        multi in any::<bool>(),
    ) {
        let mut tree = TreeView::new(specs, TreeOptions::new().multi_select(multi)).unwrap();
        for op in ops {
            apply(&mut tree, op);
            check_state(&tree)?;
        }
    }

    #[test]
    fn test_incremental_render_matches_full_render(
        specs in arb_forest(),
        ops in prop::collection::vec(arb_op(), 0..24),
    ) {
        let mut tree = TreeView::new(specs, TreeOptions::new().show_checkbox(true)).unwrap();
        for op in ops {
            apply(&mut tree, op);
        }
        let fresh = TreeView::new(tree.to_specs(), tree.options().clone()).unwrap();
        prop_assert_eq!(lines(&tree), lines(&fresh));
    }

    #[test]
    fn test_collapse_removes_subtree_rows(specs in arb_forest(), target in 0usize..64) {
        let mut tree = TreeView::new(specs, TreeOptions::new()).unwrap();
        prop_assume!(!tree.is_empty());
        tree.expand_all(ChangeOptions::new());
        let id = NodeId(target % tree.len());
        tree.collapse_node(id, ChangeOptions::new());
        for descendant in tree.index().descendants(id) {
            prop_assert!(tree.row_element(descendant).is_none());
        }
    }
}
