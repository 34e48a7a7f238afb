//! Initial state policy applied once per load.

use crate::index::TreeIndex;
use crate::node::{NodeId, NodeSpec};
use crate::options::TreeOptions;

/// Fill in every state flag the definition left out.
///
/// `specs` must be the definition `index` was built from; both are walked in
/// pre-order so the n-th spec visited belongs to `NodeId(n)`.
pub(crate) fn apply(index: &mut TreeIndex, specs: &[NodeSpec], options: &TreeOptions) {
    let mut flat = Vec::with_capacity(index.len());
    for spec in specs {
        flatten(spec, &mut flat);
    }

    let levels = options.levels;
    for (node, spec) in index.iter_mut().zip(flat) {
        let given = spec.state;
        node.selectable = spec.selectable.unwrap_or(true);
        node.state.checked = given.checked.unwrap_or(false);
        node.state.disabled = given.disabled.unwrap_or(false);
        node.state.expanded = node.has_children()
            && given
                .expanded
                .unwrap_or(!node.state.disabled && node.level < levels);
        node.state.selected = given.selected.unwrap_or(false);
        node.visible = given.visible.unwrap_or(node.level <= levels);

        if node.state.disabled {
            node.state.selected = false;
            node.state.checked = false;
            node.state.expanded = false;
        }
    }

    if !options.multi_select {
        keep_first_selected(index);
    }
}

fn flatten<'a>(spec: &'a NodeSpec, out: &mut Vec<&'a NodeSpec>) {
    out.push(spec);
    for child in &spec.nodes {
        flatten(child, out);
    }
}

fn keep_first_selected(index: &mut TreeIndex) {
    let selected: Vec<NodeId> = index
        .iter()
        .filter(|n| n.state.selected)
        .map(|n| n.id)
        .collect();
    for id in selected.into_iter().skip(1) {
        log::debug!("treeview: node {id} deselected, single-select keeps the first selection");
        if let Some(node) = index.get_mut(id) {
            node.state.selected = false;
        }
    }
}
