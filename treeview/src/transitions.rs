//! State transitions: the single-node setters and the public operations
//! built on them.
//!
//! Setters change one flag, cascade where the flag demands it, emit events
//! and mark nodes dirty. Public operations resolve their targets, run the
//! setters and then re-render.

use crate::events::EventKind;
use crate::index::Targets;
use crate::node::NodeId;
use crate::options::ChangeOptions;
use crate::surface::Surface;
use crate::view::TreeView;

/// Options for one setter call, including markers callers never set.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Transition {
    pub silent: bool,
    pub ignore_children: bool,
    /// Part of a selection hand-over; bypasses `prevent_unselect`.
    pub unselecting: bool,
    /// Apply even when the node is already in the requested state.
    pub force: bool,
}

impl From<ChangeOptions> for Transition {
    fn from(options: ChangeOptions) -> Self {
        Self {
            silent: options.silent,
            ignore_children: options.ignore_children,
            ..Default::default()
        }
    }
}

impl<S: Surface> TreeView<S> {
    // -------------------------------------------------------------------------
    // Setters
    // -------------------------------------------------------------------------

    pub(crate) fn set_expanded(&mut self, id: NodeId, state: bool, t: Transition) {
        let Some(node) = self.index.get(id) else {
            return;
        };
        if !t.force && node.state.expanded == state {
            return;
        }
        let was_expanded = node.state.expanded;
        let children = node.children.clone();

        if state {
            if node.state.disabled {
                log::debug!("treeview: node {id} is disabled, not expanding");
                return;
            }
            if children.is_empty() {
                return;
            }
            if let Some(node) = self.index.get_mut(id) {
                node.state.expanded = true;
            }
            self.mark_dirty(id);
            if !t.ignore_children {
                for child in &children {
                    if let Some(child) = self.index.get_mut(*child) {
                        child.visible = true;
                    }
                }
            }
            if !was_expanded {
                self.emit_node(EventKind::NodeExpanded, id, t.silent);
            }
        } else {
            if let Some(node) = self.index.get_mut(id) {
                node.state.expanded = false;
            }
            self.mark_dirty(id);
            if was_expanded {
                self.emit_node(EventKind::NodeCollapsed, id, t.silent);
            }
            if !t.ignore_children {
                for child in children {
                    if let Some(node) = self.index.get_mut(child) {
                        node.visible = false;
                    }
                    self.set_expanded(child, false, Transition { force: false, ..t });
                }
            }
        }
    }

    pub(crate) fn set_selected(&mut self, id: NodeId, state: bool, t: Transition) {
        let Some(node) = self.index.get(id) else {
            return;
        };
        if !t.force && node.state.selected == state {
            return;
        }

        if state {
            if node.state.disabled {
                log::debug!("treeview: node {id} is disabled, not selecting");
                return;
            }
            if !self.options.multi_select {
                let others = self.ids_where(|n| n.state.selected && n.id != id);
                for other in others {
                    let handover = Transition {
                        unselecting: true,
                        force: false,
                        ..t
                    };
                    self.set_selected(other, false, handover);
                }
            }
            if let Some(node) = self.index.get_mut(id) {
                node.state.selected = true;
            }
            self.mark_dirty(id);
            self.emit_node(EventKind::NodeSelected, id, t.silent);
        } else {
            let last_selected = node.state.selected
                && self.index.iter().filter(|n| n.state.selected).count() == 1;
            if self.options.prevent_unselect && !t.unselecting && last_selected {
                log::debug!("treeview: node {id} is the last selection, not unselecting");
                if self.options.allow_reselect {
                    self.emit_node(EventKind::NodeSelected, id, t.silent);
                }
                return;
            }
            if let Some(node) = self.index.get_mut(id) {
                node.state.selected = false;
            }
            self.mark_dirty(id);
            self.emit_node(EventKind::NodeUnselected, id, t.silent);
        }
    }

    pub(crate) fn set_checked(&mut self, id: NodeId, state: bool, t: Transition) {
        let Some(node) = self.index.get(id) else {
            return;
        };
        if !t.force && node.state.checked == state {
            return;
        }
        if state && node.state.disabled {
            log::debug!("treeview: node {id} is disabled, not checking");
            return;
        }
        if let Some(node) = self.index.get_mut(id) {
            node.state.checked = state;
        }
        self.mark_dirty(id);
        let kind = if state {
            EventKind::NodeChecked
        } else {
            EventKind::NodeUnchecked
        };
        self.emit_node(kind, id, t.silent);
    }

    pub(crate) fn set_disabled(&mut self, id: NodeId, state: bool, t: Transition) {
        let Some(node) = self.index.get(id) else {
            return;
        };
        if !t.force && node.state.disabled == state {
            return;
        }

        if state {
            let cascade = Transition {
                unselecting: true,
                force: false,
                ..t
            };
            self.set_selected(id, false, cascade);
            self.set_checked(id, false, cascade);
            self.set_expanded(id, false, cascade);
        }
        if let Some(node) = self.index.get_mut(id) {
            node.state.disabled = state;
        }
        self.mark_dirty(id);
        let kind = if state {
            EventKind::NodeDisabled
        } else {
            EventKind::NodeEnabled
        };
        self.emit_node(kind, id, t.silent);
    }

    pub(crate) fn set_search_result(&mut self, id: NodeId, state: bool) {
        if let Some(node) = self.index.get_mut(id)
            && node.search_result != state
        {
            node.search_result = state;
            self.mark_dirty(id);
        }
    }

    /// Expand `id`, then apply `levels` to its descendants: children within
    /// `levels - 1` further levels are expanded, deeper ones collapsed.
    fn expand_levels(&mut self, id: NodeId, levels: Option<usize>, t: Transition) {
        let Some(node) = self.index.get(id) else {
            return;
        };
        if !node.has_children() {
            return;
        }
        self.set_expanded(id, true, t);
        let expanded = self.index.get(id).is_some_and(|n| n.state.expanded);
        if let (true, Some(levels)) = (expanded, levels) {
            let children = self.index.children(id).to_vec();
            self.apply_levels(&children, levels.saturating_sub(1), t);
        }
    }

    fn apply_levels(&mut self, ids: &[NodeId], level: usize, t: Transition) {
        for &id in ids {
            self.set_expanded(id, level > 0, t);
            let children = self.index.children(id).to_vec();
            if !children.is_empty() {
                self.apply_levels(&children, level.saturating_sub(1), t);
            }
        }
    }

    /// Run `f` for every target that resolves to a node.
    fn for_each_target(&mut self, targets: impl Into<Targets>, mut f: impl FnMut(&mut Self, NodeId)) {
        let targets = targets.into();
        for &id in targets.ids() {
            if let Some(id) = self.index.resolve(id) {
                f(self, id);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    pub fn select_node(&mut self, nodes: impl Into<Targets>, options: ChangeOptions) {
        self.for_each_target(nodes, |tree, id| tree.set_selected(id, true, options.into()));
        self.flush();
    }

    pub fn unselect_node(&mut self, nodes: impl Into<Targets>, options: ChangeOptions) {
        self.for_each_target(nodes, |tree, id| tree.set_selected(id, false, options.into()));
        self.flush();
    }

    pub fn toggle_node_selected(&mut self, nodes: impl Into<Targets>, options: ChangeOptions) {
        self.for_each_target(nodes, |tree, id| {
            let selected = tree.index.get(id).is_some_and(|n| n.state.selected);
            tree.set_selected(id, !selected, options.into());
        });
        self.flush();
    }

    // -------------------------------------------------------------------------
    // Expansion
    // -------------------------------------------------------------------------

    /// Collapse every expanded node.
    pub fn collapse_all(&mut self, options: ChangeOptions) {
        for id in self.ids_where(|n| n.state.expanded) {
            self.set_expanded(id, false, options.into());
        }
        self.render();
    }

    pub fn collapse_node(&mut self, nodes: impl Into<Targets>, options: ChangeOptions) {
        self.for_each_target(nodes, |tree, id| tree.set_expanded(id, false, options.into()));
        self.flush();
    }

    /// Expand every root and, by default, all of their descendants.
    pub fn expand_all(&mut self, options: ChangeOptions) {
        let levels = Some(options.depth().unwrap_or(usize::MAX));
        for root in self.index.roots().to_vec() {
            self.expand_levels(root, levels, options.into());
        }
        self.render();
    }

    /// Expand the targets. With a non-zero `options.levels`, descendants down
    /// to that relative depth are expanded too and deeper ones collapsed.
    pub fn expand_node(&mut self, nodes: impl Into<Targets>, options: ChangeOptions) {
        self.for_each_target(nodes, |tree, id| {
            tree.expand_levels(id, options.depth(), options.into());
        });
        self.flush();
    }

    pub fn toggle_node_expanded(&mut self, nodes: impl Into<Targets>, options: ChangeOptions) {
        self.for_each_target(nodes, |tree, id| {
            let expanded = tree.index.get(id).is_some_and(|n| n.state.expanded);
            tree.set_expanded(id, !expanded, options.into());
        });
        self.flush();
    }

    /// Expand every ancestor of the targets so they are displayed.
    pub fn reveal_node(&mut self, nodes: impl Into<Targets>, options: ChangeOptions) {
        self.for_each_target(nodes, |tree, id| {
            let t = Transition {
                force: true,
                ..Transition::from(options)
            };
            for ancestor in tree.index.ancestors(id) {
                tree.set_expanded(ancestor, true, t);
            }
        });
        self.flush();
    }

    // -------------------------------------------------------------------------
    // Checking
    // -------------------------------------------------------------------------

    pub fn check_all(&mut self, options: ChangeOptions) {
        for id in self.ids_where(|n| !n.state.checked) {
            self.set_checked(id, true, options.into());
        }
        self.render();
    }

    pub fn check_node(&mut self, nodes: impl Into<Targets>, options: ChangeOptions) {
        self.for_each_target(nodes, |tree, id| tree.set_checked(id, true, options.into()));
        self.flush();
    }

    pub fn uncheck_all(&mut self, options: ChangeOptions) {
        for id in self.ids_where(|n| n.state.checked) {
            self.set_checked(id, false, options.into());
        }
        self.render();
    }

    pub fn uncheck_node(&mut self, nodes: impl Into<Targets>, options: ChangeOptions) {
        self.for_each_target(nodes, |tree, id| tree.set_checked(id, false, options.into()));
        self.flush();
    }

    pub fn toggle_node_checked(&mut self, nodes: impl Into<Targets>, options: ChangeOptions) {
        self.for_each_target(nodes, |tree, id| {
            let checked = tree.index.get(id).is_some_and(|n| n.state.checked);
            tree.set_checked(id, !checked, options.into());
        });
        self.flush();
    }

    // -------------------------------------------------------------------------
    // Disabling
    // -------------------------------------------------------------------------

    pub fn disable_all(&mut self, options: ChangeOptions) {
        for id in self.ids_where(|n| !n.state.disabled) {
            self.set_disabled(id, true, options.into());
        }
        self.render();
    }

    pub fn disable_node(&mut self, nodes: impl Into<Targets>, options: ChangeOptions) {
        self.for_each_target(nodes, |tree, id| tree.set_disabled(id, true, options.into()));
        self.flush();
    }

    pub fn enable_all(&mut self, options: ChangeOptions) {
        for id in self.ids_where(|n| n.state.disabled) {
            self.set_disabled(id, false, options.into());
        }
        self.render();
    }

    pub fn enable_node(&mut self, nodes: impl Into<Targets>, options: ChangeOptions) {
        self.for_each_target(nodes, |tree, id| tree.set_disabled(id, false, options.into()));
        self.flush();
    }

    pub fn toggle_node_disabled(&mut self, nodes: impl Into<Targets>, options: ChangeOptions) {
        self.for_each_target(nodes, |tree, id| {
            let disabled = tree.index.get(id).is_some_and(|n| n.state.disabled);
            tree.set_disabled(id, !disabled, options.into());
        });
        self.flush();
    }
}
