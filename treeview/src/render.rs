//! Incremental rendering of node state into rows.
//!
//! Rows are created lazily: a node gets a row the first time it is displayed,
//! keeps it while its ancestors stay expanded, and loses it (with the rows of
//! its whole subtree) when an ancestor collapses or is disabled.

use std::collections::BTreeSet;

use tuidom::{InlineStyle, LineOptions};

use crate::events::{EventKind, TreeEvent};
use crate::node::{Node, NodeId};
use crate::options::TreeOptions;
use crate::style::valid;
use crate::surface::{Surface, Template};
use crate::view::TreeView;

/// Element back-references and pending work of the renderer.
#[derive(Debug)]
pub(crate) struct RenderState<H> {
    pub(crate) list: Option<H>,
    /// Row element per node id.
    rows: Vec<Option<H>>,
    /// Nodes changed since the last render, processed in id (pre-)order.
    dirty: BTreeSet<NodeId>,
    style_injected: bool,
}

impl<H: Copy> RenderState<H> {
    pub(crate) fn new() -> Self {
        Self {
            list: None,
            rows: Vec::new(),
            dirty: BTreeSet::new(),
            style_injected: false,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.list = None;
        self.rows.clear();
        self.dirty.clear();
        self.style_injected = false;
    }

    pub(crate) fn row(&self, id: NodeId) -> Option<H> {
        self.rows.get(id.0).copied().flatten()
    }

    pub(crate) fn row_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_some()).count()
    }
}

impl<S: Surface> TreeView<S> {
    pub(crate) fn mark_dirty(&mut self, id: NodeId) {
        self.renderer.dirty.insert(id);
    }

    /// Full pass over every root.
    pub(crate) fn render(&mut self) {
        self.renderer.dirty.clear();
        let list = match self.renderer.list {
            Some(list) => list,
            None => {
                let list = self.surface.create_element(Template::List);
                self.surface.add_class(self.container, "treeview");
                self.surface.append(self.container, list);
                self.renderer.list = Some(list);
                list
            }
        };
        self.inject_style();
        if self.renderer.rows.len() != self.index.len() {
            self.renderer.rows.resize(self.index.len(), None);
        }

        let mut rendered = Vec::new();
        let mut previous = None;
        for root in self.index.roots().to_vec() {
            if let Some(last) = self.render_node(list, root, previous, &mut rendered) {
                previous = Some(last);
            }
        }
        log::trace!("treeview: {} full render, {} rows", self.id, rendered.len());
        self.emit_rendered(rendered);
    }

    /// Re-render only the nodes marked dirty since the last pass.
    ///
    /// Nodes hidden under a collapsed ancestor are skipped. A displayed node
    /// without a row means the layout changed around it, so the pass falls
    /// back to a full render.
    pub(crate) fn flush(&mut self) {
        let dirty = std::mem::take(&mut self.renderer.dirty);
        let Some(list) = self.renderer.list else {
            return;
        };
        if dirty.is_empty() {
            return;
        }

        let mut rendered = Vec::new();
        for id in dirty {
            if !self.is_displayed(id) {
                continue;
            }
            if self.renderer.row(id).is_none() {
                log::trace!("treeview: node {id} has no row, falling back to full render");
                self.render();
                return;
            }
            self.render_node(list, id, None, &mut rendered);
        }
        rendered.sort();
        rendered.dedup();
        log::trace!("treeview: {} partial render, {} rows", self.id, rendered.len());
        self.emit_rendered(rendered);
    }

    fn emit_rendered(&mut self, rendered: Vec<NodeId>) {
        if rendered.is_empty() {
            return;
        }
        let nodes = self.index.snapshots(&rendered);
        self.events.emit(TreeEvent::Rendered { nodes });
    }

    /// True if every ancestor is expanded and enabled.
    fn is_displayed(&self, id: NodeId) -> bool {
        self.index.ancestors(id).into_iter().all(|a| {
            self.index
                .get(a)
                .is_some_and(|n| n.state.expanded && !n.state.disabled)
        })
    }

    /// Render `id` and the displayed part of its subtree, returning the last
    /// row drawn. A new row goes right after `previous`, or first in the list.
    fn render_node(
        &mut self,
        list: S::Handle,
        id: NodeId,
        previous: Option<S::Handle>,
        rendered: &mut Vec<NodeId>,
    ) -> Option<S::Handle> {
        let row_class = self.row_class();
        let Some(node) = self.index.get(id) else {
            return None;
        };

        let (row, created) = match self.renderer.row(id) {
            Some(row) => {
                self.surface.clear(row);
                (row, false)
            }
            None => {
                let row = self.surface.create_element(Template::Item);
                self.surface.add_class(row, &row_class);
                self.surface.set_attribute(row, "data-nodeid", &id.to_string());
                match previous {
                    Some(prev) => self.surface.insert_after(prev, row),
                    None => self.surface.prepend(list, row),
                }
                self.renderer.rows[id.0] = Some(row);
                (row, true)
            }
        };

        build_row(&mut self.surface, &self.options, node, row);
        rendered.push(id);

        let show_children = node.has_children() && node.state.expanded && !node.state.disabled;
        let children = node.children.clone();

        if created {
            self.emit_node(EventKind::NodeRendered, id, false);
        }

        let mut last = row;
        if show_children {
            for child in children {
                if let Some(child_last) = self.render_node(list, child, Some(last), rendered) {
                    last = child_last;
                }
            }
        } else {
            self.remove_descendants(id);
        }
        Some(last)
    }

    /// Remove the rows of every descendant of `id`.
    fn remove_descendants(&mut self, id: NodeId) {
        for descendant in self.index.descendants(id) {
            if let Some(row) = self.renderer.rows.get_mut(descendant.0).and_then(Option::take) {
                self.surface.remove(row);
            }
        }
    }

    fn inject_style(&mut self) {
        if !self.options.inject_style || self.renderer.style_injected {
            return;
        }
        let css = self.style.build(self.id, &self.options, &self.index);
        let style_id = self.style_id();
        self.surface.inject_stylesheet(&style_id, &css);
        self.renderer.style_injected = true;
    }
}

/// Rebuild the contents of `row` from `node`.
fn build_row<S: Surface>(surface: &mut S, options: &TreeOptions, node: &Node, row: S::Handle) {
    for _ in 1..node.level {
        let indent = surface.create_element(Template::Indent);
        surface.append(row, indent);
    }

    let expander = surface.create_element(Template::Icon);
    if node.has_children() {
        surface.add_class(expander, "expand-icon");
        let icon = if node.state.expanded {
            &options.collapse_icon
        } else {
            &options.expand_icon
        };
        surface.add_class(expander, icon);
    } else {
        surface.add_class(expander, &options.empty_icon);
    }
    surface.append(row, expander);

    if options.show_icon {
        let icon = surface.create_element(Template::Icon);
        surface.add_class(icon, "node-icon");
        surface.add_class(icon, node_icon(options, node));
        surface.append(row, icon);
    }

    if options.show_checkbox {
        let check = surface.create_element(Template::Icon);
        surface.add_class(check, "check-icon");
        let icon = if node.state.checked {
            &options.checked_icon
        } else {
            &options.unchecked_icon
        };
        surface.add_class(check, icon);
        surface.append(row, check);
    }

    if options.enable_links {
        let href = node.href.clone().unwrap_or_else(|| "#".to_string());
        let link = surface.create_element(Template::Link { href });
        surface.append_text(link, &node.text);
        surface.append(row, link);
    } else {
        surface.append_text(row, &node.text);
    }

    if options.show_tags {
        for tag in &node.tags {
            let badge = surface.create_element(Template::Badge);
            surface.append_text(badge, tag);
            surface.append(row, badge);
        }
    }

    for (class, on) in [
        ("node-checked", node.state.checked),
        ("node-disabled", node.state.disabled),
        ("node-selected", node.state.selected),
        ("search-result", node.search_result),
    ] {
        if on {
            surface.add_class(row, class);
        } else {
            surface.remove_class(row, class);
        }
    }

    match style_override(options, node) {
        Some(style) => surface.set_attribute(row, "style", &style),
        None => surface.remove_attribute(row, "style"),
    }
}

fn node_icon<'a>(options: &'a TreeOptions, node: &'a Node) -> &'a str {
    let base = node.icon.as_deref().unwrap_or(&options.node_icon);
    if !node.state.selected {
        return base;
    }
    node.selected_icon
        .as_deref()
        .or((!options.selected_icon.is_empty()).then_some(options.selected_icon.as_str()))
        .unwrap_or(base)
}

/// Inline colours for a row: the node's own colours, replaced by the
/// selected and then the search-result highlight where enabled.
fn style_override(options: &TreeOptions, node: &Node) -> Option<String> {
    if node.state.disabled {
        return None;
    }
    let mut color = valid(node.color.as_deref());
    let mut back_color = valid(node.back_color.as_deref());

    if options.highlight_selected && node.state.selected {
        color = valid(options.selected_color.as_deref()).or(color);
        back_color = valid(options.selected_back_color.as_deref()).or(back_color);
    }
    if options.highlight_search_results && node.search_result {
        color = valid(options.search_result_color.as_deref()).or(color);
        back_color = valid(options.search_result_back_color.as_deref()).or(back_color);
    }

    let mut style = InlineStyle::new();
    if let Some(color) = color {
        style = style.set("color", color);
    }
    if let Some(back_color) = back_color {
        style = style.set("background-color", back_color);
    }
    (!style.is_empty()).then(|| style.to_string())
}

/// Glyphs for drawing rows as terminal text, keyed by the icon classes in
/// `options`.
pub fn terminal_glyphs(options: &TreeOptions) -> LineOptions {
    let last = |classes: &str| classes.split_whitespace().last().unwrap_or_default().to_string();
    let mut line_options = LineOptions::new();
    for (classes, glyph) in [
        (&options.collapse_icon, "- "),
        (&options.expand_icon, "+ "),
        (&options.checked_icon, "[x] "),
        (&options.unchecked_icon, "[ ] "),
    ] {
        if !classes.trim().is_empty() {
            line_options = line_options.glyph(last(classes.as_str()), glyph);
        }
    }
    line_options = line_options
        .glyph("indent", "  ")
        .glyph("badge", " #")
        .glyph("divider", "----");
    if !options.empty_icon.trim().is_empty() {
        line_options = line_options.glyph(last(options.empty_icon.as_str()), "  ");
    }
    line_options
}
