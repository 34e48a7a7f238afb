//! Context menu opened on a row.
//!
//! At most one menu is open per tree. It is drawn as a sibling of the row
//! list inside the container, so rows re-render underneath it without
//! disturbing it.

use std::cell::Cell;

use tuidom::{Document, Line, LineOptions};

use crate::events::TreeEvent;
use crate::interaction::{resolve_click, Interaction};
use crate::node::NodeId;
use crate::options::{ChangeOptions, MenuAction};
use crate::surface::{Surface, Template};
use crate::view::TreeView;

#[derive(Debug, Clone, Copy)]
pub(crate) struct OpenMenu<H> {
    node: NodeId,
    element: H,
}

impl<S: Surface> TreeView<S> {
    /// The node the open context menu belongs to.
    pub fn context_menu_node(&self) -> Option<NodeId> {
        self.menu.map(|menu| menu.node)
    }

    pub fn context_menu_element(&self) -> Option<S::Handle> {
        self.menu.map(|menu| menu.element)
    }

    /// Close the open context menu. Returns false if none was open.
    pub fn close_context_menu(&mut self) -> bool {
        let Some(menu) = self.menu.take() else {
            return false;
        };
        self.surface.remove(menu.element);
        true
    }

    /// Open the menu for the row around `target`, replacing any open one.
    pub(crate) fn open_context_menu(&mut self, target: S::Handle) -> bool {
        self.close_context_menu();
        if !self.options.enable_context_menu {
            return false;
        }
        let Some(hit) = resolve_click(&self.surface, target, &self.row_class()) else {
            return false;
        };
        let Some(node) = self.index.snapshot(hit.node) else {
            return false;
        };

        let before = TreeEvent::ContextMenuBefore {
            node: node.clone(),
            items: self
                .options
                .context_menu
                .iter()
                .map(|item| item.label.clone())
                .collect(),
            cancelled: Cell::new(false),
        };
        self.events.dispatch(&before);
        if before.is_cancelled() {
            log::debug!("treeview: context menu on node {} cancelled", hit.node);
            return false;
        }

        let element = self.build_menu(hit.node);
        self.menu = Some(OpenMenu {
            node: hit.node,
            element,
        });
        self.events.emit(TreeEvent::ContextMenuAfter(node));
        true
    }

    fn build_menu(&mut self, node: NodeId) -> S::Handle {
        let menu = self.surface.create_element(Template::Menu);
        self.surface.set_attribute(menu, "data-nodeid", &node.to_string());
        for (position, item) in self.options.context_menu.iter().enumerate() {
            let entry = if item.is_divider() {
                self.surface.create_element(Template::MenuDivider)
            } else {
                let entry = self.surface.create_element(Template::MenuEntry);
                if item.action.is_none() {
                    self.surface.add_class(entry, "disabled");
                }
                let link = self.surface.create_element(Template::MenuLink);
                self.surface.append_text(link, &item.label);
                self.surface.append(entry, link);
                entry
            };
            self.surface.set_attribute(entry, "data-item", &position.to_string());
            self.surface.append(menu, entry);
        }
        self.surface.append(self.container, menu);
        menu
    }

    /// A click while the menu is open. Entries run their action; a click
    /// anywhere outside the menu only closes it.
    pub(crate) fn click_with_menu_open(
        &mut self,
        menu: OpenMenu<S::Handle>,
        target: S::Handle,
    ) -> bool {
        let mut position = None;
        let mut current = Some(target);
        while let Some(el) = current {
            if el == menu.element {
                return match position {
                    Some(position) => self.activate_menu_item(menu.node, position),
                    None => false,
                };
            }
            if position.is_none() {
                position = self
                    .surface
                    .attribute(el, "data-item")
                    .and_then(|p| p.parse::<usize>().ok());
            }
            current = self.surface.parent(el);
        }
        self.close_context_menu();
        true
    }

    fn activate_menu_item(&mut self, node: NodeId, position: usize) -> bool {
        let Some(item) = self.options.context_menu.get(position) else {
            return false;
        };
        let keep_open = item.keep_open;
        let Some(action) = item.action.filter(|_| !item.is_divider()) else {
            return false;
        };
        log::debug!("treeview: context menu {action:?} on node {node}");
        self.run_menu_action(node, action);
        if !keep_open {
            self.close_context_menu();
        }
        true
    }

    fn run_menu_action(&mut self, node: NodeId, action: MenuAction) {
        let options = ChangeOptions::new();
        match action {
            MenuAction::Select => self.select_node(node, options),
            MenuAction::Unselect => self.unselect_node(node, options),
            MenuAction::ToggleSelected => self.toggle_node_selected(node, options),
            MenuAction::Expand => self.expand_node(node, options),
            MenuAction::Collapse => self.collapse_node(node, options),
            MenuAction::ToggleExpanded => self.toggle_node_expanded(node, options),
            MenuAction::Check => self.check_node(node, options),
            MenuAction::Uncheck => self.uncheck_node(node, options),
            MenuAction::ToggleChecked => self.toggle_node_checked(node, options),
            MenuAction::Disable => self.disable_node(node, options),
            MenuAction::Enable => self.enable_node(node, options),
            MenuAction::Reveal => self.reveal_node(node, options),
        }
    }
}

impl TreeView<Document> {
    /// Open the context menu on rendered line `line`.
    pub fn context_menu_line(&mut self, line: usize) -> bool {
        let row = self
            .list_element()
            .and_then(|list| tuidom::element_at_line(&self.surface, list, line));
        match row {
            Some(row) => self.handle_interaction(Interaction::ContextMenu { target: row }),
            None => false,
        }
    }

    /// Click entry `position` of the open menu, dividers counted.
    pub fn choose_menu_item(&mut self, position: usize) -> bool {
        let entry = self
            .menu
            .and_then(|menu| tuidom::element_at_line(&self.surface, menu.element, position));
        match entry {
            Some(entry) => self.handle_interaction(Interaction::Click { target: entry }),
            None => false,
        }
    }

    /// Entries of the open menu as terminal lines.
    pub fn menu_lines(&self, options: &LineOptions) -> Vec<Line> {
        match self.menu {
            Some(menu) => tuidom::render_lines(&self.surface, menu.element, options),
            None => Vec::new(),
        }
    }
}
