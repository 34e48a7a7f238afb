//! Pointer interaction: mapping a clicked element to a node and a part of
//! its row.

use tuidom::Document;

use crate::node::NodeId;
use crate::options::ChangeOptions;
use crate::surface::Surface;
use crate::view::TreeView;

/// Which part of a row was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickPart {
    ExpandIcon,
    CheckIcon,
    /// Anywhere else on the row.
    Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickTarget {
    pub node: NodeId,
    pub part: ClickPart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction<H> {
    Click { target: H },
    /// Secondary click, opening the context menu on the row.
    ContextMenu { target: H },
}

/// Find the row of this tree around `target` and classify the hit.
///
/// `row_class` is the class every row of the tree carries, so rows of other
/// trees on the same surface never resolve.
pub fn resolve_click<S: Surface>(surface: &S, target: S::Handle, row_class: &str) -> Option<ClickTarget> {
    let row = surface.closest_with_class(target, row_class)?;
    let node = surface.attribute(row, "data-nodeid")?.parse::<usize>().ok()?;
    let part = if surface.has_class(target, "expand-icon") {
        ClickPart::ExpandIcon
    } else if surface.has_class(target, "check-icon") {
        ClickPart::CheckIcon
    } else {
        ClickPart::Body
    };
    Some(ClickTarget {
        node: NodeId(node),
        part,
    })
}

impl<S: Surface> TreeView<S> {
    /// Apply a pointer interaction. Returns false if it had no effect.
    ///
    /// While a context menu is open, a click goes to the menu: an entry runs
    /// its action, a click anywhere else closes the menu and does nothing more.
    pub fn handle_interaction(&mut self, interaction: Interaction<S::Handle>) -> bool {
        match interaction {
            Interaction::Click { target } => match self.menu {
                Some(menu) => self.click_with_menu_open(menu, target),
                None => self.click(target),
            },
            Interaction::ContextMenu { target } => self.open_context_menu(target),
        }
    }

    fn click(&mut self, target: S::Handle) -> bool {
        let Some(hit) = resolve_click(&self.surface, target, &self.row_class()) else {
            return false;
        };
        let Some(node) = self.get_node(hit.node) else {
            return false;
        };
        if node.state.disabled {
            log::debug!("treeview: click on disabled node {}", hit.node);
            return false;
        }
        let selectable = node.selectable || self.options.selectable;

        let options = ChangeOptions::new();
        match hit.part {
            ClickPart::ExpandIcon => self.toggle_node_expanded(hit.node, options),
            ClickPart::CheckIcon => self.toggle_node_checked(hit.node, options),
            ClickPart::Body if selectable => self.toggle_node_selected(hit.node, options),
            ClickPart::Body => self.toggle_node_expanded(hit.node, options),
        }
        true
    }
}

impl TreeView<Document> {
    /// Click on rendered line `line`, at `part` of the row.
    ///
    /// Returns false when there is no such line or the row has no such part.
    pub fn click_line(&mut self, line: usize, part: ClickPart) -> bool {
        let Some(list) = self.list_element() else {
            return false;
        };
        let Some(row) = tuidom::element_at_line(&self.surface, list, line) else {
            return false;
        };
        let class = match part {
            ClickPart::ExpandIcon => "expand-icon",
            ClickPart::CheckIcon => "check-icon",
            ClickPart::Body => "list-group-item",
        };
        let Some(target) = tuidom::hit::find_in(&self.surface, row, class) else {
            return false;
        };
        self.handle_interaction(Interaction::Click { target })
    }
}
