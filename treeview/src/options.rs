//! Tree options, per-call change options and tree data sources.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TreeError};
use crate::node::NodeSpec;

/// Component-wide options.
///
/// Deserializes from camelCase keys (JSON or TOML); every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TreeOptions {
    pub inject_style: bool,
    /// Number of levels expanded and visible on load.
    pub levels: usize,

    pub expand_icon: String,
    pub collapse_icon: String,
    pub empty_icon: String,
    pub node_icon: String,
    pub selected_icon: String,
    pub checked_icon: String,
    pub unchecked_icon: String,

    pub color: Option<String>,
    pub back_color: Option<String>,
    pub border_color: Option<String>,
    pub onhover_color: Option<String>,
    pub selected_color: Option<String>,
    pub selected_back_color: Option<String>,
    pub search_result_color: Option<String>,
    pub search_result_back_color: Option<String>,

    pub enable_links: bool,
    pub highlight_selected: bool,
    pub highlight_search_results: bool,
    pub show_border: bool,
    pub show_icon: bool,
    pub show_checkbox: bool,
    pub show_tags: bool,
    pub multi_select: bool,
    /// Refuse to unselect the last selected node.
    pub prevent_unselect: bool,
    /// With `prevent_unselect`, re-emit `NodeSelected` for the refused node.
    pub allow_reselect: bool,
    /// Make every node selectable, whatever its own `selectable` flag says.
    pub selectable: bool,

    #[serde(alias = "enableContextmenu")]
    pub enable_context_menu: bool,
    /// Entries of the context menu, top to bottom.
    #[serde(alias = "contextmenu")]
    pub context_menu: Vec<MenuItem>,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            inject_style: true,
            levels: 2,
            expand_icon: "glyphicon glyphicon-plus".into(),
            collapse_icon: "glyphicon glyphicon-minus".into(),
            empty_icon: "glyphicon".into(),
            node_icon: String::new(),
            selected_icon: String::new(),
            checked_icon: "glyphicon glyphicon-check".into(),
            unchecked_icon: "glyphicon glyphicon-unchecked".into(),
            color: None,
            back_color: None,
            border_color: None,
            onhover_color: Some("#F5F5F5".into()),
            selected_color: Some("#FFFFFF".into()),
            selected_back_color: Some("#428bca".into()),
            search_result_color: Some("#D9534F".into()),
            search_result_back_color: None,
            enable_links: false,
            highlight_selected: true,
            highlight_search_results: true,
            show_border: true,
            show_icon: true,
            show_checkbox: false,
            show_tags: false,
            multi_select: false,
            prevent_unselect: false,
            allow_reselect: false,
            selectable: false,
            enable_context_menu: false,
            context_menu: vec![
                MenuItem::new("Select", MenuAction::ToggleSelected),
                MenuItem::new("Expand", MenuAction::ToggleExpanded),
                MenuItem::divider(),
                MenuItem::new("Check", MenuAction::ToggleChecked),
                MenuItem::new("Disable", MenuAction::Disable),
            ],
        }
    }
}

impl TreeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn levels(mut self, levels: usize) -> Self {
        self.levels = levels;
        self
    }

    pub fn multi_select(mut self, multi_select: bool) -> Self {
        self.multi_select = multi_select;
        self
    }

    pub fn show_checkbox(mut self, show: bool) -> Self {
        self.show_checkbox = show;
        self
    }

    pub fn show_tags(mut self, show: bool) -> Self {
        self.show_tags = show;
        self
    }

    pub fn enable_links(mut self, enable: bool) -> Self {
        self.enable_links = enable;
        self
    }

    pub fn prevent_unselect(mut self, prevent: bool) -> Self {
        self.prevent_unselect = prevent;
        self
    }

    pub fn allow_reselect(mut self, allow: bool) -> Self {
        self.allow_reselect = allow;
        self
    }

    pub fn inject_style(mut self, inject: bool) -> Self {
        self.inject_style = inject;
        self
    }

    pub fn selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    pub fn enable_context_menu(mut self, enable: bool) -> Self {
        self.enable_context_menu = enable;
        self
    }

    pub fn context_menu(mut self, items: impl IntoIterator<Item = MenuItem>) -> Self {
        self.context_menu = items.into_iter().collect();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.levels == 0 {
            return Err(TreeError::InvalidOptions(
                "levels must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// What a context menu entry does to the node the menu was opened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MenuAction {
    Select,
    Unselect,
    ToggleSelected,
    Expand,
    Collapse,
    ToggleExpanded,
    Check,
    Uncheck,
    ToggleChecked,
    Disable,
    Enable,
    Reveal,
}

/// One context menu entry.
///
/// A `-` label is a divider. An entry without an action is shown disabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<MenuAction>,
    /// Leave the menu open after the action ran.
    #[serde(default)]
    pub keep_open: bool,
}

impl MenuItem {
    pub fn new(label: impl Into<String>, action: MenuAction) -> Self {
        Self {
            label: label.into(),
            action: Some(action),
            keep_open: false,
        }
    }

    /// An entry shown greyed out.
    pub fn disabled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: None,
            keep_open: false,
        }
    }

    pub fn divider() -> Self {
        Self::disabled("-")
    }

    pub fn keep_open(mut self) -> Self {
        self.keep_open = true;
        self
    }

    pub fn is_divider(&self) -> bool {
        self.label == "-"
    }
}

/// Options accepted by every state-changing call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChangeOptions {
    /// Suppress events.
    pub silent: bool,
    /// Leave descendants alone when collapsing or expanding.
    pub ignore_children: bool,
    /// Relative depth for `expand_node` / `expand_all`. Zero means no depth.
    pub levels: Option<usize>,
}

impl ChangeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn silent(mut self) -> Self {
        self.silent = true;
        self
    }

    pub fn ignore_children(mut self) -> Self {
        self.ignore_children = true;
        self
    }

    pub fn levels(mut self, levels: usize) -> Self {
        self.levels = Some(levels);
        self
    }

    /// `levels` if it asks for a depth at all.
    pub(crate) fn depth(&self) -> Option<usize> {
        self.levels.filter(|levels| *levels > 0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchOptions {
    pub ignore_case: bool,
    /// Match the whole text instead of any substring.
    pub exact_match: bool,
    /// Expand the ancestors of every result.
    pub reveal_results: bool,
    pub silent: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            ignore_case: true,
            exact_match: false,
            reveal_results: true,
            silent: false,
        }
    }
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }

    pub fn exact_match(mut self, exact_match: bool) -> Self {
        self.exact_match = exact_match;
        self
    }

    pub fn reveal_results(mut self, reveal: bool) -> Self {
        self.reveal_results = reveal;
        self
    }

    pub(crate) fn change_options(&self) -> ChangeOptions {
        ChangeOptions {
            silent: self.silent,
            ..Default::default()
        }
    }
}

/// Where a tree definition comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeData {
    Nodes(Vec<NodeSpec>),
    /// A JSON array of node objects.
    Json(String),
}

impl TreeData {
    pub fn into_specs(self) -> Result<Vec<NodeSpec>> {
        match self {
            TreeData::Nodes(nodes) => Ok(nodes),
            TreeData::Json(text) => Ok(serde_json::from_str(&text)?),
        }
    }
}

impl From<Vec<NodeSpec>> for TreeData {
    fn from(nodes: Vec<NodeSpec>) -> Self {
        TreeData::Nodes(nodes)
    }
}

impl From<&str> for TreeData {
    fn from(json: &str) -> Self {
        TreeData::Json(json.to_string())
    }
}

impl From<String> for TreeData {
    fn from(json: String) -> Self {
        TreeData::Json(json)
    }
}
