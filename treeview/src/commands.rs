//! Serialized method calls.
//!
//! A command is `{"method": "<name>", "args": {...}}` with the method name
//! in camelCase. Getters take no `args`; every other method requires it,
//! even when empty.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::index::Targets;
use crate::node::{Node, NodeId, NodeSnapshot};
use crate::options::{ChangeOptions, SearchOptions};
use crate::search::NodeField;
use crate::surface::Surface;
use crate::view::TreeView;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", content = "args", rename_all = "camelCase")]
pub enum Command {
    GetNode {
        node: NodeId,
    },
    GetParent {
        node: NodeId,
    },
    GetSiblings {
        node: NodeId,
    },
    GetSelected,
    GetUnselected,
    GetExpanded,
    GetCollapsed,
    GetChecked,
    GetUnchecked,
    GetDisabled,
    GetEnabled,

    SelectNode {
        nodes: Targets,
        #[serde(default)]
        options: ChangeOptions,
    },
    UnselectNode {
        nodes: Targets,
        #[serde(default)]
        options: ChangeOptions,
    },
    ToggleNodeSelected {
        nodes: Targets,
        #[serde(default)]
        options: ChangeOptions,
    },

    CollapseAll {
        #[serde(default)]
        options: ChangeOptions,
    },
    CollapseNode {
        nodes: Targets,
        #[serde(default)]
        options: ChangeOptions,
    },
    ExpandAll {
        #[serde(default)]
        options: ChangeOptions,
    },
    ExpandNode {
        nodes: Targets,
        #[serde(default)]
        options: ChangeOptions,
    },
    ToggleNodeExpanded {
        nodes: Targets,
        #[serde(default)]
        options: ChangeOptions,
    },
    RevealNode {
        nodes: Targets,
        #[serde(default)]
        options: ChangeOptions,
    },

    CheckAll {
        #[serde(default)]
        options: ChangeOptions,
    },
    CheckNode {
        nodes: Targets,
        #[serde(default)]
        options: ChangeOptions,
    },
    UncheckAll {
        #[serde(default)]
        options: ChangeOptions,
    },
    UncheckNode {
        nodes: Targets,
        #[serde(default)]
        options: ChangeOptions,
    },
    ToggleNodeChecked {
        nodes: Targets,
        #[serde(default)]
        options: ChangeOptions,
    },

    DisableAll {
        #[serde(default)]
        options: ChangeOptions,
    },
    DisableNode {
        nodes: Targets,
        #[serde(default)]
        options: ChangeOptions,
    },
    EnableAll {
        #[serde(default)]
        options: ChangeOptions,
    },
    EnableNode {
        nodes: Targets,
        #[serde(default)]
        options: ChangeOptions,
    },
    ToggleNodeDisabled {
        nodes: Targets,
        #[serde(default)]
        options: ChangeOptions,
    },

    Search {
        pattern: String,
        #[serde(default)]
        options: SearchOptions,
    },
    ClearSearch {
        #[serde(default)]
        options: ChangeOptions,
    },
    #[serde(rename_all = "camelCase")]
    FindNodes {
        pattern: String,
        #[serde(default)]
        field: NodeField,
        #[serde(default)]
        ignore_case: bool,
    },
}

impl Command {
    /// Every method name a command can carry.
    pub const METHODS: &'static [&'static str] = &[
        "getNode",
        "getParent",
        "getSiblings",
        "getSelected",
        "getUnselected",
        "getExpanded",
        "getCollapsed",
        "getChecked",
        "getUnchecked",
        "getDisabled",
        "getEnabled",
        "selectNode",
        "unselectNode",
        "toggleNodeSelected",
        "collapseAll",
        "collapseNode",
        "expandAll",
        "expandNode",
        "toggleNodeExpanded",
        "revealNode",
        "checkAll",
        "checkNode",
        "uncheckAll",
        "uncheckNode",
        "toggleNodeChecked",
        "disableAll",
        "disableNode",
        "enableAll",
        "enableNode",
        "toggleNodeDisabled",
        "search",
        "clearSearch",
        "findNodes",
    ];
}

/// What a command returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Done,
    Node(Option<NodeSnapshot>),
    Nodes(Vec<NodeSnapshot>),
}

fn snapshots(nodes: Vec<&Node>) -> Outcome {
    Outcome::Nodes(nodes.into_iter().map(NodeSnapshot::new).collect())
}

impl<S: Surface> TreeView<S> {
    pub fn execute(&mut self, command: Command) -> Result<Outcome> {
        let outcome = match command {
            Command::GetNode { node } => Outcome::Node(self.get_node(node).map(NodeSnapshot::new)),
            Command::GetParent { node } => {
                Outcome::Node(self.get_parent(node).map(NodeSnapshot::new))
            }
            Command::GetSiblings { node } => snapshots(self.get_siblings(node)),
            Command::GetSelected => snapshots(self.get_selected()),
            Command::GetUnselected => snapshots(self.get_unselected()),
            Command::GetExpanded => snapshots(self.get_expanded()),
            Command::GetCollapsed => snapshots(self.get_collapsed()),
            Command::GetChecked => snapshots(self.get_checked()),
            Command::GetUnchecked => snapshots(self.get_unchecked()),
            Command::GetDisabled => snapshots(self.get_disabled()),
            Command::GetEnabled => snapshots(self.get_enabled()),

            Command::SelectNode { nodes, options } => {
                self.select_node(nodes, options);
                Outcome::Done
            }
            Command::UnselectNode { nodes, options } => {
                self.unselect_node(nodes, options);
                Outcome::Done
            }
            Command::ToggleNodeSelected { nodes, options } => {
                self.toggle_node_selected(nodes, options);
                Outcome::Done
            }
            Command::CollapseAll { options } => {
                self.collapse_all(options);
                Outcome::Done
            }
            Command::CollapseNode { nodes, options } => {
                self.collapse_node(nodes, options);
                Outcome::Done
            }
            Command::ExpandAll { options } => {
                self.expand_all(options);
                Outcome::Done
            }
            Command::ExpandNode { nodes, options } => {
                self.expand_node(nodes, options);
                Outcome::Done
            }
            Command::ToggleNodeExpanded { nodes, options } => {
                self.toggle_node_expanded(nodes, options);
                Outcome::Done
            }
            Command::RevealNode { nodes, options } => {
                self.reveal_node(nodes, options);
                Outcome::Done
            }
            Command::CheckAll { options } => {
                self.check_all(options);
                Outcome::Done
            }
            Command::CheckNode { nodes, options } => {
                self.check_node(nodes, options);
                Outcome::Done
            }
            Command::UncheckAll { options } => {
                self.uncheck_all(options);
                Outcome::Done
            }
            Command::UncheckNode { nodes, options } => {
                self.uncheck_node(nodes, options);
                Outcome::Done
            }
            Command::ToggleNodeChecked { nodes, options } => {
                self.toggle_node_checked(nodes, options);
                Outcome::Done
            }
            Command::DisableAll { options } => {
                self.disable_all(options);
                Outcome::Done
            }
            Command::DisableNode { nodes, options } => {
                self.disable_node(nodes, options);
                Outcome::Done
            }
            Command::EnableAll { options } => {
                self.enable_all(options);
                Outcome::Done
            }
            Command::EnableNode { nodes, options } => {
                self.enable_node(nodes, options);
                Outcome::Done
            }
            Command::ToggleNodeDisabled { nodes, options } => {
                self.toggle_node_disabled(nodes, options);
                Outcome::Done
            }
            Command::Search { pattern, options } => snapshots(self.search(&pattern, options)?),
            Command::ClearSearch { options } => {
                self.clear_search(options);
                Outcome::Done
            }
            Command::FindNodes {
                pattern,
                field,
                ignore_case,
            } => snapshots(self.find_nodes(&pattern, field, ignore_case)?),
        };
        Ok(outcome)
    }

    /// Parse and run a JSON command.
    ///
    /// Returns `Ok(None)` without touching the tree when the method name is
    /// unknown; a known method with malformed arguments is a parse error.
    pub fn invoke(&mut self, json: &str) -> Result<Option<Outcome>> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let method = value
            .get("method")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default();
        if !Command::METHODS.contains(&method) {
            log::error!("No such method: {method}");
            return Ok(None);
        }
        let command: Command = serde_json::from_value(value)?;
        self.execute(command).map(Some)
    }
}
