//! Field-based node queries and text search.

use std::collections::BTreeSet;
use std::str::FromStr;

use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TreeError};
use crate::events::TreeEvent;
use crate::node::{Node, NodeId};
use crate::options::{ChangeOptions, SearchOptions};
use crate::surface::Surface;
use crate::view::TreeView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateField {
    Expanded,
    Selected,
    Checked,
    Disabled,
}

/// A node field a query can match against, parsed from paths such as
/// `text` or `state.checked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum NodeField {
    Id,
    ParentId,
    #[default]
    Text,
    Level,
    Selectable,
    SearchResult,
    Visible,
    Icon,
    SelectedIcon,
    Color,
    BackColor,
    Href,
    /// Tags joined with `,`.
    Tags,
    State(StateField),
}

impl NodeField {
    /// The field's value as text, or `None` when the node doesn't carry it.
    pub fn value(&self, node: &Node) -> Option<String> {
        let flag = |b: bool| Some(b.to_string());
        match self {
            NodeField::Id => Some(node.id.to_string()),
            NodeField::ParentId => node.parent_id.map(|p| p.to_string()),
            NodeField::Text => Some(node.text.clone()),
            NodeField::Level => Some(node.level.to_string()),
            NodeField::Selectable => flag(node.selectable),
            NodeField::SearchResult => flag(node.search_result),
            NodeField::Visible => flag(node.visible),
            NodeField::Icon => node.icon.clone(),
            NodeField::SelectedIcon => node.selected_icon.clone(),
            NodeField::Color => node.color.clone(),
            NodeField::BackColor => node.back_color.clone(),
            NodeField::Href => node.href.clone(),
            NodeField::Tags => (!node.tags.is_empty()).then(|| node.tags.join(",")),
            NodeField::State(StateField::Expanded) => flag(node.state.expanded),
            NodeField::State(StateField::Selected) => flag(node.state.selected),
            NodeField::State(StateField::Checked) => flag(node.state.checked),
            NodeField::State(StateField::Disabled) => flag(node.state.disabled),
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            NodeField::Id => "nodeId",
            NodeField::ParentId => "parentId",
            NodeField::Text => "text",
            NodeField::Level => "level",
            NodeField::Selectable => "selectable",
            NodeField::SearchResult => "searchResult",
            NodeField::Visible => "state.visible",
            NodeField::Icon => "icon",
            NodeField::SelectedIcon => "selectedIcon",
            NodeField::Color => "color",
            NodeField::BackColor => "backColor",
            NodeField::Href => "href",
            NodeField::Tags => "tags",
            NodeField::State(StateField::Expanded) => "state.expanded",
            NodeField::State(StateField::Selected) => "state.selected",
            NodeField::State(StateField::Checked) => "state.checked",
            NodeField::State(StateField::Disabled) => "state.disabled",
        }
    }
}

impl FromStr for NodeField {
    type Err = TreeError;

    fn from_str(path: &str) -> Result<Self> {
        let field = match path.trim() {
            "nodeId" | "id" => NodeField::Id,
            "parentId" => NodeField::ParentId,
            "text" => NodeField::Text,
            "level" => NodeField::Level,
            "selectable" => NodeField::Selectable,
            "searchResult" => NodeField::SearchResult,
            "visible" | "state.visible" => NodeField::Visible,
            "icon" => NodeField::Icon,
            "selectedIcon" => NodeField::SelectedIcon,
            "color" => NodeField::Color,
            "backColor" => NodeField::BackColor,
            "href" => NodeField::Href,
            "tags" => NodeField::Tags,
            other => {
                let state = other
                    .strip_prefix("state.")
                    .or_else(|| other.strip_prefix("states."));
                match state {
                    Some("expanded") => NodeField::State(StateField::Expanded),
                    Some("selected") => NodeField::State(StateField::Selected),
                    Some("checked") => NodeField::State(StateField::Checked),
                    Some("disabled") => NodeField::State(StateField::Disabled),
                    _ => return Err(TreeError::UnknownField(path.to_string())),
                }
            }
        };
        Ok(field)
    }
}

impl TryFrom<String> for NodeField {
    type Error = TreeError;

    fn try_from(path: String) -> Result<Self> {
        path.parse()
    }
}

impl From<NodeField> for String {
    fn from(field: NodeField) -> Self {
        field.path().to_string()
    }
}

impl std::fmt::Display for NodeField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

impl<S: Surface> TreeView<S> {
    /// Nodes whose `field`, as text, contains a match for `pattern`.
    pub fn find_nodes(&self, pattern: &str, field: NodeField, ignore_case: bool) -> Result<Vec<&Node>> {
        let ids = self.find_ids(pattern, field, ignore_case)?;
        Ok(ids.into_iter().filter_map(|id| self.index.get(id)).collect())
    }

    pub(crate) fn find_ids(&self, pattern: &str, field: NodeField, ignore_case: bool) -> Result<Vec<NodeId>> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(ignore_case)
            .build()
            .map_err(|err| TreeError::invalid_pattern(pattern, err))?;
        Ok(self.ids_where(|node| field.value(node).is_some_and(|v| regex.is_match(&v))))
    }

    /// Flag every node whose text matches `pattern`, replacing the previous
    /// results. An empty pattern clears them.
    ///
    /// Nodes that were and still are results are left untouched. The
    /// emitted `SearchComplete` carries the nodes added and removed.
    pub fn search(&mut self, pattern: &str, options: SearchOptions) -> Result<Vec<&Node>> {
        let results = if pattern.is_empty() {
            Vec::new()
        } else {
            let pattern = if options.exact_match {
                format!("^{pattern}$")
            } else {
                pattern.to_string()
            };
            self.find_ids(&pattern, NodeField::Text, options.ignore_case)?
        };

        let previous: BTreeSet<NodeId> = std::mem::take(&mut self.search_results).into_iter().collect();
        let current: BTreeSet<NodeId> = results.iter().copied().collect();
        let removed: Vec<NodeId> = previous.difference(&current).copied().collect();
        let added: Vec<NodeId> = current.difference(&previous).copied().collect();

        for &id in &removed {
            self.set_search_result(id, false);
        }
        for &id in &added {
            self.set_search_result(id, true);
        }
        self.search_results = results.clone();

        if options.reveal_results {
            self.reveal_node(results.clone(), options.change_options());
        } else {
            self.render();
        }
        log::debug!(
            "treeview: search {pattern:?} found {} (+{} -{})",
            results.len(),
            added.len(),
            removed.len()
        );

        if !options.silent {
            let snapshots = self.index.snapshots(&results);
            self.events.emit(TreeEvent::SearchComplete {
                results: snapshots,
                added,
                removed,
            });
        }
        Ok(results.into_iter().filter_map(|id| self.index.get(id)).collect())
    }

    /// Drop every search result.
    pub fn clear_search(&mut self, options: ChangeOptions) {
        let previous = std::mem::take(&mut self.search_results);
        for &id in &previous {
            self.set_search_result(id, false);
        }
        self.render();
        if !options.silent {
            let results = self.index.snapshots(&previous);
            self.events.emit(TreeEvent::SearchCleared { results });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_paths() {
        assert_eq!("text".parse::<NodeField>().unwrap(), NodeField::Text);
        assert_eq!(
            "state.checked".parse::<NodeField>().unwrap(),
            NodeField::State(StateField::Checked)
        );
        assert_eq!(
            "states.disabled".parse::<NodeField>().unwrap(),
            NodeField::State(StateField::Disabled)
        );
        assert!(matches!(
            "state.bogus".parse::<NodeField>(),
            Err(TreeError::UnknownField(_))
        ));
    }

    #[test]
    fn test_path_round_trips() {
        for field in [
            NodeField::Id,
            NodeField::Tags,
            NodeField::Visible,
            NodeField::State(StateField::Expanded),
        ] {
            assert_eq!(field.path().parse::<NodeField>().unwrap(), field);
        }
    }
}
