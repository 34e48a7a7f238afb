//! Node model: tree definitions, live nodes and event snapshots.

use std::ops::Deref;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Dense pre-order index of a node, stable for one load of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for NodeId {
    fn from(id: usize) -> Self {
        Self(id)
    }
}

impl From<&Node> for NodeId {
    fn from(node: &Node) -> Self {
        node.id
    }
}

impl From<&NodeSnapshot> for NodeId {
    fn from(node: &NodeSnapshot) -> Self {
        node.id
    }
}

// =============================================================================
// Definitions
// =============================================================================

/// State flags as given by a tree definition. Absent flags get defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expanded: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

impl StateSpec {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One node of a tree definition, as supplied by the host.
///
/// Deserializes from the JSON form `{"text": ..., "nodes": [...], "state": {...}}`;
/// `states` is accepted as an alias of `state` and unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSpec {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<NodeSpec>,
    #[serde(default, alias = "states", skip_serializing_if = "StateSpec::is_empty")]
    pub state: StateSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selectable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl NodeSpec {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn child(mut self, child: NodeSpec) -> Self {
        self.nodes.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = NodeSpec>) -> Self {
        self.nodes.extend(children);
        self
    }

    pub fn expanded(mut self, expanded: bool) -> Self {
        self.state.expanded = Some(expanded);
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.state.selected = Some(selected);
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.state.checked = Some(checked);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.state.disabled = Some(disabled);
        self
    }

    pub fn selectable(mut self, selectable: bool) -> Self {
        self.selectable = Some(selectable);
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn selected_icon(mut self, icon: impl Into<String>) -> Self {
        self.selected_icon = Some(icon.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn back_color(mut self, color: impl Into<String>) -> Self {
        self.back_color = Some(color.into());
        self
    }

    pub fn href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.nodes.iter().map(NodeSpec::count).sum::<usize>()
    }
}

// =============================================================================
// Live nodes
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeState {
    pub expanded: bool,
    pub selected: bool,
    pub checked: bool,
    pub disabled: bool,
}

/// A node of a loaded tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,
    pub parent_id: Option<NodeId>,
    pub text: String,
    pub children: Vec<NodeId>,
    pub state: NodeState,
    pub selectable: bool,
    pub search_result: bool,
    /// Depth from the top, roots are level 1.
    pub level: usize,
    /// Whether the node falls inside the initially displayed levels or has
    /// been revealed by expanding its parent.
    pub visible: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Node {
    pub(crate) fn from_spec(
        spec: &NodeSpec,
        id: NodeId,
        parent_id: Option<NodeId>,
        level: usize,
    ) -> Self {
        Self {
            id,
            parent_id,
            text: spec.text.clone(),
            children: Vec::with_capacity(spec.nodes.len()),
            state: NodeState::default(),
            selectable: true,
            search_result: false,
            level,
            visible: false,
            icon: spec.icon.clone(),
            selected_icon: spec.selected_icon.clone(),
            color: spec.color.clone(),
            back_color: spec.back_color.clone(),
            href: spec.href.clone(),
            tags: spec.tags.clone(),
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Definition for this node alone, every state flag explicit.
    pub(crate) fn to_spec(&self) -> NodeSpec {
        NodeSpec {
            text: self.text.clone(),
            nodes: Vec::new(),
            state: StateSpec {
                expanded: Some(self.state.expanded),
                selected: Some(self.state.selected),
                checked: Some(self.state.checked),
                disabled: Some(self.state.disabled),
                visible: Some(self.visible),
            },
            selectable: Some(self.selectable),
            icon: self.icon.clone(),
            selected_icon: self.selected_icon.clone(),
            color: self.color.clone(),
            back_color: self.back_color.clone(),
            href: self.href.clone(),
            tags: self.tags.clone(),
        }
    }
}

/// Immutable copy of a node taken when an event is emitted or a query answered.
///
/// Later transitions never show through a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSnapshot(Arc<Node>);

impl NodeSnapshot {
    pub fn new(node: &Node) -> Self {
        Self(Arc::new(node.clone()))
    }
}

impl Deref for NodeSnapshot {
    type Target = Node;

    fn deref(&self) -> &Node {
        &self.0
    }
}

impl Serialize for NodeSnapshot {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}
