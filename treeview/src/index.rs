//! Flat pre-order index over the loaded tree.
//!
//! The index owns every node. Roots and child lists store [`NodeId`]s into
//! the same arena, so the hierarchical view and the flat view can never
//! disagree and are dropped together on reload.

use serde::{Deserialize, Serialize};

use crate::node::{Node, NodeId, NodeSnapshot, NodeSpec};

#[derive(Debug, Clone, Default)]
pub struct TreeIndex {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

impl TreeIndex {
    /// Walk the definition depth-first in pre-order, numbering nodes from 0.
    ///
    /// Nodes come out with every flag cleared; the view fills in their
    /// initial state right after.
    pub fn build(specs: &[NodeSpec]) -> Self {
        let mut index = Self {
            nodes: Vec::with_capacity(specs.iter().map(NodeSpec::count).sum()),
            roots: Vec::with_capacity(specs.len()),
        };
        for spec in specs {
            let id = index.push(spec, None, 1);
            index.roots.push(id);
        }
        log::debug!("treeview: indexed {} nodes", index.nodes.len());
        index
    }

    fn push(&mut self, spec: &NodeSpec, parent: Option<NodeId>, level: usize) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::from_spec(spec, id, parent, level));
        for child in &spec.nodes {
            let child_id = self.push(child, Some(id), level + 1);
            self.nodes[id.0].children.push(child_id);
        }
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    // -------------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------------

    /// Resolve an identifier to a node id known to this index.
    pub fn resolve(&self, id: impl Into<NodeId>) -> Option<NodeId> {
        let id = id.into();
        if id.0 < self.nodes.len() {
            Some(id)
        } else {
            log::warn!(
                "treeview: node {id} out of range (tree has {} nodes)",
                self.nodes.len()
            );
            None
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    pub fn parent(&self, id: NodeId) -> Option<&Node> {
        self.get(id)?.parent_id.and_then(|p| self.get(p))
    }

    /// Nodes sharing `id`'s parent (or the other roots), excluding `id`.
    pub fn siblings(&self, id: NodeId) -> Vec<NodeId> {
        let Some(node) = self.get(id) else {
            return Vec::new();
        };
        let pool = match node.parent_id.and_then(|p| self.get(p)) {
            Some(parent) => parent.children.as_slice(),
            None => self.roots.as_slice(),
        };
        pool.iter().copied().filter(|s| *s != id).collect()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = self.get(id).and_then(|n| n.parent_id);
        while let Some(parent) = current {
            out.push(parent);
            current = self.get(parent).and_then(|n| n.parent_id);
        }
        out
    }

    /// Descendants of `id` in pre-order, excluding `id`.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev());
        }
        out
    }

    /// Every node in pre-order, which is also id order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut()
    }

    pub fn snapshot(&self, id: NodeId) -> Option<NodeSnapshot> {
        self.get(id).map(NodeSnapshot::new)
    }

    pub fn snapshots(&self, ids: &[NodeId]) -> Vec<NodeSnapshot> {
        ids.iter().filter_map(|id| self.snapshot(*id)).collect()
    }

    /// Rebuild the definition this index would reload to, states included.
    pub fn to_specs(&self) -> Vec<NodeSpec> {
        self.roots.iter().map(|id| self.spec_of(*id)).collect()
    }

    fn spec_of(&self, id: NodeId) -> NodeSpec {
        let node = &self.nodes[id.0];
        let mut spec = node.to_spec();
        spec.nodes = node.children.iter().map(|c| self.spec_of(*c)).collect();
        spec
    }
}

// =============================================================================
// Targets
// =============================================================================

/// One or more node identifiers, each resolved independently.
///
/// Deserializes from either a single id or an array of ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TargetsRepr", into = "Vec<NodeId>")]
pub struct Targets(Vec<NodeId>);

#[derive(Deserialize)]
#[serde(untagged)]
enum TargetsRepr {
    One(NodeId),
    Many(Vec<NodeId>),
}

impl From<TargetsRepr> for Targets {
    fn from(repr: TargetsRepr) -> Self {
        match repr {
            TargetsRepr::One(id) => Self(vec![id]),
            TargetsRepr::Many(ids) => Self(ids),
        }
    }
}

impl From<Targets> for Vec<NodeId> {
    fn from(targets: Targets) -> Self {
        targets.0
    }
}

impl Targets {
    pub fn ids(&self) -> &[NodeId] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<NodeId> for Targets {
    fn from(id: NodeId) -> Self {
        Self(vec![id])
    }
}

impl From<usize> for Targets {
    fn from(id: usize) -> Self {
        Self(vec![NodeId(id)])
    }
}

impl From<&Node> for Targets {
    fn from(node: &Node) -> Self {
        Self(vec![node.id])
    }
}

impl From<&NodeSnapshot> for Targets {
    fn from(node: &NodeSnapshot) -> Self {
        Self(vec![node.id])
    }
}

impl<T: Into<NodeId>> From<Vec<T>> for Targets {
    fn from(ids: Vec<T>) -> Self {
        Self(ids.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<NodeId> + Copy> From<&[T]> for Targets {
    fn from(ids: &[T]) -> Self {
        Self(ids.iter().map(|id| (*id).into()).collect())
    }
}

impl<T: Into<NodeId>, const N: usize> From<[T; N]> for Targets {
    fn from(ids: [T; N]) -> Self {
        Self(ids.into_iter().map(Into::into).collect())
    }
}

impl FromIterator<NodeId> for Targets {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
