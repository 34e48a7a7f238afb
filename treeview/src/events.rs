//! Tree events and the subscriber registry.

use std::cell::Cell;

use crate::node::{NodeId, NodeSnapshot};

// =============================================================================
// Event Types
// =============================================================================

/// Identifies which subscribers an event is delivered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Initialized,
    Rendered,
    NodeRendered,
    NodeExpanded,
    NodeCollapsed,
    NodeSelected,
    NodeUnselected,
    NodeChecked,
    NodeUnchecked,
    NodeDisabled,
    NodeEnabled,
    SearchComplete,
    SearchCleared,
    ContextMenuBefore,
    ContextMenuAfter,
    Destroyed,
}

/// Something that happened to the tree.
///
/// Node payloads are snapshots taken at emission time.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeEvent {
    Initialized { nodes: Vec<NodeSnapshot> },
    /// A render pass finished; carries the nodes it rendered.
    Rendered { nodes: Vec<NodeSnapshot> },
    /// A row was created for a node.
    NodeRendered(NodeSnapshot),
    NodeExpanded(NodeSnapshot),
    NodeCollapsed(NodeSnapshot),
    NodeSelected(NodeSnapshot),
    NodeUnselected(NodeSnapshot),
    NodeChecked(NodeSnapshot),
    NodeUnchecked(NodeSnapshot),
    NodeDisabled(NodeSnapshot),
    NodeEnabled(NodeSnapshot),
    SearchComplete {
        results: Vec<NodeSnapshot>,
        /// Nodes that became results with this search.
        added: Vec<NodeId>,
        /// Nodes that stopped being results with this search.
        removed: Vec<NodeId>,
    },
    SearchCleared { results: Vec<NodeSnapshot> },
    /// A context menu is about to open. Any subscriber may
    /// [`cancel`](TreeEvent::cancel) it.
    ContextMenuBefore {
        node: NodeSnapshot,
        /// Labels of the entries the menu would show.
        items: Vec<String>,
        cancelled: Cell<bool>,
    },
    ContextMenuAfter(NodeSnapshot),
    Destroyed,
}

impl TreeEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            TreeEvent::Initialized { .. } => EventKind::Initialized,
            TreeEvent::Rendered { .. } => EventKind::Rendered,
            TreeEvent::NodeRendered(_) => EventKind::NodeRendered,
            TreeEvent::NodeExpanded(_) => EventKind::NodeExpanded,
            TreeEvent::NodeCollapsed(_) => EventKind::NodeCollapsed,
            TreeEvent::NodeSelected(_) => EventKind::NodeSelected,
            TreeEvent::NodeUnselected(_) => EventKind::NodeUnselected,
            TreeEvent::NodeChecked(_) => EventKind::NodeChecked,
            TreeEvent::NodeUnchecked(_) => EventKind::NodeUnchecked,
            TreeEvent::NodeDisabled(_) => EventKind::NodeDisabled,
            TreeEvent::NodeEnabled(_) => EventKind::NodeEnabled,
            TreeEvent::SearchComplete { .. } => EventKind::SearchComplete,
            TreeEvent::SearchCleared { .. } => EventKind::SearchCleared,
            TreeEvent::ContextMenuBefore { .. } => EventKind::ContextMenuBefore,
            TreeEvent::ContextMenuAfter(_) => EventKind::ContextMenuAfter,
            TreeEvent::Destroyed => EventKind::Destroyed,
        }
    }

    /// The node a single-node event is about.
    pub fn node(&self) -> Option<&NodeSnapshot> {
        match self {
            TreeEvent::NodeRendered(n)
            | TreeEvent::NodeExpanded(n)
            | TreeEvent::NodeCollapsed(n)
            | TreeEvent::NodeSelected(n)
            | TreeEvent::NodeUnselected(n)
            | TreeEvent::NodeChecked(n)
            | TreeEvent::NodeUnchecked(n)
            | TreeEvent::NodeDisabled(n)
            | TreeEvent::NodeEnabled(n)
            | TreeEvent::ContextMenuAfter(n)
            | TreeEvent::ContextMenuBefore { node: n, .. } => Some(n),
            _ => None,
        }
    }

    /// Veto a [`ContextMenuBefore`](TreeEvent::ContextMenuBefore). No effect
    /// on other events.
    pub fn cancel(&self) {
        if let TreeEvent::ContextMenuBefore { cancelled, .. } = self {
            cancelled.set(true);
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, TreeEvent::ContextMenuBefore { cancelled, .. } if cancelled.get())
    }

    pub(crate) fn for_node(kind: EventKind, node: NodeSnapshot) -> Option<Self> {
        Some(match kind {
            EventKind::NodeRendered => TreeEvent::NodeRendered(node),
            EventKind::NodeExpanded => TreeEvent::NodeExpanded(node),
            EventKind::NodeCollapsed => TreeEvent::NodeCollapsed(node),
            EventKind::NodeSelected => TreeEvent::NodeSelected(node),
            EventKind::NodeUnselected => TreeEvent::NodeUnselected(node),
            EventKind::NodeChecked => TreeEvent::NodeChecked(node),
            EventKind::NodeUnchecked => TreeEvent::NodeUnchecked(node),
            EventKind::NodeDisabled => TreeEvent::NodeDisabled(node),
            EventKind::NodeEnabled => TreeEvent::NodeEnabled(node),
            _ => return None,
        })
    }
}

impl std::fmt::Display for TreeEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeEvent::Initialized { nodes } | TreeEvent::Rendered { nodes } => {
                write!(f, "{:?} ({} nodes)", self.kind(), nodes.len())
            }
            TreeEvent::SearchComplete {
                results,
                added,
                removed,
            } => write!(
                f,
                "SearchComplete ({} results, +{} -{})",
                results.len(),
                added.len(),
                removed.len()
            ),
            TreeEvent::SearchCleared { results } => {
                write!(f, "SearchCleared ({} results)", results.len())
            }
            TreeEvent::Destroyed => f.write_str("Destroyed"),
            _ => match self.node() {
                Some(node) => write!(f, "{:?} #{} {:?}", self.kind(), node.id, node.text),
                None => write!(f, "{:?}", self.kind()),
            },
        }
    }
}

// =============================================================================
// Event Bus
// =============================================================================

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub type Handler = Box<dyn FnMut(&TreeEvent)>;

struct Subscription {
    id: SubscriptionId,
    /// `None` receives every event.
    kind: Option<EventKind>,
    handler: Handler,
}

/// Synchronous event dispatch in subscription order.
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    subscriptions: Vec<Subscription>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&TreeEvent) + 'static,
    ) -> SubscriptionId {
        self.insert(Some(kind), Box::new(handler))
    }

    /// Receive every event regardless of kind.
    pub fn subscribe_all(&mut self, handler: impl FnMut(&TreeEvent) + 'static) -> SubscriptionId {
        self.insert(None, Box::new(handler))
    }

    fn insert(&mut self, kind: Option<EventKind>, handler: Handler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription { id, kind, handler });
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        before != self.subscriptions.len()
    }

    pub fn clear(&mut self) {
        self.subscriptions.clear();
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    pub fn emit(&mut self, event: TreeEvent) {
        self.dispatch(&event);
    }

    /// Deliver `event` and leave it with the caller, so a veto set by a
    /// subscriber can be read back.
    pub fn dispatch(&mut self, event: &TreeEvent) {
        let kind = event.kind();
        log::trace!("treeview: emit {event}");
        for sub in &mut self.subscriptions {
            if sub.kind.is_none_or(|k| k == kind) {
                (sub.handler)(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::index::TreeIndex;
    use crate::node::NodeSpec;

    #[test]
    fn test_subscribe_filters_by_kind() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();
        let sink = seen.clone();
        bus.subscribe(EventKind::Destroyed, move |e| sink.borrow_mut().push(e.kind()));
        bus.emit(TreeEvent::SearchCleared { results: vec![] });
        bus.emit(TreeEvent::Destroyed);
        assert_eq!(*seen.borrow(), vec![EventKind::Destroyed]);
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0));
        let mut bus = EventBus::new();
        let sink = count.clone();
        let id = bus.subscribe_all(move |_| *sink.borrow_mut() += 1);
        bus.emit(TreeEvent::Destroyed);
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.emit(TreeEvent::Destroyed);
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_subscriber_cancels_context_menu() {
        let index = TreeIndex::build(&[NodeSpec::new("a")]);
        let mut bus = EventBus::new();
        bus.subscribe(EventKind::ContextMenuBefore, |e| e.cancel());
        let event = TreeEvent::ContextMenuBefore {
            node: NodeSnapshot::new(index.iter().next().unwrap()),
            items: vec!["Open".into()],
            cancelled: Cell::new(false),
        };
        bus.dispatch(&event);
        assert!(event.is_cancelled());
        assert!(!TreeEvent::Destroyed.is_cancelled());
    }
}
