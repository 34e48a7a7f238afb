//! The tree view handle: construction, lifecycle and read access.

use std::sync::atomic::{AtomicUsize, Ordering};

use tuidom::{Document, Element, Line, LineOptions};

use crate::defaults;
use crate::error::Result;
use crate::events::{EventBus, EventKind, Handler, SubscriptionId, TreeEvent};
use crate::index::TreeIndex;
use crate::menu::OpenMenu;
use crate::node::{Node, NodeId, NodeSnapshot, NodeSpec};
use crate::options::{TreeData, TreeOptions};
use crate::render::RenderState;
use crate::style::{BootstrapStyle, StyleBuilder};
use crate::surface::Surface;

/// Unique identifier for a tree view instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreeId(usize);

impl TreeId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for TreeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "treeview-{}", self.0)
    }
}

/// A hierarchical list with per-node expand, select, check, disable and
/// search state, rendered incrementally onto a [`Surface`].
///
/// The view owns its nodes, its surface and its subscribers. Every call runs
/// to completion (state change, events, re-render) before returning.
///
/// # Example
///
/// ```ignore
/// let mut tree = TreeView::new(
///     vec![NodeSpec::new("Parent 1").child(NodeSpec::new("Child 1"))],
///     TreeOptions::new().levels(1),
/// )?;
/// tree.expand_node(0, ChangeOptions::new());
/// assert_eq!(tree.row_count(), 2);
/// ```
pub struct TreeView<S: Surface = Document> {
    pub(crate) id: TreeId,
    pub(crate) options: TreeOptions,
    pub(crate) index: TreeIndex,
    pub(crate) surface: S,
    pub(crate) container: S::Handle,
    pub(crate) renderer: RenderState<S::Handle>,
    pub(crate) events: EventBus,
    pub(crate) search_results: Vec<NodeId>,
    pub(crate) style: Box<dyn StyleBuilder>,
    pub(crate) menu: Option<OpenMenu<S::Handle>>,
}

impl<S: Surface> std::fmt::Debug for TreeView<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeView")
            .field("id", &self.id)
            .field("nodes", &self.index.len())
            .field("rows", &self.renderer.row_count())
            .field("events", &self.events)
            .finish()
    }
}

// =============================================================================
// Construction
// =============================================================================

/// Collects options, style and subscribers so they are in place before the
/// first render.
pub struct TreeViewBuilder {
    data: TreeData,
    options: TreeOptions,
    style: Option<Box<dyn StyleBuilder>>,
    handlers: Vec<(Option<EventKind>, Handler)>,
}

impl TreeViewBuilder {
    pub fn new(data: impl Into<TreeData>) -> Self {
        Self {
            data: data.into(),
            options: TreeOptions::default(),
            style: None,
            handlers: Vec::new(),
        }
    }

    pub fn options(mut self, options: TreeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn style(mut self, style: impl StyleBuilder + 'static) -> Self {
        self.style = Some(Box::new(style));
        self
    }

    pub fn on(mut self, kind: EventKind, handler: impl FnMut(&TreeEvent) + 'static) -> Self {
        self.handlers.push((Some(kind), Box::new(handler)));
        self
    }

    pub fn on_any(mut self, handler: impl FnMut(&TreeEvent) + 'static) -> Self {
        self.handlers.push((None, Box::new(handler)));
        self
    }

    /// Build into a fresh [`Document`] with a single container element.
    pub fn build(self) -> Result<TreeView<Document>> {
        let mut doc = Document::new();
        let container = doc.create(Element::new("div").attr("id", "tree"));
        let root = doc.root();
        doc.append_child(root, container);
        self.build_in(doc, container)
    }

    /// Build into `container` on an existing surface.
    pub fn build_in<S: Surface>(self, surface: S, container: S::Handle) -> Result<TreeView<S>> {
        self.options.validate()?;
        let specs = self.data.into_specs()?;

        let mut events = EventBus::new();
        for (kind, handler) in self.handlers {
            match kind {
                Some(kind) => events.subscribe(kind, handler),
                None => events.subscribe_all(handler),
            };
        }

        let mut view = TreeView {
            id: TreeId::new(),
            options: self.options,
            index: TreeIndex::default(),
            surface,
            container,
            renderer: RenderState::new(),
            events,
            search_results: Vec::new(),
            style: self.style.unwrap_or_else(|| Box::new(BootstrapStyle)),
            menu: None,
        };
        view.load(&specs);
        Ok(view)
    }
}

impl TreeView<Document> {
    /// Build a tree in its own document with the default style.
    pub fn new(data: impl Into<TreeData>, options: TreeOptions) -> Result<Self> {
        Self::builder(data).options(options).build()
    }

    pub fn builder(data: impl Into<TreeData>) -> TreeViewBuilder {
        TreeViewBuilder::new(data)
    }

    /// Rendered rows as terminal lines.
    pub fn lines(&self, options: &LineOptions) -> Vec<Line> {
        match self.renderer.list {
            Some(list) => tuidom::render_lines(&self.surface, list, options),
            None => Vec::new(),
        }
    }
}

impl<S: Surface> TreeView<S> {
    /// Build into `container` on `surface` with the default style.
    pub fn with_surface(
        surface: S,
        container: S::Handle,
        data: impl Into<TreeData>,
        options: TreeOptions,
    ) -> Result<Self> {
        TreeViewBuilder::new(data)
            .options(options)
            .build_in(surface, container)
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Replace the tree with a new definition, keeping options and subscribers.
    ///
    /// A definition that fails to parse leaves the current tree untouched.
    pub fn init(&mut self, data: impl Into<TreeData>) -> Result<()> {
        let specs = data.into().into_specs()?;
        self.load(&specs);
        Ok(())
    }

    /// Like [`init`](Self::init), also replacing the options.
    pub fn init_with(&mut self, data: impl Into<TreeData>, options: TreeOptions) -> Result<()> {
        options.validate()?;
        let specs = data.into().into_specs()?;
        self.options = options;
        self.load(&specs);
        Ok(())
    }

    fn load(&mut self, specs: &[NodeSpec]) {
        self.release();
        self.index = TreeIndex::build(specs);
        defaults::apply(&mut self.index, specs, &self.options);
        self.search_results.clear();
        self.render();

        let nodes = self.index.iter().map(NodeSnapshot::new).collect();
        self.events.emit(TreeEvent::Initialized { nodes });
    }

    /// Drop every row, the list element and any open context menu, and forget
    /// the node back-references.
    fn release(&mut self) {
        self.close_context_menu();
        if let Some(list) = self.renderer.list.take() {
            self.surface.remove(list);
        }
        self.renderer.reset();
    }

    /// Tear down the rendered list, notify and drop subscribers, and hand
    /// back the surface. The injected stylesheet stays.
    pub fn destroy(mut self) -> S {
        self.release();
        self.events.emit(TreeEvent::Destroyed);
        self.events.clear();
        log::debug!("treeview: {} destroyed", self.id);
        self.surface
    }

    /// [`destroy`](Self::destroy) and also remove the injected stylesheet.
    pub fn remove(mut self) -> S {
        let style_id = self.style_id();
        self.surface.remove_stylesheet(&style_id);
        self.destroy()
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn id(&self) -> TreeId {
        self.id
    }

    pub fn options(&self) -> &TreeOptions {
        &self.options
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn container(&self) -> S::Handle {
        self.container
    }

    /// The list element holding the rows.
    pub fn list_element(&self) -> Option<S::Handle> {
        self.renderer.list
    }

    /// The row currently rendered for `node`, if any.
    pub fn row_element(&self, node: impl Into<NodeId>) -> Option<S::Handle> {
        self.renderer.row(node.into())
    }

    pub fn row_count(&self) -> usize {
        self.renderer.row_count()
    }

    /// Class shared by every row of this tree.
    pub fn row_class(&self) -> String {
        format!("node-{}", self.id)
    }

    /// Id of the injected stylesheet.
    pub fn style_id(&self) -> String {
        format!("{}-style", self.id)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn index(&self) -> &TreeIndex {
        &self.index
    }

    /// Definition reproducing the current tree, every state flag explicit.
    pub fn to_specs(&self) -> Vec<NodeSpec> {
        self.index.to_specs()
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    pub fn subscribe(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&TreeEvent) + 'static,
    ) -> SubscriptionId {
        self.events.subscribe(kind, handler)
    }

    pub fn subscribe_all(&mut self, handler: impl FnMut(&TreeEvent) + 'static) -> SubscriptionId {
        self.events.subscribe_all(handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    pub(crate) fn emit_node(&mut self, kind: EventKind, id: NodeId, silent: bool) {
        if silent {
            return;
        }
        let Some(snapshot) = self.index.snapshot(id) else {
            return;
        };
        if let Some(event) = TreeEvent::for_node(kind, snapshot) {
            self.events.emit(event);
        }
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn get_node(&self, node: impl Into<NodeId>) -> Option<&Node> {
        let id = self.index.resolve(node)?;
        self.index.get(id)
    }

    pub fn get_parent(&self, node: impl Into<NodeId>) -> Option<&Node> {
        let id = self.index.resolve(node)?;
        self.index.parent(id)
    }

    pub fn get_siblings(&self, node: impl Into<NodeId>) -> Vec<&Node> {
        let Some(id) = self.index.resolve(node) else {
            return Vec::new();
        };
        self.index
            .siblings(id)
            .into_iter()
            .filter_map(|s| self.index.get(s))
            .collect()
    }

    pub(crate) fn nodes_where(&self, predicate: impl Fn(&Node) -> bool) -> Vec<&Node> {
        self.index.iter().filter(|n| predicate(n)).collect()
    }

    pub(crate) fn ids_where(&self, predicate: impl Fn(&Node) -> bool) -> Vec<NodeId> {
        self.index
            .iter()
            .filter(|n| predicate(n))
            .map(|n| n.id)
            .collect()
    }

    pub fn get_selected(&self) -> Vec<&Node> {
        self.nodes_where(|n| n.state.selected)
    }

    pub fn get_unselected(&self) -> Vec<&Node> {
        self.nodes_where(|n| !n.state.selected)
    }

    pub fn get_expanded(&self) -> Vec<&Node> {
        self.nodes_where(|n| n.state.expanded)
    }

    pub fn get_collapsed(&self) -> Vec<&Node> {
        self.nodes_where(|n| !n.state.expanded)
    }

    pub fn get_checked(&self) -> Vec<&Node> {
        self.nodes_where(|n| n.state.checked)
    }

    pub fn get_unchecked(&self) -> Vec<&Node> {
        self.nodes_where(|n| !n.state.checked)
    }

    pub fn get_disabled(&self) -> Vec<&Node> {
        self.nodes_where(|n| n.state.disabled)
    }

    pub fn get_enabled(&self) -> Vec<&Node> {
        self.nodes_where(|n| !n.state.disabled)
    }

    /// Current search results in tree order.
    pub fn get_search_results(&self) -> Vec<&Node> {
        self.nodes_where(|n| n.search_result)
    }
}
