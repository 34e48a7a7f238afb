use super::node::{Element, ElementId};

#[derive(Debug)]
struct Slot {
    generation: u32,
    element: Option<Element>,
}

/// An arena of elements forming a single document tree.
///
/// The document owns every element it creates. Elements start detached and
/// become part of the tree once appended or inserted somewhere below
/// [`Document::root`]. Removing an element frees its whole subtree.
#[derive(Debug)]
pub struct Document {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: ElementId,
    stylesheets: Vec<(String, String)>,
    mutations: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut doc = Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: ElementId {
                index: 0,
                generation: 0,
            },
            stylesheets: Vec::new(),
            mutations: 0,
        };
        doc.root = doc.create(Element::new("body"));
        doc.mutations = 0;
        doc
    }

    /// The `body` element every attached element descends from.
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Number of live elements, attached or not, including the root.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.element.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    /// Total number of structural, class, attribute and text changes applied
    /// since the document was created.
    pub fn mutation_count(&self) -> u64 {
        self.mutations
    }

    // -------------------------------------------------------------------------
    // Creation / lookup
    // -------------------------------------------------------------------------

    /// Store a detached element and return its handle.
    pub fn create(&mut self, mut element: Element) -> ElementId {
        element.parent = None;
        element.children.clear();
        self.mutations += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.generation += 1;
            slot.element = Some(element);
            return ElementId {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            element: Some(element),
        });
        ElementId {
            index,
            generation: 0,
        }
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.slots
            .get(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.element.as_ref())
    }

    fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.element.as_mut())
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.get(id).is_some()
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.get(id).and_then(|e| e.parent)
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.get(id).map(|e| e.children.as_slice()).unwrap_or(&[])
    }

    /// True if `id` is reachable from the document root.
    pub fn is_attached(&self, id: ElementId) -> bool {
        let mut current = Some(id);
        while let Some(el) = current {
            if el == self.root {
                return true;
            }
            current = self.parent(el);
        }
        false
    }

    /// True if `ancestor` is `id` or one of its ancestors.
    fn is_ancestor_or_self(&self, ancestor: ElementId, id: ElementId) -> bool {
        let mut current = Some(id);
        while let Some(el) = current {
            if el == ancestor {
                return true;
            }
            current = self.parent(el);
        }
        false
    }

    // -------------------------------------------------------------------------
    // Structure
    // -------------------------------------------------------------------------

    /// Unlink an element from its parent without freeing it.
    fn detach(&mut self, id: ElementId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Some(p) = self.get_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        if let Some(el) = self.get_mut(id) {
            el.parent = None;
        }
    }

    fn can_adopt(&self, parent: ElementId, child: ElementId) -> bool {
        if !self.contains(parent) || !self.contains(child) {
            log::warn!("tuidom: stale element handle ({parent} <- {child})");
            return false;
        }
        if self.is_ancestor_or_self(child, parent) {
            log::warn!("tuidom: refusing to insert {child} inside itself");
            return false;
        }
        true
    }

    /// Move `child` to the end of `parent`'s children.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> bool {
        if !self.can_adopt(parent, child) {
            return false;
        }
        self.detach(child);
        if let Some(p) = self.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.get_mut(child) {
            c.parent = Some(parent);
        }
        self.mutations += 1;
        true
    }

    /// Move `child` to the front of `parent`'s children.
    pub fn prepend_child(&mut self, parent: ElementId, child: ElementId) -> bool {
        if !self.can_adopt(parent, child) {
            return false;
        }
        self.detach(child);
        if let Some(p) = self.get_mut(parent) {
            p.children.insert(0, child);
        }
        if let Some(c) = self.get_mut(child) {
            c.parent = Some(parent);
        }
        self.mutations += 1;
        true
    }

    /// Place `new` directly after `reference` under the same parent.
    pub fn insert_after(&mut self, reference: ElementId, new: ElementId) -> bool {
        let Some(parent) = self.parent(reference) else {
            log::warn!("tuidom: insert_after on detached reference {reference}");
            return false;
        };
        if reference == new || !self.can_adopt(parent, new) {
            return false;
        }
        self.detach(new);
        let Some(p) = self.get_mut(parent) else {
            return false;
        };
        let at = p
            .children
            .iter()
            .position(|c| *c == reference)
            .map_or(p.children.len(), |i| i + 1);
        p.children.insert(at, new);
        if let Some(c) = self.get_mut(new) {
            c.parent = Some(parent);
        }
        self.mutations += 1;
        true
    }

    /// Detach and free an element together with its descendants.
    pub fn remove(&mut self, id: ElementId) -> bool {
        if !self.contains(id) {
            return false;
        }
        if id == self.root {
            log::warn!("tuidom: the document root cannot be removed");
            return false;
        }
        self.detach(id);
        self.free_subtree(id);
        self.mutations += 1;
        true
    }

    fn free_subtree(&mut self, id: ElementId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(slot) = self.slots.get_mut(current.index as usize) else {
                continue;
            };
            if slot.generation != current.generation {
                continue;
            }
            if let Some(el) = slot.element.take() {
                stack.extend(el.children);
                self.free.push(current.index);
            }
        }
    }

    /// Remove and free every child of `id`.
    pub fn clear_children(&mut self, id: ElementId) {
        let children: Vec<ElementId> = self.children(id).to_vec();
        if children.is_empty() {
            return;
        }
        for child in children {
            if let Some(c) = self.get_mut(child) {
                c.parent = None;
            }
            self.free_subtree(child);
        }
        if let Some(el) = self.get_mut(id) {
            el.children.clear();
        }
        self.mutations += 1;
    }

    /// Append a text node to `id`.
    pub fn append_text(&mut self, id: ElementId, text: &str) -> Option<ElementId> {
        if !self.contains(id) {
            return None;
        }
        let node = self.create(Element::text_node(text));
        self.append_child(id, node).then_some(node)
    }

    // -------------------------------------------------------------------------
    // Classes / attributes
    // -------------------------------------------------------------------------

    pub fn add_class(&mut self, id: ElementId, names: &str) {
        let mut changed = false;
        if let Some(el) = self.get_mut(id) {
            for name in names.split_whitespace() {
                changed |= el.add_class(name);
            }
        }
        if changed {
            self.mutations += 1;
        }
    }

    pub fn remove_class(&mut self, id: ElementId, names: &str) {
        let mut changed = false;
        if let Some(el) = self.get_mut(id) {
            for name in names.split_whitespace() {
                changed |= el.remove_class(name);
            }
        }
        if changed {
            self.mutations += 1;
        }
    }

    pub fn has_class(&self, id: ElementId, name: &str) -> bool {
        self.get(id).is_some_and(|e| e.has_class(name))
    }

    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) {
        let Some(el) = self.get_mut(id) else {
            return;
        };
        if el.attribute(name) == Some(value) {
            return;
        }
        el.attributes.insert(name.to_string(), value.to_string());
        self.mutations += 1;
    }

    pub fn remove_attribute(&mut self, id: ElementId, name: &str) {
        if self
            .get_mut(id)
            .is_some_and(|el| el.attributes.remove(name).is_some())
        {
            self.mutations += 1;
        }
    }

    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.get(id).and_then(|e| e.attribute(name))
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Descendants of `id` in document order, excluding `id` itself.
    pub fn descendants(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.children(id).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    /// Descendants of `id` carrying `class`, in document order.
    pub fn query_class(&self, id: ElementId, class: &str) -> Vec<ElementId> {
        self.descendants(id)
            .into_iter()
            .filter(|el| self.has_class(*el, class))
            .collect()
    }

    /// Concatenated text of every text node below `id`.
    pub fn text_content(&self, id: ElementId) -> String {
        let mut out = String::new();
        if let Some(text) = self.get(id).and_then(|e| e.text.as_deref()) {
            out.push_str(text);
        }
        for el in self.descendants(id) {
            if let Some(text) = self.get(el).and_then(|e| e.text.as_deref()) {
                out.push_str(text);
            }
        }
        out
    }

    // -------------------------------------------------------------------------
    // Stylesheets
    // -------------------------------------------------------------------------

    /// Insert or replace the stylesheet registered under `id`.
    pub fn set_stylesheet(&mut self, id: &str, css: &str) {
        match self.stylesheets.iter_mut().find(|(key, _)| key == id) {
            Some((_, existing)) => *existing = css.to_string(),
            None => self.stylesheets.push((id.to_string(), css.to_string())),
        }
        self.mutations += 1;
    }

    pub fn remove_stylesheet(&mut self, id: &str) -> bool {
        let before = self.stylesheets.len();
        self.stylesheets.retain(|(key, _)| key != id);
        let removed = before != self.stylesheets.len();
        if removed {
            self.mutations += 1;
        }
        removed
    }

    pub fn stylesheet(&self, id: &str) -> Option<&str> {
        self.stylesheets
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, css)| css.as_str())
    }

    /// Stylesheets in injection order.
    pub fn stylesheets(&self) -> impl Iterator<Item = (&str, &str)> {
        self.stylesheets
            .iter()
            .map(|(id, css)| (id.as_str(), css.as_str()))
    }
}
