//! The element primitives the renderer draws onto.

use tuidom::{Document, Element, ElementId};

/// Element shapes the renderer asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Template {
    /// `ul.list-group`
    List,
    /// `li.list-group-item`
    Item,
    /// `span.indent`
    Indent,
    /// `span.icon`
    Icon,
    /// `span.badge`
    Badge,
    /// `a` pointing at `href`
    Link { href: String },
    /// `ul.dropdown-menu.contextmenu`
    Menu,
    /// `li`
    MenuEntry,
    /// `li.divider`
    MenuDivider,
    /// `a`
    MenuLink,
}

/// A retained element tree the tree view renders into.
///
/// Handles must stay valid until the element is removed; the renderer keeps
/// them as back-references from nodes to rows.
pub trait Surface {
    type Handle: Copy + Eq + std::fmt::Debug;

    fn create_element(&mut self, template: Template) -> Self::Handle;
    fn append(&mut self, parent: Self::Handle, child: Self::Handle);
    fn prepend(&mut self, parent: Self::Handle, child: Self::Handle);
    /// Place `new` directly after `reference` under the same parent.
    fn insert_after(&mut self, reference: Self::Handle, new: Self::Handle);
    /// Detach and drop an element with its subtree.
    fn remove(&mut self, element: Self::Handle);
    /// Drop every child of an element.
    fn clear(&mut self, element: Self::Handle);
    fn append_text(&mut self, element: Self::Handle, text: &str);

    /// `classes` may hold several space-separated names.
    fn add_class(&mut self, element: Self::Handle, classes: &str);
    fn remove_class(&mut self, element: Self::Handle, classes: &str);
    fn has_class(&self, element: Self::Handle, class: &str) -> bool;

    fn set_attribute(&mut self, element: Self::Handle, name: &str, value: &str);
    fn remove_attribute(&mut self, element: Self::Handle, name: &str);
    fn attribute(&self, element: Self::Handle, name: &str) -> Option<String>;

    fn parent(&self, element: Self::Handle) -> Option<Self::Handle>;

    /// Nearest element carrying `class`, starting at `from` itself.
    fn closest_with_class(&self, from: Self::Handle, class: &str) -> Option<Self::Handle> {
        let mut current = Some(from);
        while let Some(el) = current {
            if self.has_class(el, class) {
                return Some(el);
            }
            current = self.parent(el);
        }
        None
    }

    fn inject_stylesheet(&mut self, id: &str, css: &str);
    fn remove_stylesheet(&mut self, id: &str);
}

impl Template {
    fn element(self) -> Element {
        match self {
            Template::List => Element::new("ul").class("list-group"),
            Template::Item => Element::new("li").class("list-group-item"),
            Template::Indent => Element::new("span").class("indent"),
            Template::Icon => Element::new("span").class("icon"),
            Template::Badge => Element::new("span").class("badge"),
            Template::Link { href } => Element::new("a")
                .attr("href", href)
                .attr("style", "color:inherit;"),
            Template::Menu => Element::new("ul").class("dropdown-menu contextmenu"),
            Template::MenuEntry => Element::new("li"),
            Template::MenuDivider => Element::new("li").class("divider"),
            Template::MenuLink => Element::new("a"),
        }
    }
}

impl Surface for Document {
    type Handle = ElementId;

    fn create_element(&mut self, template: Template) -> ElementId {
        self.create(template.element())
    }

    fn append(&mut self, parent: ElementId, child: ElementId) {
        self.append_child(parent, child);
    }

    fn prepend(&mut self, parent: ElementId, child: ElementId) {
        self.prepend_child(parent, child);
    }

    fn insert_after(&mut self, reference: ElementId, new: ElementId) {
        Document::insert_after(self, reference, new);
    }

    fn remove(&mut self, element: ElementId) {
        Document::remove(self, element);
    }

    fn clear(&mut self, element: ElementId) {
        self.clear_children(element);
    }

    fn append_text(&mut self, element: ElementId, text: &str) {
        Document::append_text(self, element, text);
    }

    fn add_class(&mut self, element: ElementId, classes: &str) {
        Document::add_class(self, element, classes);
    }

    fn remove_class(&mut self, element: ElementId, classes: &str) {
        Document::remove_class(self, element, classes);
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        Document::has_class(self, element, class)
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        Document::set_attribute(self, element, name, value);
    }

    fn remove_attribute(&mut self, element: ElementId, name: &str) {
        Document::remove_attribute(self, element, name);
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        Document::attribute(self, element, name).map(str::to_string)
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        Document::parent(self, element)
    }

    fn closest_with_class(&self, from: ElementId, class: &str) -> Option<ElementId> {
        tuidom::closest_with_class(self, from, class)
    }

    fn inject_stylesheet(&mut self, id: &str, css: &str) {
        self.set_stylesheet(id, css);
    }

    fn remove_stylesheet(&mut self, id: &str) {
        Document::remove_stylesheet(self, id);
    }
}
