use std::collections::BTreeMap;

/// Handle to an element stored in a [`Document`](super::Document).
///
/// Handles carry a generation so a handle to a removed element never
/// aliases whatever later reuses its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "el-{}v{}", self.index, self.generation)
    }
}

/// Tag used for text nodes.
pub const TEXT_TAG: &str = "#text";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    /// Only set on text nodes.
    pub text: Option<String>,

    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn text_node(content: impl Into<String>) -> Self {
        Self {
            tag: TEXT_TAG.to_string(),
            text: Some(content.into()),
            ..Default::default()
        }
    }

    /// Parse a space-separated class list into the element.
    pub fn class(mut self, names: &str) -> Self {
        for name in names.split_whitespace() {
            self.add_class(name);
        }
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn is_text(&self) -> bool {
        self.tag == TEXT_TAG
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.classes.iter().any(|c| c == name)
    }

    /// Returns true if the class was not present before.
    pub fn add_class(&mut self, name: &str) -> bool {
        if name.is_empty() || self.has_class(name) {
            return false;
        }
        self.classes.push(name.to_string());
        true
    }

    /// Returns true if the class was present.
    pub fn remove_class(&mut self, name: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c != name);
        before != self.classes.len()
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    /// The `class` attribute as it would appear in markup.
    pub fn class_attr(&self) -> String {
        self.classes.join(" ")
    }
}
