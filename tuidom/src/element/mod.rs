mod document;
mod node;

pub use document::Document;
pub use node::{Element, ElementId, TEXT_TAG};

/// Find the first element below `root` (inclusive) whose `id` attribute matches.
pub fn find_element(doc: &Document, root: ElementId, id: &str) -> Option<ElementId> {
    if doc.attribute(root, "id") == Some(id) {
        return Some(root);
    }
    doc.descendants(root)
        .into_iter()
        .find(|el| doc.attribute(*el, "id") == Some(id))
}
