use crate::element::{Document, Element, ElementId};

/// Walk from `from` up to the root and return the first element matching
/// `predicate`, starting with `from` itself.
pub fn closest(
    doc: &Document,
    from: ElementId,
    predicate: impl Fn(&Element) -> bool,
) -> Option<ElementId> {
    let mut current = Some(from);
    while let Some(id) = current {
        let element = doc.get(id)?;
        if predicate(element) {
            return Some(id);
        }
        current = element.parent();
    }
    None
}

/// Nearest element (inclusive) carrying `class`.
pub fn closest_with_class(doc: &Document, from: ElementId, class: &str) -> Option<ElementId> {
    closest(doc, from, |el| el.has_class(class))
}

/// The child of `container` occupying rendered line `line`.
///
/// Every element child of a list container renders as one line, so this is
/// the inverse of [`render_lines`](crate::render::render_lines).
pub fn element_at_line(doc: &Document, container: ElementId, line: usize) -> Option<ElementId> {
    doc.children(container)
        .iter()
        .copied()
        .filter(|el| doc.get(*el).is_some_and(|e| !e.is_text()))
        .nth(line)
}

/// First descendant of `row` (inclusive) carrying `class`.
pub fn find_in(doc: &Document, row: ElementId, class: &str) -> Option<ElementId> {
    if doc.has_class(row, class) {
        return Some(row);
    }
    doc.query_class(row, class).into_iter().next()
}
