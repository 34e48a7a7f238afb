use tuidom::{closest_with_class, element_at_line, render_lines, Document, Element, LineOptions, Rgb};

fn row(doc: &mut Document, ul: tuidom::ElementId, depth: usize, label: &str, style: &str) {
    let li = doc.create(Element::new("li").class("list-group-item").attr("style", style));
    doc.append_child(ul, li);
    for _ in 0..depth {
        let indent = doc.create(Element::new("span").class("indent"));
        doc.append_child(li, indent);
    }
    let icon = doc.create(Element::new("span").class("icon expand-icon glyphicon-plus"));
    doc.append_child(li, icon);
    doc.append_text(li, label);
}

fn setup() -> (Document, tuidom::ElementId) {
    let mut doc = Document::new();
    let ul = doc.create(Element::new("ul").class("list-group"));
    let root = doc.root();
    doc.append_child(root, ul);
    row(&mut doc, ul, 0, "Parent 1", "color:#FFFFFF;background-color:#428bca;");
    row(&mut doc, ul, 1, "Child 1", "");
    (doc, ul)
}

#[test]
fn test_render_lines_uses_glyphs_and_text() {
    let (doc, ul) = setup();
    let options = LineOptions::new()
        .glyph("indent", "  ")
        .glyph("glyphicon-plus", "+ ")
        .glyph("icon", "");
    let lines = render_lines(&doc, ul, &options);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].text, "+ Parent 1");
    assert_eq!(lines[1].text, "  + Child 1");
    assert!(lines[0].has_class("list-group-item"));
}

#[test]
fn test_render_lines_reads_inline_colors() {
    let (doc, ul) = setup();
    let lines = render_lines(&doc, ul, &LineOptions::new());
    assert_eq!(lines[0].fg, Some(Rgb::new(255, 255, 255)));
    assert_eq!(lines[0].bg, Some(Rgb::new(0x42, 0x8b, 0xca)));
    assert_eq!(lines[1].fg, None);
    assert!(lines[0].to_ansi().contains("Parent 1"));
    assert_eq!(lines[1].to_ansi(), lines[1].text);
}

#[test]
fn test_render_lines_fixed_width() {
    let (doc, ul) = setup();
    let lines = render_lines(&doc, ul, &LineOptions::new().width(4));
    assert_eq!(lines[0].text, "Par…");
    assert_eq!(lines[1].text, "Chi…");
}

#[test]
fn test_element_at_line_inverts_render() {
    let (doc, ul) = setup();
    let lines = render_lines(&doc, ul, &LineOptions::new());
    for (i, line) in lines.iter().enumerate() {
        assert_eq!(element_at_line(&doc, ul, i), Some(line.element));
    }
    assert_eq!(element_at_line(&doc, ul, 2), None);
}

#[test]
fn test_closest_with_class_walks_up() {
    let (doc, ul) = setup();
    let li = doc.children(ul)[1];
    let icon = doc.query_class(li, "expand-icon")[0];
    assert_eq!(closest_with_class(&doc, icon, "list-group-item"), Some(li));
    assert_eq!(closest_with_class(&doc, icon, "expand-icon"), Some(icon));
    assert_eq!(closest_with_class(&doc, icon, "missing"), None);
    assert_eq!(tuidom::hit::find_in(&doc, li, "expand-icon"), Some(icon));
}
