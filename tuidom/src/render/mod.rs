//! Flatten a list container into terminal lines.
//!
//! Each element child of the container becomes one [`Line`]. Text nodes are
//! emitted verbatim; empty elements (icons, spacers) contribute the glyph
//! registered for the first of their classes found in [`LineOptions`].

use crossterm::style::Stylize;

use crate::element::{Document, ElementId};
use crate::text::fit_to_width;
use crate::types::{InlineStyle, Rgb};

#[derive(Debug, Clone, Default)]
pub struct LineOptions {
    glyphs: Vec<(String, String)>,
    width: Option<usize>,
}

impl LineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render elements carrying `class` as `glyph`. Earlier registrations win.
    pub fn glyph(mut self, class: impl Into<String>, glyph: impl Into<String>) -> Self {
        self.glyphs.push((class.into(), glyph.into()));
        self
    }

    /// Pad or truncate every line to `width` columns.
    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    fn glyph_for(&self, doc: &Document, el: ElementId) -> Option<&str> {
        self.glyphs
            .iter()
            .find(|(class, _)| doc.has_class(el, class))
            .map(|(_, glyph)| glyph.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub element: ElementId,
    pub text: String,
    pub classes: Vec<String>,
    pub fg: Option<Rgb>,
    pub bg: Option<Rgb>,
}

impl Line {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// The line with its inline colours applied as ANSI escapes.
    pub fn to_ansi(&self) -> String {
        let mut styled = self.text.clone().stylize();
        if let Some(fg) = self.fg {
            styled = styled.with(fg.into());
        }
        if let Some(bg) = self.bg {
            styled = styled.on(bg.into());
        }
        styled.to_string()
    }
}

pub fn render_lines(doc: &Document, container: ElementId, options: &LineOptions) -> Vec<Line> {
    let mut lines = Vec::new();
    for &row in doc.children(container) {
        let Some(element) = doc.get(row) else {
            continue;
        };
        if element.is_text() {
            continue;
        }

        let mut text = String::new();
        render_inline(doc, row, options, &mut text);
        if let Some(width) = options.width {
            text = fit_to_width(&text, width);
        }

        let style = InlineStyle::parse(element.attribute("style").unwrap_or_default());
        lines.push(Line {
            element: row,
            text,
            classes: element.classes.clone(),
            fg: style.foreground(),
            bg: style.background(),
        });
    }
    log::trace!("tuidom: rendered {} lines", lines.len());
    lines
}

fn render_inline(doc: &Document, el: ElementId, options: &LineOptions, out: &mut String) {
    let Some(element) = doc.get(el) else {
        return;
    };
    if let Some(text) = &element.text {
        out.push_str(text);
        return;
    }
    if let Some(glyph) = options.glyph_for(doc, el) {
        out.push_str(glyph);
    }
    for &child in element.children() {
        render_inline(doc, child, options, out);
    }
}
