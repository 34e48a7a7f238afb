//! Stylesheet generation.

use tuidom::Rgb;

use crate::index::TreeIndex;
use crate::options::TreeOptions;
use crate::view::TreeId;

/// Rules shared by every tree.
pub const BASE_CSS: &str = ".treeview .list-group-item{cursor:pointer}\
.treeview span.indent{margin-left:10px;margin-right:10px}\
.treeview span.icon{width:12px;margin-right:5px}\
.treeview .node-disabled{color:silver;cursor:not-allowed}";

/// Produces the stylesheet injected once per tree.
pub trait StyleBuilder {
    fn build(&self, tree: TreeId, options: &TreeOptions, index: &TreeIndex) -> String;
}

/// Bootstrap list-group look: tree colours, border, hover, selected and
/// search-result highlights, and per-node colour overrides.
#[derive(Debug, Clone, Copy, Default)]
pub struct BootstrapStyle;

impl StyleBuilder for BootstrapStyle {
    fn build(&self, tree: TreeId, options: &TreeOptions, index: &TreeIndex) -> String {
        let row = format!(".node-{tree}");
        let mut css = String::from(BASE_CSS);

        css.push_str(&row);
        css.push('{');
        if let Some(color) = valid(options.color.as_deref()) {
            css.push_str(&format!("color:{color};"));
        }
        if let Some(color) = valid(options.back_color.as_deref()) {
            css.push_str(&format!("background-color:{color};"));
        }
        if !options.show_border {
            css.push_str("border:none;");
        } else if let Some(color) = valid(options.border_color.as_deref()) {
            css.push_str(&format!("border:1px solid {color};"));
        }
        css.push('}');

        if let Some(color) = valid(options.onhover_color.as_deref()) {
            css.push_str(&format!(
                "{row}:not(.node-disabled):hover{{background-color:{color};}}"
            ));
        }

        if options.highlight_search_results {
            let inner = declarations(&options.search_result_color, &options.search_result_back_color);
            if !inner.is_empty() {
                css.push_str(&format!("{row}.search-result{{{inner}}}"));
                css.push_str(&format!("{row}.search-result:hover{{{inner}}}"));
            }
        }

        if options.highlight_selected {
            let inner = declarations(&options.selected_color, &options.selected_back_color);
            if !inner.is_empty() {
                css.push_str(&format!("{row}.node-selected{{{inner}}}"));
                css.push_str(&format!("{row}.node-selected:hover{{{inner}}}"));
            }
        }

        for node in index.iter() {
            let inner = declarations(&node.color, &node.back_color);
            if !inner.is_empty() {
                css.push_str(&format!("{row}[data-nodeid=\"{}\"]{{{inner}}}", node.id));
            }
        }
        css
    }
}

fn declarations(color: &Option<String>, back_color: &Option<String>) -> String {
    let mut inner = String::new();
    if let Some(color) = valid(color.as_deref()) {
        inner.push_str(&format!("color:{color};"));
    }
    if let Some(color) = valid(back_color.as_deref()) {
        inner.push_str(&format!("background-color:{color};"));
    }
    inner
}

/// The colour if it parses, logging and dropping it otherwise.
pub(crate) fn valid(color: Option<&str>) -> Option<&str> {
    let color = color?;
    match color.parse::<Rgb>() {
        Ok(_) => Some(color),
        Err(err) => {
            log::warn!("treeview: skipping colour, {err}");
            None
        }
    }
}
