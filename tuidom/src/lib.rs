pub mod element;
pub mod hit;
pub mod render;
pub mod text;
pub mod types;

pub use element::{find_element, Document, Element, ElementId};
pub use hit::{closest, closest_with_class, element_at_line};
pub use render::{render_lines, Line, LineOptions};
pub use types::*;
