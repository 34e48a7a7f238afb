mod color;
mod style;

pub use color::{ParseColorError, Rgb};
pub use style::InlineStyle;
