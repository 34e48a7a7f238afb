//! Hierarchical tree view with per-node state and incremental rendering.
//!
//! A [`TreeView`] loads a nested node definition, tracks expanded, selected,
//! checked, disabled and search state per node, and keeps a flat list of
//! rows on a [`Surface`] in step with that state.

pub mod commands;
pub(crate) mod defaults;
pub mod error;
pub mod events;
pub mod index;
pub mod interaction;
mod menu;
pub mod node;
pub mod options;
pub mod render;
pub mod search;
pub mod style;
pub mod surface;
mod transitions;
pub mod view;

pub use error::{Result, TreeError};
pub use view::{TreeId, TreeView, TreeViewBuilder};

pub mod prelude {
    pub use crate::commands::{Command, Outcome};
    pub use crate::error::{Result, TreeError};
    pub use crate::events::{EventKind, SubscriptionId, TreeEvent};
    pub use crate::index::{Targets, TreeIndex};
    pub use crate::interaction::{ClickPart, ClickTarget, Interaction};
    pub use crate::node::{Node, NodeId, NodeSnapshot, NodeSpec, NodeState};
    pub use crate::options::{
        ChangeOptions, MenuAction, MenuItem, SearchOptions, TreeData, TreeOptions,
    };
    pub use crate::render::terminal_glyphs;
    pub use crate::search::{NodeField, StateField};
    pub use crate::style::{BootstrapStyle, StyleBuilder};
    pub use crate::surface::{Surface, Template};
    pub use crate::view::{TreeId, TreeView, TreeViewBuilder};
}
