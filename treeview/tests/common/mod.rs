#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use treeview::prelude::*;
use tuidom::LineOptions;

/// Parent 1 [Child 1 [Grandchild 1, Grandchild 2], Child 2], Parent 2..5
///
/// Ids: P1=0, C1=1, G1=2, G2=3, C2=4, P2=5, P3=6, P4=7, P5=8.
pub fn sample() -> Vec<NodeSpec> {
    let mut roots = vec![
        NodeSpec::new("Parent 1")
            .child(
                NodeSpec::new("Child 1")
                    .child(NodeSpec::new("Grandchild 1"))
                    .child(NodeSpec::new("Grandchild 2")),
            )
            .child(NodeSpec::new("Child 2")),
    ];
    roots.extend((2..=5).map(|i| NodeSpec::new(format!("Parent {i}"))));
    roots
}

pub const SAMPLE_JSON: &str = r#"[
    {
        "text": "Parent 1",
        "nodes": [
            {
                "text": "Child 1",
                "nodes": [{"text": "Grandchild 1"}, {"text": "Grandchild 2"}]
            },
            {"text": "Child 2"}
        ]
    },
    {"text": "Parent 2"},
    {"text": "Parent 3"},
    {"text": "Parent 4"},
    {"text": "Parent 5"}
]"#;

pub fn tree(levels: usize) -> TreeView {
    TreeView::new(sample(), TreeOptions::new().levels(levels)).unwrap()
}

pub fn tree_with(options: TreeOptions) -> TreeView {
    TreeView::new(sample(), options).unwrap()
}

pub type Recorded = Rc<RefCell<Vec<TreeEvent>>>;

/// Record every event emitted from now on.
pub fn record(tree: &mut TreeView) -> Recorded {
    let events: Recorded = Rc::default();
    let sink = events.clone();
    tree.subscribe_all(move |e| sink.borrow_mut().push(e.clone()));
    events
}

/// Kinds of the recorded events, dropping render bookkeeping.
pub fn kinds(events: &Recorded) -> Vec<(EventKind, Option<usize>)> {
    events
        .borrow()
        .iter()
        .filter(|e| !matches!(e.kind(), EventKind::Rendered | EventKind::NodeRendered))
        .map(|e| (e.kind(), e.node().map(|n| n.id.0)))
        .collect()
}

/// Text of every rendered row, top to bottom.
pub fn rows(tree: &TreeView) -> Vec<String> {
    tree.lines(&LineOptions::new())
        .into_iter()
        .map(|line| line.text)
        .collect()
}

pub fn ids(nodes: Vec<&Node>) -> Vec<usize> {
    nodes.into_iter().map(|n| n.id.0).collect()
}
