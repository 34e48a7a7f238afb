mod common;

use treeview::prelude::*;

use common::{ids, tree};

fn node_ids(outcome: &Outcome) -> Vec<usize> {
    match outcome {
        Outcome::Nodes(nodes) => nodes.iter().map(|n| n.id.0).collect(),
        Outcome::Node(node) => node.iter().map(|n| n.id.0).collect(),
        Outcome::Done => Vec::new(),
    }
}

#[test]
fn test_invoke_state_change() {
    let mut tree = tree(1);
    let outcome = tree
        .invoke(r#"{"method": "expandNode", "args": {"nodes": 0}}"#)
        .unwrap();
    assert_eq!(outcome, Some(Outcome::Done));
    assert_eq!(tree.row_count(), 7);

    tree.invoke(r#"{"method": "checkNode", "args": {"nodes": [1, 4], "options": {"silent": true}}}"#)
        .unwrap();
    assert_eq!(ids(tree.get_checked()), vec![1, 4]);
}

#[test]
fn test_invoke_getters() {
    let mut tree = tree(2);
    tree.select_node(4, ChangeOptions::new());

    let selected = tree.invoke(r#"{"method": "getSelected"}"#).unwrap().unwrap();
    assert_eq!(node_ids(&selected), vec![4]);

    let parent = tree
        .invoke(r#"{"method": "getParent", "args": {"node": 4}}"#)
        .unwrap()
        .unwrap();
    assert_eq!(node_ids(&parent), vec![0]);

    let siblings = tree
        .invoke(r#"{"method": "getSiblings", "args": {"node": 4}}"#)
        .unwrap()
        .unwrap();
    assert_eq!(node_ids(&siblings), vec![1]);

    let missing = tree
        .invoke(r#"{"method": "getNode", "args": {"node": 40}}"#)
        .unwrap();
    assert_eq!(missing, Some(Outcome::Node(None)));
}

#[test]
fn test_invoke_bulk_and_search() {
    let mut tree = tree(1);
    tree.invoke(r#"{"method": "expandAll", "args": {}}"#).unwrap();
    assert_eq!(tree.row_count(), 9);

    let found = tree
        .invoke(r#"{"method": "search", "args": {"pattern": "grand", "options": {"revealResults": false}}}"#)
        .unwrap()
        .unwrap();
    assert_eq!(node_ids(&found), vec![2, 3]);

    tree.invoke(r#"{"method": "clearSearch", "args": {}}"#).unwrap();
    assert!(tree.get_search_results().is_empty());

    let found = tree
        .invoke(r#"{"method": "findNodes", "args": {"pattern": "^1$", "field": "level"}}"#)
        .unwrap()
        .unwrap();
    assert_eq!(node_ids(&found), vec![0, 5, 6, 7, 8]);
}

#[test]
fn test_unknown_method_is_ignored() {
    let mut tree = tree(2);
    assert_eq!(tree.invoke(r#"{"method": "explode", "args": {}}"#).unwrap(), None);
    assert_eq!(tree.invoke(r#"{"args": {}}"#).unwrap(), None);
    assert_eq!(tree.row_count(), 7);
}

#[test]
fn test_malformed_commands() {
    let mut tree = tree(2);
    assert!(matches!(tree.invoke("{"), Err(TreeError::Parse(_))));
    assert!(matches!(
        tree.invoke(r#"{"method": "selectNode", "args": {}}"#),
        Err(TreeError::Parse(_))
    ));
    assert!(matches!(
        tree.invoke(r#"{"method": "findNodes", "args": {"pattern": "x", "field": "bogus"}}"#),
        Err(TreeError::Parse(_))
    ));
    assert!(tree.get_selected().is_empty());
}

#[test]
fn test_execute_typed_command() {
    let mut tree = tree(2);
    let command = Command::ToggleNodeDisabled {
        nodes: Targets::from([5usize, 6]),
        options: ChangeOptions::new(),
    };
    assert_eq!(tree.execute(command).unwrap(), Outcome::Done);
    assert_eq!(ids(tree.get_disabled()), vec![5, 6]);

    let err = tree
        .execute(Command::FindNodes {
            pattern: "[".into(),
            field: NodeField::Text,
            ignore_case: false,
        })
        .unwrap_err();
    assert!(matches!(err, TreeError::InvalidPattern { .. }));
}

#[test]
fn test_every_method_name_parses() {
    for method in Command::METHODS {
        let json = format!(r#"{{"method": "{method}", "args": {{"node": 0, "nodes": 0, "pattern": "x"}}}}"#);
        let parsed: serde_json::Result<Command> = serde_json::from_str(&json);
        let unit: serde_json::Result<Command> = serde_json::from_str(&format!(r#"{{"method": "{method}"}}"#));
        assert!(parsed.is_ok() || unit.is_ok(), "{method} did not parse");
    }
}

#[test]
fn test_outcome_serializes_as_nodes() {
    let mut tree = tree(2);
    tree.check_node(6, ChangeOptions::new());
    let outcome = tree.execute(Command::GetChecked).unwrap();
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json[0]["text"], "Parent 3");
    assert_eq!(json[0]["state"]["checked"], true);
    assert_eq!(serde_json::to_value(Outcome::Done).unwrap(), serde_json::Value::Null);
}
