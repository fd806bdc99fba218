//! Longer undo/redo sequences against the history log and mutation engine

use livedoc_editor::{
    apply_snapshot, commit_text_edit, DocumentTree, EditState, History, Node, NodeId, TreeBuilder,
};
use livedoc_parser::parse;

fn state(pairs: &[(&str, &str)]) -> EditState {
    pairs
        .iter()
        .map(|(id, value)| ((*id).into(), value.to_string()))
        .collect()
}

fn build(markup: &str) -> DocumentTree {
    let parsed = parse(markup).unwrap();
    TreeBuilder::new(1).build(parsed.root.as_ref())
}

fn text_values(tree: &DocumentTree) -> Vec<String> {
    tree.leaves()
        .into_iter()
        .filter_map(|node| match node {
            Node::Text(text) => Some(text.content.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_empty_snapshot_leaves_committed_text() {
    let tree = build("<p>Original</p>");
    let t1 = tree.leaves()[0].id().clone();

    let mut history = History::new(EditState::new());
    let committed = commit_text_edit(&tree, &EditState::new(), &t1, "Hello").unwrap();
    assert!(committed.changed);
    history.commit(committed.state.clone());

    assert_eq!(history.len(), 2);
    assert_eq!(history.cursor(), 1);

    let snapshot = history.undo().cloned().unwrap();
    assert!(snapshot.is_empty());

    // An empty snapshot rewrites nothing: the committed tree keeps "Hello",
    // while projecting the empty map over the parsed tree shows the original.
    let restored = apply_snapshot(&committed.tree, &snapshot);
    assert_eq!(text_values(&restored), vec!["Hello"]);
    assert_eq!(text_values(&apply_snapshot(&tree, &snapshot)), vec!["Original"]);
}

#[test]
fn test_reset_after_five_entries() {
    let mut history = History::new(state(&[]));
    for value in ["a", "b", "c", "d"] {
        history.commit(state(&[("t1", value)]));
    }
    assert_eq!(history.len(), 5);
    assert_eq!(history.cursor(), 4);

    history.reset(state(&[("t1", "fresh")]));
    assert_eq!(history.len(), 1);
    assert_eq!(history.cursor(), 0);
    assert!(history.undo().is_none());
    assert!(history.redo().is_none());
}

#[test]
fn test_interleaved_undo_redo_commit() {
    let mut history = History::new(state(&[("t1", "0")]));

    history.commit(state(&[("t1", "1")]));
    history.commit(state(&[("t1", "2")]));
    assert_eq!(history.undo(), Some(&state(&[("t1", "1")])));

    history.commit(state(&[("t1", "1b")]));
    history.commit(state(&[("t1", "1c")]));
    assert_eq!(history.len(), 4);

    assert_eq!(history.undo(), Some(&state(&[("t1", "1b")])));
    assert_eq!(history.undo(), Some(&state(&[("t1", "1")])));
    assert_eq!(history.undo(), Some(&state(&[("t1", "0")])));
    assert_eq!(history.undo(), None);

    assert_eq!(history.redo(), Some(&state(&[("t1", "1")])));
    assert_eq!(history.redo(), Some(&state(&[("t1", "1b")])));
    assert_eq!(history.redo(), Some(&state(&[("t1", "1c")])));
    assert_eq!(history.redo(), None);
}

#[test]
fn test_snapshots_rebuild_tree_across_many_leaves() {
    let tree = build("<ol><li>a</li><li>b</li><li>c</li><li>d</li></ol>");
    let ids: Vec<NodeId> = tree.leaves().iter().map(|node| node.id().clone()).collect();

    let mut history = History::new(EditState::from_tree(&tree));
    let mut current = tree.clone();
    let mut current_state = EditState::from_tree(&tree);

    for (index, id) in ids.iter().enumerate() {
        let committed =
            commit_text_edit(&current, &current_state, id, &format!("edit-{}", index)).unwrap();
        history.commit(committed.state.clone());
        current = committed.tree;
        current_state = committed.state;
    }
    assert_eq!(text_values(&current), vec!["edit-0", "edit-1", "edit-2", "edit-3"]);

    history.undo();
    history.undo();
    let snapshot = history.current().clone();
    let restored = apply_snapshot(&current, &snapshot);
    assert_eq!(text_values(&restored), vec!["edit-0", "edit-1", "c", "d"]);
}
