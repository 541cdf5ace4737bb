//! End-to-end editing scenarios driven through the editor session.

use acctree::application::{
    ApplicationError, CommandDispatcher, EdgeChange, EditorSession, NodeChange, Workspace,
};
use acctree::domain::{
    ClipboardOperation, DomainError, Edge, Identity, IdentityGenerator, Node, Offset, Position,
    TreeStore,
};
use acctree::util::testing;

/// Deterministic identities: `n1`, `n2`, ...
struct Sequential(usize);

impl IdentityGenerator for Sequential {
    fn next_id(&mut self) -> Identity {
        self.0 += 1;
        Identity::new(format!("n{}", self.0))
    }
}

// root
// └── a
//     └── b
fn chain() -> TreeStore {
    TreeStore::from_parts(
        vec![
            Node::new("root", Position::new(1000.0, 0.0), "Root"),
            Node::new("a", Position::new(750.0, 120.0), "A"),
            Node::new("b", Position::new(500.0, 240.0), "B"),
        ],
        vec![Edge::new("root-a", "root", "a"), Edge::new("a-b", "a", "b")],
    )
    .unwrap()
}

fn session(store: TreeStore) -> EditorSession {
    testing::init_test_setup();
    EditorSession::with_workspace(
        Workspace::with_ids(store, Offset::RELOCATION, Box::new(Sequential(0))),
        CommandDispatcher::new(Offset::RELOCATION),
    )
}

fn select(session: &mut EditorSession, id: &str) {
    session
        .context_menu_requested(&id.into(), Position::default())
        .unwrap();
}

fn label_of<'a>(store: &'a TreeStore, id: &Identity) -> &'a str {
    store.node(id).map(|n| n.label.as_str()).unwrap()
}

#[test]
fn given_chain_when_copying_a_and_pasting_on_root_then_root_gets_second_branch() {
    let mut session = session(chain());

    select(&mut session, "a");
    session.copy_requested().unwrap();
    select(&mut session, "root");
    let snapshot = session.paste_requested().unwrap();

    assert_eq!(snapshot.nodes.len(), 5);
    assert_eq!(snapshot.edges.len(), 4);

    let store = session.workspace().store();
    let children = store.children_of(&"root".into());
    assert_eq!(children.len(), 2);

    let pasted_a = children
        .into_iter()
        .find(|id| id.as_str() != "a")
        .cloned()
        .unwrap();
    assert_eq!(label_of(store, &pasted_a), "A");
    assert_eq!(
        store.node(&pasted_a).unwrap().position,
        Position::new(750.0, 120.0)
    );

    let grandchildren = store.children_of(&pasted_a);
    assert_eq!(grandchildren.len(), 1);
    let pasted_b = grandchildren[0].clone();
    assert_eq!(label_of(store, &pasted_b), "B");
    // relative layout of the subtree is preserved
    assert_eq!(
        store.node(&pasted_b).unwrap().position,
        Position::new(500.0, 240.0)
    );
    assert!(store.check_invariants().is_ok());
}

#[test]
fn given_node_with_children_when_cutting_then_fails_and_nothing_changes() {
    let mut session = session(chain());
    let before = session.snapshot();

    select(&mut session, "a");
    let result = session.cut_requested();

    assert_eq!(
        result,
        Err(ApplicationError::Domain(DomainError::NodeHasChildren(
            "a".into()
        )))
    );
    assert_eq!(session.snapshot(), before);
    assert!(session.workspace().clipboard().is_empty());
}

#[test]
fn given_leaf_when_cutting_then_exactly_one_node_and_its_edge_disappear() {
    let mut session = session(chain());

    select(&mut session, "b");
    let snapshot = session.cut_requested().unwrap();

    assert_eq!(snapshot.nodes.len(), 2);
    assert_eq!(snapshot.edges.len(), 1);
    let payload = session.workspace().clipboard().payload().unwrap();
    assert_eq!(payload.operation, ClipboardOperation::Cut);
    assert_eq!(payload.subtree.nodes.len(), 1);
    assert_eq!(payload.subtree.nodes[0].label, "B");
}

#[test]
fn given_cut_leaf_when_pasting_elsewhere_then_it_moves_with_new_identity() {
    let mut session = session(chain());

    select(&mut session, "b");
    session.cut_requested().unwrap();
    select(&mut session, "root");
    session.paste_requested().unwrap();

    let store = session.workspace().store();
    assert!(!store.contains_node(&"b".into()));
    let labels: Vec<&str> = store
        .children_of(&"root".into())
        .into_iter()
        .map(|id| label_of(store, id))
        .collect();
    assert_eq!(labels, vec!["A", "B"]);
}

#[test]
fn given_add_child_confirmed_when_applied_then_count_grows_by_one_below_left_of_parent() {
    let mut session = session(chain());
    let before = session.snapshot().nodes.len();

    select(&mut session, "b");
    let snapshot = session.add_child_confirmed("Petty cash").unwrap();

    assert_eq!(snapshot.nodes.len(), before + 1);
    let store = session.workspace().store();
    let child = store.children_of(&"b".into())[0].clone();
    let node = store.node(&child).unwrap();
    assert_eq!(node.label, "Petty cash");
    assert_eq!(node.position, Position::new(250.0, 360.0));
    assert!(session.menu().is_none());
}

#[test]
fn given_add_child_dismissed_when_applied_then_tree_is_unchanged() {
    let mut session = session(chain());
    let before = session.snapshot();

    select(&mut session, "a");
    session.add_child_dismissed();

    assert_eq!(session.snapshot(), before);
    assert!(session.menu().is_none());
}

#[test]
fn given_paste_when_succeeded_then_clipboard_is_empty_even_for_copy() {
    // a copied payload is single use
    let mut session = session(chain());

    select(&mut session, "b");
    session.copy_requested().unwrap();
    select(&mut session, "root");
    session.paste_requested().unwrap();

    assert!(session.workspace().clipboard().is_empty());
    let menu = session
        .context_menu_requested(&"a".into(), Position::default())
        .unwrap();
    assert!(!menu.paste_enabled);
    assert_eq!(
        session.paste_requested(),
        Err(ApplicationError::Domain(DomainError::EmptyClipboard))
    );
}

#[test]
fn given_root_when_deleting_then_fails_with_root_not_removable() {
    let store = TreeStore::from_parts(
        vec![Node::new("root", Position::default(), "Root")],
        vec![],
    )
    .unwrap();
    let mut session = session(store);

    select(&mut session, "root");
    assert_eq!(
        session.delete_requested(),
        Err(ApplicationError::Domain(DomainError::RootNotRemovable(
            "root".into()
        )))
    );
    assert_eq!(session.workspace().store().len(), 1);
}

#[test]
fn given_mixed_command_sequence_when_applied_then_single_parent_invariant_holds() {
    let mut session = session(chain());

    select(&mut session, "a");
    session.add_child_confirmed("C").unwrap();
    session.copy_requested().unwrap();
    select(&mut session, "b");
    session.paste_requested().unwrap();
    select(&mut session, "root");
    session.add_child_confirmed("D").unwrap();

    // failures in between must not leave partial state
    select(&mut session, "a");
    assert!(session.cut_requested().is_err());
    assert!(session.delete_requested().is_err());
    assert!(session.paste_requested().is_err());

    let store = session.workspace().store();
    assert!(store.check_invariants().is_ok());
    for node in store.nodes() {
        let parents = store
            .edges()
            .iter()
            .filter(|e| e.target == node.id)
            .count();
        let expected = if store.is_root(&node.id) { 0 } else { 1 };
        assert_eq!(parents, expected, "node {} has {} parents", node.id, parents);
    }
}

#[test]
fn given_renderer_drag_when_applied_then_only_position_changes() {
    let mut session = session(chain());

    session
        .apply_node_changes([NodeChange::Position {
            id: "b".into(),
            position: Position::new(1.0, 2.0),
        }])
        .unwrap();

    let store = session.workspace().store();
    assert_eq!(store.node(&"b".into()).unwrap().position, Position::new(1.0, 2.0));
    assert_eq!(store.edges().len(), 2);
}

#[test]
fn given_batch_with_unknown_edge_when_applied_then_whole_batch_is_rejected() {
    let mut session = session(chain());
    let before = session.snapshot();

    let result = session.apply_edge_changes([
        EdgeChange::Remove { id: "a-b".into() },
        EdgeChange::Remove { id: "ghost".into() },
    ]);

    assert_eq!(
        result,
        Err(ApplicationError::Domain(DomainError::NotFound("ghost".into())))
    );
    assert_eq!(session.snapshot(), before);
}

#[test]
fn given_chain_when_copying_b_and_pasting_on_a_then_a_has_two_b_children_and_b_is_untouched() {
    let mut session = session(chain());
    let original_b = session.workspace().store().node(&"b".into()).cloned().unwrap();

    select(&mut session, "b");
    session.copy_requested().unwrap();
    select(&mut session, "a");
    session.paste_requested().unwrap();

    let store = session.workspace().store();
    let labels: Vec<&str> = store
        .children_of(&"a".into())
        .into_iter()
        .map(|id| label_of(store, id))
        .collect();
    assert_eq!(labels, vec!["B", "B"]);
    assert_eq!(store.node(&"b".into()), Some(&original_b));
    assert!(session.workspace().clipboard().is_empty());
}

#[test]
fn given_leaf_detached_by_renderer_when_deleting_then_it_is_removed() {
    let mut session = session(chain());

    session
        .apply_edge_changes([EdgeChange::Remove { id: "a-b".into() }])
        .unwrap();
    select(&mut session, "b");
    let snapshot = session.delete_requested().unwrap();

    assert_eq!(snapshot.nodes.len(), 2);
    assert!(!session.workspace().store().contains_node(&"b".into()));
    assert!(session.workspace().store().is_root(&"root".into()));
}

#[test]
fn given_leaf_detached_by_renderer_when_cutting_then_it_is_staged() {
    let mut session = session(chain());

    session
        .apply_edge_changes([EdgeChange::Remove { id: "a-b".into() }])
        .unwrap();
    select(&mut session, "b");
    session.cut_requested().unwrap();

    assert!(!session.workspace().store().contains_node(&"b".into()));
    let payload = session.workspace().clipboard().payload().unwrap();
    assert_eq!(payload.subtree.nodes[0].label, "B");
}
