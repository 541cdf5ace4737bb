//! Command dispatcher
//!
//! Routes discrete editing commands, addressed at an explicitly passed node,
//! onto the tree store and the clipboard.

use std::fmt;

use tracing::{debug, info, instrument};

use crate::application::ApplicationResult;
use crate::domain::{
    ClipboardManager, DomainError, DomainResult, Edge, Identity, IdentityGenerator, Node, Offset,
    Snapshot, TreeStore, UuidGenerator,
};

/// A user command issued from the context menu or the add-child dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddChild { label: String },
    Delete,
    Cut,
    Copy,
    Paste,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::AddChild { label } => write!(f, "add-child '{}'", label),
            Command::Delete => f.write_str("delete"),
            Command::Cut => f.write_str("cut"),
            Command::Copy => f.write_str("copy"),
            Command::Paste => f.write_str("paste"),
        }
    }
}

/// Editing state the dispatcher operates on.
pub struct Workspace {
    store: TreeStore,
    clipboard: ClipboardManager,
    ids: Box<dyn IdentityGenerator>,
}

impl Workspace {
    /// Workspace with random UUID identities.
    pub fn new(store: TreeStore, relocation: Offset) -> Self {
        Self::with_ids(store, relocation, Box::new(UuidGenerator))
    }

    pub fn with_ids(
        store: TreeStore,
        relocation: Offset,
        ids: Box<dyn IdentityGenerator>,
    ) -> Self {
        Self {
            store,
            clipboard: ClipboardManager::new(relocation),
            ids,
        }
    }

    pub fn store(&self) -> &TreeStore {
        &self.store
    }

    pub fn clipboard(&self) -> &ClipboardManager {
        &self.clipboard
    }

    /// Direct store access for renderer notifications, which bypass validation.
    pub(crate) fn store_mut(&mut self) -> &mut TreeStore {
        &mut self.store
    }
}

/// Stateless router from `(command, selected node)` to store and clipboard calls.
#[derive(Debug, Clone, Copy)]
pub struct CommandDispatcher {
    relocation: Offset,
}

impl Default for CommandDispatcher {
    fn default() -> Self {
        Self::new(Offset::RELOCATION)
    }
}

impl CommandDispatcher {
    /// `relocation` places new children relative to their parent.
    pub fn new(relocation: Offset) -> Self {
        Self { relocation }
    }

    /// Apply `command` to `selected`. Returns the full snapshot on success;
    /// on failure the workspace is unchanged.
    #[instrument(level = "debug", skip(self, workspace))]
    pub fn dispatch(
        &self,
        workspace: &mut Workspace,
        selected: &Identity,
        command: Command,
    ) -> ApplicationResult<Snapshot> {
        debug!("dispatch {} on {}", command, selected);
        let Workspace {
            store,
            clipboard,
            ids,
        } = workspace;

        match command {
            Command::AddChild { label } => {
                self.add_child(store, ids.as_mut(), selected, label)?;
            }
            Command::Delete => {
                let removed = store.remove_leaf(selected)?;
                info!("deleted {} '{}'", removed.id, removed.label);
            }
            Command::Cut => clipboard.cut(store, selected, ids.as_mut())?,
            Command::Copy => clipboard.copy(store, selected, ids.as_mut())?,
            Command::Paste => {
                clipboard.paste(store, selected, ids.as_mut())?;
            }
        }
        Ok(store.snapshot())
    }

    fn add_child(
        &self,
        store: &mut TreeStore,
        ids: &mut dyn IdentityGenerator,
        parent_id: &Identity,
        label: String,
    ) -> DomainResult<Identity> {
        let parent = store
            .node(parent_id)
            .ok_or_else(|| DomainError::NotFound(parent_id.clone()))?;
        let node = Node::new(ids.next_id(), parent.position.translate(self.relocation), label);
        let edge = Edge::new(ids.next_id(), parent_id.clone(), node.id.clone());
        let child_id = node.id.clone();

        let mut staged = store.clone();
        staged.insert_node(node)?;
        staged.insert_edge(edge)?;
        *store = staged;

        info!("added {} under {}", child_id, parent_id);
        Ok(child_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ApplicationError;
    use crate::domain::Position;

    // root
    // └── a
    //     ├── x
    //     └── y
    fn workspace() -> Workspace {
        let store = TreeStore::from_parts(
            vec![
                Node::new("root", Position::new(0.0, 0.0), "Root"),
                Node::new("a", Position::new(-250.0, 120.0), "A"),
                Node::new("x", Position::new(-500.0, 240.0), "X"),
                Node::new("y", Position::new(-500.0, 300.0), "Y"),
            ],
            vec![
                Edge::new("root-a", "root", "a"),
                Edge::new("a-x", "a", "x"),
                Edge::new("a-y", "a", "y"),
            ],
        )
        .unwrap();
        Workspace::new(store, Offset::RELOCATION)
    }

    #[test]
    fn given_root_when_adding_child_then_one_node_and_one_edge_are_added() {
        let mut ws = workspace();
        let dispatcher = CommandDispatcher::default();

        let snapshot = dispatcher
            .dispatch(
                &mut ws,
                &"root".into(),
                Command::AddChild {
                    label: "New".to_string(),
                },
            )
            .unwrap();

        assert_eq!(snapshot.nodes.len(), 5);
        assert_eq!(snapshot.edges.len(), 4);
        let added = snapshot.nodes.last().unwrap();
        assert_eq!(added.label, "New");
        assert_eq!(added.position, Position::new(-250.0, 120.0));
        assert_eq!(ws.store().parent_of(&added.id), Some(&"root".into()));
    }

    #[test]
    fn given_missing_parent_when_adding_child_then_fails_with_not_found() {
        let mut ws = workspace();
        let result = CommandDispatcher::default().dispatch(
            &mut ws,
            &"ghost".into(),
            Command::AddChild {
                label: "New".to_string(),
            },
        );
        assert_eq!(
            result,
            Err(ApplicationError::Domain(DomainError::NotFound("ghost".into())))
        );
        assert_eq!(ws.store().len(), 4);
    }

    #[test]
    fn given_inner_node_when_deleting_then_fails_with_node_has_children() {
        let mut ws = workspace();
        let result = CommandDispatcher::default().dispatch(&mut ws, &"a".into(), Command::Delete);
        assert_eq!(
            result,
            Err(ApplicationError::Domain(DomainError::NodeHasChildren("a".into())))
        );
        assert_eq!(ws.store().len(), 4);
    }

    #[test]
    fn given_leaf_when_deleting_then_node_and_incoming_edge_are_removed() {
        let mut ws = workspace();
        let snapshot = CommandDispatcher::default()
            .dispatch(&mut ws, &"x".into(), Command::Delete)
            .unwrap();
        assert_eq!(snapshot.nodes.len(), 3);
        assert_eq!(snapshot.edges.len(), 2);
        assert!(ws.store().check_invariants().is_ok());
    }

    #[test]
    fn given_copy_then_paste_when_dispatching_then_routes_through_clipboard() {
        let mut ws = workspace();
        let dispatcher = CommandDispatcher::default();
        dispatcher.dispatch(&mut ws, &"a".into(), Command::Copy).unwrap();
        assert!(!ws.clipboard().is_empty());

        let snapshot = dispatcher.dispatch(&mut ws, &"y".into(), Command::Paste).unwrap();

        assert_eq!(snapshot.nodes.len(), 7);
        assert!(ws.clipboard().is_empty());
    }
}
