//! Editor session
//!
//! Adapts presentation events (context menu, add-child dialog, menu actions)
//! and renderer notifications onto the command dispatcher. The selected node
//! is remembered here and handed to the dispatcher explicitly.

use tracing::{debug, instrument};

use crate::application::services::{Command, CommandDispatcher, Workspace};
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{DomainError, Identity, Offset, Position, Snapshot, TreeStore};

/// Context menu opened on a node.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextMenu {
    pub node: Identity,
    /// Screen position the menu is anchored at.
    pub anchor: Position,
    /// Paste is only offered while something is staged.
    pub paste_enabled: bool,
}

/// Node change reported by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeChange {
    Position { id: Identity, position: Position },
}

/// Edge change reported by the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeChange {
    Remove { id: Identity },
}

/// One editing session over a single tree.
pub struct EditorSession {
    workspace: Workspace,
    dispatcher: CommandDispatcher,
    selected: Option<Identity>,
    menu: Option<ContextMenu>,
}

impl EditorSession {
    /// Session with UUID identities and the same relocation for new and pasted nodes.
    pub fn new(store: TreeStore, relocation: Offset) -> Self {
        Self::with_workspace(
            Workspace::new(store, relocation),
            CommandDispatcher::new(relocation),
        )
    }

    pub fn with_workspace(workspace: Workspace, dispatcher: CommandDispatcher) -> Self {
        Self {
            workspace,
            dispatcher,
            selected: None,
            menu: None,
        }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn selected(&self) -> Option<&Identity> {
        self.selected.as_ref()
    }

    pub fn menu(&self) -> Option<&ContextMenu> {
        self.menu.as_ref()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.workspace.store().snapshot()
    }

    /// Right-click on a node: select it and open the menu.
    #[instrument(level = "debug", skip(self))]
    pub fn context_menu_requested(
        &mut self,
        node_id: &Identity,
        screen_position: Position,
    ) -> ApplicationResult<ContextMenu> {
        if !self.workspace.store().contains_node(node_id) {
            return Err(DomainError::NotFound(node_id.clone()).into());
        }
        let menu = ContextMenu {
            node: node_id.clone(),
            anchor: screen_position,
            paste_enabled: !self.workspace.clipboard().is_empty(),
        };
        self.selected = Some(node_id.clone());
        self.menu = Some(menu.clone());
        Ok(menu)
    }

    pub fn close_menu(&mut self) {
        self.menu = None;
    }

    pub fn add_child_confirmed(&mut self, label: &str) -> ApplicationResult<Snapshot> {
        self.run(Command::AddChild {
            label: label.to_string(),
        })
    }

    /// Cancelling the dialog issues no command.
    pub fn add_child_dismissed(&mut self) {
        debug!("add-child dialog dismissed");
        self.close_menu();
    }

    pub fn cut_requested(&mut self) -> ApplicationResult<Snapshot> {
        self.run(Command::Cut)
    }

    pub fn copy_requested(&mut self) -> ApplicationResult<Snapshot> {
        self.run(Command::Copy)
    }

    pub fn paste_requested(&mut self) -> ApplicationResult<Snapshot> {
        self.run(Command::Paste)
    }

    pub fn delete_requested(&mut self) -> ApplicationResult<Snapshot> {
        self.run(Command::Delete)
    }

    /// Fold renderer position changes into the store. No structural checks
    /// apply; the batch is rejected as a whole if it names an unknown node.
    #[instrument(level = "trace", skip_all)]
    pub fn apply_node_changes(
        &mut self,
        changes: impl IntoIterator<Item = NodeChange>,
    ) -> ApplicationResult<Snapshot> {
        let mut staged = self.workspace.store().clone();
        for change in changes {
            match change {
                NodeChange::Position { id, position } => staged.set_position(&id, position)?,
            }
        }
        *self.workspace.store_mut() = staged;
        Ok(self.snapshot())
    }

    /// Fold renderer edge changes into the store verbatim.
    #[instrument(level = "trace", skip_all)]
    pub fn apply_edge_changes(
        &mut self,
        changes: impl IntoIterator<Item = EdgeChange>,
    ) -> ApplicationResult<Snapshot> {
        let mut staged = self.workspace.store().clone();
        for change in changes {
            match change {
                EdgeChange::Remove { id } => {
                    staged.remove_edge(&id)?;
                }
            }
        }
        *self.workspace.store_mut() = staged;
        Ok(self.snapshot())
    }

    fn run(&mut self, command: Command) -> ApplicationResult<Snapshot> {
        let selected = self.selected.clone().ok_or(ApplicationError::NoSelection)?;
        self.close_menu();
        self.dispatcher
            .dispatch(&mut self.workspace, &selected, command)
    }
}
