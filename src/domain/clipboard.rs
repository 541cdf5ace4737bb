//! Single-slot subtree clipboard: cut, copy, and paste.

use std::fmt;

use tracing::{debug, info, instrument};

use crate::domain::cloner::clone_subtree;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::identity::IdentityGenerator;
use crate::domain::{Edge, Identity, Node, Offset, Subtree, TreeStore};

/// Which command staged the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardOperation {
    Cut,
    Copy,
}

impl fmt::Display for ClipboardOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipboardOperation::Cut => f.write_str("cut"),
            ClipboardOperation::Copy => f.write_str("copy"),
        }
    }
}

/// A cloned subtree waiting to be pasted.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipboardPayload {
    pub operation: ClipboardOperation,
    /// Already materialized with fresh identities, root first.
    pub subtree: Subtree,
    /// Node the subtree was cloned from.
    pub origin: Identity,
}

/// Holds at most one payload.
///
/// A new cut or copy replaces whatever was staged. A successful paste
/// consumes the payload, whether it came from a cut or a copy.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipboardManager {
    payload: Option<ClipboardPayload>,
    relocation: Offset,
}

impl Default for ClipboardManager {
    fn default() -> Self {
        Self::new(Offset::RELOCATION)
    }
}

impl ClipboardManager {
    /// `relocation` is added on top of the target's position when pasting.
    pub fn new(relocation: Offset) -> Self {
        Self {
            payload: None,
            relocation,
        }
    }

    pub fn payload(&self) -> Option<&ClipboardPayload> {
        self.payload.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_none()
    }

    fn clear(&mut self) {
        self.payload = None;
    }

    /// Stage a clone of the subtree under `node_id`. The live tree is untouched.
    #[instrument(level = "debug", skip(self, store, ids))]
    pub fn copy(
        &mut self,
        store: &TreeStore,
        node_id: &Identity,
        ids: &mut dyn IdentityGenerator,
    ) -> DomainResult<()> {
        let subtree = clone_subtree(node_id, store.nodes(), store.edges(), ids)?;
        info!("copied {} ({} nodes)", node_id, subtree.nodes.len());
        self.payload = Some(ClipboardPayload {
            operation: ClipboardOperation::Copy,
            subtree,
            origin: node_id.clone(),
        });
        Ok(())
    }

    /// Stage a clone of leaf `node_id`, then remove it from the live tree.
    #[instrument(level = "debug", skip(self, store, ids))]
    pub fn cut(
        &mut self,
        store: &mut TreeStore,
        node_id: &Identity,
        ids: &mut dyn IdentityGenerator,
    ) -> DomainResult<()> {
        let subtree = clone_subtree(node_id, store.nodes(), store.edges(), ids)?;
        let removed = store.remove_leaf(node_id)?;
        info!("cut {} '{}'", removed.id, removed.label);
        self.payload = Some(ClipboardPayload {
            operation: ClipboardOperation::Cut,
            subtree,
            origin: node_id.clone(),
        });
        Ok(())
    }

    /// Attach the staged subtree under `target_id` and clear the clipboard.
    ///
    /// The whole subtree is shifted by one vector so its root lands at the
    /// target's position plus the relocation offset. Returns the id of the
    /// pasted root.
    #[instrument(level = "debug", skip(self, store, ids))]
    pub fn paste(
        &mut self,
        store: &mut TreeStore,
        target_id: &Identity,
        ids: &mut dyn IdentityGenerator,
    ) -> DomainResult<Identity> {
        let payload = self.payload.as_ref().ok_or(DomainError::EmptyClipboard)?;
        let root = payload.subtree.root().ok_or(DomainError::EmptyClipboard)?;
        let target = store
            .node(target_id)
            .ok_or_else(|| DomainError::NotFound(target_id.clone()))?;

        let shift = (target.position - root.position) + self.relocation;
        debug!("paste shift ({}, {})", shift.dx, shift.dy);

        let mut staged = store.clone();
        for node in &payload.subtree.nodes {
            staged.insert_node(Node {
                position: node.position.translate(shift),
                ..node.clone()
            })?;
        }
        for edge in &payload.subtree.edges {
            staged.insert_edge(edge.clone())?;
        }
        let root_id = root.id.clone();
        staged.insert_edge(Edge::new(ids.next_id(), target_id.clone(), root_id.clone()))?;

        info!(
            "pasted {} {} under {} as {}",
            payload.operation, payload.origin, target_id, root_id
        );
        *store = staged;
        self.clear();
        Ok(root_id)
    }
}
