//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::Identity;

/// Domain errors represent violations of the tree or clipboard rules.
///
/// Every variant is terminal for the attempted command; the store and the
/// clipboard are left exactly as they were.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("not found: {0}")]
    NotFound(Identity),

    #[error("identity already in use: {0}")]
    DuplicateIdentity(Identity),

    #[error("edge {edge} references missing node: {missing}")]
    DanglingReference { edge: Identity, missing: Identity },

    #[error("edge {source_id} -> {target} would give a second parent or close a cycle")]
    CycleViolation { source_id: Identity, target: Identity },

    #[error("a node with children cannot be removed: {0}")]
    NodeHasChildren(Identity),

    #[error("the root node cannot be removed: {0}")]
    RootNotRemovable(Identity),

    #[error("clipboard is empty")]
    EmptyClipboard,

    #[error("not a single rooted tree: found {roots} root nodes")]
    NotATree { roots: usize },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
