//! Domain layer: entities and tree editing logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod clipboard;
pub mod cloner;
pub mod entities;
pub mod error;
pub mod identity;
pub mod outline;
pub mod seed;
pub mod store;

pub use clipboard::{ClipboardManager, ClipboardOperation, ClipboardPayload};
pub use cloner::clone_subtree;
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use identity::{IdentityGenerator, UuidGenerator};
pub use outline::ToOutline;
pub use store::TreeStore;
