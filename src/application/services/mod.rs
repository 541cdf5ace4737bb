//! Application services
//!
//! Concrete services that orchestrate domain logic for the editor.

mod dispatcher;
mod session;

pub use dispatcher::{Command, CommandDispatcher, Workspace};
pub use session::{ContextMenu, EdgeChange, EditorSession, NodeChange};
