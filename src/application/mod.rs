//! Application layer: editing use cases
//!
//! This layer orchestrates domain logic for the presentation and renderer boundaries.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use services::{
    Command, CommandDispatcher, ContextMenu, EdgeChange, EditorSession, NodeChange, Workspace,
};
