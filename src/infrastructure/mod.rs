//! Infrastructure layer: I/O implementations
//!
//! This layer implements I/O boundary traits and file loading.

pub mod error;
pub mod loader;
pub mod traits;

pub use error::{InfraError, InfraResult};
pub use loader::TreeLoader;
