//! Reading trees and editor scripts from disk.

use std::io;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::domain::{Edge, Node, TreeStore};
use crate::infrastructure::traits::FileSystem;
use crate::infrastructure::{InfraError, InfraResult};

/// On-disk tree layout: `[[nodes]]` and `[[edges]]` tables.
#[derive(Debug, Deserialize)]
struct TreeFile {
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    edges: Vec<Edge>,
}

/// Loads initial trees and scripts through a `FileSystem`.
pub struct TreeLoader {
    fs: Arc<dyn FileSystem>,
}

impl TreeLoader {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Parse a TOML tree file and validate it as a single rooted tree.
    #[instrument(level = "debug", skip(self))]
    pub fn load_tree(&self, path: &Path) -> InfraResult<TreeStore> {
        let content = self.read(path)?;
        let file: TreeFile = toml::from_str(&content).map_err(|e| InfraError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!(
            "tree file {}: {} nodes, {} edges",
            path.display(),
            file.nodes.len(),
            file.edges.len()
        );
        Ok(TreeStore::from_parts(file.nodes, file.edges)?)
    }

    /// Read an editor script verbatim.
    pub fn load_script(&self, path: &Path) -> InfraResult<String> {
        self.read(path)
    }

    fn read(&self, path: &Path) -> InfraResult<String> {
        if !self.fs.exists(path) {
            return Err(InfraError::io(
                format!("file not found: {}", path.display()),
                io::Error::from(io::ErrorKind::NotFound),
            ));
        }
        if !self.fs.is_file(path) {
            return Err(InfraError::io(
                format!("not a file: {}", path.display()),
                io::Error::from(io::ErrorKind::InvalidInput),
            ));
        }
        self.fs
            .read_to_string(path)
            .map_err(|e| InfraError::io(format!("read {}", path.display()), e))
    }
}
