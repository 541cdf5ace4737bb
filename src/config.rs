//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/acctree/acctree.toml`
//! 3. Explicit config file passed on the command line
//! 4. Environment variables: `ACCTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::Offset;

/// Where new children and pasted subtrees land relative to their parent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RelocationConfig {
    pub dx: f64,
    pub dy: f64,
}

impl Default for RelocationConfig {
    fn default() -> Self {
        Self {
            dx: Offset::RELOCATION.dx,
            dy: Offset::RELOCATION.dy,
        }
    }
}

impl RelocationConfig {
    pub fn offset(&self) -> Offset {
        Offset::new(self.dx, self.dy)
    }
}

/// Raw relocation config for intermediate parsing (fields are Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawRelocationConfig {
    pub dx: Option<f64>,
    pub dy: Option<f64>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub tree_file: Option<PathBuf>,
    pub relocation: RawRelocationConfig,
}

/// Unified configuration for acctree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Settings {
    /// Initial tree to load instead of the built-in chart of accounts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree_file: Option<PathBuf>,
    /// Placement of new and pasted nodes
    pub relocation: RelocationConfig,
}

/// Get the XDG config directory for acctree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "acctree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("acctree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        if let Some(tree_file) = &self.tree_file {
            self.tree_file = Some(PathBuf::from(expand_env_vars(
                tree_file.to_string_lossy().as_ref(),
            )));
        }
    }

    /// Merge overlay config onto self (base): overlay wins where specified.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            tree_file: overlay.tree_file.clone().or_else(|| self.tree_file.clone()),
            relocation: RelocationConfig {
                dx: overlay.relocation.dx.unwrap_or(self.relocation.dx),
                dy: overlay.relocation.dy.unwrap_or(self.relocation.dy),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; must exist if given
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Explicit config file
        if let Some(path) = config_file {
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();

        Ok(current)
    }

    /// Apply ACCTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("ACCTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("tree_file") {
            settings.tree_file = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_float("relocation.dx") {
            settings.relocation.dx = val;
        }
        if let Ok(val) = config.get_float("relocation.dy") {
            settings.relocation.dy = val;
        }

        Ok(settings)
    }

    /// Render the merged settings as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}
