use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use depsets_util::errors::DepsetsError;

/// Global user configuration loaded from `~/.depsets/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub graph: GraphSettings,
}

/// Catalog discovery settings from `[catalog]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// File name searched for in the project root and its ancestors.
    #[serde(default = "default_catalog_file", rename = "file-name")]
    pub file_name: String,
    /// Whether umbrella modules contribute implicit sets.
    #[serde(default = "default_siblings")]
    pub siblings: bool,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            file_name: default_catalog_file(),
            siblings: default_siblings(),
        }
    }
}

fn default_catalog_file() -> String {
    crate::CATALOG_FILE.to_string()
}

fn default_siblings() -> bool {
    true
}

/// Graph output settings from `[graph]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSettings {
    /// Output path, relative to the project root unless absolute.
    #[serde(default = "default_graph_output")]
    pub output: String,
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            output: default_graph_output(),
        }
    }
}

fn default_graph_output() -> String {
    "target/dependency-sets.dot".to_string()
}

impl GlobalConfig {
    /// Load the global configuration from `~/.depsets/config.toml`, or return defaults if the file doesn't exist.
    pub fn load() -> miette::Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load configuration from an explicit path, or return defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> miette::Result<Self> {
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| DepsetsError::Generic {
            message: format!("Failed to read global config: {e}"),
        })?;
        toml::from_str(&content).map_err(|e| {
            DepsetsError::Generic {
                message: format!("Failed to parse global config: {e}"),
            }
            .into()
        })
    }

    /// Returns the default path to the global config file.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }
}

/// Returns the path to the depsets data directory (`~/.depsets/`).
pub fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".depsets")
}
