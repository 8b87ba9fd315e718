//! Overlay compilation settings
//!
//! Settings are read from a TOML file. Every field has a default, so an empty
//! file (or no file) behaves the same as [`OverlayConfig::default`].
//!
//! ```toml
//! root-key = "configuration"
//! excluded-keys = ["extension", "deployment", "deployment-overlay"]
//! reindex-between-documents = false
//! fail-fast = true
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Top-level key holding extension declarations
pub const EXTENSION_KEY: &str = "extension";

/// Top-level keys delegated to the deployment collaborator
pub const DEPLOYMENT_KEYS: [&str; 2] = ["deployment", "deployment-overlay"];

fn default_root_key() -> String {
    "configuration".to_string()
}

fn default_excluded_keys() -> Vec<String> {
    std::iter::once(EXTENSION_KEY)
        .chain(DEPLOYMENT_KEYS)
        .map(str::to_string)
        .collect()
}

fn default_fail_fast() -> bool {
    true
}

/// Settings for one reconciliation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OverlayConfig {
    /// Top-level key selecting the overlay subtree of each document
    #[serde(default = "default_root_key")]
    pub root_key: String,

    /// Keys of the overlay root that are never walked as resources
    #[serde(default = "default_excluded_keys")]
    pub excluded_keys: Vec<String>,

    /// Fold each document's operations into the baseline index before
    /// compiling the next document
    #[serde(default)]
    pub reindex_between_documents: bool,

    /// Abort on the first failed document instead of recording it
    #[serde(default = "default_fail_fast")]
    pub fail_fast: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            root_key: default_root_key(),
            excluded_keys: default_excluded_keys(),
            reindex_between_documents: false,
            fail_fast: default_fail_fast(),
        }
    }
}

impl OverlayConfig {
    /// Parse settings from TOML content.
    pub fn parse(content: &str) -> Result<Self> {
        let config: OverlayConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::NotFound(path.display().to_string()));
        }
        tracing::debug!(?path, "Loading overlay config");
        Self::parse(&fs::read_to_string(path)?)
    }

    pub fn is_excluded(&self, key: &str) -> bool {
        self.excluded_keys.iter().any(|k| k == key)
    }
}
