//! [`TestWorkspace`] for on-disk overlay scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::schema::SAMPLE_SCHEMA_YAML;

/// A temporary directory holding the input files of one test.
///
/// # Example
///
/// ```rust,no_run
/// use overlay_test_utils::TestWorkspace;
///
/// let ws = TestWorkspace::new();
/// let schema = ws.write_sample_schema();
/// let overlay = ws.write("overlay.yml", "configuration:\n  subsystem: {}\n");
/// assert!(schema.exists() && overlay.exists());
/// ```
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of `name` inside the workspace, whether or not it exists.
    pub fn path(&self, name: &str) -> PathBuf {
        self.root().join(name)
    }

    /// Write `content` to `name`, creating parent directories.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Write the sample schema as `schema.yml`.
    pub fn write_sample_schema(&self) -> PathBuf {
        self.write("schema.yml", SAMPLE_SCHEMA_YAML)
    }

    /// Write a JSON baseline as `baseline.json`.
    pub fn write_baseline(&self, json: &str) -> PathBuf {
        self.write("baseline.json", json)
    }
}
