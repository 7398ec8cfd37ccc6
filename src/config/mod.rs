//! Build file management for `assetrev.toml`.
//!
//! The build file declares task configurations under
//! `[tasks.<task>.<target>]` tables:
//!
//! ```toml
//! [tasks.rev.dist]
//! src = ["assets/app.js"]
//! dest = "public/app.js"
//!
//! [tasks.rev.dist.options]
//! strategy = "hash"
//! tag_length = 8
//! ```
//!
//! Loading seeds the in-process [`ConfigStore`](crate::store::ConfigStore);
//! everything after that goes through the store, never back to the file.

pub mod options;

pub use options::{Encoding, RenameHook, RevOptions, Strategy};

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::store::{ConfigStore, TaskConfig};

/// Task name the revisioning engine registers under.
pub const REV_TASK: &str = "rev";

// ============================================================================
// ConfigError
// ============================================================================

/// Build-file errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Build file parsing error")]
    Toml(#[from] toml::de::Error),
}

// ============================================================================
// BuildFile
// ============================================================================

/// Root structure of `assetrev.toml`: task name → target → config.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BuildFile {
    pub tasks: BTreeMap<String, BTreeMap<String, TaskConfig>>,
}

impl BuildFile {
    /// Load and parse a build file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Ok(toml::from_str(&raw)?)
    }

    /// Seed a configuration store with every declared task target.
    pub fn into_store(self) -> ConfigStore {
        let mut store = ConfigStore::new();
        for (task, targets) in self.tasks {
            for (target, config) in targets {
                store.set(&task, &target, config);
            }
        }
        store
    }

    /// Targets declared for the `rev` task, in sorted order.
    pub fn rev_targets(&self) -> Vec<String> {
        self.tasks
            .get(REV_TASK)
            .map(|targets| targets.keys().cloned().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file() {
        let err = BuildFile::load(Path::new("/nonexistent/assetrev.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(..)));
    }

    #[test]
    fn test_load_and_seed_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("assetrev.toml");
        fs::write(
            &path,
            r#"
            [tasks.rev.dist]
            src = ["assets/app.js"]
            dest = "public/app.js"

            [tasks.rev.dist.options]
            strategy = "date"

            [tasks.concat.dist]
            src = ["a.js", "b.js"]
            dest = "public/bundle.js"
            "#,
        )
        .unwrap();

        let build = BuildFile::load(&path).unwrap();
        assert_eq!(build.rev_targets(), vec!["dist".to_string()]);

        let store = build.into_store();
        let rev = store.get(REV_TASK, "dist").unwrap();
        assert_eq!(
            rev.options.get("strategy").and_then(|v| v.as_str()),
            Some("date")
        );
        assert!(store.get("concat", "dist").is_some());
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("assetrev.toml");
        fs::write(&path, "tasks = not toml").unwrap();
        let err = BuildFile::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }
}
