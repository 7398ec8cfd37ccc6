//! Manifest of (original path, revved path, tag) triples.
//!
//! When a target configures `output`, the engine accumulates one entry
//! per tagged mapping and this module serializes them - as a single
//! JSON array in mapping order - to that path, overwriting any prior
//! content. Entries are recorded whether or not the underlying write
//! was skipped: the name mapping is valid information either way.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

use super::RevError;

/// One manifest entry, paths trimmed of the configured output root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Version tag.
    pub rev: String,
    /// Original destination, root-trimmed.
    pub path: String,
    /// Renamed destination, root-trimmed.
    pub revved_path: String,
}

impl ManifestEntry {
    /// Build an entry, stripping `trim_dir` from both destinations.
    pub fn new(rev: &str, dest: &Path, revved_dest: &Path, trim_dir: &str) -> Self {
        Self {
            rev: rev.to_string(),
            path: trim(dest, trim_dir),
            revved_path: trim(revved_dest, trim_dir),
        }
    }
}

/// Strip a configured prefix from a destination path.
fn trim(path: &Path, trim_dir: &str) -> String {
    let raw = path.to_string_lossy();
    match raw.strip_prefix(trim_dir) {
        Some(stripped) => stripped.to_string(),
        None => raw.into_owned(),
    }
}

/// Serialize the accumulated entries to `path`, overwriting it.
pub fn write_manifest(path: &Path, entries: &[ManifestEntry]) -> Result<(), RevError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| RevError::Write {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let json = serde_json::to_string_pretty(entries).map_err(|e| RevError::Write {
        path: path.to_path_buf(),
        source: io::Error::other(e),
    })?;

    fs::write(path, json).map_err(|e| RevError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}
