//! File-mapping normalization (pure, no side effects).
//!
//! Expands a task configuration's declared files into concrete ordered
//! src→dest mappings: the `files` list first, else the `src`/`dest`
//! shorthand. Source entries containing glob metacharacters are
//! expanded in sorted match order; literal entries pass through
//! untouched - whether they exist on disk is the consumer's concern.

use std::path::PathBuf;

use super::{FileSpec, TaskConfig};

/// A concrete src→dest mapping.
///
/// Produced by normalization; the revisioning engine re-uses the same
/// shape for finalized mappings (filtered sources, renamed dest).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    /// Source files, in declaration order.
    pub sources: Vec<PathBuf>,
    /// Destination path.
    pub dest: PathBuf,
}

impl Mapping {
    pub fn new(sources: Vec<PathBuf>, dest: PathBuf) -> Self {
        Self { sources, dest }
    }
}

impl From<&Mapping> for FileSpec {
    fn from(mapping: &Mapping) -> Self {
        Self {
            src: mapping
                .sources
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect(),
            dest: mapping.dest.clone(),
        }
    }
}

/// Normalize a task configuration into ordered mappings.
///
/// Returns an empty vec when the configuration declares no mappings.
pub fn normalize_files(config: &TaskConfig) -> Vec<Mapping> {
    if let Some(files) = &config.files {
        return files
            .iter()
            .map(|spec| Mapping::new(expand_sources(&spec.src), spec.dest.clone()))
            .collect();
    }

    match (&config.src, &config.dest) {
        (Some(src), Some(dest)) => vec![Mapping::new(expand_sources(src), dest.clone())],
        _ => Vec::new(),
    }
}

/// Expand glob patterns, keeping literal entries as-is.
fn expand_sources(entries: &[String]) -> Vec<PathBuf> {
    let mut sources = Vec::new();
    for entry in entries {
        if is_glob(entry) {
            sources.extend(expand_pattern(entry));
        } else {
            sources.push(PathBuf::from(entry));
        }
    }
    sources
}

/// Matches of one glob pattern, sorted for determinism.
///
/// An invalid pattern falls back to a literal path; the engine's
/// existing-source filter will log and reject it downstream.
fn expand_pattern(pattern: &str) -> Vec<PathBuf> {
    let Ok(paths) = glob::glob(pattern) else {
        return vec![PathBuf::from(pattern)];
    };
    let mut matches: Vec<PathBuf> = paths.filter_map(Result::ok).collect();
    matches.sort();
    matches
}

/// Whether an entry contains glob metacharacters.
fn is_glob(entry: &str) -> bool {
    entry.contains(['*', '?', '['])
}
