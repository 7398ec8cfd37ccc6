//! Per-target revisioning options.
//!
//! Parsed from the `[tasks.rev.<target>.options]` table of the build
//! file. Defaults match what an unconfigured target should do: hash
//! tags, 8 hex chars, skip destinations that already exist.
//!
//! # Example
//!
//! ```toml
//! [tasks.rev.dist.options]
//! strategy = "hash"
//! tag_length = 8
//! output = "dist/manifest.json"
//! output_trim_dir = "dist/"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::rev::rename;

/// Rename policy hook: `(destination, tag) -> renamed destination`.
///
/// Must be pure. Not a build-file setting (a TOML file cannot carry a
/// function); library callers may override it on [`RevOptions`], CLI
/// runs always use [`rename::tag_before_extension`].
pub type RenameHook = fn(&Path, &str) -> PathBuf;

/// Version tag strategy.
///
/// Closed set: unrecognized names fail build-file deserialization
/// before any mapping is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Content hash of the mapping's sources (blake3, truncated hex).
    #[default]
    Hash,
    /// Formatted wall-clock timestamp.
    Date,
}

/// How source bytes are read for hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// Sources must be valid UTF-8; invalid data fails the run.
    #[default]
    Utf8,
    /// Hash bytes as-is.
    Raw,
}

/// Options for one revisioning target.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RevOptions {
    /// Version tag strategy (`hash` or `date`).
    pub strategy: Strategy,

    /// Truncation length for hash tags, in hex chars.
    pub tag_length: usize,

    /// Source read mode for hashing.
    pub encoding: Encoding,

    /// chrono format string for date tags.
    pub date_format: String,

    /// Hours east of UTC applied to date tags.
    pub timezone_offset: i32,

    /// Manifest path. `None` writes no manifest.
    pub output: Option<PathBuf>,

    /// Prefix stripped from manifest paths.
    pub output_trim_dir: String,

    /// Skip mappings whose renamed destination already exists.
    pub skip_existing: bool,

    /// Borrow mappings from this task instead of declaring our own.
    pub external_task: Option<String>,

    /// Target of the borrowed task (defaults to our own target).
    pub external_target: Option<String>,

    /// Enqueue the surrogate task after re-injection (external mode).
    pub run_chained_task: bool,

    /// Rename policy hook (engine API only).
    #[serde(skip, default = "default_rename")]
    pub rename: RenameHook,
}

fn default_rename() -> RenameHook {
    rename::tag_before_extension
}

impl Default for RevOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            tag_length: 8,
            encoding: Encoding::default(),
            date_format: "%Y%m%d%H%M%S".into(),
            timezone_offset: 0,
            output: None,
            output_trim_dir: String::new(),
            skip_existing: true,
            external_task: None,
            external_target: None,
            run_chained_task: true,
            rename: default_rename(),
        }
    }
}

impl RevOptions {
    /// Whether this target borrows mappings from another task.
    pub fn is_external(&self) -> bool {
        self.external_task.is_some()
    }

    /// The borrowed task's target, falling back to our own.
    pub fn external_target_or<'a>(&'a self, own_target: &'a str) -> &'a str {
        self.external_target.as_deref().unwrap_or(own_target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_unconfigured_target() {
        let opts = RevOptions::default();
        assert_eq!(opts.strategy, Strategy::Hash);
        assert_eq!(opts.tag_length, 8);
        assert_eq!(opts.encoding, Encoding::Utf8);
        assert_eq!(opts.date_format, "%Y%m%d%H%M%S");
        assert_eq!(opts.timezone_offset, 0);
        assert!(opts.output.is_none());
        assert!(opts.skip_existing);
        assert!(opts.run_chained_task);
        assert!(!opts.is_external());
    }

    #[test]
    fn test_deserialize_from_toml_table() {
        let opts: RevOptions = toml::from_str(
            r#"
            strategy = "date"
            date_format = "%Y%m%d"
            timezone_offset = -5
            skip_existing = false
            "#,
        )
        .unwrap();
        assert_eq!(opts.strategy, Strategy::Date);
        assert_eq!(opts.date_format, "%Y%m%d");
        assert_eq!(opts.timezone_offset, -5);
        assert!(!opts.skip_existing);
        // Unset fields keep their defaults
        assert_eq!(opts.tag_length, 8);
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        let err = toml::from_str::<RevOptions>(r#"strategy = "crc""#);
        assert!(err.is_err());
    }

    #[test]
    fn test_external_target_fallback() {
        let mut opts = RevOptions {
            external_task: Some("concat".into()),
            ..RevOptions::default()
        };
        assert_eq!(opts.external_target_or("dist"), "dist");

        opts.external_target = Some("release".into());
        assert_eq!(opts.external_target_or("dist"), "release");
    }
}
