//! Revisioning error types.
//!
//! Only fatal conditions are represented here; the one recoverable
//! per-mapping condition (no existing sources) is logged by the engine
//! and never surfaces as an error.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal revisioning errors. Any of these aborts the run.
#[derive(Debug, Error)]
pub enum RevError {
    #[error("task `{task_ref}` doesn't have any src-dest file mappings")]
    NoMappings { task_ref: String },

    #[error("task `{external_ref}` doesn't exist or doesn't have any configuration to version")]
    MissingExternalConfig { external_ref: String },

    #[error(
        "task `{task_ref}` versions files from `{external_ref}` and must not declare files of its own"
    )]
    ConflictingMappings {
        task_ref: String,
        external_ref: String,
    },

    #[error("invalid options for task `{task_ref}`")]
    InvalidOptions {
        task_ref: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to generate a version tag for `{0}`")]
    EmptyTag(PathBuf),

    #[error("invalid date format `{0}`")]
    InvalidDateFormat(String),

    #[error("failed to read `{path}`")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write `{path}`")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
