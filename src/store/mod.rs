//! Build-configuration store and task queue.
//!
//! The store is an explicit, passed-by-reference tree of task
//! configurations addressed by `task` and `target` names (dotted
//! `task.target` keys in log output and in the surrogate-key
//! contract). The revisioning engine performs exactly three kinds of
//! access on it: one read to borrow another task's configuration
//! (external mode), one `rev_files` write under its own target, and -
//! in external mode - one write of a cloned configuration under a
//! surrogate key.
//!
//! # Module Structure
//!
//! ```text
//! store/
//! ├── normalize   # file-mapping normalization (globs, src/dest pairing)
//! └── mod.rs      # TaskConfig, ConfigStore, TaskQueue (this file)
//! ```

pub mod normalize;

pub use normalize::Mapping;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::path::PathBuf;

// ============================================================================
// Task Configuration
// ============================================================================

/// One src→dest file declaration. `src` entries may be glob patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSpec {
    /// Source files or glob patterns, in declaration order.
    #[serde(default)]
    pub src: Vec<String>,
    /// Destination path.
    pub dest: PathBuf,
}

/// Configuration of one `task.target` entry in the build file.
///
/// Keys this runner does not recognize are preserved in `rest`, so a
/// borrowed configuration survives the external-mode clone with its
/// downstream settings intact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskConfig {
    /// Single-mapping shorthand: source files or glob patterns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<Vec<String>>,

    /// Single-mapping shorthand: destination path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dest: Option<PathBuf>,

    /// Full mapping list. Takes precedence over `src`/`dest`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<FileSpec>>,

    /// Finalized mappings written back by the revisioning engine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rev_files: Option<Vec<FileSpec>>,

    /// Task-specific options table (parsed by the owning task).
    pub options: toml::Table,

    /// Unrecognized keys, preserved verbatim.
    #[serde(flatten)]
    pub rest: toml::Table,
}

impl TaskConfig {
    /// Whether this configuration declares any mappings of its own.
    pub fn declares_mappings(&self) -> bool {
        self.files.is_some() || self.src.is_some()
    }
}

// ============================================================================
// Task References
// ============================================================================

/// A `task:target` reference, the unit of scheduling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRef {
    pub task: String,
    pub target: String,
}

impl TaskRef {
    pub fn new(task: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            target: target.into(),
        }
    }

    /// Dotted configuration-store key (`task.target`).
    pub fn key(&self) -> String {
        format!("{}.{}", self.task, self.target)
    }

    /// Parse a `task:target` reference.
    pub fn parse(s: &str) -> Option<Self> {
        let (task, target) = s.split_once(':')?;
        if task.is_empty() || target.is_empty() {
            return None;
        }
        Some(Self::new(task, target))
    }
}

impl fmt::Display for TaskRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.task, self.target)
    }
}

// ============================================================================
// Surrogate Keys
// ============================================================================

/// Surrogate target name for a borrowed task configuration.
///
/// Deterministic, part of the store contract: the clone of
/// `external_task.external_target` mutated by task `own_task` is
/// stored as `external_task.{external_target}_{own_task}`, so it never
/// collides with the original configuration.
pub fn surrogate_target(external_target: &str, own_task: &str) -> String {
    format!("{external_target}_{own_task}")
}

/// Dotted store key of the surrogate configuration.
pub fn surrogate_key(external_task: &str, external_target: &str, own_task: &str) -> String {
    format!(
        "{external_task}.{}",
        surrogate_target(external_target, own_task)
    )
}

// ============================================================================
// Configuration Store
// ============================================================================

/// In-process tree of task configurations: task name → target → config.
#[derive(Debug, Default)]
pub struct ConfigStore {
    tasks: BTreeMap<String, BTreeMap<String, TaskConfig>>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the configuration of `task.target`.
    pub fn get(&self, task: &str, target: &str) -> Option<&TaskConfig> {
        self.tasks.get(task)?.get(target)
    }

    /// Insert or replace the configuration of `task.target`.
    pub fn set(&mut self, task: &str, target: &str, config: TaskConfig) {
        self.tasks
            .entry(task.to_string())
            .or_default()
            .insert(target.to_string(), config);
    }

    /// Write the finalized mapping sequence under `task.target`,
    /// creating the entry if the target had no configuration yet.
    pub fn set_rev_files(&mut self, task: &str, target: &str, files: Vec<FileSpec>) {
        self.tasks
            .entry(task.to_string())
            .or_default()
            .entry(target.to_string())
            .or_default()
            .rev_files = Some(files);
    }

    /// Targets configured for a task, in sorted order.
    pub fn targets(&self, task: &str) -> Vec<String> {
        self.tasks
            .get(task)
            .map(|targets| targets.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// All task names, in sorted order.
    pub fn task_names(&self) -> Vec<String> {
        self.tasks.keys().cloned().collect()
    }
}

// ============================================================================
// Task Queue
// ============================================================================

/// FIFO queue of task refs awaiting execution.
#[derive(Debug, Default)]
pub struct TaskQueue {
    queue: VecDeque<TaskRef>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a task ref to run after the current one completes.
    pub fn enqueue(&mut self, task_ref: TaskRef) {
        self.queue.push_back(task_ref);
    }

    /// Next task ref to run.
    pub fn pop(&mut self) -> Option<TaskRef> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
