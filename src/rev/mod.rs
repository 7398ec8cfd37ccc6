//! Asset revisioning: tag, rename, record, re-inject.
//!
//! # Module Structure
//!
//! ```text
//! rev/
//! ├── engine     # per-mapping orchestration loop
//! ├── error      # RevError
//! ├── manifest   # (path, revved_path, rev) manifest artifact
//! ├── mapping    # internal/external mapping resolution
//! └── rename     # destination rename policies
//! ```

pub mod engine;
pub mod error;
pub mod manifest;
pub mod mapping;
pub mod rename;


pub use engine::{RevOutcome, run_target, run_with_options};
pub use error::RevError;
pub use manifest::ManifestEntry;
