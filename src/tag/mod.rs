//! Version-tag providers.
//!
//! A tag is an opaque string embedded into a destination filename to
//! identify a content revision. Strategies form a closed set dispatched
//! through [`generate`]; adding one means extending
//! [`Strategy`](crate::config::Strategy) and the match below.

pub mod date;
pub mod hash;

use std::path::PathBuf;

use crate::config::{RevOptions, Strategy};
use crate::rev::RevError;

/// Generate a version tag for one mapping's existing sources.
///
/// `hash` is deterministic for identical content and options; `date`
/// reads only the clock. The engine treats the result as opaque and
/// rejects empty tags.
pub fn generate(sources: &[PathBuf], options: &RevOptions) -> Result<String, RevError> {
    match options.strategy {
        Strategy::Hash => hash::content_tag(sources, options),
        Strategy::Date => date::timestamp_tag(options),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_dispatch_by_strategy() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("app.js");
        fs::write(&source, "console.log(1)").unwrap();
        let sources = vec![source];

        let hashed = generate(&sources, &RevOptions::default()).unwrap();
        assert_eq!(hashed.len(), 8);
        assert!(hashed.chars().all(|c| c.is_ascii_hexdigit()));

        let opts = RevOptions {
            strategy: Strategy::Date,
            ..RevOptions::default()
        };
        let dated = generate(&sources, &opts).unwrap();
        assert_eq!(dated.len(), "YYYYMMDDHHMMSS".len());
    }
}
