//! Destination rename policies.
//!
//! A policy is a pure `(destination, tag) -> renamed destination`
//! function. The default inserts the tag before the file extension,
//! keeping directory and base name intact:
//! `out/app.js` + `a1b2c3d4` → `out/app.a1b2c3d4.js`.

use std::path::{Path, PathBuf};

/// Default policy: insert `.` + tag immediately before the extension.
///
/// Destinations without an extension get the tag appended as one.
pub fn tag_before_extension(dest: &Path, tag: &str) -> PathBuf {
    let stem = dest
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();

    let renamed = match dest.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}.{tag}.{ext}"),
        None => format!("{stem}.{tag}"),
    };

    dest.with_file_name(renamed)
}
