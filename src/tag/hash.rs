//! Content-hash version tags using blake3.
//!
//! Hashes the ordered contents of a mapping's sources into one digest
//! and truncates the hex encoding to the configured tag length. Same
//! bytes, same options, same tag.

use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use crate::config::{Encoding, RevOptions};
use crate::rev::RevError;

/// Compute a truncated hex tag over the sources' contents.
///
/// Sources are hashed in declaration order, so reordering them changes
/// the tag. With `encoding = "utf8"` a source that is not valid UTF-8
/// fails the run.
pub fn content_tag(sources: &[PathBuf], options: &RevOptions) -> Result<String, RevError> {
    let mut hasher = blake3::Hasher::new();

    for path in sources {
        match options.encoding {
            Encoding::Utf8 => {
                let text = fs::read_to_string(path).map_err(|e| RevError::Read {
                    path: path.clone(),
                    source: e,
                })?;
                hasher.update(text.as_bytes());
            }
            Encoding::Raw => hash_reader(path, &mut hasher)?,
        }
    }

    let hex = hex::encode(hasher.finalize().as_bytes());
    let len = options.tag_length.min(hex.len());
    Ok(hex[..len].to_string())
}

/// Stream a file into the hasher (for large or binary sources).
fn hash_reader(path: &Path, hasher: &mut blake3::Hasher) -> Result<(), RevError> {
    let file = File::open(path).map_err(|e| RevError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut reader = BufReader::with_capacity(64 * 1024, file);
    let mut buffer = [0u8; 64 * 1024];

    loop {
        match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => {
                hasher.update(&buffer[..n]);
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(RevError::Read {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        }
    }

    Ok(())
}
