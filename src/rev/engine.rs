//! The revisioning engine.
//!
//! Processes one rev target: resolve mappings, tag each one, apply the
//! rename policy, record manifest entries, and re-inject the finalized
//! sequence into the configuration store. Internal mode writes the
//! renamed files itself; external mode hands a surrogate configuration
//! to the task queue instead.
//!
//! Mappings are processed strictly in declaration order; log lines,
//! manifest entries, and store writes follow that order.

use std::fs;
use std::path::PathBuf;

use crate::config::{REV_TASK, RevOptions};
use crate::store::{self, ConfigStore, FileSpec, Mapping, TaskQueue, TaskRef};
use crate::tag;
use crate::{debug, log};

use super::{ManifestEntry, RevError, manifest, mapping};

/// Result of one engine run.
#[derive(Debug)]
pub struct RevOutcome {
    /// Mappings that survived filtering, tagging, and the
    /// skip-existing check, with renamed destinations.
    pub finalized: Vec<Mapping>,
    /// Manifest entries, one per tagged mapping (recorded even when
    /// the mapping was skipped as already existing).
    pub manifest: Vec<ManifestEntry>,
    /// Surrogate task ref enqueued for a chained run, if any.
    pub chained: Option<TaskRef>,
}

/// Run one rev target, parsing its options from the store.
pub fn run_target(
    store: &mut ConfigStore,
    queue: &mut TaskQueue,
    target: &str,
) -> Result<RevOutcome, RevError> {
    let config = store.get(REV_TASK, target).cloned().unwrap_or_default();
    let options: RevOptions =
        toml::Value::Table(config.options.clone())
            .try_into()
            .map_err(|e| RevError::InvalidOptions {
                task_ref: TaskRef::new(REV_TASK, target).to_string(),
                source: e,
            })?;
    run_with_options(store, queue, target, &options)
}

/// Run one rev target with caller-supplied options.
///
/// This is the library entry point for overriding the rename hook or
/// constructing options programmatically.
pub fn run_with_options(
    store: &mut ConfigStore,
    queue: &mut TaskQueue,
    target: &str,
    options: &RevOptions,
) -> Result<RevOutcome, RevError> {
    let own = TaskRef::new(REV_TASK, target);
    let config = store.get(&own.task, &own.target).cloned().unwrap_or_default();

    let mappings = mapping::resolve(store, &own, &config, options)?;

    let mut finalized: Vec<Mapping> = Vec::new();
    let mut entries: Vec<ManifestEntry> = Vec::new();

    for mapping in &mappings {
        // Only sources that exist as regular files take part
        let sources: Vec<PathBuf> = mapping
            .sources
            .iter()
            .filter(|path| path.is_file())
            .cloned()
            .collect();
        if sources.is_empty() {
            log!("rev"; "skipping {}: no existing sources", mapping.dest.display());
            continue;
        }

        // An empty tag means a broken provider and fails the whole run
        let tag = tag::generate(&sources, options)?;
        debug!("rev"; "version tag: {tag}");
        if tag.is_empty() {
            return Err(RevError::EmptyTag(mapping.dest.clone()));
        }

        let revved_dest = (options.rename)(&mapping.dest, &tag);
        debug!("rev"; "destination filename: {}", revved_dest.display());

        // Manifest entry is recorded before the skip-existing check:
        // the name mapping holds whether or not we write the file
        if options.output.is_some() {
            entries.push(ManifestEntry::new(
                &tag,
                &mapping.dest,
                &revved_dest,
                &options.output_trim_dir,
            ));
        }

        // A destination left by a prior run satisfies this mapping
        if options.skip_existing && revved_dest.exists() {
            debug!("rev"; "{} already exists, skipping", revved_dest.display());
            continue;
        }

        finalized.push(Mapping::new(sources, revved_dest));
    }

    if let Some(manifest_path) = &options.output {
        manifest::write_manifest(manifest_path, &entries)?;
    }

    // Re-inject the finalized sequence under our own target for
    // downstream consumers
    store.set_rev_files(
        &own.task,
        &own.target,
        finalized.iter().map(FileSpec::from).collect(),
    );

    let chained = match &options.external_task {
        Some(external_task) => chain_surrogate(store, queue, &own, external_task, options, &finalized),
        None => {
            // Internal mode performs the physical write itself
            for mapping in &finalized {
                write_concat(mapping)?;
                log!("rev"; "file {} created", mapping.dest.display());
            }
            None
        }
    };

    Ok(RevOutcome {
        finalized,
        manifest: entries,
        chained,
    })
}

/// Store a clone of the borrowed configuration under the surrogate
/// key, mapping declaration replaced by the finalized sequence, and
/// optionally enqueue it.
fn chain_surrogate(
    store: &mut ConfigStore,
    queue: &mut TaskQueue,
    own: &TaskRef,
    external_task: &str,
    options: &RevOptions,
    finalized: &[Mapping],
) -> Option<TaskRef> {
    let external_target = options.external_target_or(&own.target);
    let surrogate = TaskRef::new(
        external_task,
        store::surrogate_target(external_target, &own.task),
    );
    debug!("rev"; "surrogate task: {surrogate}");

    let mut surrogate_config = store
        .get(external_task, external_target)
        .cloned()
        .unwrap_or_default();

    // The full mapping list takes precedence over the shorthand keys,
    // so drop them from the clone
    surrogate_config.src = None;
    surrogate_config.dest = None;
    surrogate_config.files = Some(finalized.iter().map(FileSpec::from).collect());
    store.set(&surrogate.task, &surrogate.target, surrogate_config);

    if options.run_chained_task {
        queue.enqueue(surrogate.clone());
        Some(surrogate)
    } else {
        None
    }
}

/// Concatenate a mapping's sources (declaration order, joined by a
/// line feed) into its renamed destination.
fn write_concat(mapping: &Mapping) -> Result<(), RevError> {
    let mut content: Vec<u8> = Vec::new();
    for (index, source) in mapping.sources.iter().enumerate() {
        if index > 0 {
            content.push(b'\n');
        }
        let bytes = fs::read(source).map_err(|e| RevError::Read {
            path: source.clone(),
            source: e,
        })?;
        content.extend_from_slice(&bytes);
    }

    if let Some(parent) = mapping.dest.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| RevError::Write {
            path: mapping.dest.clone(),
            source: e,
        })?;
    }

    fs::write(&mapping.dest, content).map_err(|e| RevError::Write {
        path: mapping.dest.clone(),
        source: e,
    })
}
