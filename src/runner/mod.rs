//! Task execution: drain the queue, dispatch by task name.
//!
//! Tasks run strictly sequentially and to completion; a chained ref
//! enqueued by the revisioning engine starts only after the engine's
//! run has finished. Built-in handlers cover the revisioning task
//! itself plus the two common chained consumers, `concat` and `copy`.

use std::fs;

use anyhow::{Result, anyhow, bail};

use crate::config::REV_TASK;
use crate::log;
use crate::rev;
use crate::store::{ConfigStore, Mapping, TaskConfig, TaskQueue, TaskRef, normalize};

/// Run a task ref, then everything it chained.
pub fn run_ref(store: &mut ConfigStore, queue: &mut TaskQueue, task_ref: &TaskRef) -> Result<()> {
    dispatch(store, queue, task_ref)?;
    while let Some(next) = queue.pop() {
        dispatch(store, queue, &next)?;
    }
    Ok(())
}

fn dispatch(store: &mut ConfigStore, queue: &mut TaskQueue, task_ref: &TaskRef) -> Result<()> {
    log!("run"; "{task_ref}");
    match task_ref.task.as_str() {
        REV_TASK => {
            rev::run_target(store, queue, &task_ref.target)?;
            Ok(())
        }
        "concat" => concat(store, task_ref),
        "copy" => copy(store, task_ref),
        other => bail!("unknown task `{other}` in `{task_ref}`"),
    }
}

/// Mappings of a configured task, or an error naming the ref.
fn mappings_of(store: &ConfigStore, task_ref: &TaskRef) -> Result<Vec<Mapping>> {
    let config: &TaskConfig = store
        .get(&task_ref.task, &task_ref.target)
        .ok_or_else(|| anyhow!("task `{task_ref}` doesn't exist or has no configuration"))?;
    Ok(normalize::normalize_files(config))
}

/// Join each mapping's existing sources with a line feed and write the
/// destination.
fn concat(store: &mut ConfigStore, task_ref: &TaskRef) -> Result<()> {
    for mapping in mappings_of(store, task_ref)? {
        let sources: Vec<_> = mapping.sources.iter().filter(|p| p.is_file()).collect();
        if sources.is_empty() {
            log!("run"; "skipping {}: no existing sources", mapping.dest.display());
            continue;
        }

        let mut content: Vec<u8> = Vec::new();
        for (index, source) in sources.iter().enumerate() {
            if index > 0 {
                content.push(b'\n');
            }
            content.extend_from_slice(&fs::read(source)?);
        }

        if let Some(parent) = mapping.dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&mapping.dest, content)?;
        log!("run"; "file {} created", mapping.dest.display());
    }
    Ok(())
}

/// Copy each mapping's existing sources to its destination.
///
/// Multi-source mappings copy in order, last write wins; the sensible
/// chained consumer for those is `concat`.
fn copy(store: &mut ConfigStore, task_ref: &TaskRef) -> Result<()> {
    for mapping in mappings_of(store, task_ref)? {
        let sources: Vec<_> = mapping.sources.iter().filter(|p| p.is_file()).collect();
        if sources.is_empty() {
            log!("run"; "skipping {}: no existing sources", mapping.dest.display());
            continue;
        }

        if let Some(parent) = mapping.dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        for source in sources {
            fs::copy(source, &mapping.dest)?;
            log!("run"; "copied {} -> {}", source.display(), mapping.dest.display());
        }
    }
    Ok(())
}
