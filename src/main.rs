//! assetrev - an asset revisioning task runner.

#![allow(dead_code)]

mod cli;
mod config;
mod logger;
mod rev;
mod runner;
mod store;
mod tag;

use anyhow::{Context, Result, anyhow, bail};
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{BuildFile, REV_TASK};
use store::{TaskQueue, TaskRef};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    logger::set_verbose(cli.verbose);

    let build = BuildFile::load(&cli.build_file)
        .with_context(|| format!("failed to load build file `{}`", cli.build_file.display()))?;

    match &cli.command {
        Commands::Run { refs } => run(build, refs),
        Commands::List => list(&build),
    }
}

/// Run the requested refs, or every rev target when none are given.
fn run(build: BuildFile, refs: &[String]) -> Result<()> {
    let refs: Vec<TaskRef> = if refs.is_empty() {
        build
            .rev_targets()
            .into_iter()
            .map(|target| TaskRef::new(REV_TASK, target))
            .collect()
    } else {
        refs.iter()
            .map(|raw| {
                TaskRef::parse(raw)
                    .ok_or_else(|| anyhow!("invalid task ref `{raw}`, expected `task:target`"))
            })
            .collect::<Result<_>>()?
    };

    if refs.is_empty() {
        bail!("build file declares no rev targets");
    }

    let mut store = build.into_store();
    let mut queue = TaskQueue::new();
    for task_ref in refs {
        runner::run_ref(&mut store, &mut queue, &task_ref)?;
    }
    Ok(())
}

/// Print every declared `task:target`.
fn list(build: &BuildFile) -> Result<()> {
    for (task, targets) in &build.tasks {
        for target in targets.keys() {
            log!("list"; "{task}:{target}");
        }
    }
    Ok(())
}
