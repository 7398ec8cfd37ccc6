//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// assetrev task runner CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Build file path (default: assetrev.toml)
    #[arg(short = 'C', long, default_value = "assetrev.toml", value_hint = clap::ValueHint::FilePath)]
    pub build_file: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run revisioning targets (and whatever they chain)
    #[command(visible_alias = "r")]
    Run {
        /// Task refs to run, as `task:target`.
        /// Defaults to every target of the rev task.
        #[arg(value_name = "TASK:TARGET")]
        refs: Vec<String>,
    },

    /// List tasks and targets declared in the build file
    #[command(visible_alias = "l")]
    List,
}
