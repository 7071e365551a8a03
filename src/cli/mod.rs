//! cli
//!
//! Command-line interface layer for symgrid.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Resolve codes, config and bounds for each command
//! - Delegate placement to [`crate::core::layout`] and print the result
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to
//! command handlers. The handlers own file lookup and printing; layout
//! functions stay pure.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use crate::ui::output::Verbosity;
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

/// Execution context shared by all commands.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Directory to run in (defaults to the process working directory)
    pub cwd: Option<PathBuf>,
    /// Enable debug output
    pub debug: bool,
    /// Minimal output
    pub quiet: bool,
}

impl Context {
    /// Output verbosity derived from the flags.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }

    /// The directory commands run in.
    pub fn cwd(&self) -> Result<PathBuf> {
        match &self.cwd {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir().context("Failed to determine current directory"),
        }
    }

    /// Resolve `path` against the working directory.
    pub fn resolve(&self, path: &Path) -> Result<PathBuf> {
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            Ok(self.cwd()?.join(path))
        }
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let ctx = Context {
        cwd: cli.cwd.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
    };

    commands::dispatch(cli.command, &ctx)
}
