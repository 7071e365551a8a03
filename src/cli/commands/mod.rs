//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Resolves its inputs (codes, config, bounds)
//! 2. Calls into [`crate::core`] to compute placements
//! 3. Formats and displays output

mod area;
mod catalog_cmd;
mod completion;
mod config_cmd;
mod fixed;
mod page;
mod source;

// Re-export command functions for testing and direct invocation
pub use area::{area, AreaArgs};
pub use catalog_cmd::catalog;
pub use completion::completion;
pub use config_cmd::{get as config_get, list as config_list, set as config_set};
pub use fixed::{fixed, FixedArgs};
pub use page::{page, PageArgs};

use crate::cli::args::{Command, ConfigAction};
use crate::cli::Context;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Fixed {
            source,
            page,
            origin,
            format,
        } => fixed::fixed(
            ctx,
            &FixedArgs {
                source,
                page,
                origin,
                format,
            },
        ),
        Command::Area {
            source,
            count,
            skip,
            bounds,
            center,
            radius,
            format,
        } => area::area(
            ctx,
            &AreaArgs {
                source,
                count,
                skip,
                bounds,
                center,
                radius,
                format,
            },
        ),
        Command::Page {
            source,
            page,
            columns,
            bounds,
            center,
            radius,
            format,
        } => page::page(
            ctx,
            &PageArgs {
                source,
                page,
                columns,
                bounds,
                center,
                radius,
                format,
            },
        ),
        Command::Catalog { catalog } => catalog_cmd::catalog(ctx, catalog.as_deref()),
        Command::Config { action } => match action {
            ConfigAction::Get { key } => config_cmd::get(ctx, &key),
            ConfigAction::Set { key, value, global } => {
                config_cmd::set(ctx, &key, &value, global)
            }
            ConfigAction::List => config_cmd::list(ctx),
        },
        Command::Completion { shell } => completion::completion(shell),
    }
}
