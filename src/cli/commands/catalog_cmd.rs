//! catalog command - List catalog pages and code counts

use std::path::Path;

use anyhow::Result;

use crate::cli::Context;
use crate::ui::output;

use super::source;

/// List each page of the catalog with its code count.
pub fn catalog(ctx: &Context, path: Option<&Path>) -> Result<()> {
    let config = source::load_config(ctx)?;
    let catalog = source::load_catalog(ctx, path, &config)?;

    for page in catalog.pages() {
        println!("page {:>5}  {:>6} codes", page.number(), page.codes().len());
    }
    output::print(
        format!(
            "{} pages, {} codes",
            catalog.pages().len(),
            catalog.len()
        ),
        ctx.verbosity(),
    );

    Ok(())
}
