//! fixed command - Place codes on the fixed paged raster

use anyhow::{Context as _, Result};

use crate::cli::args::{CodeSource, OutputFormat};
use crate::cli::Context;
use crate::core::layout::PagedLayout;
use crate::core::types::Point;
use crate::ui::output;

use super::source;

/// Arguments for [`fixed`].
#[derive(Debug, Clone)]
pub struct FixedArgs {
    pub source: CodeSource,
    pub page: Option<u32>,
    pub origin: Option<[f64; 2]>,
    pub format: OutputFormat,
}

/// Place codes page by page on the fixed raster.
pub fn fixed(ctx: &Context, args: &FixedArgs) -> Result<()> {
    let config = source::load_config(ctx)?;
    let raster = config.fixed_raster();
    let origin = args.origin.map(Point::from).unwrap_or_else(|| config.fixed_origin());
    let catalog = source::resolve_catalog(ctx, &args.source, &config)?;

    let pages = match args.page {
        Some(number) => vec![catalog.page(number)?],
        None => catalog.pages().iter().collect(),
    };

    let mut layout =
        PagedLayout::new(raster, origin).context("Invalid fixed raster settings")?;
    for page in pages {
        output::debug(
            format!("page {} at {}", page.number(), layout.cursor()),
            ctx.verbosity(),
        );
        layout.place_page(page.codes());
    }

    let batch = layout.finish();
    source::emit(ctx, &batch, args.format)
}
