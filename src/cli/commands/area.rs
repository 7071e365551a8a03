//! area command - Place codes on a raster fitted to a rectangle

use anyhow::{Context as _, Result};

use crate::cli::args::{CodeSource, OutputFormat};
use crate::cli::Context;
use crate::core::layout::{area_fit_raster, area_grid};
use crate::ui::output;

use super::source;

/// Arguments for [`area`].
#[derive(Debug, Clone)]
pub struct AreaArgs {
    pub source: CodeSource,
    pub count: usize,
    pub skip: usize,
    pub bounds: Option<[f64; 4]>,
    pub center: Option<[f64; 2]>,
    pub radius: Option<f64>,
    pub format: OutputFormat,
}

/// Place a selection of codes on a grid fitted to the area of interest.
pub fn area(ctx: &Context, args: &AreaArgs) -> Result<()> {
    let config = source::load_config(ctx)?;

    let bounds = source::area_of_interest(&config, args.bounds, args.center, args.radius)?;

    let catalog = source::resolve_catalog(ctx, &args.source, &config)?;
    let codes = catalog.select(args.count, args.skip);

    if let Some(grid) = area_grid(codes.len(), &bounds) {
        output::debug(
            format!(
                "area {}: {} columns x {} rows, spacing {}",
                bounds,
                grid.columns(),
                grid.rows(),
                grid.spacing()
            ),
            ctx.verbosity(),
        );
    }

    let batch = area_fit_raster(&codes, &bounds).context("Failed to lay out codes")?;
    source::emit(ctx, &batch, args.format)
}
