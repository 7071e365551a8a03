//! page command - Lay out one catalog page across the area of interest

use anyhow::{Context as _, Result};
use serde::Serialize;

use crate::cli::args::{CodeSource, OutputFormat};
use crate::cli::Context;
use crate::core::layout::{page_fit_raster, page_grid, PageFitLayout};
use crate::ui::output;

use super::source;

/// Arguments for [`page`].
#[derive(Debug, Clone)]
pub struct PageArgs {
    pub source: CodeSource,
    pub page: Option<u32>,
    pub columns: Option<usize>,
    pub bounds: Option<[f64; 4]>,
    pub center: Option<[f64; 2]>,
    pub radius: Option<f64>,
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct PageOutput<'a> {
    page: u32,
    previous: Option<u32>,
    next: Option<u32>,
    #[serde(flatten)]
    layout: &'a PageFitLayout,
}

/// Lay out a single page with label and title anchors.
pub fn page(ctx: &Context, args: &PageArgs) -> Result<()> {
    let config = source::load_config(ctx)?;
    let bounds = source::area_of_interest(&config, args.bounds, args.center, args.radius)?;
    let columns = args.columns.unwrap_or_else(|| config.page_columns());

    let catalog = source::resolve_catalog(ctx, &args.source, &config)?;
    let page = match args.page {
        Some(number) => catalog.page(number)?,
        None => catalog.first_page()?,
    };
    let number = page.number();

    if let Some(grid) = page_grid(page.codes().len(), columns, &bounds) {
        output::debug(
            format!(
                "page {} in {}: {} columns x {} rows, steps {} x {}",
                number,
                bounds,
                columns,
                grid.rows(),
                grid.x_step(),
                grid.y_step()
            ),
            ctx.verbosity(),
        );
    }

    let layout =
        page_fit_raster(page.codes(), &bounds, columns).context("Failed to lay out page")?;
    let previous = catalog.previous_page(number);
    let next = catalog.next_page(number);

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&PageOutput {
                page: number,
                previous,
                next,
                layout: &layout,
            })
            .context("Failed to serialize page")?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            output::print(
                format!("Page: {} (title at {})", number, layout.title),
                ctx.verbosity(),
            );
            println!("{}", output::format_page_table(&layout));
            output::print(output::format_page_links(previous, next), ctx.verbosity());
        }
    }
    Ok(())
}
