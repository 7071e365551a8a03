//! Shared input resolution for placement commands.

use std::path::Path;

use anyhow::{bail, Context as _, Result};

use crate::cli::args::{CodeSource, OutputFormat};
use crate::cli::Context;
use crate::core::catalog::Catalog;
use crate::core::config::Config;
use crate::core::layout::PlacementBatch;
use crate::core::types::{Bounds, Point, SymbolCode};
use crate::ui::output;

/// Load merged configuration for the working directory, printing warnings.
pub(super) fn load_config(ctx: &Context) -> Result<Config> {
    let cwd = ctx.cwd()?;
    let result = Config::load(Some(cwd.as_path())).context("Failed to load config")?;

    for warning in &result.warnings {
        output::warn(
            format!("{} ({})", warning.message, warning.path.display()),
            ctx.verbosity(),
        );
    }
    if let Some(path) = result.config.global_config_loaded_from() {
        output::debug(format!("global config: {}", path.display()), ctx.verbosity());
    }
    if let Some(path) = result.config.project_config_loaded_from() {
        output::debug(format!("project config: {}", path.display()), ctx.verbosity());
    }

    Ok(result.config)
}

/// Area of interest from `--bounds`, else `--center`/`--radius` falling
/// back to the configured center and radius.
pub(super) fn area_of_interest(
    config: &Config,
    bounds: Option<[f64; 4]>,
    center: Option<[f64; 2]>,
    radius: Option<f64>,
) -> Result<Bounds> {
    match bounds {
        Some([x_min, y_min, x_max, y_max]) => Bounds::new(x_min, y_min, x_max, y_max),
        None => {
            let center = center.map(Point::from).unwrap_or_else(|| config.area_center());
            let radius = radius.unwrap_or_else(|| config.area_radius());
            Bounds::around(center, radius)
        }
    }
    .context("Invalid area of interest")
}

/// Load the catalog named on the command line or in config.
pub(super) fn load_catalog(
    ctx: &Context,
    explicit: Option<&Path>,
    config: &Config,
) -> Result<Catalog> {
    let path = match (explicit, config.catalog()) {
        (Some(path), _) => path.to_path_buf(),
        (None, Some(path)) => path,
        (None, None) => {
            bail!("No catalog given. Pass codes, --catalog, or set 'catalog' in config.")
        }
    };
    let path = ctx.resolve(&path)?;

    output::debug(format!("loading catalog {}", path.display()), ctx.verbosity());
    let result = Catalog::load(&path).context("Failed to load catalog")?;
    for warning in &result.warnings {
        output::warn(&warning.message, ctx.verbosity());
    }

    Ok(result.catalog)
}

/// Codes given on the command line as a single-page catalog, else the
/// catalog file.
pub(super) fn resolve_catalog(
    ctx: &Context,
    source: &CodeSource,
    config: &Config,
) -> Result<Catalog> {
    if source.codes.is_empty() {
        load_catalog(ctx, source.catalog.as_deref(), config)
    } else {
        let codes = source.codes.iter().map(SymbolCode::new).collect();
        Ok(Catalog::from_codes(codes))
    }
}

/// Print a batch in the requested format.
pub(super) fn emit(ctx: &Context, batch: &PlacementBatch, format: OutputFormat) -> Result<()> {
    let total = batch.len();
    for (i, placement) in batch.iter().enumerate() {
        output::debug(
            format!("placed {} of {}: {}", i + 1, total, placement.code),
            ctx.verbosity(),
        );
    }

    match format {
        OutputFormat::Json => {
            let json = output::format_json(batch).context("Failed to serialize placements")?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            // Table output is data, so it is printed even in quiet mode
            println!("{}", output::format_table(batch));
        }
    }
    Ok(())
}
