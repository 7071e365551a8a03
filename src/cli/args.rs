//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// symgrid - Lay out military symbol codes on a comparison grid
#[derive(Parser, Debug)]
#[command(name = "symgrid")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if symgrid was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Place codes on the fixed paged raster
    #[command(
        name = "fixed",
        long_about = "Place codes on the fixed paged raster.\n\n\
            Codes fill rows of four cells, 100 units apart, growing downward from \
            the origin. Each catalog page is laid out in its own block; the origin \
            moves 500 units right after every page. Every code gets a primary point \
            and a secondary point 50 units to its right.",
        after_help = "\
EXAMPLES:
    # Place two codes at the origin
    symgrid fixed SUPP----------- SFPP-----------

    # Place every page of a catalog, starting at a given origin
    symgrid fixed --catalog sidc.json --origin=-13044889,4036331

    # Place a single catalog page as JSON
    symgrid fixed --catalog sidc.json --page 92 --format json"
    )]
    Fixed {
        #[command(flatten)]
        source: CodeSource,

        /// Place only this catalog page
        #[arg(long)]
        page: Option<u32>,

        /// Origin of the first page as X,Y
        #[arg(long, value_name = "X,Y", value_parser = parse_pair, allow_hyphen_values = true)]
        origin: Option<[f64; 2]>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Place codes on a raster fitted to a bounding rectangle
    #[command(
        name = "area",
        long_about = "Place codes on a raster fitted to a bounding rectangle.\n\n\
            The grid has ceil(sqrt(n)) cells across the rectangle's width and is \
            filled column by column from the top-left corner. Secondary points sit \
            half a cell to the right of their primary point.",
        after_help = "\
EXAMPLES:
    # Fit codes into an explicit rectangle
    symgrid area --bounds=-117.19,34.04,-117.17,34.07 --catalog sidc.json

    # Fit the first 100 catalog codes around a center point
    symgrid area --catalog sidc.json --count 100 --center=-117.1825,34.0556 --radius 0.01"
    )]
    Area {
        #[command(flatten)]
        source: CodeSource,

        /// Number of catalog codes to place (0 = all)
        #[arg(long, default_value_t = 0)]
        count: usize,

        /// Number of catalog codes to skip
        #[arg(long, default_value_t = 0)]
        skip: usize,

        /// Bounding rectangle as XMIN,YMIN,XMAX,YMAX
        #[arg(
            long,
            value_name = "XMIN,YMIN,XMAX,YMAX",
            value_parser = parse_rect,
            allow_hyphen_values = true,
            conflicts_with_all = ["center", "radius"]
        )]
        bounds: Option<[f64; 4]>,

        /// Center of a square area as X,Y
        #[arg(long, value_name = "X,Y", value_parser = parse_pair, allow_hyphen_values = true)]
        center: Option<[f64; 2]>,

        /// Half-width of the square area
        #[arg(long)]
        radius: Option<f64>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Lay out one catalog page across the area of interest
    #[command(
        name = "page",
        long_about = "Lay out one catalog page across the area of interest.\n\n\
            A fixed number of columns (default 4) is spread from the left edge to \
            the right edge; rows are spaced so the page fits between the top and \
            bottom edges. Codes fill column by column. Each code also gets a label \
            anchor, and the page title is anchored 25 units above the area. Without \
            --page the first catalog page is used.",
        after_help = "\
EXAMPLES:
    # Lay out the first catalog page around the configured center
    symgrid page --catalog sidc.json

    # Lay out page 92 in three columns inside a rectangle
    symgrid page --catalog sidc.json --page 92 --columns 3 --bounds=0,0,900,900"
    )]
    Page {
        #[command(flatten)]
        source: CodeSource,

        /// Catalog page to lay out (defaults to the first page)
        #[arg(long)]
        page: Option<u32>,

        /// Number of columns
        #[arg(long)]
        columns: Option<usize>,

        /// Bounding rectangle as XMIN,YMIN,XMAX,YMAX
        #[arg(
            long,
            value_name = "XMIN,YMIN,XMAX,YMAX",
            value_parser = parse_rect,
            allow_hyphen_values = true,
            conflicts_with_all = ["center", "radius"]
        )]
        bounds: Option<[f64; 4]>,

        /// Center of a square area as X,Y
        #[arg(long, value_name = "X,Y", value_parser = parse_pair, allow_hyphen_values = true)]
        center: Option<[f64; 2]>,

        /// Half-width of the square area
        #[arg(long)]
        radius: Option<f64>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// List catalog pages and code counts
    Catalog {
        /// Catalog file (defaults to the configured catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Get, set, or list configuration values
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Where the codes to place come from.
#[derive(Args, Debug, Clone, Default)]
pub struct CodeSource {
    /// Codes to place (instead of a catalog)
    #[arg(value_name = "CODE")]
    pub codes: Vec<String>,

    /// Catalog file (defaults to the configured catalog)
    #[arg(long, conflicts_with = "codes")]
    pub catalog: Option<PathBuf>,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Get the effective value of a key
    Get {
        /// Configuration key
        key: String,
    },
    /// Set a key in the project (or global) config
    Set {
        /// Configuration key
        key: String,
        /// Value to set
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Write to the global config instead of the project config
        #[arg(long)]
        global: bool,
    },
    /// List all effective values
    List,
}

/// Placement output format.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Supported shells for completion.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
}

fn parse_numbers<const N: usize>(value: &str) -> Result<[f64; N], String> {
    let parts: Vec<&str> = value.split(',').collect();
    if parts.len() != N {
        return Err(format!("expected {N} comma-separated numbers, got '{value}'"));
    }

    let mut out = [0.0; N];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = part
            .trim()
            .parse()
            .map_err(|e| format!("'{}' is not a number: {e}", part.trim()))?;
    }
    Ok(out)
}

fn parse_pair(value: &str) -> Result<[f64; 2], String> {
    parse_numbers(value)
}

fn parse_rect(value: &str) -> Result<[f64; 4], String> {
    parse_numbers(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_pair_values() {
        assert_eq!(parse_pair("1,2").unwrap(), [1.0, 2.0]);
        assert_eq!(parse_pair("-117.1825, 34.0556").unwrap(), [-117.1825, 34.0556]);
        assert!(parse_pair("1").is_err());
        assert!(parse_pair("1,x").is_err());
    }

    #[test]
    fn parse_rect_values() {
        assert_eq!(parse_rect("0,0,10,10").unwrap(), [0.0, 0.0, 10.0, 10.0]);
        assert!(parse_rect("0,0,10").is_err());
    }

    #[test]
    fn fixed_with_codes() {
        let cli = Cli::try_parse_from(["symgrid", "fixed", "A", "B", "--origin=-5,5"]).unwrap();
        match cli.command {
            Command::Fixed { source, origin, .. } => {
                assert_eq!(source.codes, vec!["A", "B"]);
                assert_eq!(origin, Some([-5.0, 5.0]));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn area_bounds_conflict_with_center() {
        let result = Cli::try_parse_from([
            "symgrid", "area", "A", "--bounds", "0,0,1,1", "--center", "0,0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn page_options() {
        let cli = Cli::try_parse_from([
            "symgrid", "page", "--catalog", "sidc.json", "--page", "92", "--columns", "3",
            "--bounds=-10,-10,10,10",
        ])
        .unwrap();
        match cli.command {
            Command::Page {
                page,
                columns,
                bounds,
                ..
            } => {
                assert_eq!(page, Some(92));
                assert_eq!(columns, Some(3));
                assert_eq!(bounds, Some([-10.0, -10.0, 10.0, 10.0]));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn config_set_global_flag() {
        let cli =
            Cli::try_parse_from(["symgrid", "config", "set", "--global", "page.columns", "6"])
                .unwrap();
        match cli.command {
            Command::Config {
                action: ConfigAction::Set { key, global, .. },
            } => {
                assert_eq!(key, "page.columns");
                assert!(global);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn codes_conflict_with_catalog() {
        let result = Cli::try_parse_from(["symgrid", "fixed", "A", "--catalog", "x.json"]);
        assert!(result.is_err());
    }
}
