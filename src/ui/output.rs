//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Messages respect the quiet and debug flags. Placement batches render as
//! an aligned table or, with `--format json`, as machine-readable JSON.

use std::fmt::Display;

use crate::core::layout::{PageFitLayout, Placement, PlacementBatch};

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print a debug message (only in debug mode).
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Format one placement as a table row.
pub fn format_placement(placement: &Placement) -> String {
    format!(
        "{:<16} {:>16.3} {:>16.3} {:>16.3} {:>16.3}",
        placement.code,
        placement.primary.x,
        placement.primary.y,
        placement.secondary.x,
        placement.secondary.y
    )
}

fn placement_header() -> String {
    format!(
        "{:<16} {:>16} {:>16} {:>16} {:>16}",
        "CODE", "PRIMARY_X", "PRIMARY_Y", "SECONDARY_X", "SECONDARY_Y"
    )
}

/// Format a batch as a table with a header row.
pub fn format_table(batch: &PlacementBatch) -> String {
    std::iter::once(placement_header())
        .chain(batch.iter().map(format_placement))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a batch as pretty JSON.
pub fn format_json(batch: &PlacementBatch) -> serde_json::Result<String> {
    serde_json::to_string_pretty(batch)
}

/// Format a page-fit layout as a table with label anchor columns.
pub fn format_page_table(layout: &PageFitLayout) -> String {
    let header = format!("{} {:>16} {:>16}", placement_header(), "LABEL_X", "LABEL_Y");
    let rows = layout.placements.iter().map(|p| {
        format!(
            "{} {:>16.3} {:>16.3}",
            format_placement(&p.placement),
            p.label.x,
            p.label.y
        )
    });
    std::iter::once(header).chain(rows).collect::<Vec<_>>().join("\n")
}

/// Describe the neighbouring pages, e.g. `previous: 91, next: none`.
pub fn format_page_links(previous: Option<u32>, next: Option<u32>) -> String {
    let show = |page: Option<u32>| page.map_or_else(|| "none".to_string(), |n| n.to_string());
    format!("previous: {}, next: {}", show(previous), show(next))
}
