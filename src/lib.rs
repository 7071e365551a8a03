//! symgrid - Grid placement of military symbol codes
//!
//! symgrid lays out lists of symbol identification codes (SIDCs) on a
//! planar grid so that a map renderer can draw each code twice, side by
//! side, and the two presentations can be compared.
//!
//! # Architecture
//!
//! - [`core`] - Domain types, layout policies, catalogs, and configuration
//! - [`cli`] - Command-line interface layer (parses args, prints placements)
//! - [`ui`] - Output formatting and verbosity
//!
//! # Layout Invariants
//!
//! 1. Every input code produces exactly one placement, in input order
//! 2. A placement's secondary point shares its primary's y and lies to its right
//! 3. Layout functions are pure and deterministic

pub mod cli;
pub mod core;
pub mod ui;
