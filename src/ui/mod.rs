//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Verbosity-aware messages and placement formatting
//!
//! # Design
//!
//! All terminal output goes through this module so quiet and debug modes
//! are honoured consistently. Data goes to stdout; diagnostics to stderr.

pub mod output;
