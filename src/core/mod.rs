//! core
//!
//! Core domain types, layout policies, and supporting data.
//!
//! # Modules
//!
//! - [`types`] - Strong types: SymbolCode, Point, Bounds
//! - [`layout`] - Fixed, area-fit and page-fit raster placement
//! - [`catalog`] - Paged symbol code catalogs loaded from JSON
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid rectangles from reaching layout code
//! - Schemas are strict and self-describing
//! - All placement is deterministic

pub mod catalog;
pub mod config;
pub mod layout;
pub mod types;
