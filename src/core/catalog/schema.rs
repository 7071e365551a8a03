//! core::catalog::schema
//!
//! On-disk catalog format.
//!
//! # Paged Catalog
//!
//! ```json
//! [
//!   { "page": 91, "codes": ["SUPP-----------", "SFPP-----------"] },
//!   { "page": 92, "codes": ["SUAPM----------"] }
//! ]
//! ```
//!
//! # Flat Catalog
//!
//! A bare array of codes is read as a single page numbered 1.
//!
//! ```json
//! ["SUPP-----------", "SFPP-----------"]
//! ```

use serde::{Deserialize, Serialize};

use crate::core::types::SymbolCode;

/// Page number assigned to a flat catalog.
pub const FLAT_PAGE_NUMBER: u32 = 1;

/// Top-level catalog document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CatalogFile {
    Paged(Vec<PageEntry>),
    Flat(Vec<SymbolCode>),
}

/// One page of codes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageEntry {
    pub page: u32,
    pub codes: Vec<SymbolCode>,
}

impl CatalogFile {
    /// Normalize either form into page entries.
    pub fn into_pages(self) -> Vec<PageEntry> {
        match self {
            CatalogFile::Paged(pages) => pages,
            CatalogFile::Flat(codes) => vec![PageEntry {
                page: FLAT_PAGE_NUMBER,
                codes,
            }],
        }
    }
}
