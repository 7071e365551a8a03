//! core::catalog
//!
//! Symbol code catalogs loaded from JSON files.
//!
//! # Overview
//!
//! A catalog is an ordered list of pages, each holding an ordered list of
//! codes. Page order is file order; page numbers are labels and must be
//! unique. See [`schema`] for the file format.
//!
//! Codes are opaque, so loading never rejects a code. Codes that are not
//! 15 characters long are reported as [`CatalogWarning`]s.
//!
//! # Example
//!
//! ```
//! use symgrid::core::catalog::Catalog;
//! use std::path::Path;
//!
//! let json = r#"[{"page": 91, "codes": ["SUPP-----------", "SFPP-----------"]},
//!               {"page": 92, "codes": ["SUAPM----------"]}]"#;
//! let result = Catalog::parse(json, Path::new("inline.json")).unwrap();
//! let catalog = result.catalog;
//!
//! assert_eq!(catalog.len(), 3);
//! assert_eq!(catalog.next_page(91), Some(92));
//! assert_eq!(catalog.page(92).unwrap().codes().len(), 1);
//! ```

pub mod schema;

pub use schema::{CatalogFile, PageEntry};

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::types::SymbolCode;

/// Errors from catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse catalog file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("page {page} appears more than once in the catalog")]
    DuplicatePage { page: u32 },

    #[error("page {0} not found in catalog")]
    PageNotFound(u32),

    #[error("catalog has no pages")]
    NoPages,
}

/// A suspicious but accepted catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogWarning {
    /// Page the code was found on.
    pub page: u32,
    /// The offending code.
    pub code: SymbolCode,
    /// The warning message.
    pub message: String,
}

/// Result of loading a catalog.
#[derive(Debug)]
pub struct CatalogLoadResult {
    /// The loaded catalog.
    pub catalog: Catalog,
    /// Any warnings generated during loading.
    pub warnings: Vec<CatalogWarning>,
}

/// One numbered page of codes.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPage {
    number: u32,
    codes: Vec<SymbolCode>,
}

impl CatalogPage {
    pub fn new(number: u32, codes: Vec<SymbolCode>) -> Self {
        Self { number, codes }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn codes(&self) -> &[SymbolCode] {
        &self.codes
    }
}

/// An ordered, paged collection of symbol codes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pages: Vec<CatalogPage>,
}

impl Catalog {
    /// Build a catalog from pages, rejecting duplicate page numbers.
    pub fn from_pages(pages: Vec<CatalogPage>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for page in &pages {
            if !seen.insert(page.number) {
                return Err(CatalogError::DuplicatePage { page: page.number });
            }
        }
        Ok(Self { pages })
    }

    /// A single-page catalog holding `codes`.
    pub fn from_codes(codes: Vec<SymbolCode>) -> Self {
        Self {
            pages: vec![CatalogPage::new(schema::FLAT_PAGE_NUMBER, codes)],
        }
    }

    /// Load a catalog file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if it
    /// repeats a page number.
    pub fn load(path: &Path) -> Result<CatalogLoadResult, CatalogError> {
        let contents = fs::read_to_string(path).map_err(|e| CatalogError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&contents, path)
    }

    /// Parse catalog JSON. `path` is only used in error messages.
    pub fn parse(contents: &str, path: &Path) -> Result<CatalogLoadResult, CatalogError> {
        let file: CatalogFile =
            serde_json::from_str(contents).map_err(|e| CatalogError::ParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let pages = file
            .into_pages()
            .into_iter()
            .map(|entry| CatalogPage::new(entry.page, entry.codes))
            .collect();
        let catalog = Self::from_pages(pages)?;
        let warnings = catalog.check_codes();

        Ok(CatalogLoadResult { catalog, warnings })
    }

    /// Flag codes that are not the usual 15 characters.
    fn check_codes(&self) -> Vec<CatalogWarning> {
        self.pages
            .iter()
            .flat_map(|page| {
                page.codes
                    .iter()
                    .filter(|code| !code.is_standard_length())
                    .map(move |code| CatalogWarning {
                        page: page.number,
                        code: code.clone(),
                        message: format!(
                            "possible invalid code '{}' on page {}: length {}, expected {}",
                            code,
                            page.number,
                            code.as_str().chars().count(),
                            SymbolCode::STANDARD_LEN
                        ),
                    })
            })
            .collect()
    }

    pub fn pages(&self) -> &[CatalogPage] {
        &self.pages
    }

    /// Look up a page by number.
    pub fn page(&self, number: u32) -> Result<&CatalogPage, CatalogError> {
        self.pages
            .iter()
            .find(|p| p.number == number)
            .ok_or(CatalogError::PageNotFound(number))
    }

    /// The first page in file order.
    pub fn first_page(&self) -> Result<&CatalogPage, CatalogError> {
        self.pages.first().ok_or(CatalogError::NoPages)
    }

    pub fn page_numbers(&self) -> Vec<u32> {
        self.pages.iter().map(|p| p.number).collect()
    }

    /// All codes in page order.
    pub fn codes(&self) -> Vec<SymbolCode> {
        self.pages
            .iter()
            .flat_map(|p| p.codes.iter().cloned())
            .collect()
    }

    /// Total number of codes across all pages.
    pub fn len(&self) -> usize {
        self.pages.iter().map(|p| p.codes.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Take `count` codes after skipping `skip`, in page order.
    ///
    /// A `count` of zero takes everything after `skip`.
    pub fn select(&self, count: usize, skip: usize) -> Vec<SymbolCode> {
        let rest = self.pages.iter().flat_map(|p| p.codes.iter()).skip(skip);
        if count == 0 {
            rest.cloned().collect()
        } else {
            rest.take(count).cloned().collect()
        }
    }

    /// Page after `number` in file order.
    pub fn next_page(&self, number: u32) -> Option<u32> {
        let index = self.position(number)?;
        self.pages.get(index + 1).map(|p| p.number)
    }

    /// Page before `number` in file order.
    pub fn previous_page(&self, number: u32) -> Option<u32> {
        let index = self.position(number)?;
        index
            .checked_sub(1)
            .and_then(|i| self.pages.get(i))
            .map(|p| p.number)
    }

    fn position(&self, number: u32) -> Option<usize> {
        self.pages.iter().position(|p| p.number == number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Catalog {
        let json = r#"[
            {"page": 91, "codes": ["SUPP-----------", "SFPP-----------", "SNPP-----------"]},
            {"page": 92, "codes": ["SUAPM----------", "SFAPM----------"]},
            {"page": 95, "codes": ["SUAPMFJ--------"]}
        ]"#;
        Catalog::parse(json, Path::new("sample.json")).unwrap().catalog
    }

    #[test]
    fn load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sidc.json");
        fs::write(&path, r#"[{"page": 1, "codes": ["SUPP-----------"]}]"#).unwrap();

        let result = Catalog::load(&path).unwrap();
        assert_eq!(result.catalog.len(), 1);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn missing_file_is_read_error() {
        let temp = TempDir::new().unwrap();
        let err = Catalog::load(&temp.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, CatalogError::ReadError { .. }));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = Catalog::parse("{not json", Path::new("x.json")).unwrap_err();
        assert!(matches!(err, CatalogError::ParseError { .. }));
        assert!(err.to_string().contains("x.json"));
    }

    #[test]
    fn duplicate_pages_rejected() {
        let json = r#"[{"page": 1, "codes": []}, {"page": 1, "codes": []}]"#;
        let err = Catalog::parse(json, Path::new("dup.json")).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicatePage { page: 1 }));
    }

    #[test]
    fn short_codes_warn() {
        let json = r#"["SUPP-----------", "BAD"]"#;
        let result = Catalog::parse(json, Path::new("flat.json")).unwrap();
        assert_eq!(result.catalog.len(), 2);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].code, SymbolCode::new("BAD"));
        assert!(result.warnings[0].message.contains("possible invalid code"));
    }

    #[test]
    fn codes_in_page_order() {
        let codes = sample().codes();
        assert_eq!(codes.len(), 6);
        assert_eq!(codes[0].as_str(), "SUPP-----------");
        assert_eq!(codes[5].as_str(), "SUAPMFJ--------");
    }

    #[test]
    fn page_lookup() {
        let catalog = sample();
        assert_eq!(catalog.page(92).unwrap().codes().len(), 2);
        assert!(matches!(catalog.page(7), Err(CatalogError::PageNotFound(7))));
        assert_eq!(catalog.page_numbers(), vec![91, 92, 95]);
        assert_eq!(catalog.first_page().unwrap().number(), 91);
    }

    #[test]
    fn select_subsets() {
        let catalog = sample();
        assert_eq!(catalog.select(0, 0).len(), 6);
        assert_eq!(catalog.select(2, 0).len(), 2);

        let picked = catalog.select(2, 2);
        assert_eq!(picked[0].as_str(), "SNPP-----------");
        assert_eq!(picked[1].as_str(), "SUAPM----------");

        assert_eq!(catalog.select(0, 4).len(), 2);
        assert!(catalog.select(3, 10).is_empty());
    }

    #[test]
    fn page_navigation() {
        let catalog = sample();
        assert_eq!(catalog.next_page(91), Some(92));
        assert_eq!(catalog.next_page(92), Some(95));
        assert_eq!(catalog.next_page(95), None);
        assert_eq!(catalog.previous_page(91), None);
        assert_eq!(catalog.previous_page(95), Some(92));
        assert_eq!(catalog.next_page(1), None);
    }

    #[test]
    fn empty_catalog() {
        let result = Catalog::parse("[]", Path::new("empty.json")).unwrap();
        assert!(result.catalog.is_empty());
        assert!(result.catalog.pages().is_empty());
        assert!(matches!(result.catalog.first_page(), Err(CatalogError::NoPages)));
    }

    #[test]
    fn from_codes_is_single_page() {
        let catalog = Catalog::from_codes(vec![SymbolCode::new("A")]);
        assert_eq!(catalog.page_numbers(), vec![1]);
    }
}
