//! core::config::schema
//!
//! Configuration schema types.
//!
//! The same schema is used for the global and the project config file.
//! Every field is optional; unset fields fall through to the next scope
//! and finally to built-in defaults.
//!
//! # Validation
//!
//! Values are validated after parsing so that a bad file fails at load
//! time rather than producing malformed placements later.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// One config file.
///
/// # Example
///
/// ```toml
/// catalog = "symbols/sidc.json"
///
/// [fixed]
/// columns = 4
/// step = 100.0
/// secondary_offset = 50.0
/// page_shift = 500.0
/// origin = [-13044889.0, 4036331.0]
///
/// [area]
/// center = [-117.1825, 34.0556]
/// radius = 0.01
///
/// [page]
/// columns = 4
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Default catalog file
    pub catalog: Option<PathBuf>,

    /// Fixed raster settings
    pub fixed: Option<FixedSection>,

    /// Area-fit settings
    pub area: Option<AreaSection>,

    /// Page-fit settings
    pub page: Option<PageSection>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(fixed) = &self.fixed {
            fixed.validate()?;
        }
        if let Some(area) = &self.area {
            area.validate()?;
        }
        if let Some(page) = &self.page {
            page.validate()?;
        }
        Ok(())
    }
}

/// `[fixed]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FixedSection {
    /// Cells per row
    pub columns: Option<usize>,

    /// Cell spacing on both axes
    pub step: Option<f64>,

    /// Distance from primary to secondary point
    pub secondary_offset: Option<f64>,

    /// Origin shift between pages
    pub page_shift: Option<f64>,

    /// Origin of the first page
    pub origin: Option<[f64; 2]>,
}

impl FixedSection {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == Some(0) {
            return Err(ConfigError::InvalidValue(
                "fixed.columns must be at least 1".to_string(),
            ));
        }
        if let Some(step) = self.step {
            require_positive("fixed.step", step)?;
        }
        if let Some(offset) = self.secondary_offset {
            require_positive("fixed.secondary_offset", offset)?;
        }
        if let Some(shift) = self.page_shift {
            require_finite("fixed.page_shift", shift)?;
        }
        if let Some([x, y]) = self.origin {
            require_finite("fixed.origin", x)?;
            require_finite("fixed.origin", y)?;
        }
        Ok(())
    }
}

/// `[area]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AreaSection {
    /// Center of the area of interest
    pub center: Option<[f64; 2]>,

    /// Half-width of the square area of interest
    pub radius: Option<f64>,
}

impl AreaSection {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(radius) = self.radius {
            require_positive("area.radius", radius)?;
        }
        if let Some([x, y]) = self.center {
            require_finite("area.center", x)?;
            require_finite("area.center", y)?;
        }
        Ok(())
    }
}

/// `[page]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PageSection {
    /// Columns spread across the area of interest
    pub columns: Option<usize>,
}

impl PageSection {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == Some(0) {
            return Err(ConfigError::InvalidValue(
                "page.columns must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn require_finite(key: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue(format!(
            "{key} must be a finite number, got {value}"
        )))
    }
}

fn require_positive(key: &str, value: f64) -> Result<(), ConfigError> {
    require_finite(key, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue(format!(
            "{key} must be positive, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full() {
        let toml = r#"
            catalog = "symbols/sidc.json"

            [fixed]
            columns = 4
            step = 100.0
            secondary_offset = 50.0
            page_shift = 500.0
            origin = [1.0, 2.0]

            [area]
            center = [-117.1825, 34.0556]
            radius = 0.01

            [page]
            columns = 5
        "#;

        let config: FileConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.catalog, Some(PathBuf::from("symbols/sidc.json")));
        let fixed = config.fixed.as_ref().unwrap();
        assert_eq!(fixed.columns, Some(4));
        assert_eq!(fixed.origin, Some([1.0, 2.0]));
        assert_eq!(config.area.as_ref().unwrap().radius, Some(0.01));
        assert_eq!(config.page.as_ref().unwrap().columns, Some(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_empty() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn unknown_fields_rejected() {
        let result: Result<FileConfig, _> = toml::from_str("[fixed]\nrows = 3\n");
        assert!(result.is_err());
    }

    #[test]
    fn zero_columns_invalid() {
        let config = FileConfig {
            fixed: Some(FixedSection {
                columns: Some(0),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let page = PageSection { columns: Some(0) };
        assert!(page.validate().is_err());
    }

    #[test]
    fn non_positive_values_invalid() {
        let step = FixedSection {
            step: Some(0.0),
            ..Default::default()
        };
        assert!(step.validate().is_err());

        let offset = FixedSection {
            secondary_offset: Some(-5.0),
            ..Default::default()
        };
        assert!(offset.validate().is_err());

        let radius = AreaSection {
            radius: Some(0.0),
            ..Default::default()
        };
        assert!(radius.validate().is_err());
    }

    #[test]
    fn negative_page_shift_allowed() {
        let fixed = FixedSection {
            page_shift: Some(-500.0),
            ..Default::default()
        };
        assert!(fixed.validate().is_ok());
    }

    #[test]
    fn serialize_roundtrip_is_stable() {
        let config = FileConfig {
            catalog: Some(PathBuf::from("a.json")),
            area: Some(AreaSection {
                center: Some([1.0, 2.0]),
                radius: Some(3.0),
            }),
            ..Default::default()
        };
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: FileConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
