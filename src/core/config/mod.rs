//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! symgrid has two configuration scopes:
//! - **Global**: User-level settings
//! - **Project**: Per-directory overrides
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Project config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$SYMGRID_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/symgrid/config.toml`
//! 3. `~/.symgrid/config.toml` (canonical write location)
//!
//! # Project Config Location
//!
//! `.symgrid/config.toml` in the project directory.
//!
//! # Example
//!
//! ```no_run
//! use symgrid::core::config::Config;
//! use std::path::Path;
//!
//! let result = Config::load(Some(Path::new("/path/to/project"))).unwrap();
//! let config = result.config;
//!
//! println!("Columns: {}", config.fixed_raster().columns);
//! println!("Area: {}", config.area_bounds().unwrap());
//! ```

pub mod schema;

pub use schema::{AreaSection, FileConfig, FixedSection, PageSection};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::layout::{FixedRaster, PAGE_COLUMNS};
use crate::core::types::{Bounds, Point, TypeError};

/// Environment variable naming an explicit global config file.
pub const CONFIG_ENV: &str = "SYMGRID_CONFIG";

/// Half-width of the default area of interest.
pub const DEFAULT_AREA_RADIUS: f64 = 1000.0;

/// Keys accepted by [`Config::get_key`] and [`FileConfig::set_key`].
pub const KEYS: &[&str] = &[
    "catalog",
    "fixed.columns",
    "fixed.step",
    "fixed.secondary_offset",
    "fixed.page_shift",
    "fixed.origin",
    "area.center",
    "area.radius",
    "page.columns",
];

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("unknown configuration key '{0}'")]
    UnknownKey(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence automatically: project values override
/// global values, which override defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: FileConfig,
    /// Project configuration (if found)
    pub project: Option<FileConfig>,
    global_path: Option<PathBuf>,
    project_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `project_dir` is provided, also loads that directory's config.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed or hold
    /// invalid values. Missing config files are not an error.
    pub fn load(project_dir: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        let global_path = Self::find_global();
        let mut result = Self::load_from(global_path.as_deref(), project_dir)?;

        if let Some(path) = std::env::var_os(CONFIG_ENV).map(PathBuf::from) {
            if !path.exists() {
                result.warnings.push(ConfigWarning {
                    message: format!("${CONFIG_ENV} names a missing file, using default locations"),
                    path,
                });
            }
        }
        Ok(result)
    }

    /// Load configuration from an explicit global file and project dir.
    pub fn load_from(
        global_file: Option<&Path>,
        project_dir: Option<&Path>,
    ) -> Result<ConfigLoadResult, ConfigError> {
        let (global, global_path) = match global_file {
            Some(path) if path.exists() => (Self::read_config(path)?, Some(path.to_path_buf())),
            _ => (FileConfig::default(), None),
        };

        let (project, project_path) = match project_dir {
            Some(dir) => Self::load_project(dir)?,
            None => (None, None),
        };

        global.validate()?;
        if let Some(ref p) = project {
            p.validate()?;
        }

        Ok(ConfigLoadResult {
            config: Config {
                global,
                project,
                global_path,
                project_path,
            },
            warnings: Vec::new(),
        })
    }

    /// Locate the global config file, if any exists.
    fn find_global() -> Option<PathBuf> {
        // 1. Check $SYMGRID_CONFIG
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. Check $XDG_CONFIG_HOME/symgrid/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("symgrid/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Check ~/.symgrid/config.toml
        dirs::home_dir()
            .map(|home| home.join(".symgrid/config.toml"))
            .filter(|path| path.exists())
    }

    /// Load the project config file, if present.
    fn load_project(dir: &Path) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigError> {
        let path = Self::project_config_path(dir);
        if !path.exists() {
            return Ok((None, None));
        }
        let config = Self::read_config(&path)?;
        Ok((Some(config), Some(path)))
    }

    /// Read and parse a config file.
    fn read_config(path: &Path) -> Result<FileConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the canonical path for global config.
    ///
    /// Returns `~/.symgrid/config.toml`.
    pub fn global_config_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".symgrid/config.toml"))
    }

    /// Path `config set --global` writes to.
    ///
    /// `$SYMGRID_CONFIG` if set, otherwise [`Config::global_config_path`].
    pub fn global_write_path() -> Result<PathBuf, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Ok(PathBuf::from(path)),
            None => Self::global_config_path(),
        }
    }

    /// Get the canonical path for project config.
    pub fn project_config_path(dir: &Path) -> PathBuf {
        dir.join(".symgrid/config.toml")
    }

    /// Write project config atomically.
    ///
    /// Creates parent directories if needed. Uses atomic write
    /// (write to temp file, then rename) to prevent corruption.
    pub fn write_project(dir: &Path, config: &FileConfig) -> Result<PathBuf, ConfigError> {
        config.validate()?;
        let path = Self::project_config_path(dir);
        Self::write_config_atomic(&path, config)?;
        Ok(path)
    }

    /// Write global config atomically to `path`.
    pub fn write_global(path: &Path, config: &FileConfig) -> Result<(), ConfigError> {
        config.validate()?;
        Self::write_config_atomic(path, config)
    }

    /// Write a config file atomically.
    fn write_config_atomic(path: &Path, config: &FileConfig) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let contents =
            toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        // Temp file in the same directory so the rename stays on one filesystem
        let temp_path = path.with_extension("toml.tmp");
        let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(contents.as_bytes())
            .map_err(|e| ConfigError::WriteError {
                path: temp_path.clone(),
                source: e,
            })?;

        file.sync_all().map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Pick the first value set in project, then global scope.
    fn resolve<T>(&self, get: impl Fn(&FileConfig) -> Option<T>) -> Option<T> {
        self.project.as_ref().and_then(&get).or_else(|| get(&self.global))
    }

    /// Default catalog file, if configured.
    pub fn catalog(&self) -> Option<PathBuf> {
        self.resolve(|c| c.catalog.clone())
    }

    /// Fixed raster with per-field precedence applied.
    pub fn fixed_raster(&self) -> FixedRaster {
        let defaults = FixedRaster::default();
        let fixed = |get: fn(&FixedSection) -> Option<f64>| {
            self.resolve(|c| c.fixed.as_ref().and_then(get))
        };

        FixedRaster {
            columns: self
                .resolve(|c| c.fixed.as_ref().and_then(|f| f.columns))
                .unwrap_or(defaults.columns),
            step: fixed(|f| f.step).unwrap_or(defaults.step),
            secondary_offset: fixed(|f| f.secondary_offset).unwrap_or(defaults.secondary_offset),
            page_shift: fixed(|f| f.page_shift).unwrap_or(defaults.page_shift),
        }
    }

    /// Origin of the first fixed-raster page.
    ///
    /// Defaults to `(0, 0)`.
    pub fn fixed_origin(&self) -> Point {
        self.resolve(|c| c.fixed.as_ref().and_then(|f| f.origin))
            .map(Point::from)
            .unwrap_or_default()
    }

    /// Center of the area of interest.
    ///
    /// Defaults to `(0, 0)`.
    pub fn area_center(&self) -> Point {
        self.resolve(|c| c.area.as_ref().and_then(|a| a.center))
            .map(Point::from)
            .unwrap_or_default()
    }

    /// Half-width of the area of interest.
    ///
    /// Defaults to [`DEFAULT_AREA_RADIUS`].
    pub fn area_radius(&self) -> f64 {
        self.resolve(|c| c.area.as_ref().and_then(|a| a.radius))
            .unwrap_or(DEFAULT_AREA_RADIUS)
    }

    /// Column count of the page-fit raster.
    ///
    /// Defaults to [`PAGE_COLUMNS`].
    pub fn page_columns(&self) -> usize {
        self.resolve(|c| c.page.as_ref().and_then(|p| p.columns))
            .unwrap_or(PAGE_COLUMNS)
    }

    /// Square area of interest around the configured center.
    pub fn area_bounds(&self) -> Result<Bounds, TypeError> {
        Bounds::around(self.area_center(), self.area_radius())
    }

    /// Effective value of `key` as display text.
    pub fn get_key(&self, key: &str) -> Result<String, ConfigError> {
        let raster = self.fixed_raster();
        let value = match key {
            "catalog" => self
                .catalog()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            "fixed.columns" => raster.columns.to_string(),
            "fixed.step" => raster.step.to_string(),
            "fixed.secondary_offset" => raster.secondary_offset.to_string(),
            "fixed.page_shift" => raster.page_shift.to_string(),
            "fixed.origin" => format_pair(self.fixed_origin()),
            "area.center" => format_pair(self.area_center()),
            "area.radius" => self.area_radius().to_string(),
            "page.columns" => self.page_columns().to_string(),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        };
        Ok(value)
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded project config file.
    pub fn project_config_loaded_from(&self) -> Option<&Path> {
        self.project_path.as_deref()
    }
}

impl FileConfig {
    /// Set `key` from its text form.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownKey` for keys outside [`KEYS`] and
    /// `ConfigError::InvalidValue` if the value does not parse or validate.
    /// On error `self` is left unchanged.
    pub fn set_key(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut updated = self.clone();
        updated.assign_key(key, value)?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    fn assign_key(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "catalog" => self.catalog = Some(PathBuf::from(value)),
            "fixed.columns" => {
                self.fixed.get_or_insert_with(Default::default).columns =
                    Some(parse_count(key, value)?);
            }
            "fixed.step" => {
                let value = parse_number(key, value)?;
                self.fixed.get_or_insert_with(Default::default).step = Some(value);
            }
            "fixed.secondary_offset" => {
                self.fixed.get_or_insert_with(Default::default).secondary_offset =
                    Some(parse_number(key, value)?);
            }
            "fixed.page_shift" => {
                self.fixed.get_or_insert_with(Default::default).page_shift =
                    Some(parse_number(key, value)?);
            }
            "fixed.origin" => {
                let value = parse_pair(key, value)?;
                self.fixed.get_or_insert_with(Default::default).origin = Some(value);
            }
            "area.center" => {
                let value = parse_pair(key, value)?;
                self.area.get_or_insert_with(Default::default).center = Some(value);
            }
            "area.radius" => {
                let value = parse_number(key, value)?;
                self.area.get_or_insert_with(Default::default).radius = Some(value);
            }
            "page.columns" => {
                self.page.get_or_insert_with(Default::default).columns =
                    Some(parse_count(key, value)?);
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}

fn format_pair(p: Point) -> String {
    format!("{},{}", p.x, p.y)
}

fn parse_count(key: &str, value: &str) -> Result<usize, ConfigError> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|e| ConfigError::InvalidValue(format!("{key}: '{value}' is not a count: {e}")))
}

fn parse_number(key: &str, value: &str) -> Result<f64, ConfigError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|e| ConfigError::InvalidValue(format!("{key}: '{value}' is not a number: {e}")))
}

fn parse_pair(key: &str, value: &str) -> Result<[f64; 2], ConfigError> {
    match value.split_once(',') {
        Some((x, y)) => Ok([parse_number(key, x)?, parse_number(key, y)?]),
        None => Err(ConfigError::InvalidValue(format!(
            "{key}: expected 'X,Y', got '{value}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_empty_defaults() {
        let result = Config::load_from(None, None).unwrap();
        let config = result.config;

        assert!(config.catalog().is_none());
        assert_eq!(config.fixed_raster(), FixedRaster::default());
        assert_eq!(config.fixed_origin(), Point::new(0.0, 0.0));
        assert_eq!(config.area_radius(), DEFAULT_AREA_RADIUS);
        assert!(config.global_config_loaded_from().is_none());
    }

    #[test]
    fn load_global_file() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");

        fs::write(
            &config_path,
            r#"
            [fixed]
            columns = 6
            "#,
        )
        .unwrap();

        let result = Config::load_from(Some(config_path.as_path()), None).unwrap();
        let config = result.config;

        assert_eq!(config.fixed_raster().columns, 6);
        assert_eq!(config.fixed_raster().step, 100.0);
        assert_eq!(config.global_config_loaded_from(), Some(config_path.as_path()));
    }

    #[test]
    fn missing_global_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let absent = temp.path().join("absent.toml");
        let result = Config::load_from(Some(absent.as_path()), None).unwrap();
        assert!(result.config.global_config_loaded_from().is_none());
    }

    #[test]
    fn load_project_config() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".symgrid");
        fs::create_dir_all(&dir).unwrap();

        fs::write(
            dir.join("config.toml"),
            r#"
            catalog = "sidc.json"
            [area]
            center = [10.0, 20.0]
            radius = 5.0
            "#,
        )
        .unwrap();

        let result = Config::load_from(None, Some(temp.path())).unwrap();
        let config = result.config;

        assert_eq!(config.catalog(), Some(PathBuf::from("sidc.json")));
        assert_eq!(
            config.area_bounds().unwrap(),
            Bounds::new(5.0, 15.0, 15.0, 25.0).unwrap()
        );
        assert!(result.warnings.is_empty());
    }

    fn write_project_file(dir: &Path, contents: &str) {
        let path = Config::project_config_path(dir);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn only_canonical_project_location_is_read() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("symgrid.toml"), "catalog = \"a.json\"").unwrap();

        let result = Config::load_from(None, Some(temp.path())).unwrap();

        assert!(result.config.catalog().is_none());
        assert!(result.config.project_config_loaded_from().is_none());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn invalid_value_rejected() {
        let temp = TempDir::new().unwrap();
        write_project_file(temp.path(), "[fixed]\nstep = -1.0\n");

        let result = Config::load_from(None, Some(temp.path()));
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn unparsable_file_rejected() {
        let temp = TempDir::new().unwrap();
        write_project_file(temp.path(), "catalog = [");

        let result = Config::load_from(None, Some(temp.path()));
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn precedence_project_overrides_global() {
        let config = Config {
            global: FileConfig {
                fixed: Some(FixedSection {
                    columns: Some(8),
                    step: Some(10.0),
                    ..Default::default()
                }),
                ..Default::default()
            },
            project: Some(FileConfig {
                fixed: Some(FixedSection {
                    step: Some(25.0),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            global_path: None,
            project_path: None,
        };

        let raster = config.fixed_raster();
        assert_eq!(raster.columns, 8);
        assert_eq!(raster.step, 25.0);
        assert_eq!(raster.secondary_offset, 50.0);
    }

    #[test]
    fn write_project_atomic() {
        let temp = TempDir::new().unwrap();

        let mut file = FileConfig::default();
        file.set_key("fixed.columns", "3").unwrap();
        file.set_key("fixed.origin", "1.5,-2").unwrap();

        let path = Config::write_project(temp.path(), &file).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("toml.tmp").exists());

        let loaded = Config::load_from(None, Some(temp.path())).unwrap().config;
        assert_eq!(loaded.fixed_raster().columns, 3);
        assert_eq!(loaded.fixed_origin(), Point::new(1.5, -2.0));
    }

    #[test]
    fn set_key_validates() {
        let mut file = FileConfig::default();
        assert!(matches!(
            file.set_key("fixed.rows", "3"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(file.set_key("fixed.step", "abc").is_err());
        assert!(file.set_key("area.radius", "0").is_err());
        assert!(file.set_key("area.center", "1").is_err());
        assert!(file.set_key("page.columns", "0").is_err());
        assert_eq!(file, FileConfig::default());
    }

    #[test]
    fn rejected_value_leaves_config_unchanged() {
        let mut file = FileConfig::default();
        file.set_key("fixed.step", "20").unwrap();
        let before = file.clone();

        assert!(matches!(
            file.set_key("fixed.step", "-1"),
            Err(ConfigError::InvalidValue(_))
        ));
        assert_eq!(file, before);
        assert_eq!(file.fixed.as_ref().unwrap().step, Some(20.0));
    }

    #[test]
    fn write_global_to_explicit_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/config.toml");

        let mut file = FileConfig::default();
        file.set_key("page.columns", "6").unwrap();
        Config::write_global(&path, &file).unwrap();

        let loaded = Config::load_from(Some(path.as_path()), None).unwrap().config;
        assert_eq!(loaded.page_columns(), 6);
        assert_eq!(loaded.global_config_loaded_from(), Some(path.as_path()));
    }

    #[test]
    fn get_key_reports_effective_values() {
        let config = Config::default();
        assert_eq!(config.get_key("fixed.columns").unwrap(), "4");
        assert_eq!(config.get_key("fixed.page_shift").unwrap(), "500");
        assert_eq!(config.get_key("area.center").unwrap(), "0,0");
        assert_eq!(config.get_key("page.columns").unwrap(), "4");
        assert_eq!(config.get_key("catalog").unwrap(), "");
        assert!(config.get_key("nope").is_err());
    }

    #[test]
    fn every_key_is_gettable() {
        let config = Config::default();
        for key in KEYS {
            assert!(config.get_key(key).is_ok(), "{key}");
        }
    }
}
