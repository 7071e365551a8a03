//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`SymbolCode`] - Opaque symbol identification code (SIDC)
//! - [`Point`] - Planar coordinate pair
//! - [`Bounds`] - Validated axis-aligned rectangle
//!
//! # Validation
//!
//! [`Bounds`] enforces validity at construction time, so a layout never
//! sees a rectangle with non-finite or inverted edges. Symbol codes are
//! opaque and accepted as-is.
//!
//! # Examples
//!
//! ```
//! use symgrid::core::types::{Bounds, Point, SymbolCode};
//!
//! let code = SymbolCode::new("SFGPUCI--------");
//! assert!(code.is_standard_length());
//!
//! let bounds = Bounds::new(0.0, 0.0, 10.0, 10.0).unwrap();
//! assert_eq!(bounds.center(), Point::new(5.0, 5.0));
//!
//! assert!(Bounds::new(10.0, 0.0, 5.0, 10.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq)]
pub enum TypeError {
    #[error("invalid bounds: {0}")]
    InvalidBounds(String),
}

/// An opaque symbol identification code.
///
/// Codes in the MIL-STD-2525 catalogs are 15 characters, but nothing here
/// interprets their structure. Any string is a valid code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolCode(String);

impl SymbolCode {
    /// Length of a code in the 2525 letter-sequence format.
    pub const STANDARD_LEN: usize = 15;

    /// Wrap a string as a symbol code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Get the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the code has the usual 15-character length.
    ///
    /// Only used to flag suspicious catalog entries.
    pub fn is_standard_length(&self) -> bool {
        self.0.chars().count() == Self::STANDARD_LEN
    }
}

impl From<String> for SymbolCode {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SymbolCode {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for SymbolCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SymbolCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A planar coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Return this point shifted by `dx` along the x-axis.
    pub fn offset_x(self, dx: f64) -> Self {
        Self::new(self.x + dx, self.y)
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

/// Raw rectangle edges as they appear in files, before validation.
#[derive(Debug, Clone, Copy, Deserialize)]
struct RawBounds {
    x_min: f64,
    y_min: f64,
    x_max: f64,
    y_max: f64,
}

/// A validated axis-aligned rectangle.
///
/// All edges are finite and `x_max > x_min`, `y_max > y_min`.
///
/// # Example
///
/// ```
/// use symgrid::core::types::{Bounds, Point};
///
/// let aoi = Bounds::around(Point::new(100.0, 50.0), 25.0).unwrap();
/// assert_eq!(aoi.x_min(), 75.0);
/// assert_eq!(aoi.y_max(), 75.0);
/// assert_eq!(aoi.width(), 50.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBounds")]
pub struct Bounds {
    x_min: f64,
    y_min: f64,
    x_max: f64,
    y_max: f64,
}

impl Bounds {
    /// Create a validated rectangle.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidBounds` if any edge is not finite, the
    /// rectangle has zero or negative extent on either axis, or an extent
    /// overflows to infinity.
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Result<Self, TypeError> {
        if ![x_min, y_min, x_max, y_max].iter().all(|v| v.is_finite()) {
            return Err(TypeError::InvalidBounds(
                "rectangle edges must be finite".into(),
            ));
        }
        if x_max <= x_min {
            return Err(TypeError::InvalidBounds(format!(
                "x_max ({x_max}) must be greater than x_min ({x_min})"
            )));
        }
        if y_max <= y_min {
            return Err(TypeError::InvalidBounds(format!(
                "y_max ({y_max}) must be greater than y_min ({y_min})"
            )));
        }
        if !(x_max - x_min).is_finite() || !(y_max - y_min).is_finite() {
            return Err(TypeError::InvalidBounds(
                "rectangle extent must be finite".into(),
            ));
        }

        Ok(Self {
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }

    /// Square extent of `radius` around `center`.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidBounds` if the radius is not positive or
    /// the resulting edges are not finite.
    pub fn around(center: Point, radius: f64) -> Result<Self, TypeError> {
        if radius.is_nan() || radius <= 0.0 {
            return Err(TypeError::InvalidBounds(format!(
                "radius must be positive, got {radius}"
            )));
        }
        Self::new(
            center.x - radius,
            center.y - radius,
            center.x + radius,
            center.y + radius,
        )
    }

    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }
}

impl TryFrom<RawBounds> for Bounds {
    type Error = TypeError;

    fn try_from(raw: RawBounds) -> Result<Self, Self::Error> {
        Self::new(raw.x_min, raw.y_min, raw.x_max, raw.y_max)
    }
}

impl std::fmt::Display for Bounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {}] x [{}, {}]",
            self.x_min, self.x_max, self.y_min, self.y_max
        )
    }
}
