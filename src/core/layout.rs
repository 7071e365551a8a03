//! core::layout
//!
//! Grid placement of symbol codes.
//!
//! Every code is assigned a *primary* point and a *secondary* point at the
//! same y, shifted right along x. The renderer draws the same code once at
//! each point so two symbol presentations can be compared side by side.
//!
//! # Policies
//!
//! - [`FixedRaster`] / [`fixed_raster`]: rows of `columns` cells with a
//!   fixed step, growing downward from an origin. [`PagedLayout`] places
//!   successive pages of codes, shifting the origin right after each page.
//! - [`area_fit_raster`]: a square-ish raster fitted to a bounding
//!   rectangle, filled column by column from the top-left corner.
//! - [`page_fit_raster`]: a fixed number of columns stretched across a
//!   rectangle, with rows spaced to fit the page's code count. Each code
//!   also gets a label anchor, and the page gets a title anchor above the
//!   rectangle.
//!
//! All policies are pure: the same input always yields the same batch, in
//! input order.
//!
//! # Example
//!
//! ```
//! use symgrid::core::layout::fixed_raster;
//! use symgrid::core::types::{Point, SymbolCode};
//!
//! let codes: Vec<SymbolCode> = ["A", "B", "C", "D", "E"].into_iter().map(Into::into).collect();
//! let batch = fixed_raster(&codes, 0.0, 0.0);
//!
//! assert_eq!(batch.len(), 5);
//! assert_eq!(batch[3].primary, Point::new(300.0, 0.0));
//! assert_eq!(batch[4].primary, Point::new(0.0, -100.0));
//! assert_eq!(batch[4].secondary, Point::new(50.0, -100.0));
//! ```

use std::ops::Index;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::{Bounds, Point, SymbolCode, TypeError};

/// Tolerance when counting how many grid steps fit in an extent, so that
/// an extent that is an exact multiple of the spacing keeps its last line.
const STEP_EPSILON: f64 = 1e-9;

/// Errors from layout computation.
#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error(transparent)]
    Bounds(#[from] TypeError),

    #[error("bounds hold only {placed} of {total} codes at the computed spacing")]
    CapacityExceeded { placed: usize, total: usize },

    #[error("invalid raster: {0}")]
    InvalidRaster(String),
}

/// One code with its pair of display locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub code: SymbolCode,
    pub primary: Point,
    pub secondary: Point,
}

impl Placement {
    /// Place `code` at `primary`, with its twin `offset` units to the right.
    pub fn new(code: SymbolCode, primary: Point, offset: f64) -> Self {
        Self {
            code,
            primary,
            secondary: primary.offset_x(offset),
        }
    }
}

/// Ordered placements, one per input code, in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlacementBatch(Vec<Placement>);

impl PlacementBatch {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Placement> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Placement] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Placement> {
        self.0
    }
}

impl Index<usize> for PlacementBatch {
    type Output = Placement;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl FromIterator<Placement> for PlacementBatch {
    fn from_iter<I: IntoIterator<Item = Placement>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Placement> for PlacementBatch {
    fn extend<I: IntoIterator<Item = Placement>>(&mut self, iter: I) {
        self.0.extend(iter)
    }
}

impl IntoIterator for PlacementBatch {
    type Item = Placement;
    type IntoIter = std::vec::IntoIter<Placement>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PlacementBatch {
    type Item = &'a Placement;
    type IntoIter = std::slice::Iter<'a, Placement>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// =============================================================================
// Fixed raster
// =============================================================================

/// Fixed-step raster used for catalog pages.
///
/// Code `i` lands in column `i % columns`, row `i / columns`. Rows grow
/// toward negative y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedRaster {
    /// Cells per row.
    pub columns: usize,
    /// Distance between neighbouring cells on both axes.
    pub step: f64,
    /// Horizontal distance from primary to secondary point.
    pub secondary_offset: f64,
    /// Horizontal shift of the origin between pages.
    pub page_shift: f64,
}

impl Default for FixedRaster {
    fn default() -> Self {
        Self {
            columns: 4,
            step: 100.0,
            secondary_offset: 50.0,
            page_shift: 500.0,
        }
    }
}

impl FixedRaster {
    /// Check that the raster produces well-formed placements.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::InvalidRaster` for zero columns, a non-positive
    /// step or secondary offset, or a non-finite page shift.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.columns == 0 {
            return Err(LayoutError::InvalidRaster(
                "columns must be at least 1".into(),
            ));
        }
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(LayoutError::InvalidRaster(format!(
                "step must be positive, got {}",
                self.step
            )));
        }
        if !self.secondary_offset.is_finite() || self.secondary_offset <= 0.0 {
            return Err(LayoutError::InvalidRaster(format!(
                "secondary_offset must be positive, got {}",
                self.secondary_offset
            )));
        }
        if !self.page_shift.is_finite() {
            return Err(LayoutError::InvalidRaster(
                "page_shift must be finite".into(),
            ));
        }
        Ok(())
    }

    /// Primary point of the `index`-th cell relative to `origin`.
    ///
    /// The raster must have at least one column.
    fn cell(&self, origin: Point, index: usize) -> Point {
        let column = (index % self.columns) as f64;
        let row = (index / self.columns) as f64;
        Point::new(origin.x + column * self.step, origin.y - row * self.step)
    }

    /// Place every code on the raster anchored at `origin`.
    ///
    /// An empty slice yields an empty batch.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::InvalidRaster` if [`FixedRaster::validate`]
    /// rejects the raster.
    pub fn place(
        &self,
        codes: &[SymbolCode],
        origin: Point,
    ) -> Result<PlacementBatch, LayoutError> {
        self.validate()?;
        Ok(self.place_validated(codes, origin))
    }

    fn place_validated(&self, codes: &[SymbolCode], origin: Point) -> PlacementBatch {
        codes
            .iter()
            .enumerate()
            .map(|(i, code)| {
                Placement::new(code.clone(), self.cell(origin, i), self.secondary_offset)
            })
            .collect()
    }
}

/// Place `codes` on the default 4-column, 100-unit raster at the origin.
///
/// Total over any input.
pub fn fixed_raster(codes: &[SymbolCode], origin_x: f64, origin_y: f64) -> PlacementBatch {
    FixedRaster::default().place_validated(codes, Point::new(origin_x, origin_y))
}

/// Accumulates fixed-raster pages side by side.
///
/// Each call to [`PagedLayout::place_page`] lays out one page at the current
/// cursor and then moves the cursor right by the raster's `page_shift`.
#[derive(Debug, Clone)]
pub struct PagedLayout {
    raster: FixedRaster,
    cursor: Point,
    batch: PlacementBatch,
    pages: usize,
}

impl PagedLayout {
    /// Start a layout with its first page at `origin`.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::InvalidRaster` for a raster that fails
    /// [`FixedRaster::validate`].
    pub fn new(raster: FixedRaster, origin: Point) -> Result<Self, LayoutError> {
        raster.validate()?;
        Ok(Self {
            raster,
            cursor: origin,
            batch: PlacementBatch::new(),
            pages: 0,
        })
    }

    /// Place one page and return the placements it added.
    pub fn place_page(&mut self, codes: &[SymbolCode]) -> &[Placement] {
        let start = self.batch.len();
        self.batch.extend(self.raster.place_validated(codes, self.cursor));
        self.cursor = self.cursor.offset_x(self.raster.page_shift);
        self.pages += 1;
        &self.batch.as_slice()[start..]
    }

    /// Origin the next page will be placed at.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn pages_placed(&self) -> usize {
        self.pages
    }

    pub fn batch(&self) -> &PlacementBatch {
        &self.batch
    }

    pub fn finish(self) -> PlacementBatch {
        self.batch
    }
}

// =============================================================================
// Area-fit raster
// =============================================================================

/// Grid fitted to a rectangle for a given number of codes.
///
/// The side count is `ceil(sqrt(n))` and the spacing divides the
/// rectangle's width by it. Lines are laid at every spacing step that stays
/// inside the rectangle, including both edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaGrid {
    bounds: Bounds,
    spacing: f64,
    columns: usize,
    rows: usize,
}

impl AreaGrid {
    /// Fit a grid for `count` codes into `bounds`. `count` must be non-zero.
    fn new(count: usize, bounds: Bounds) -> Self {
        debug_assert!(count > 0);
        let side = (count as f64).sqrt().ceil();
        let spacing = bounds.width() / side;

        Self {
            bounds,
            spacing,
            columns: steps_within(bounds.width(), spacing),
            rows: steps_within(bounds.height(), spacing),
        }
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of cells in the grid.
    pub fn capacity(&self) -> usize {
        self.columns.saturating_mul(self.rows)
    }

    /// Cells in fill order: left to right by column, top to bottom within
    /// each column.
    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        let b = self.bounds;
        let spacing = self.spacing;
        let rows = self.rows;
        (0..self.columns).flat_map(move |c| {
            let x = (b.x_min() + c as f64 * spacing).min(b.x_max());
            (0..rows).map(move |r| Point::new(x, (b.y_max() - r as f64 * spacing).max(b.y_min())))
        })
    }
}

/// Number of lines at multiples of `spacing` from 0 up to `extent`.
fn steps_within(extent: f64, spacing: f64) -> usize {
    let whole = (extent / spacing + STEP_EPSILON).floor() as usize;
    whole.saturating_add(1)
}

/// Place `codes` on a grid fitted to `bounds`.
///
/// Secondary points sit half a grid spacing to the right of their primary.
///
/// # Errors
///
/// Returns `LayoutError::CapacityExceeded` if the rectangle is too short to
/// hold every code at the computed spacing.
pub fn area_fit_raster(
    codes: &[SymbolCode],
    bounds: &Bounds,
) -> Result<PlacementBatch, LayoutError> {
    if codes.is_empty() {
        return Ok(PlacementBatch::new());
    }

    let grid = AreaGrid::new(codes.len(), *bounds);
    if grid.capacity() < codes.len() {
        return Err(LayoutError::CapacityExceeded {
            placed: grid.capacity(),
            total: codes.len(),
        });
    }

    let offset = grid.spacing() * 0.5;
    Ok(grid
        .cells()
        .zip(codes)
        .map(|(cell, code)| Placement::new(code.clone(), cell, offset))
        .collect())
}

/// [`area_fit_raster`] over raw rectangle edges.
///
/// # Errors
///
/// Returns `LayoutError::Bounds` for a non-finite or degenerate rectangle,
/// even when `codes` is empty.
pub fn area_fit_raster_rect(
    codes: &[SymbolCode],
    x_min: f64,
    y_min: f64,
    x_max: f64,
    y_max: f64,
) -> Result<PlacementBatch, LayoutError> {
    let bounds = Bounds::new(x_min, y_min, x_max, y_max)?;
    area_fit_raster(codes, &bounds)
}

/// The fitted grid `area_fit_raster` would use, or `None` for no codes.
pub fn area_grid(count: usize, bounds: &Bounds) -> Option<AreaGrid> {
    (count > 0).then(|| AreaGrid::new(count, *bounds))
}

// =============================================================================
// Page-fit raster
// =============================================================================

/// Default column count of the page-fit raster.
pub const PAGE_COLUMNS: usize = 4;

/// Height of the page title anchor above the rectangle's top edge.
pub const TITLE_GAP: f64 = 25.0;

/// A placement with an anchor for its code label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledPlacement {
    #[serde(flatten)]
    pub placement: Placement,
    /// Label anchor, a quarter step right of and below the primary point.
    pub label: Point,
}

/// One page laid out by [`page_fit_raster`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageFitLayout {
    /// Anchor for the page title, centered above the rectangle.
    pub title: Point,
    pub placements: Vec<LabeledPlacement>,
}

impl PageFitLayout {
    /// The placements without their labels.
    pub fn batch(&self) -> PlacementBatch {
        self.placements.iter().map(|p| p.placement.clone()).collect()
    }
}

/// Grid of `columns` evenly spread lines across a rectangle.
///
/// The first column sits on the left edge and the last on the right edge.
/// Rows start at the top edge and are spaced so that `ceil(n / columns)`
/// of them fit above the bottom edge. Cells fill column by column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGrid {
    bounds: Bounds,
    rows: usize,
    x_step: f64,
    y_step: f64,
}

impl PageGrid {
    /// `count` and `columns` must be non-zero.
    fn new(count: usize, columns: usize, bounds: Bounds) -> Self {
        debug_assert!(count > 0 && columns > 0);
        let rows = count.div_ceil(columns);
        let x_step = match columns {
            1 => bounds.width(),
            n => bounds.width() / (n - 1) as f64,
        };

        Self {
            bounds,
            rows,
            x_step,
            y_step: bounds.height() / rows as f64,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn x_step(&self) -> f64 {
        self.x_step
    }

    pub fn y_step(&self) -> f64 {
        self.y_step
    }

    /// Primary point of the `index`-th cell.
    fn cell(&self, index: usize) -> Point {
        let column = (index / self.rows) as f64;
        let row = (index % self.rows) as f64;
        Point::new(
            (self.bounds.x_min() + column * self.x_step).min(self.bounds.x_max()),
            self.bounds.y_max() - row * self.y_step,
        )
    }

    fn label(&self, cell: Point) -> Point {
        Point::new(cell.x + self.x_step * 0.25, cell.y - self.y_step * 0.25)
    }
}

fn title_anchor(bounds: &Bounds) -> Point {
    Point::new(bounds.center().x, bounds.y_max() + TITLE_GAP)
}

/// Lay out one page of `codes` across `bounds` in `columns` columns.
///
/// Secondary points sit half a column step to the right of their primary.
/// An empty page still gets its title anchor.
///
/// # Errors
///
/// Returns `LayoutError::InvalidRaster` if `columns` is zero.
pub fn page_fit_raster(
    codes: &[SymbolCode],
    bounds: &Bounds,
    columns: usize,
) -> Result<PageFitLayout, LayoutError> {
    if columns == 0 {
        return Err(LayoutError::InvalidRaster(
            "columns must be at least 1".into(),
        ));
    }

    let title = title_anchor(bounds);
    let Some(grid) = page_grid(codes.len(), columns, bounds) else {
        return Ok(PageFitLayout {
            title,
            placements: Vec::new(),
        });
    };

    let offset = grid.x_step() * 0.5;
    let placements = codes
        .iter()
        .enumerate()
        .map(|(i, code)| {
            let cell = grid.cell(i);
            LabeledPlacement {
                placement: Placement::new(code.clone(), cell, offset),
                label: grid.label(cell),
            }
        })
        .collect();

    Ok(PageFitLayout { title, placements })
}

/// The grid `page_fit_raster` would use, or `None` for no codes or columns.
pub fn page_grid(count: usize, columns: usize, bounds: &Bounds) -> Option<PageGrid> {
    (count > 0 && columns > 0).then(|| PageGrid::new(count, columns, *bounds))
}
