//! Sampling grid for intensity field evaluation
//!
//! The grid is the set of (x, y) sample coordinates a field is evaluated on.
//! It is owned by the caller and only read by the evaluators, so one grid can
//! be reused across every depth of a sweep for consistent plotting.

use serde::{Deserialize, Serialize};

use crate::error::{HeatSourceError, Result};

/// Default half-extent of the grid in micrometers (grid spans `[-50, 50]`)
pub const DEFAULT_HALF_EXTENT_UM: f64 = 50.0;

/// Default number of samples per axis
pub const DEFAULT_SAMPLES_PER_AXIS: usize = 100;

/// Largest grid accepted, in cells (4096 × 4096)
pub const MAX_GRID_CELLS: usize = 1 << 24;

/// Reject empty grids and grids above [`MAX_GRID_CELLS`]
fn check_shape(samples_x: usize, samples_y: usize) -> Result<()> {
    if samples_x == 0 || samples_y == 0 {
        return Err(HeatSourceError::InvalidGrid(format!(
            "sample counts must be positive, got {samples_x}x{samples_y}"
        )));
    }
    match samples_x.checked_mul(samples_y) {
        Some(cells) if cells <= MAX_GRID_CELLS => Ok(()),
        _ => Err(HeatSourceError::InvalidGrid(format!(
            "{samples_x}x{samples_y} grid exceeds {MAX_GRID_CELLS} cells"
        ))),
    }
}

/// Value `i` of an evenly spaced sequence of `count` values over `[start, end]`
///
/// Matches the usual `linspace` convention: both endpoints are included and a
/// single-sample sequence yields `start`. The last sample is returned as
/// exactly `end` to avoid accumulated rounding.
#[inline]
pub(crate) fn linspace_value(start: f64, end: f64, count: usize, i: usize) -> f64 {
    if count <= 1 || i == 0 {
        return start;
    }
    if i == count - 1 {
        return end;
    }
    start + (end - start) * (i as f64) / ((count - 1) as f64)
}

/// Evenly spaced axis samples, endpoints included
fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| linspace_value(start, end, count, i))
        .collect()
}

/// Serializable description of a rectangular sampling grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSpec {
    /// Lower x bound (μm)
    pub x_min: f64,
    /// Upper x bound (μm)
    pub x_max: f64,
    /// Lower y bound (μm)
    pub y_min: f64,
    /// Upper y bound (μm)
    pub y_max: f64,
    /// Samples along x
    pub samples_x: usize,
    /// Samples along y
    pub samples_y: usize,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            x_min: -DEFAULT_HALF_EXTENT_UM,
            x_max: DEFAULT_HALF_EXTENT_UM,
            y_min: -DEFAULT_HALF_EXTENT_UM,
            y_max: DEFAULT_HALF_EXTENT_UM,
            samples_x: DEFAULT_SAMPLES_PER_AXIS,
            samples_y: DEFAULT_SAMPLES_PER_AXIS,
        }
    }
}

/// Fixed (x, y) sample coordinates
///
/// Fields evaluated on this grid have one row per `y` sample and one column
/// per `x` sample (the `meshgrid` layout).
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Default for SampleGrid {
    /// Symmetric `[-50, 50]` μm grid with 100 samples per axis
    fn default() -> Self {
        let x = linspace(
            -DEFAULT_HALF_EXTENT_UM,
            DEFAULT_HALF_EXTENT_UM,
            DEFAULT_SAMPLES_PER_AXIS,
        );
        Self { y: x.clone(), x }
    }
}

impl SampleGrid {
    /// Build a grid from explicit axis samples
    ///
    /// # Errors
    ///
    /// Returns [`HeatSourceError::InvalidGrid`] if either axis is empty, the
    /// grid exceeds [`MAX_GRID_CELLS`], or a coordinate is not finite.
    pub fn from_axes(x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        check_shape(x.len(), y.len())?;
        for (axis, values) in [("x", &x), ("y", &y)] {
            if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
                return Err(HeatSourceError::InvalidGrid(format!(
                    "{axis} axis contains non-finite coordinate {bad}"
                )));
            }
        }
        Ok(Self { x, y })
    }

    /// Build an evenly spaced grid over `[x_min, x_max] × [y_min, y_max]`
    ///
    /// # Errors
    ///
    /// Returns [`HeatSourceError::InvalidGrid`] if a sample count is zero, the
    /// grid exceeds [`MAX_GRID_CELLS`], or a bound is not finite. The shape is
    /// checked before any axis is allocated.
    pub fn linspace(spec: &GridSpec) -> Result<Self> {
        check_shape(spec.samples_x, spec.samples_y)?;
        Self::from_axes(
            linspace(spec.x_min, spec.x_max, spec.samples_x),
            linspace(spec.y_min, spec.y_max, spec.samples_y),
        )
    }

    /// Symmetric square grid spanning `[-half_extent, half_extent]` on both axes
    ///
    /// # Errors
    ///
    /// See [`SampleGrid::linspace`].
    pub fn symmetric(half_extent: f64, samples: usize) -> Result<Self> {
        Self::linspace(&GridSpec {
            x_min: -half_extent,
            x_max: half_extent,
            y_min: -half_extent,
            y_max: half_extent,
            samples_x: samples,
            samples_y: samples,
        })
    }

    /// X axis samples (one per field column)
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Y axis samples (one per field row)
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Field shape as `(rows, cols)` = `(y samples, x samples)`
    pub fn shape(&self) -> (usize, usize) {
        (self.y.len(), self.x.len())
    }

    /// Radial distance from the beam axis of cell `(row, col)`
    #[inline]
    pub fn radius_at(&self, row: usize, col: usize) -> f64 {
        self.x[col].hypot(self.y[row])
    }
}
