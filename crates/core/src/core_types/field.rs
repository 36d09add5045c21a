//! Intensity field container
//!
//! A field is one evaluation of a heat source formula over a [`SampleGrid`].
//! It is created fresh per request and never mutated afterwards.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::core_types::grid::SampleGrid;

/// Outcome of resolving the beam radius for an evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldStatus {
    /// Radius resolved normally; values come from the formula
    Defined,
    /// Anchor profile with `z_i == z_e`: slope undefined, field suppressed to zero
    DegenerateProfile,
    /// Resolved radius was zero, negative or non-finite; field is zero
    NonPositiveRadius,
}

impl FieldStatus {
    /// True when the zero field is a suppression rather than a real result
    pub fn is_suppressed(self) -> bool {
        !matches!(self, FieldStatus::Defined)
    }
}

/// 2D grid of non-negative intensities (W/μm²)
///
/// Rows follow the grid's y samples, columns its x samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntensityField {
    values: DMatrix<f64>,
    status: FieldStatus,
}

impl IntensityField {
    /// Evaluate `f(row, col)` on every cell of `grid`
    pub(crate) fn from_fn<F>(grid: &SampleGrid, f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let (rows, cols) = grid.shape();
        Self {
            values: DMatrix::from_fn(rows, cols, f),
            status: FieldStatus::Defined,
        }
    }

    /// All-zero field carrying the reason it was suppressed
    pub(crate) fn suppressed(grid: &SampleGrid, status: FieldStatus) -> Self {
        let (rows, cols) = grid.shape();
        Self {
            values: DMatrix::zeros(rows, cols),
            status,
        }
    }

    /// How the radius for this field was resolved
    pub fn status(&self) -> FieldStatus {
        self.status
    }

    /// True if the field was zeroed because the anchor profile is degenerate
    pub fn is_degenerate(&self) -> bool {
        self.status == FieldStatus::DegenerateProfile
    }

    /// `(rows, cols)` = `(y samples, x samples)`
    pub fn shape(&self) -> (usize, usize) {
        self.values.shape()
    }

    /// Intensity at `(row, col)`, `None` when out of bounds
    pub fn value_at(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get((row, col)).copied()
    }

    /// Copy of the values in row-major order (`row * cols + col`)
    pub fn to_row_major(&self) -> Vec<f64> {
        self.values.transpose().as_slice().to_vec()
    }

    /// Largest intensity in the field (0 for a suppressed field)
    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }

    /// Smallest intensity in the field
    pub fn min(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Iterate over all intensities
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }
}
