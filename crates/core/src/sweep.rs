//! Peak intensity as a function of depth
//!
//! Tracks a model by its on-axis intensity alone: resolve the radius at each
//! depth sample, then evaluate the formula's peak form. Used to contrast a
//! constant-radius model (flat line) with a growing-radius model, whose peak
//! falls off as the beam spreads.

use std::iter::FusedIterator;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core_types::grid::linspace_value;
use crate::core_types::units::Micrometers;
use crate::error::{ensure_finite, HeatSourceError, Result};
use crate::model::HeatSourceModel;

/// Default number of depth samples in a sweep
pub const DEFAULT_DEPTH_SAMPLES: usize = 100;

/// Default maximum sweep depth (μm)
pub const DEFAULT_MAX_DEPTH_UM: f64 = 100.0;

/// Largest depth sweep accepted
pub const MAX_DEPTH_SAMPLES: usize = 1 << 20;

/// Lazy, evenly spaced depth samples over `[start, end]`
///
/// Restartable: clone the sampler before iterating to replay the sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthSamples {
    start: f64,
    end: f64,
    count: usize,
    next: usize,
}

impl DepthSamples {
    /// `count` depths from `start` to `end`, both included
    ///
    /// # Errors
    ///
    /// Returns [`HeatSourceError::InvalidGrid`] if `count` is zero or above
    /// [`MAX_DEPTH_SAMPLES`], or `InvalidParameter` if a bound is not finite.
    pub fn linspace(start: Micrometers, end: Micrometers, count: usize) -> Result<Self> {
        ensure_finite("start", *start)?;
        ensure_finite("end", *end)?;
        if count == 0 {
            return Err(HeatSourceError::InvalidGrid(
                "depth sweep needs at least one sample".to_string(),
            ));
        }
        if count > MAX_DEPTH_SAMPLES {
            return Err(HeatSourceError::InvalidGrid(format!(
                "depth sweep of {count} samples exceeds {MAX_DEPTH_SAMPLES}"
            )));
        }
        Ok(Self {
            start: *start,
            end: *end,
            count,
            next: 0,
        })
    }

    /// `count` depths from the surface down to `max_depth`
    ///
    /// # Errors
    ///
    /// See [`DepthSamples::linspace`].
    pub fn to_depth(max_depth: Micrometers, count: usize) -> Result<Self> {
        Self::linspace(Micrometers::ZERO, max_depth, count)
    }

    /// Number of samples in the full sequence
    pub fn total(&self) -> usize {
        self.count
    }

    /// Same sampler positioned at the first depth again
    pub fn restarted(&self) -> Self {
        Self { next: 0, ..*self }
    }
}

impl Iterator for DepthSamples {
    type Item = Micrometers;

    fn next(&mut self) -> Option<Micrometers> {
        if self.next >= self.count {
            return None;
        }
        let depth = linspace_value(self.start, self.end, self.count, self.next);
        self.next += 1;
        Some(Micrometers::new(depth))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DepthSamples {}

impl FusedIterator for DepthSamples {}

/// Peak intensity at one depth
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthPeak {
    /// Depth below the surface (μm)
    pub depth: Micrometers,
    /// Resolved beam radius, `None` if degenerate or collapsed
    pub radius: Option<Micrometers>,
    /// On-axis intensity (0 when the radius is not defined)
    pub peak: f64,
}

/// Lazy sequence of [`DepthPeak`]s, one per depth sample
///
/// Cloning the sweep (while the depth iterator is cloneable) gives an
/// independent replay of the remaining samples.
#[derive(Debug, Clone)]
pub struct PeakSweep<'a, I> {
    model: &'a HeatSourceModel,
    depths: I,
}

impl<I> Iterator for PeakSweep<'_, I>
where
    I: Iterator<Item = Micrometers>,
{
    type Item = DepthPeak;

    fn next(&mut self) -> Option<DepthPeak> {
        let depth = self.depths.next()?;
        let radius = self.model.resolve_radius(depth).radius();
        Some(DepthPeak {
            depth,
            radius,
            peak: self.model.peak_at_depth(depth),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.depths.size_hint()
    }
}

impl<I> ExactSizeIterator for PeakSweep<'_, I> where I: ExactSizeIterator<Item = Micrometers> {}

/// Peak intensity of `model` at every depth in `depths`
///
/// Nothing is computed until the returned sweep is iterated.
pub fn peak_over_depth<I>(depths: I, model: &HeatSourceModel) -> PeakSweep<'_, I::IntoIter>
where
    I: IntoIterator<Item = Micrometers>,
{
    PeakSweep {
        model,
        depths: depths.into_iter(),
    }
}

/// Peak intensities of a constant-radius and a growing-radius model at one depth
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeakComparison {
    /// Depth below the surface (μm)
    pub depth: Micrometers,
    /// Peak of the constant-radius model
    pub constant: f64,
    /// Peak of the growing-radius model
    pub growing: f64,
}

impl PeakComparison {
    /// Fraction of the constant-radius peak retained by the growing model
    ///
    /// `None` when the constant-radius peak is zero.
    pub fn retained_fraction(&self) -> Option<f64> {
        (self.constant > 0.0).then(|| self.growing / self.constant)
    }
}

/// Pair the peak sweeps of two models over the same depths
pub fn compare_peak_over_depth<I>(
    depths: I,
    constant: &HeatSourceModel,
    growing: &HeatSourceModel,
) -> Vec<PeakComparison>
where
    I: IntoIterator<Item = Micrometers>,
    I::IntoIter: Clone,
{
    let depths = depths.into_iter();
    let rows: Vec<PeakComparison> = peak_over_depth(depths.clone(), constant)
        .zip(peak_over_depth(depths, growing))
        .map(|(c, g)| PeakComparison {
            depth: c.depth,
            constant: c.peak,
            growing: g.peak,
        })
        .collect();

    debug!("Compared peak intensity over {} depth samples", rows.len());
    rows
}
