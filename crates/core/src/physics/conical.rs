//! Conical-linear heat source
//!
//! Pure geometric falloff: intensity drops linearly from the beam axis to the
//! cone edge and is zero outside it. The amplitude `I0` is in arbitrary units,
//! independent of beam power and absorption efficiency.

use crate::error::{ensure_non_negative, Result};
use crate::physics::IntensityFormula;

/// Conical-linear shape function
///
/// # Formula
/// ```text
/// I(r) = I0 × (1 - r/r0)    for r ≤ r0
/// I(r) = 0                  for r > r0
/// ```
///
/// Where:
/// - **I0** = Intensity on the beam axis (arbitrary units)
/// - **r** = Radial distance from the beam axis (μm)
/// - **r0** = Cone radius at the evaluated depth (μm)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConicalLinear {
    peak_intensity: f64,
}

impl Default for ConicalLinear {
    /// Unit amplitude, as used for normalized shape plots
    fn default() -> Self {
        Self {
            peak_intensity: 1.0,
        }
    }
}

impl ConicalLinear {
    /// Create a conical shape function with on-axis intensity `I0`
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `peak_intensity` is negative or not finite.
    pub fn new(peak_intensity: f64) -> Result<Self> {
        ensure_non_negative("peak_intensity", peak_intensity)?;
        Ok(Self { peak_intensity })
    }

    /// On-axis intensity `I0`
    pub fn i0(&self) -> f64 {
        self.peak_intensity
    }
}

impl IntensityFormula for ConicalLinear {
    fn name(&self) -> &'static str {
        "conical-linear"
    }

    fn intensity_at(&self, r: f64, r0: f64) -> f64 {
        if r0 <= 0.0 || r > r0 {
            return 0.0;
        }
        (self.peak_intensity * (1.0 - r / r0)).max(0.0)
    }

    fn has_cutoff(&self) -> bool {
        true
    }
}
