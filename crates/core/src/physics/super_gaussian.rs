//! Super-Gaussian heat source with tunable shape exponent
//!
//! The shape exponent `k` interpolates between a Gaussian (`k = 1`) and a
//! flat-top beam (`k → ∞`). The Gamma function term keeps the total deposited
//! power independent of `k`.
//!
//! # References
//! - Shealy, D.L., Hoffnagle, J.A. (2006). "Laser beam shaping profiles and
//!   propagation." Applied Optics, 45(21), 5118-5131.

use std::f64::consts::PI;

use statrs::function::gamma::gamma;

use crate::core_types::units::Watts;
use crate::error::{ensure_non_negative, ensure_positive, HeatSourceError, Result};
use crate::physics::IntensityFormula;

/// Super-Gaussian surface source
///
/// # Formula
/// ```text
/// I(r) = (A^(1/k) × k × P × η) / (π × r0² × Γ(1/k)) × exp(-C × (r²/r0²)^k)
/// ```
///
/// Where:
/// - **A** = Amplitude factor (dimensionless, ≥ 0)
/// - **k** = Shape exponent (> 0; 1 = Gaussian)
/// - **P** = Beam power (W)
/// - **η** = Absorption efficiency
/// - **C** = Decay coefficient (> 0)
/// - **r0** = Beam radius at the evaluated depth (μm)
///
/// The prefactor without the exponential is the peak (on-axis) intensity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuperGaussian {
    amplitude: f64,
    shape: f64,
    power: Watts,
    efficiency: f64,
    decay: f64,
    /// `A^(1/k) × k × P × η / Γ(1/k)`, cached since Γ is costly per cell
    normalization: f64,
}

impl SuperGaussian {
    /// Create a super-Gaussian source
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `amplitude`, `power` or `efficiency` is
    /// negative, if `shape` or `decay` is not strictly positive, or if `k` is
    /// so small that `Γ(1/k)` or the normalization leaves the `f64` range
    /// (roughly `k < 0.0058`).
    pub fn new(
        amplitude: f64,
        shape: f64,
        power: Watts,
        efficiency: f64,
        decay: f64,
    ) -> Result<Self> {
        ensure_non_negative("amplitude", amplitude)?;
        ensure_positive("k", shape)?;
        ensure_non_negative("power", *power)?;
        ensure_non_negative("efficiency", efficiency)?;
        ensure_positive("decay", decay)?;

        let inv_k = 1.0 / shape;
        let gamma_inv_k = gamma(inv_k);
        let normalization = amplitude.powf(inv_k) * shape * *power * efficiency / gamma_inv_k;
        // A zero normalization is only meaningful when A, P or η is zero
        let lost_to_underflow = normalization == 0.0 && amplitude * *power * efficiency > 0.0;
        if !gamma_inv_k.is_finite() || !normalization.is_finite() || lost_to_underflow {
            return Err(HeatSourceError::invalid(
                "k",
                format!("shape exponent {shape} puts the power normalization out of range"),
            ));
        }

        Ok(Self {
            amplitude,
            shape,
            power,
            efficiency,
            decay,
            normalization,
        })
    }

    /// Amplitude factor `A`
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Shape exponent `k`
    pub fn shape(&self) -> f64 {
        self.shape
    }

    /// Beam power
    pub fn power(&self) -> Watts {
        self.power
    }

    /// Absorption efficiency
    pub fn efficiency(&self) -> f64 {
        self.efficiency
    }

    /// Decay coefficient `C`
    pub fn decay(&self) -> f64 {
        self.decay
    }
}

impl IntensityFormula for SuperGaussian {
    fn name(&self) -> &'static str {
        "super-gaussian"
    }

    fn intensity_at(&self, r: f64, r0: f64) -> f64 {
        if r0 <= 0.0 {
            return 0.0;
        }
        let r0_sq = r0 * r0;
        let falloff = (-self.decay * (r * r / r0_sq).powf(self.shape)).exp();
        self.normalization / (PI * r0_sq) * falloff
    }

    fn peak_intensity(&self, r0: f64) -> f64 {
        if r0 <= 0.0 {
            return 0.0;
        }
        self.normalization / (PI * r0 * r0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reference() -> SuperGaussian {
        SuperGaussian::new(2.0, 1.0, Watts::new(100.0), 0.8, 2.0).unwrap()
    }

    #[test]
    fn test_peak_reduces_to_gaussian_at_k_one() {
        // Γ(1) = 1, so I_peak = A × P × η / (π × r0²)
        let source = reference();
        let expected = 2.0 * 100.0 * 0.8 / (PI * 625.0);
        assert_relative_eq!(source.peak_intensity(25.0), expected, epsilon = 1e-12);
        assert_relative_eq!(source.peak_intensity(25.0), 0.0815, epsilon = 1e-4);
    }

    #[test]
    fn test_peak_matches_axis_value() {
        for k in [0.5, 1.0, 2.0, 7.5] {
            let source = SuperGaussian::new(2.0, k, Watts::new(100.0), 0.8, 2.0).unwrap();
            assert_relative_eq!(
                source.intensity_at(0.0, 30.0),
                source.peak_intensity(30.0),
                epsilon = 1e-15
            );
        }
    }

    #[test]
    fn test_higher_k_flattens_profile() {
        let gaussian = SuperGaussian::new(2.0, 1.0, Watts::new(100.0), 0.8, 2.0).unwrap();
        let flat_top = SuperGaussian::new(2.0, 8.0, Watts::new(100.0), 0.8, 2.0).unwrap();

        // Relative intensity at half radius stays close to the peak for large k
        let gaussian_ratio = gaussian.intensity_at(12.5, 25.0) / gaussian.peak_intensity(25.0);
        let flat_ratio = flat_top.intensity_at(12.5, 25.0) / flat_top.peak_intensity(25.0);
        assert!(flat_ratio > gaussian_ratio);
        assert!(flat_ratio > 0.99);
    }

    #[test]
    fn test_peak_scales_with_inverse_square_radius() {
        let source = reference();
        assert_relative_eq!(
            source.peak_intensity(50.0),
            source.peak_intensity(25.0) / 4.0,
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_peak_intensities_vectorized() {
        let source = reference();
        let peaks = source.peak_intensities([25.0, 50.0, 0.0]);
        assert_eq!(peaks.len(), 3);
        assert_relative_eq!(peaks[0], source.peak_intensity(25.0));
        assert_relative_eq!(peaks[1], source.peak_intensity(50.0));
        assert_eq!(peaks[2], 0.0);
    }

    #[test]
    fn test_invalid_shape_rejected() {
        assert!(SuperGaussian::new(2.0, 0.0, Watts::new(100.0), 0.8, 2.0).is_err());
        assert!(SuperGaussian::new(2.0, -1.0, Watts::new(100.0), 0.8, 2.0).is_err());
        assert!(SuperGaussian::new(-2.0, 1.0, Watts::new(100.0), 0.8, 2.0).is_err());
        assert!(SuperGaussian::new(2.0, 1.0, Watts::new(100.0), 0.8, 0.0).is_err());
    }

    #[test]
    fn test_tiny_shape_exponent_rejected() {
        // Γ(200) overflows f64 while A^(1/k) = 2^200 stays finite
        for k in [0.005, 0.001] {
            let err = SuperGaussian::new(2.0, k, Watts::new(100.0), 0.8, 2.0).unwrap_err();
            assert!(
                matches!(err, HeatSourceError::InvalidParameter { name: "k", .. }),
                "{err}"
            );
        }

        // Γ(100) is large but finite, so the normalization is small and positive
        let narrow = SuperGaussian::new(2.0, 0.01, Watts::new(100.0), 0.8, 2.0).unwrap();
        assert!(narrow.peak_intensity(25.0) > 0.0);

        // Zero power is a legitimate zero source, not an underflow
        let dark = SuperGaussian::new(2.0, 1.0, Watts::new(0.0), 0.8, 2.0).unwrap();
        assert_eq!(dark.peak_intensity(25.0), 0.0);
    }
}
