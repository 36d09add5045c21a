//! Gaussian-cone volumetric heat source
//!
//! Keyhole-style volumetric source: a Gaussian radial distribution whose
//! radius varies linearly between a top anchor `(z_e, r_e)` and a bottom
//! anchor `(z_i, r_i)`. Depth `z` increases into the material, so `z_e ≤ z_i`.
//!
//! # References
//! - Goldak, J., Chakravarti, A., Bibby, M. (1984). "A new finite element model for
//!   welding heat sources." Metallurgical Transactions B, 15(2), 299-305.
//! - Wu, C.S., Wang, H.G., Zhang, Y.M. (2006). "A new heat source model for keyhole
//!   plasma arc welding in FEM analysis of the temperature profile."
//!   Welding Journal, 85(12), 284s-291s.

use std::f64::consts::{E, PI};

use crate::core_types::units::{Micrometers, Watts};
use crate::error::{ensure_finite, ensure_non_negative, ensure_positive, HeatSourceError, Result};
use crate::physics::IntensityFormula;
use crate::profile::RadiusProfile;

/// Gaussian-cone volumetric source
///
/// # Formula
/// ```text
/// I(r, z) = Qv × exp(-3 × r² / r0(z)²)
/// Qv      = 9 × P × η × e³ / (π × (e³ - 1) × |z_e - z_i| × r_e²)
/// ```
///
/// Where:
/// - **P** = Beam power (W)
/// - **η** = Absorption efficiency
/// - **`z_e`, `r_e`** = Depth and radius of the top anchor (μm)
/// - **`z_i`, `r_i`** = Depth and radius of the bottom anchor (μm)
/// - **r0(z)** = Radius interpolated linearly between the anchors
///
/// There is no hard radial cutoff; intensity decays smoothly at all `r`.
/// When `z_e == z_i` the cone has no height, `Qv` is undefined and the
/// source is reported as degenerate instead of dividing by zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianCone {
    power: Watts,
    efficiency: f64,
    z_e: Micrometers,
    r_e: Micrometers,
    z_i: Micrometers,
    r_i: Micrometers,
}

impl GaussianCone {
    /// Create a Gaussian-cone source from its two depth anchors
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if power or efficiency is negative, `r_e` is
    /// not strictly positive, `r_i` is negative, an anchor is not finite, or
    /// the anchors are inverted (`z_e > z_i`). Equal anchor depths are
    /// accepted and produce a degenerate source.
    pub fn new(
        power: Watts,
        efficiency: f64,
        (z_e, r_e): (Micrometers, Micrometers),
        (z_i, r_i): (Micrometers, Micrometers),
    ) -> Result<Self> {
        ensure_non_negative("power", *power)?;
        ensure_non_negative("efficiency", efficiency)?;
        ensure_finite("z_e", *z_e)?;
        ensure_finite("z_i", *z_i)?;
        ensure_positive("r_e", *r_e)?;
        ensure_non_negative("r_i", *r_i)?;
        if z_e > z_i {
            return Err(HeatSourceError::invalid(
                "z_e",
                format!("top anchor depth {z_e} must not lie below bottom anchor depth {z_i}"),
            ));
        }
        Ok(Self {
            power,
            efficiency,
            z_e,
            r_e,
            z_i,
            r_i,
        })
    }

    /// Beam power
    pub fn power(&self) -> Watts {
        self.power
    }

    /// Absorption efficiency
    pub fn efficiency(&self) -> f64 {
        self.efficiency
    }

    /// Top anchor `(z_e, r_e)`
    pub fn top_anchor(&self) -> (Micrometers, Micrometers) {
        (self.z_e, self.r_e)
    }

    /// Bottom anchor `(z_i, r_i)`
    pub fn bottom_anchor(&self) -> (Micrometers, Micrometers) {
        (self.z_i, self.r_i)
    }

    /// Linear radius profile through the two anchors
    pub fn radius_profile(&self) -> RadiusProfile {
        RadiusProfile::LinearAnchor {
            z_e: self.z_e,
            r_e: self.r_e,
            z_i: self.z_i,
            r_i: self.r_i,
        }
    }

    /// Peak volumetric intensity `Qv`, `None` when the cone has zero height
    pub fn volumetric_peak(&self) -> Option<f64> {
        let height = (*self.z_i - *self.z_e).abs();
        if height == 0.0 {
            return None;
        }
        let e3 = E.powi(3);
        let qv = 9.0 * *self.power * self.efficiency * e3
            / (PI * (e3 - 1.0) * height * *self.r_e * *self.r_e);
        qv.is_finite().then_some(qv)
    }
}

impl IntensityFormula for GaussianCone {
    fn name(&self) -> &'static str {
        "gaussian-cone"
    }

    fn intensity_at(&self, r: f64, r0: f64) -> f64 {
        if r0 <= 0.0 {
            return 0.0;
        }
        match self.volumetric_peak() {
            Some(qv) => qv * (-3.0 * r * r / (r0 * r0)).exp(),
            None => 0.0,
        }
    }

    fn is_degenerate(&self) -> bool {
        self.volumetric_peak().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ResolvedRadius;
    use approx::assert_relative_eq;

    fn keyhole() -> GaussianCone {
        GaussianCone::new(
            Watts::new(200.0),
            0.9,
            (Micrometers::new(0.0), Micrometers::new(40.0)),
            (Micrometers::new(100.0), Micrometers::new(10.0)),
        )
        .unwrap()
    }

    #[test]
    fn test_volumetric_peak_value() {
        let source = keyhole();
        let e3 = E.powi(3);
        let expected = 9.0 * 200.0 * 0.9 * e3 / (PI * (e3 - 1.0) * 100.0 * 1600.0);
        assert_relative_eq!(source.volumetric_peak().unwrap(), expected, epsilon = 1e-15);
        assert_relative_eq!(source.peak_intensity(25.0), expected, epsilon = 1e-15);
    }

    #[test]
    fn test_gaussian_decay_without_cutoff() {
        let source = keyhole();
        let qv = source.volumetric_peak().unwrap();
        // At r = r0 the Gaussian has decayed to e^-3 of the peak, not to zero
        assert_relative_eq!(source.intensity_at(40.0, 40.0), qv * (-3.0_f64).exp());
        assert!(source.intensity_at(80.0, 40.0) > 0.0);
        assert!(!source.has_cutoff());
    }

    #[test]
    fn test_profile_reaches_top_radius_at_top_depth() {
        let source = keyhole();
        let resolved = source.radius_profile().resolve(Micrometers::new(0.0));
        assert_eq!(resolved, ResolvedRadius::Defined(Micrometers::new(40.0)));
        let bottom = source
            .radius_profile()
            .resolve(Micrometers::new(100.0))
            .radius()
            .unwrap();
        assert_relative_eq!(*bottom, 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_height_cone_is_degenerate() {
        let source = GaussianCone::new(
            Watts::new(200.0),
            0.9,
            (Micrometers::new(50.0), Micrometers::new(40.0)),
            (Micrometers::new(50.0), Micrometers::new(10.0)),
        )
        .unwrap();
        assert!(source.is_degenerate());
        assert_eq!(source.volumetric_peak(), None);
        assert_eq!(source.intensity_at(0.0, 40.0), 0.0);
    }

    #[test]
    fn test_inverted_anchors_rejected() {
        let result = GaussianCone::new(
            Watts::new(200.0),
            0.9,
            (Micrometers::new(100.0), Micrometers::new(40.0)),
            (Micrometers::new(0.0), Micrometers::new(10.0)),
        );
        assert!(matches!(
            result,
            Err(HeatSourceError::InvalidParameter { name: "z_e", .. })
        ));
    }
}
