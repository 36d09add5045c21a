//! Depth-dependent beam radius profiles
//!
//! A profile turns a single surface distribution into a family of
//! distributions indexed by depth: `r0 = r(z)`. Four conventions are used in
//! the heat source literature:
//!
//! - constant radius (no divergence),
//! - linear growth through a cone half-angle θ: `r(z) = r_s + z × tan(θ)`,
//! - linear growth through a rate m: `r(z) = r_s + z × m`,
//! - linear interpolation between two `(depth, radius)` anchors.

use serde::{Deserialize, Serialize};

use crate::core_types::field::FieldStatus;
use crate::core_types::units::{Degrees, Micrometers};
use crate::error::{ensure_finite, ensure_non_negative, ensure_positive, HeatSourceError, Result};

/// Result of resolving a profile at one depth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedRadius {
    /// A strictly positive, finite radius
    Defined(Micrometers),
    /// The profile yields a radius ≤ 0 (or non-finite) at this depth
    Collapsed,
    /// Anchor profile with `z_i == z_e`: slope undefined at every depth
    Degenerate,
}

impl ResolvedRadius {
    /// Classify a raw radius value
    fn from_raw(radius: f64) -> Self {
        let radius = Micrometers::new(radius);
        if radius.is_positive() {
            ResolvedRadius::Defined(radius)
        } else {
            ResolvedRadius::Collapsed
        }
    }

    /// The radius, if defined
    pub fn radius(self) -> Option<Micrometers> {
        match self {
            ResolvedRadius::Defined(r) => Some(r),
            ResolvedRadius::Collapsed | ResolvedRadius::Degenerate => None,
        }
    }

    /// Field status an evaluation at this radius will carry
    pub fn status(self) -> FieldStatus {
        match self {
            ResolvedRadius::Defined(_) => FieldStatus::Defined,
            ResolvedRadius::Collapsed => FieldStatus::NonPositiveRadius,
            ResolvedRadius::Degenerate => FieldStatus::DegenerateProfile,
        }
    }
}

/// Beam radius as a function of depth
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RadiusProfile {
    /// Same radius at every depth
    Constant {
        /// Beam radius (μm)
        radius: Micrometers,
    },
    /// Cone with half-angle θ: `r(z) = r_s + z × tan(θ)`
    LinearAngle {
        /// Radius at `z = 0` (μm)
        surface_radius: Micrometers,
        /// Cone half-angle, in (0°, 90°)
        half_angle: Degrees,
    },
    /// Linear growth at a fixed rate: `r(z) = r_s + z × m`
    GrowthRate {
        /// Radius at `z = 0` (μm)
        surface_radius: Micrometers,
        /// Radius growth per unit depth (μm/μm)
        growth_rate: f64,
    },
    /// Linear interpolation through `(z_e, r_e)` and `(z_i, r_i)`
    LinearAnchor {
        /// Depth of the first anchor (μm)
        z_e: Micrometers,
        /// Radius at the first anchor (μm)
        r_e: Micrometers,
        /// Depth of the second anchor (μm)
        z_i: Micrometers,
        /// Radius at the second anchor (μm)
        r_i: Micrometers,
    },
}

impl RadiusProfile {
    /// Constant-radius profile
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `radius` is not strictly positive.
    pub fn constant(radius: Micrometers) -> Result<Self> {
        let profile = RadiusProfile::Constant { radius };
        profile.validate()?;
        Ok(profile)
    }

    /// Cone profile from a surface radius and half-angle in degrees
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `surface_radius` is not strictly positive
    /// or `half_angle` is outside (0°, 90°).
    pub fn linear_angle(surface_radius: Micrometers, half_angle: Degrees) -> Result<Self> {
        let profile = RadiusProfile::LinearAngle {
            surface_radius,
            half_angle,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Linear-growth profile from a surface radius and growth rate
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `surface_radius` is not strictly positive
    /// or `growth_rate` is negative.
    pub fn growth_rate(surface_radius: Micrometers, growth_rate: f64) -> Result<Self> {
        let profile = RadiusProfile::GrowthRate {
            surface_radius,
            growth_rate,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Two-anchor interpolation profile
    ///
    /// Equal anchor depths are accepted; such a profile resolves to
    /// [`ResolvedRadius::Degenerate`] at every depth.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if an anchor coordinate is not finite.
    pub fn linear_anchor(
        (z_e, r_e): (Micrometers, Micrometers),
        (z_i, r_i): (Micrometers, Micrometers),
    ) -> Result<Self> {
        let profile = RadiusProfile::LinearAnchor { z_e, r_e, z_i, r_i };
        profile.validate()?;
        Ok(profile)
    }

    /// Check the profile parameters against their documented bounds
    ///
    /// Profiles deserialized from config or built from the public variants
    /// bypass the constructors; [`HeatSourceModel::new`] runs this check.
    ///
    /// [`HeatSourceModel::new`]: crate::HeatSourceModel::new
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` naming the first out-of-range field.
    pub fn validate(&self) -> Result<()> {
        match *self {
            RadiusProfile::Constant { radius } => ensure_positive("radius", *radius),
            RadiusProfile::LinearAngle {
                surface_radius,
                half_angle,
            } => {
                ensure_positive("surface_radius", *surface_radius)?;
                ensure_finite("half_angle", *half_angle)?;
                if *half_angle <= 0.0 || *half_angle >= 90.0 {
                    return Err(HeatSourceError::invalid(
                        "half_angle",
                        format!("must lie in (0°, 90°), got {half_angle}"),
                    ));
                }
                Ok(())
            }
            RadiusProfile::GrowthRate {
                surface_radius,
                growth_rate,
            } => {
                ensure_positive("surface_radius", *surface_radius)?;
                ensure_non_negative("growth_rate", growth_rate)
            }
            RadiusProfile::LinearAnchor { z_e, r_e, z_i, r_i } => {
                ensure_finite("z_e", *z_e)?;
                ensure_finite("r_e", *r_e)?;
                ensure_finite("z_i", *z_i)?;
                ensure_finite("r_i", *r_i)
            }
        }
    }

    /// Effective beam radius at `depth`
    ///
    /// Never produces NaN or infinity: a zero-height anchor pair is reported
    /// as [`ResolvedRadius::Degenerate`] before any division takes place, and
    /// non-positive results are reported as [`ResolvedRadius::Collapsed`].
    pub fn resolve(&self, depth: Micrometers) -> ResolvedRadius {
        match *self {
            RadiusProfile::Constant { radius } => ResolvedRadius::from_raw(*radius),
            RadiusProfile::LinearAngle {
                surface_radius,
                half_angle,
            } => ResolvedRadius::from_raw(
                *surface_radius + *depth * half_angle.to_radians().tan(),
            ),
            RadiusProfile::GrowthRate {
                surface_radius,
                growth_rate,
            } => ResolvedRadius::from_raw(*surface_radius + *depth * growth_rate),
            RadiusProfile::LinearAnchor { z_e, r_e, z_i, r_i } => {
                let height = *z_i - *z_e;
                if height == 0.0 {
                    return ResolvedRadius::Degenerate;
                }
                let slope = (*r_i - *r_e) / height;
                if !slope.is_finite() {
                    return ResolvedRadius::Degenerate;
                }
                ResolvedRadius::from_raw(*r_e + slope * (*depth - *z_e))
            }
        }
    }

    /// Radius at the surface (`z = 0`), if defined there
    pub fn surface_radius(&self) -> Option<Micrometers> {
        self.resolve(Micrometers::ZERO).radius()
    }

    /// True if the radius does not vary with depth
    pub fn is_constant(&self) -> bool {
        match *self {
            RadiusProfile::Constant { .. } => true,
            RadiusProfile::GrowthRate { growth_rate, .. } => growth_rate == 0.0,
            RadiusProfile::LinearAngle { .. } => false,
            RadiusProfile::LinearAnchor { r_e, r_i, z_e, z_i } => r_e == r_i && z_e != z_i,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn um(v: f64) -> Micrometers {
        Micrometers::new(v)
    }

    #[test]
    fn test_constant_profile_ignores_depth() {
        let profile = RadiusProfile::constant(um(25.0)).unwrap();
        for z in [0.0, 10.0, 500.0] {
            assert_eq!(profile.resolve(um(z)), ResolvedRadius::Defined(um(25.0)));
        }
        assert!(profile.is_constant());
    }

    #[test]
    fn test_linear_angle_uses_radians() {
        let profile = RadiusProfile::linear_angle(um(25.0), Degrees::new(45.0)).unwrap();
        let r = profile.resolve(um(10.0)).radius().unwrap();
        assert_relative_eq!(*r, 35.0, epsilon = 1e-9);

        // Default cone from the conical plots: 5° half-angle, 50 μm deep
        let profile = RadiusProfile::linear_angle(um(25.0), Degrees::new(5.0)).unwrap();
        let r = profile.resolve(um(50.0)).radius().unwrap();
        assert_relative_eq!(*r, 25.0 + 50.0 * 5.0_f64.to_radians().tan(), epsilon = 1e-12);
    }

    #[test]
    fn test_linear_angle_bounds() {
        assert!(RadiusProfile::linear_angle(um(25.0), Degrees::new(0.0)).is_err());
        assert!(RadiusProfile::linear_angle(um(25.0), Degrees::new(90.0)).is_err());
        assert!(RadiusProfile::linear_angle(um(0.0), Degrees::new(5.0)).is_err());
        assert!(RadiusProfile::linear_angle(um(25.0), Degrees::new(0.1)).is_ok());
    }

    #[test]
    fn test_linear_angle_collapses_above_surface() {
        // Negative depth above the apex gives a non-positive radius
        let profile = RadiusProfile::linear_angle(um(10.0), Degrees::new(45.0)).unwrap();
        assert_eq!(profile.resolve(um(-20.0)), ResolvedRadius::Collapsed);
        assert_eq!(
            profile.resolve(um(-20.0)).status(),
            FieldStatus::NonPositiveRadius
        );
    }

    #[test]
    fn test_growth_rate_profile() {
        let profile = RadiusProfile::growth_rate(um(25.0), 0.087).unwrap();
        let r = profile.resolve(um(20.0)).radius().unwrap();
        assert_relative_eq!(*r, 25.0 + 20.0 * 0.087, epsilon = 1e-12);
        assert!(RadiusProfile::growth_rate(um(25.0), -0.1).is_err());
        assert!(RadiusProfile::growth_rate(um(25.0), 0.0).unwrap().is_constant());
    }

    #[test]
    fn test_linear_anchor_interpolates() {
        let profile =
            RadiusProfile::linear_anchor((um(0.0), um(40.0)), (um(100.0), um(10.0))).unwrap();
        assert_eq!(profile.resolve(um(0.0)), ResolvedRadius::Defined(um(40.0)));
        let mid = profile.resolve(um(50.0)).radius().unwrap();
        assert_relative_eq!(*mid, 25.0, epsilon = 1e-12);
        // Extrapolation past the bottom anchor eventually collapses
        assert_eq!(profile.resolve(um(200.0)), ResolvedRadius::Collapsed);
    }

    #[test]
    fn test_linear_anchor_degenerate_for_any_depth() {
        let profile =
            RadiusProfile::linear_anchor((um(30.0), um(40.0)), (um(30.0), um(10.0))).unwrap();
        for z in [-10.0, 0.0, 30.0, 1e6] {
            let resolved = profile.resolve(um(z));
            assert_eq!(resolved, ResolvedRadius::Degenerate);
            assert_eq!(resolved.status(), FieldStatus::DegenerateProfile);
            assert_eq!(resolved.radius(), None);
        }
        assert_eq!(profile.surface_radius(), None);
    }

    #[test]
    fn test_serde_tagged_profile() {
        let json = r#"{"kind":"linear_angle","surface_radius":25.0,"half_angle":5.0}"#;
        let profile: RadiusProfile = serde_json::from_str(json).unwrap();
        assert_eq!(
            profile,
            RadiusProfile::LinearAngle {
                surface_radius: um(25.0),
                half_angle: Degrees::new(5.0),
            }
        );
        assert!(profile.validate().is_ok());
    }
}
