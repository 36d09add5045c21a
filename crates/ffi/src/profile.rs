//! FFI-exposed radius profile description.
//!
//! `RadiusProfileSpec` tells a model constructor how the beam radius changes
//! with depth. It mirrors `heat_source_core::RadiusProfile` with a stable
//! C-compatible layout.

use heat_source_core::{Degrees, Micrometers, RadiusProfile};

use crate::error::DefaultFfiError;

/// Depth-dependent beam radius, all lengths in micrometers.
///
/// # Example
///
/// ```c
/// RadiusProfileSpec profile;
/// profile.tag = LinearAngle;
/// profile.linear_angle.surface_radius = 25.0;
/// profile.linear_angle.half_angle_deg = 5.0;
/// ```
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RadiusProfileSpec {
    /// Same radius at every depth.
    Constant {
        /// Beam radius (> 0).
        radius: f64,
    },

    /// `r(z) = surface_radius + z * tan(half_angle)`.
    LinearAngle {
        /// Radius at the surface (> 0).
        surface_radius: f64,
        /// Cone half-angle in degrees, strictly between 0 and 90.
        half_angle_deg: f64,
    },

    /// `r(z) = surface_radius + z * growth_rate`.
    GrowthRate {
        /// Radius at the surface (> 0).
        surface_radius: f64,
        /// Radius gained per micrometer of depth (>= 0).
        growth_rate: f64,
    },

    /// Linear interpolation through `(z_e, r_e)` and `(z_i, r_i)`.
    LinearAnchor {
        /// Top anchor depth.
        z_e: f64,
        /// Radius at the top anchor.
        r_e: f64,
        /// Bottom anchor depth.
        z_i: f64,
        /// Radius at the bottom anchor.
        r_i: f64,
    },
}

impl RadiusProfileSpec {
    /// Validate and convert into the core profile type.
    pub(crate) fn to_profile(self) -> Result<RadiusProfile, DefaultFfiError> {
        let um = Micrometers::new;
        let profile = match self {
            RadiusProfileSpec::Constant { radius } => RadiusProfile::constant(um(radius)),
            RadiusProfileSpec::LinearAngle {
                surface_radius,
                half_angle_deg,
            } => RadiusProfile::linear_angle(um(surface_radius), Degrees::new(half_angle_deg)),
            RadiusProfileSpec::GrowthRate {
                surface_radius,
                growth_rate,
            } => RadiusProfile::growth_rate(um(surface_radius), growth_rate),
            RadiusProfileSpec::LinearAnchor { z_e, r_e, z_i, r_i } => {
                RadiusProfile::linear_anchor((um(z_e), um(r_e)), (um(z_i), um(r_i)))
            }
        }?;
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FfiError, HeatSourceErrorCode};

    #[test]
    fn test_linear_angle_converts() {
        let spec = RadiusProfileSpec::LinearAngle {
            surface_radius: 25.0,
            half_angle_deg: 5.0,
        };
        let profile = spec.to_profile().unwrap();
        assert_eq!(profile.surface_radius(), Some(Micrometers::new(25.0)));
    }

    #[test]
    fn test_out_of_range_half_angle_rejected() {
        let spec = RadiusProfileSpec::LinearAngle {
            surface_radius: 25.0,
            half_angle_deg: 90.0,
        };
        let err = spec.to_profile().unwrap_err();
        assert_eq!(err.code(), HeatSourceErrorCode::InvalidParameter);
    }
}
