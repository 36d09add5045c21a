//! Exponential-cone heat source
//!
//! Power-normalized exponential decay inside the cone radius, zero outside.

use std::f64::consts::PI;

use crate::core_types::units::Watts;
use crate::error::{ensure_non_negative, ensure_positive, Result};
use crate::physics::IntensityFormula;

/// Exponential decay within the cone
///
/// # Formula
/// ```text
/// I(r) = (P × η / (π × r0²)) × exp(-C × r / r0)    for r ≤ r0
/// I(r) = 0                                         for r > r0
/// ```
///
/// Where:
/// - **P** = Beam power (W)
/// - **η** = Absorption efficiency (0-1 by convention)
/// - **C** = Decay coefficient (dimensionless, > 0)
/// - **r0** = Cone radius at the evaluated depth (μm)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialCone {
    power: Watts,
    efficiency: f64,
    decay: f64,
}

impl ExponentialCone {
    /// Create an exponential-cone source
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `power` or `efficiency` is negative, or
    /// `decay` is not strictly positive.
    pub fn new(power: Watts, efficiency: f64, decay: f64) -> Result<Self> {
        ensure_non_negative("power", *power)?;
        ensure_non_negative("efficiency", efficiency)?;
        ensure_positive("decay", decay)?;
        Ok(Self {
            power,
            efficiency,
            decay,
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

    /// Decay coefficient `C`
    pub fn decay(&self) -> f64 {
        self.decay
    }
}

impl IntensityFormula for ExponentialCone {
    fn name(&self) -> &'static str {
        "exponential-cone"
    }

    fn intensity_at(&self, r: f64, r0: f64) -> f64 {
        if r0 <= 0.0 || r > r0 {
            return 0.0;
        }
        let absorbed = *self.power * self.efficiency;
        absorbed / (PI * r0 * r0) * (-self.decay * r / r0).exp()
    }

    fn has_cutoff(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_exponential_reference_points() {
        let source = ExponentialCone::new(Watts::new(250.0), 1.0, 2.0).unwrap();

        let axis = source.intensity_at(0.0, 25.0);
        assert_relative_eq!(axis, 250.0 / (PI * 625.0), epsilon = 1e-12);
        assert_relative_eq!(axis, 0.1273, epsilon = 1e-4);

        let edge = source.intensity_at(25.0, 25.0);
        assert_relative_eq!(edge, axis * (-2.0_f64).exp(), epsilon = 1e-12);
        assert_relative_eq!(edge, 0.01723, epsilon = 1e-5);
    }

    #[test]
    fn test_exponential_zero_outside_cone() {
        let source = ExponentialCone::new(Watts::new(250.0), 1.0, 2.0).unwrap();
        assert_eq!(source.intensity_at(25.5, 25.0), 0.0);
        assert_eq!(source.intensity_at(1.0, 0.0), 0.0);
    }

    #[test]
    fn test_exponential_efficiency_above_one_accepted() {
        // Formula accepts any non-negative efficiency; [0, 1] is only a convention
        assert!(ExponentialCone::new(Watts::new(100.0), 1.2, 1.0).is_ok());
        assert!(ExponentialCone::new(Watts::new(100.0), -0.1, 1.0).is_err());
        assert!(ExponentialCone::new(Watts::new(-5.0), 0.5, 1.0).is_err());
        assert!(ExponentialCone::new(Watts::new(100.0), 0.5, 0.0).is_err());
    }
}
