//! Radial heat-flux intensity formulas
//!
//! Every formula maps a radial distance `r` and an effective beam radius `r0`
//! to a non-negative intensity. Depth enters only through `r0`, which is
//! resolved separately by a [`RadiusProfile`](crate::profile::RadiusProfile).

mod conical;
mod exponential_cone;
mod gaussian_cone;
mod super_gaussian;

pub use conical::ConicalLinear;
pub use exponential_cone::ExponentialCone;
pub use gaussian_cone::GaussianCone;
pub use super_gaussian::SuperGaussian;

/// A closed-form radial intensity formula
///
/// Implementations are pure: the same `(r, r0)` always yields the same value.
/// A non-positive `r0` yields zero rather than a NaN or infinity.
pub trait IntensityFormula {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Intensity at radial distance `r` (μm) for beam radius `r0` (μm)
    fn intensity_at(&self, r: f64, r0: f64) -> f64;

    /// Intensity on the beam axis (`r = 0`) for beam radius `r0`
    fn peak_intensity(&self, r0: f64) -> f64 {
        self.intensity_at(0.0, r0)
    }

    /// Peak intensity for each radius in `radii`
    fn peak_intensities<I>(&self, radii: I) -> Vec<f64>
    where
        Self: Sized,
        I: IntoIterator<Item = f64>,
    {
        radii.into_iter().map(|r0| self.peak_intensity(r0)).collect()
    }

    /// True if intensity is exactly zero for `r > r0`
    fn has_cutoff(&self) -> bool {
        false
    }

    /// True if the formula's own geometry is undefined (e.g. a zero-height cone)
    fn is_degenerate(&self) -> bool {
        false
    }
}

/// One of the supported heat source formulas
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeatSourceFormula {
    /// Linear falloff to the cone edge, arbitrary units
    Conical(ConicalLinear),
    /// Power-normalized exponential decay inside the cone
    ExponentialCone(ExponentialCone),
    /// Volumetric Gaussian between two depth anchors
    GaussianCone(GaussianCone),
    /// Super-Gaussian with shape exponent `k`
    SuperGaussian(SuperGaussian),
}

impl HeatSourceFormula {
    fn inner(&self) -> &dyn IntensityFormula {
        match self {
            HeatSourceFormula::Conical(f) => f,
            HeatSourceFormula::ExponentialCone(f) => f,
            HeatSourceFormula::GaussianCone(f) => f,
            HeatSourceFormula::SuperGaussian(f) => f,
        }
    }
}

impl IntensityFormula for HeatSourceFormula {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn intensity_at(&self, r: f64, r0: f64) -> f64 {
        self.inner().intensity_at(r, r0)
    }

    fn peak_intensity(&self, r0: f64) -> f64 {
        self.inner().peak_intensity(r0)
    }

    fn has_cutoff(&self) -> bool {
        self.inner().has_cutoff()
    }

    fn is_degenerate(&self) -> bool {
        self.inner().is_degenerate()
    }
}

impl From<ConicalLinear> for HeatSourceFormula {
    fn from(f: ConicalLinear) -> Self {
        HeatSourceFormula::Conical(f)
    }
}

impl From<ExponentialCone> for HeatSourceFormula {
    fn from(f: ExponentialCone) -> Self {
        HeatSourceFormula::ExponentialCone(f)
    }
}

impl From<GaussianCone> for HeatSourceFormula {
    fn from(f: GaussianCone) -> Self {
        HeatSourceFormula::GaussianCone(f)
    }
}

impl From<SuperGaussian> for HeatSourceFormula {
    fn from(f: SuperGaussian) -> Self {
        HeatSourceFormula::SuperGaussian(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::units::{Micrometers, Watts};

    fn all_formulas() -> Vec<HeatSourceFormula> {
        vec![
            ConicalLinear::new(1.0).unwrap().into(),
            ExponentialCone::new(Watts::new(250.0), 1.0, 2.0)
                .unwrap()
                .into(),
            GaussianCone::new(
                Watts::new(250.0),
                0.8,
                (Micrometers::new(0.0), Micrometers::new(30.0)),
                (Micrometers::new(80.0), Micrometers::new(12.0)),
            )
            .unwrap()
            .into(),
            SuperGaussian::new(2.0, 1.5, Watts::new(100.0), 0.8, 2.0)
                .unwrap()
                .into(),
        ]
    }

    #[test]
    fn test_enum_delegates_to_variant() {
        let cone = ConicalLinear::new(2.0).unwrap();
        let wrapped = HeatSourceFormula::from(cone);
        assert_eq!(wrapped.name(), "conical-linear");
        assert_eq!(wrapped.intensity_at(5.0, 10.0), cone.intensity_at(5.0, 10.0));
        assert!(wrapped.has_cutoff());
    }

    #[test]
    fn test_non_positive_radius_gives_zero() {
        for formula in all_formulas() {
            for r0 in [0.0, -10.0] {
                assert_eq!(formula.intensity_at(0.0, r0), 0.0, "{}", formula.name());
                assert_eq!(formula.peak_intensity(r0), 0.0, "{}", formula.name());
            }
        }
    }

    #[test]
    fn test_cutoff_variants_zero_outside_radius() {
        for formula in all_formulas().into_iter().filter(IntensityFormula::has_cutoff) {
            for r in [25.01, 30.0, 100.0] {
                assert_eq!(formula.intensity_at(r, 25.0), 0.0, "{}", formula.name());
            }
        }
    }
}
