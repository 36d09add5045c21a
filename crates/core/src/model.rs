//! Heat source model: a formula paired with a depth profile
//!
//! [`HeatSourceModel`] is the entry point used by presentation layers. It is
//! immutable; changing a parameter means building a new model, and every
//! evaluation is recomputed from scratch.

use tracing::{debug, warn};

use crate::core_types::field::{FieldStatus, IntensityField};
use crate::core_types::grid::SampleGrid;
use crate::core_types::units::{Degrees, Micrometers, Watts};
use crate::error::Result;
use crate::physics::{
    ConicalLinear, ExponentialCone, GaussianCone, HeatSourceFormula, IntensityFormula,
    SuperGaussian,
};
use crate::profile::{RadiusProfile, ResolvedRadius};

/// Evaluate `formula` over `grid` at beam radius `radius`
///
/// Computes `r = sqrt(x² + y²)` for each cell and applies the formula. A
/// radius that is zero, negative or non-finite yields an all-zero field
/// flagged [`FieldStatus::NonPositiveRadius`].
pub fn evaluate<F>(grid: &SampleGrid, formula: &F, radius: Micrometers) -> IntensityField
where
    F: IntensityFormula + ?Sized,
{
    let resolved = if radius.is_positive() {
        ResolvedRadius::Defined(radius)
    } else {
        ResolvedRadius::Collapsed
    };
    evaluate_resolved(grid, formula, resolved)
}

/// Evaluate `formula` over `grid` for an already-resolved radius
///
/// Degenerate profiles and degenerate formula geometry both produce an
/// all-zero field flagged [`FieldStatus::DegenerateProfile`].
pub fn evaluate_resolved<F>(
    grid: &SampleGrid,
    formula: &F,
    resolved: ResolvedRadius,
) -> IntensityField
where
    F: IntensityFormula + ?Sized,
{
    let status = if formula.is_degenerate() {
        FieldStatus::DegenerateProfile
    } else {
        resolved.status()
    };

    let r0 = match (status, resolved.radius()) {
        (FieldStatus::Defined, Some(r0)) => *r0,
        _ => {
            warn!(
                "Suppressing {} field: {:?} ({:?})",
                formula.name(),
                status,
                resolved
            );
            return IntensityField::suppressed(grid, status);
        }
    };

    let field = IntensityField::from_fn(grid, |row, col| {
        formula.intensity_at(grid.radius_at(row, col), r0)
    });

    debug!(
        "Evaluated {} on {}x{} grid: r0={:.3} um, max={:.4e}",
        formula.name(),
        grid.shape().0,
        grid.shape().1,
        r0,
        field.max()
    );

    field
}

/// A heat source formula together with its depth-dependent radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatSourceModel {
    formula: HeatSourceFormula,
    profile: RadiusProfile,
}

impl HeatSourceModel {
    /// Pair a formula with a radius profile
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the profile fails
    /// [`RadiusProfile::validate`].
    pub fn new(formula: impl Into<HeatSourceFormula>, profile: RadiusProfile) -> Result<Self> {
        profile.validate()?;
        Ok(Self {
            formula: formula.into(),
            profile,
        })
    }

    /// Conical-linear source whose radius grows through a cone half-angle
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a negative `I0`, a non-positive surface
    /// radius, or a half-angle outside (0°, 90°).
    pub fn conical(
        peak_intensity: f64,
        surface_radius: Micrometers,
        half_angle: Degrees,
    ) -> Result<Self> {
        Self::new(
            ConicalLinear::new(peak_intensity)?,
            RadiusProfile::linear_angle(surface_radius, half_angle)?,
        )
    }

    /// Exponential-cone source with the given radius profile
    ///
    /// # Errors
    ///
    /// See [`ExponentialCone::new`] and [`RadiusProfile::validate`].
    pub fn exponential_cone(
        power: Watts,
        efficiency: f64,
        decay: f64,
        profile: RadiusProfile,
    ) -> Result<Self> {
        Self::new(ExponentialCone::new(power, efficiency, decay)?, profile)
    }

    /// Gaussian-cone source whose radius follows its own depth anchors
    ///
    /// The anchors were checked by [`GaussianCone::new`], so the derived
    /// profile is always valid.
    pub fn gaussian_cone(source: GaussianCone) -> Self {
        Self {
            formula: source.into(),
            profile: source.radius_profile(),
        }
    }

    /// Super-Gaussian source whose radius grows linearly at `growth_rate`
    ///
    /// A zero growth rate gives the constant-radius model.
    ///
    /// # Errors
    ///
    /// See [`SuperGaussian::new`] and [`RadiusProfile::growth_rate`].
    pub fn super_gaussian(
        source: SuperGaussian,
        surface_radius: Micrometers,
        growth_rate: f64,
    ) -> Result<Self> {
        Self::new(source, RadiusProfile::growth_rate(surface_radius, growth_rate)?)
    }

    /// The intensity formula
    pub fn formula(&self) -> &HeatSourceFormula {
        &self.formula
    }

    /// The depth profile
    pub fn profile(&self) -> &RadiusProfile {
        &self.profile
    }

    /// Same formula with a different radius profile
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the profile fails
    /// [`RadiusProfile::validate`].
    pub fn with_profile(&self, profile: RadiusProfile) -> Result<Self> {
        Self::new(self.formula, profile)
    }

    /// Same formula held at its surface radius at every depth
    ///
    /// This is the reference the growing-radius model is compared against.
    /// Returns `None` if the profile has no defined radius at `z = 0`.
    pub fn constant_radius_counterpart(&self) -> Option<Self> {
        let radius = self.profile.surface_radius()?;
        self.with_profile(RadiusProfile::Constant { radius }).ok()
    }

    /// Beam radius at `depth`
    pub fn resolve_radius(&self, depth: Micrometers) -> ResolvedRadius {
        self.profile.resolve(depth)
    }

    /// Intensity field over `grid` at `depth`
    pub fn evaluate_at_depth(&self, grid: &SampleGrid, depth: Micrometers) -> IntensityField {
        let resolved = self.resolve_radius(depth);
        debug!(
            "Resolving {} at z={:.2} um: {:?}",
            self.formula.name(),
            *depth,
            resolved
        );
        evaluate_resolved(grid, &self.formula, resolved)
    }

    /// Intensity field at the surface (`z = 0`)
    pub fn surface_field(&self, grid: &SampleGrid) -> IntensityField {
        self.evaluate_at_depth(grid, Micrometers::ZERO)
    }

    /// Maximum surface intensity on `grid`
    ///
    /// Used as a fixed color-scale ceiling so fields at different depths are
    /// plotted on the same scale.
    pub fn reference_max(&self, grid: &SampleGrid) -> f64 {
        self.surface_field(grid).max()
    }

    /// On-axis intensity at `depth`; zero when the radius is not defined
    pub fn peak_at_depth(&self, depth: Micrometers) -> f64 {
        if self.formula.is_degenerate() {
            return 0.0;
        }
        self.resolve_radius(depth)
            .radius()
            .map_or(0.0, |r0| self.formula.peak_intensity(*r0))
    }
}
