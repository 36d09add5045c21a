//! Heat Source Core Library
//!
//! Analytical heat-source intensity models for laser-material interaction
//! (laser welding, additive manufacturing). Each model combines a closed-form
//! radial intensity formula with a depth-dependent beam radius, turning one
//! surface distribution into a family of distributions indexed by depth.
//!
//! ## Formula variants
//! - Conical-linear shape function (arbitrary units)
//! - Power-normalized exponential cone
//! - Volumetric Gaussian cone between two depth anchors
//! - Super-Gaussian with a Gamma-normalized shape exponent
//!
//! ## Radius profiles
//! - Constant, linear through a half-angle, linear through a growth rate,
//!   linear interpolation between two anchors
//!
//! Everything here is pure computation over plain numeric data. Rendering,
//! color scales and UI controls belong to the caller.
//!
//! # Example
//! ```
//! use heat_source_core::{
//!     peak_over_depth, DepthSamples, HeatSourceModel, Micrometers, SampleGrid, SuperGaussian,
//!     Watts,
//! };
//!
//! let source = SuperGaussian::new(2.0, 1.0, Watts::new(100.0), 0.8, 2.0).unwrap();
//! let model = HeatSourceModel::super_gaussian(source, Micrometers::new(25.0), 0.087).unwrap();
//!
//! let field = model.evaluate_at_depth(&SampleGrid::default(), Micrometers::new(20.0));
//! assert_eq!(field.shape(), (100, 100));
//!
//! let depths = DepthSamples::to_depth(Micrometers::new(100.0), 100).unwrap();
//! let peaks: Vec<f64> = peak_over_depth(depths, &model).map(|p| p.peak).collect();
//! assert!(peaks.windows(2).all(|w| w[1] <= w[0]));
//! ```

pub mod config;
pub mod core_types;
pub mod error;
pub mod model;
pub mod physics;
pub mod profile;
pub mod sweep;

// Re-export core types
pub use core_types::{
    Degrees, FieldStatus, GridSpec, IntensityField, Micrometers, Radians, SampleGrid, Watts,
};

// Re-export models and formulas
pub use config::{HeatSourceConfig, ModelConfig, SweepSpec};
pub use error::{HeatSourceError, Result};
pub use model::{evaluate, evaluate_resolved, HeatSourceModel};
pub use physics::{
    ConicalLinear, ExponentialCone, GaussianCone, HeatSourceFormula, IntensityFormula,
    SuperGaussian,
};
pub use profile::{RadiusProfile, ResolvedRadius};
pub use sweep::{
    compare_peak_over_depth, peak_over_depth, DepthPeak, DepthSamples, PeakComparison, PeakSweep,
};
