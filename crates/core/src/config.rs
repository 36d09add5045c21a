//! JSON configuration for heat source models
//!
//! A config names one formula variant with its parameters and radius
//! profile, plus the sampling grid and depth sweep to evaluate it on. Missing
//! grid and sweep sections fall back to the defaults used by the plots
//! (`[-50, 50]` μm, 100 samples per axis, 100 depths down to 100 μm).
//!
//! # Example
//! ```
//! use heat_source_core::config::HeatSourceConfig;
//!
//! let config = HeatSourceConfig::from_json_str(r#"{
//!     "model": {
//!         "variant": "conical",
//!         "profile": { "kind": "linear_angle", "surface_radius": 25.0, "half_angle": 5.0 }
//!     }
//! }"#).unwrap();
//! let model = config.build_model().unwrap();
//! assert_eq!(model.peak_at_depth(0.0.into()), 1.0);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core_types::grid::{GridSpec, SampleGrid};
use crate::core_types::units::{Micrometers, Watts};
use crate::error::{HeatSourceError, Result};
use crate::model::HeatSourceModel;
use crate::physics::{ConicalLinear, GaussianCone, SuperGaussian};
use crate::profile::RadiusProfile;
use crate::sweep::{DepthSamples, DEFAULT_DEPTH_SAMPLES, DEFAULT_MAX_DEPTH_UM};

fn default_peak_intensity() -> f64 {
    1.0
}

/// Formula variant and its parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum ModelConfig {
    /// Conical-linear shape function
    Conical {
        /// On-axis intensity `I0` (arbitrary units)
        #[serde(default = "default_peak_intensity")]
        peak_intensity: f64,
        /// Radius profile
        profile: RadiusProfile,
    },
    /// Power-normalized exponential cone
    ExponentialCone {
        /// Beam power (W)
        power: f64,
        /// Absorption efficiency
        efficiency: f64,
        /// Decay coefficient `C`
        decay: f64,
        /// Radius profile
        profile: RadiusProfile,
    },
    /// Volumetric Gaussian cone between two depth anchors
    GaussianCone {
        /// Beam power (W)
        power: f64,
        /// Absorption efficiency
        efficiency: f64,
        /// Top anchor depth (μm)
        z_e: f64,
        /// Top anchor radius (μm)
        r_e: f64,
        /// Bottom anchor depth (μm)
        z_i: f64,
        /// Bottom anchor radius (μm)
        r_i: f64,
    },
    /// Super-Gaussian with shape exponent `k`
    SuperGaussian {
        /// Amplitude factor `A`
        amplitude: f64,
        /// Shape exponent `k`
        k: f64,
        /// Beam power (W)
        power: f64,
        /// Absorption efficiency
        efficiency: f64,
        /// Decay coefficient `C`
        decay: f64,
        /// Radius profile
        profile: RadiusProfile,
    },
}

impl ModelConfig {
    /// Validate the parameters and build the model
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for the first out-of-range parameter.
    pub fn build(&self) -> Result<HeatSourceModel> {
        match *self {
            ModelConfig::Conical {
                peak_intensity,
                profile,
            } => HeatSourceModel::new(ConicalLinear::new(peak_intensity)?, profile),
            ModelConfig::ExponentialCone {
                power,
                efficiency,
                decay,
                profile,
            } => HeatSourceModel::exponential_cone(Watts::new(power), efficiency, decay, profile),
            ModelConfig::GaussianCone {
                power,
                efficiency,
                z_e,
                r_e,
                z_i,
                r_i,
            } => {
                let source = GaussianCone::new(
                    Watts::new(power),
                    efficiency,
                    (Micrometers::new(z_e), Micrometers::new(r_e)),
                    (Micrometers::new(z_i), Micrometers::new(r_i)),
                )?;
                Ok(HeatSourceModel::gaussian_cone(source))
            }
            ModelConfig::SuperGaussian {
                amplitude,
                k,
                power,
                efficiency,
                decay,
                profile,
            } => {
                let source = SuperGaussian::new(amplitude, k, Watts::new(power), efficiency, decay)?;
                HeatSourceModel::new(source, profile)
            }
        }
    }
}

/// Depth sweep and selected depth
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepSpec {
    /// Deepest sample of the sweep (μm)
    pub max_depth: f64,
    /// Number of samples from the surface to `max_depth`
    pub samples: usize,
    /// Depth at which a full field is evaluated (μm)
    pub selected_depth: f64,
}

impl Default for SweepSpec {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH_UM,
            samples: DEFAULT_DEPTH_SAMPLES,
            selected_depth: 20.0,
        }
    }
}

/// Complete evaluation config
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatSourceConfig {
    /// Formula variant, parameters and profile
    pub model: ModelConfig,
    /// Sampling grid
    #[serde(default)]
    pub grid: GridSpec,
    /// Depth sweep
    #[serde(default)]
    pub sweep: SweepSpec,
}

impl HeatSourceConfig {
    /// Parse a config from a JSON string
    ///
    /// # Errors
    ///
    /// Returns [`HeatSourceError::Parse`] for malformed JSON or unknown variants.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| HeatSourceError::Parse(e.to_string()))
    }

    /// Read and parse a JSON config file
    ///
    /// # Errors
    ///
    /// Returns [`HeatSourceError::Config`] if the file cannot be read and
    /// [`HeatSourceError::Parse`] if its contents are invalid.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| HeatSourceError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config = Self::from_json_str(&contents)?;
        info!("Loaded heat source config from {}", path.display());
        Ok(config)
    }

    /// Serialize the config as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns [`HeatSourceError::Parse`] if serialization fails.
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| HeatSourceError::Parse(e.to_string()))
    }

    /// Build the configured model
    ///
    /// # Errors
    ///
    /// See [`ModelConfig::build`].
    pub fn build_model(&self) -> Result<HeatSourceModel> {
        self.model.build()
    }

    /// Build the configured sampling grid
    ///
    /// # Errors
    ///
    /// See [`SampleGrid::linspace`].
    pub fn build_grid(&self) -> Result<SampleGrid> {
        SampleGrid::linspace(&self.grid)
    }

    /// Depth samples for the configured sweep
    ///
    /// # Errors
    ///
    /// See [`DepthSamples::linspace`].
    pub fn depth_samples(&self) -> Result<DepthSamples> {
        DepthSamples::to_depth(Micrometers::new(self.sweep.max_depth), self.sweep.samples)
    }
}
