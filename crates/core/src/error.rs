//! Error types for heat source model construction and configuration
//!
//! Evaluation itself never fails: degenerate or collapsed radius profiles are
//! reported through [`FieldStatus`](crate::core_types::field::FieldStatus)
//! alongside an all-zero field. Errors are raised only when parameters are
//! constructed or a configuration file is loaded.

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, HeatSourceError>;

/// Errors raised while building heat source models
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HeatSourceError {
    /// A parameter is outside its documented physical range
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter {
        /// Parameter name as it appears in the config (e.g. `"r0"`, `"half_angle"`)
        name: &'static str,
        /// Human-readable constraint that was violated
        reason: String,
    },

    /// A sampling grid or depth sweep has an unusable shape
    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    /// The configuration file could not be read
    #[error("failed to read config {path}: {message}")]
    Config {
        /// Path that was attempted
        path: String,
        /// Underlying I/O error message
        message: String,
    },

    /// The configuration contents could not be parsed
    #[error("failed to parse config: {0}")]
    Parse(String),
}

impl HeatSourceError {
    /// Shorthand for [`HeatSourceError::InvalidParameter`]
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Require a finite value `>= 0`
pub(crate) fn ensure_non_negative(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(HeatSourceError::invalid(
            name,
            format!("must be finite, got {value}"),
        ));
    }
    if value < 0.0 {
        return Err(HeatSourceError::invalid(
            name,
            format!("must be non-negative, got {value}"),
        ));
    }
    Ok(())
}

/// Require a finite value `> 0`
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(HeatSourceError::invalid(
            name,
            format!("must be finite and positive, got {value}"),
        ));
    }
    Ok(())
}

/// Require a finite value (any sign)
pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(HeatSourceError::invalid(
            name,
            format!("must be finite, got {value}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = HeatSourceError::invalid("k", "must be finite and positive, got 0");
        assert_eq!(
            err.to_string(),
            "invalid parameter k: must be finite and positive, got 0"
        );
    }

    #[test]
    fn test_guards() {
        assert!(ensure_non_negative("power", 0.0).is_ok());
        assert!(ensure_non_negative("power", -1.0).is_err());
        assert!(ensure_non_negative("power", f64::NAN).is_err());
        assert!(ensure_positive("r0", 0.0).is_err());
        assert!(ensure_positive("r0", 1e-6).is_ok());
        assert!(ensure_finite("z_e", -40.0).is_ok());
        assert!(ensure_finite("z_e", f64::INFINITY).is_err());
    }
}
