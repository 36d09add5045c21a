//! Semantic unit types for the heat source parameters
//!
//! Newtype wrappers keep beam radii, depths, angles and powers from being
//! mixed up at call sites (a half-angle in degrees passed where radians are
//! expected is the classic mistake in cone geometry).
//!
//! # Design Philosophy
//! - All quantities use f64: intensities span several orders of magnitude
//! - `Deref` to the raw value so formulas read like their textbook form
//! - Total ordering via `Ord` (NaN sorts greater than all values)
//! - Serde support for JSON configuration
//!
//! # Usage
//! ```
//! use heat_source_core::core_types::units::{Degrees, Micrometers};
//!
//! let half_angle = Degrees::new(45.0);
//! assert!((half_angle.to_radians().tan() - 1.0).abs() < 1e-12);
//!
//! let r0 = Micrometers::new(25.0);
//! assert_eq!(*(r0 * 2.0), 50.0);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Deref, Mul, Sub};

// ============================================================================
// LENGTH
// ============================================================================

/// Length in micrometers (μm)
///
/// Used for beam radii, depths and grid coordinates. Signed, since depth
/// offsets and grid coordinates can be negative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Micrometers(f64);

impl Eq for Micrometers {}

impl PartialOrd for Micrometers {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Micrometers {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Deref for Micrometers {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Micrometers {
    /// Zero length
    pub const ZERO: Micrometers = Micrometers(0.0);

    /// Create a new length in micrometers
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Micrometers(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// True if the length is finite and strictly positive (usable as a radius)
    #[inline]
    #[must_use]
    pub fn is_positive(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }
}

impl From<f64> for Micrometers {
    fn from(v: f64) -> Self {
        Micrometers(v)
    }
}

impl From<Micrometers> for f64 {
    fn from(m: Micrometers) -> f64 {
        m.0
    }
}

impl Add for Micrometers {
    type Output = Micrometers;
    fn add(self, rhs: Micrometers) -> Micrometers {
        Micrometers(self.0 + rhs.0)
    }
}

impl Sub for Micrometers {
    type Output = Micrometers;
    fn sub(self, rhs: Micrometers) -> Micrometers {
        Micrometers(self.0 - rhs.0)
    }
}

impl Mul<f64> for Micrometers {
    type Output = Micrometers;
    fn mul(self, rhs: f64) -> Micrometers {
        Micrometers(self.0 * rhs)
    }
}

impl fmt::Display for Micrometers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} μm", self.0)
    }
}

// ============================================================================
// ANGLE
// ============================================================================

/// Angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Degrees(f64);

impl Eq for Degrees {}

impl PartialOrd for Degrees {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Degrees {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Deref for Degrees {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Degrees {
    /// Create a new angle in degrees
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Degrees(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert to radians
    #[inline]
    #[must_use]
    pub fn to_radians(self) -> Radians {
        Radians(self.0.to_radians())
    }
}

impl From<f64> for Degrees {
    fn from(v: f64) -> Self {
        Degrees(v)
    }
}

impl fmt::Display for Degrees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}°", self.0)
    }
}

/// Angle in radians
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Radians(f64);

impl Deref for Radians {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Radians {
    /// Tangent of the angle
    #[inline]
    #[must_use]
    pub fn tan(self) -> f64 {
        self.0.tan()
    }
}

impl fmt::Display for Radians {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4} rad", self.0)
    }
}

// ============================================================================
// POWER
// ============================================================================

/// Beam power in watts
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Watts(f64);

impl Eq for Watts {}

impl PartialOrd for Watts {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Watts {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Deref for Watts {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Watts {
    /// Create a new power in watts
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Watts(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for Watts {
    fn from(v: f64) -> Self {
        Watts(v)
    }
}

impl fmt::Display for Watts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} W", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degrees_to_radians() {
        let angle = Degrees::new(180.0);
        assert!((*angle.to_radians() - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn test_micrometers_arithmetic() {
        let surface = Micrometers::new(25.0);
        let growth = Micrometers::new(10.0) * 0.5;
        assert_eq!(surface + growth, Micrometers::new(30.0));
        assert_eq!(surface - growth, Micrometers::new(20.0));
    }

    #[test]
    fn test_micrometers_positive() {
        assert!(Micrometers::new(1e-9).is_positive());
        assert!(!Micrometers::ZERO.is_positive());
        assert!(!Micrometers::new(-3.0).is_positive());
        assert!(!Micrometers::new(f64::NAN).is_positive());
        assert!(!Micrometers::new(f64::INFINITY).is_positive());
    }

    #[test]
    fn test_total_ordering_with_nan() {
        let a = Micrometers::new(1.0);
        let nan = Micrometers::new(f64::NAN);
        assert!(a.max(nan).is_nan());
        assert_eq!(a.min(nan), a);
        assert_eq!(Watts::new(100.0).min(Watts::new(250.0)), Watts::new(100.0));
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&Micrometers::new(12.5)).unwrap();
        assert_eq!(json, "12.5");
        let back: Degrees = serde_json::from_str("5.0").unwrap();
        assert_eq!(back, Degrees::new(5.0));
    }
}
