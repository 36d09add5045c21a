//! Core types and utilities

pub mod field;
pub mod grid;
pub mod units;

pub use field::{FieldStatus, IntensityField};
pub use grid::{GridSpec, SampleGrid};
pub use units::*;
