//! FFI queries: intensity fields over a sampling grid and on-axis peaks.
//!
//! Field values are returned as heap arrays owned by the caller until they
//! are handed back to `heat_source_free_field`.

use std::ptr;
use std::slice;

use heat_source_core::{
    peak_over_depth, FieldStatus, GridSpec, IntensityField, Micrometers, SampleGrid,
};

use crate::error::{DefaultFfiError, HeatSourceErrorCode};
use crate::helpers::{complete, model_from_ptr, track_error};
use crate::instance::HeatSourceHandle;

/// C-compatible counterpart of `FieldStatus`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStatusCode {
    /// Radius defined and positive; values follow the formula.
    Defined = 0,
    /// Anchor profile with equal depths; every value is zero.
    DegenerateProfile = 1,
    /// Radius zero or negative at this depth; every value is zero.
    NonPositiveRadius = 2,
}

impl From<FieldStatus> for FieldStatusCode {
    fn from(status: FieldStatus) -> Self {
        match status {
            FieldStatus::Defined => FieldStatusCode::Defined,
            FieldStatus::DegenerateProfile => FieldStatusCode::DegenerateProfile,
            FieldStatus::NonPositiveRadius => FieldStatusCode::NonPositiveRadius,
        }
    }
}

/// Rectangular sampling grid, bounds in micrometers.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpecData {
    /// Lower x bound
    pub x_min: f64,
    /// Upper x bound
    pub x_max: f64,
    /// Lower y bound
    pub y_min: f64,
    /// Upper y bound
    pub y_max: f64,
    /// Samples along x (columns)
    pub nx: usize,
    /// Samples along y (rows)
    pub ny: usize,
}

impl From<GridSpecData> for GridSpec {
    fn from(data: GridSpecData) -> Self {
        GridSpec {
            x_min: data.x_min,
            x_max: data.x_max,
            y_min: data.y_min,
            y_max: data.y_max,
            samples_x: data.nx,
            samples_y: data.ny,
        }
    }
}

/// C-compatible intensity field.
///
/// `values` holds `nx * ny` intensities in row-major order:
/// `values[row * nx + col]`, rows along y and columns along x.
#[repr(C)]
pub struct IntensityFieldData {
    /// Row-major intensity values
    pub values: *mut f64,
    /// Number of columns
    pub nx: usize,
    /// Number of rows
    pub ny: usize,
    /// Whether the values are defined or suppressed
    pub status: FieldStatusCode,
}

/// Build the grid a query runs on; null means the default `[-50, 50]` μm grid.
///
/// # Safety
/// `grid` must be null or point to a readable `GridSpecData`.
unsafe fn grid_from_ptr(grid: *const GridSpecData) -> Result<SampleGrid, DefaultFfiError> {
    // SAFETY: caller guarantees `grid` is null or valid
    let Some(spec) = (unsafe { grid.as_ref() }) else {
        return Ok(SampleGrid::default());
    };
    SampleGrid::linspace(&GridSpec::from(*spec)).map_err(DefaultFfiError::from)
}

/// Write through a caller-provided out pointer.
///
/// # Safety
/// `out` must be null or valid for writes.
unsafe fn write_out<T>(out: *mut T, name: &str, value: T) -> Result<(), DefaultFfiError> {
    // SAFETY: caller guarantees `out` is null or valid
    let slot = unsafe { out.as_mut() }.ok_or_else(|| DefaultFfiError::null_pointer(name))?;
    *slot = value;
    Ok(())
}

/// Move a field onto the heap in its C layout.
fn field_to_data(field: &IntensityField) -> *mut IntensityFieldData {
    let (ny, nx) = field.shape();
    let values = Box::into_raw(field.to_row_major().into_boxed_slice()).cast::<f64>();
    Box::into_raw(Box::new(IntensityFieldData {
        values,
        nx,
        ny,
        status: field.status().into(),
    }))
}

unsafe fn evaluate_into(
    handle: *const HeatSourceHandle,
    depth: f64,
    grid: *const GridSpecData,
    out_field: *mut *mut IntensityFieldData,
) -> Result<(), DefaultFfiError> {
    // SAFETY: forwarded from `heat_source_evaluate`
    let model = unsafe { model_from_ptr(handle) }?;
    let grid = unsafe { grid_from_ptr(grid) }?;
    let field = model.evaluate_at_depth(&grid, Micrometers::new(depth));
    unsafe { write_out(out_field, "out_field", field_to_data(&field)) }
}

/// Evaluate the model's intensity field at `depth` (μm).
///
/// Parameters
/// - `handle`: model created by a `heat_source_*_new` function.
/// - `grid`: sampling grid, or null for the default 100x100 grid over `[-50, 50]` μm.
/// - `out_field`: receives a heap field; free it with `heat_source_free_field`.
///   Set to null on failure.
///
/// A degenerate or collapsed profile is not an error: the call returns `Ok`
/// with an all-zero field whose `status` says why.
///
/// # Safety
/// - `handle` must be a live handle pointer.
/// - `grid` must be null or point to a readable `GridSpecData`.
/// - `out_field` must be a valid, non-null pointer to writable memory.
#[no_mangle]
pub unsafe extern "C" fn heat_source_evaluate(
    handle: *const HeatSourceHandle,
    depth: f64,
    grid: *const GridSpecData,
    out_field: *mut *mut IntensityFieldData,
) -> HeatSourceErrorCode {
    if out_field.is_null() {
        return track_error(&DefaultFfiError::null_pointer("out_field"));
    }
    // SAFETY: checked non-null above
    unsafe {
        *out_field = ptr::null_mut();
        complete(evaluate_into(handle, depth, grid, out_field))
    }
}

/// Frees a field returned by `heat_source_evaluate`.
///
/// If `field` is null, this function is a no-op.
///
/// # Safety
/// `field` must have been returned by `heat_source_evaluate` and not freed yet.
#[no_mangle]
pub unsafe extern "C" fn heat_source_free_field(field: *mut IntensityFieldData) {
    if field.is_null() {
        return;
    }

    // SAFETY: both allocations came from `Box::into_raw` in `field_to_data`
    unsafe {
        let data = Box::from_raw(field);
        if !data.values.is_null() {
            drop(Box::from_raw(ptr::slice_from_raw_parts_mut(
                data.values,
                data.nx * data.ny,
            )));
        }
    }
}

/// On-axis intensity at `depth` (μm), zero where the radius is undefined.
///
/// # Safety
/// - `handle` must be a live handle pointer.
/// - `out_peak` must be a valid, non-null pointer to writable memory.
#[no_mangle]
pub unsafe extern "C" fn heat_source_peak_at_depth(
    handle: *const HeatSourceHandle,
    depth: f64,
    out_peak: *mut f64,
) -> HeatSourceErrorCode {
    // SAFETY: forwarded from this function's contract
    let result = unsafe { model_from_ptr(handle) }.and_then(|model| unsafe {
        write_out(out_peak, "out_peak", model.peak_at_depth(Micrometers::new(depth)))
    });
    complete(result)
}

unsafe fn reference_max_into(
    handle: *const HeatSourceHandle,
    grid: *const GridSpecData,
    out_max: *mut f64,
) -> Result<(), DefaultFfiError> {
    // SAFETY: forwarded from `heat_source_reference_max`
    let model = unsafe { model_from_ptr(handle) }?;
    let grid = unsafe { grid_from_ptr(grid) }?;
    unsafe { write_out(out_max, "out_max", model.reference_max(&grid)) }
}

/// Maximum surface intensity on `grid` (null for the default grid).
///
/// Presentation layers use this as a fixed color-scale ceiling across depths.
///
/// # Safety
/// - `handle` must be a live handle pointer.
/// - `grid` must be null or point to a readable `GridSpecData`.
/// - `out_max` must be a valid, non-null pointer to writable memory.
#[no_mangle]
pub unsafe extern "C" fn heat_source_reference_max(
    handle: *const HeatSourceHandle,
    grid: *const GridSpecData,
    out_max: *mut f64,
) -> HeatSourceErrorCode {
    complete(unsafe { reference_max_into(handle, grid, out_max) })
}

unsafe fn peak_over_depth_into(
    handle: *const HeatSourceHandle,
    depths: *const f64,
    count: usize,
    out_peaks: *mut f64,
) -> Result<(), DefaultFfiError> {
    // SAFETY: forwarded from `heat_source_peak_over_depth`
    let model = unsafe { model_from_ptr(handle) }?;
    if depths.is_null() {
        return Err(DefaultFfiError::null_pointer("depths"));
    }
    if out_peaks.is_null() {
        return Err(DefaultFfiError::null_pointer("out_peaks"));
    }
    if count == 0 {
        return Ok(());
    }

    // SAFETY: non-null, and the caller sizes both arrays to `count`
    let depths = unsafe { slice::from_raw_parts(depths, count) };
    let out = unsafe { slice::from_raw_parts_mut(out_peaks, count) };

    let sweep = peak_over_depth(depths.iter().copied().map(Micrometers::new), model);
    for (slot, point) in out.iter_mut().zip(sweep) {
        *slot = point.peak;
    }
    Ok(())
}

/// Peak intensity at each of `count` depths.
///
/// `depths` and `out_peaks` both hold `count` values; `out_peaks[i]` is the
/// peak at `depths[i]`.
///
/// # Safety
/// - `handle` must be a live handle pointer.
/// - `depths` must point to `count` readable `f64` values.
/// - `out_peaks` must point to `count` writable `f64` values.
#[no_mangle]
pub unsafe extern "C" fn heat_source_peak_over_depth(
    handle: *const HeatSourceHandle,
    depths: *const f64,
    count: usize,
    out_peaks: *mut f64,
) -> HeatSourceErrorCode {
    complete(unsafe { peak_over_depth_into(handle, depths, count, out_peaks) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::heat_source_get_last_error_code;
    use crate::instance::{heat_source_conical_new, heat_source_destroy, heat_source_gaussian_cone_new};
    use crate::profile::RadiusProfileSpec;
    use approx::assert_relative_eq;

    fn conical_handle() -> *mut HeatSourceHandle {
        let mut handle = ptr::null_mut();
        let profile = RadiusProfileSpec::LinearAngle {
            surface_radius: 25.0,
            half_angle_deg: 5.0,
        };
        let code = unsafe { heat_source_conical_new(1.0, profile, &raw mut handle) };
        assert_eq!(code, HeatSourceErrorCode::Ok);
        handle
    }

    #[test]
    fn test_evaluate_default_grid() {
        let handle = conical_handle();
        let mut field = ptr::null_mut();
        let code = unsafe { heat_source_evaluate(handle, 20.0, ptr::null(), &raw mut field) };
        assert_eq!(code, HeatSourceErrorCode::Ok);

        let data = unsafe { &*field };
        assert_eq!((data.nx, data.ny), (100, 100));
        assert_eq!(data.status, FieldStatusCode::Defined);
        let values = unsafe { slice::from_raw_parts(data.values, data.nx * data.ny) };
        assert!(values.iter().all(|v| (0.0..=1.0).contains(v)));

        unsafe {
            heat_source_free_field(field);
            heat_source_destroy(handle);
        }
    }

    #[test]
    fn test_evaluate_custom_grid_row_major() {
        let handle = conical_handle();
        // 3 columns along x, 1 row: r = 0, 12.5, 25 at the surface
        let grid = GridSpecData {
            x_min: 0.0,
            x_max: 25.0,
            y_min: 0.0,
            y_max: 0.0,
            nx: 3,
            ny: 1,
        };
        let mut field = ptr::null_mut();
        let code = unsafe { heat_source_evaluate(handle, 0.0, &raw const grid, &raw mut field) };
        assert_eq!(code, HeatSourceErrorCode::Ok);

        let data = unsafe { &*field };
        let values = unsafe { slice::from_raw_parts(data.values, 3) };
        assert_relative_eq!(values[0], 1.0);
        assert_relative_eq!(values[1], 0.5);
        assert_relative_eq!(values[2], 0.0);

        unsafe {
            heat_source_free_field(field);
            heat_source_destroy(handle);
        }
    }

    #[test]
    fn test_empty_grid_rejected() {
        let handle = conical_handle();
        let grid = GridSpecData {
            x_min: -50.0,
            x_max: 50.0,
            y_min: -50.0,
            y_max: 50.0,
            nx: 0,
            ny: 10,
        };
        let mut field = ptr::null_mut();
        let code = unsafe { heat_source_evaluate(handle, 0.0, &raw const grid, &raw mut field) };
        assert_eq!(code, HeatSourceErrorCode::InvalidGrid);
        assert!(field.is_null());
        unsafe { heat_source_destroy(handle) };
    }

    #[test]
    fn test_oversized_grid_rejected() {
        let handle = conical_handle();
        let grid = GridSpecData {
            x_min: -50.0,
            x_max: 50.0,
            y_min: -50.0,
            y_max: 50.0,
            nx: usize::MAX / 2,
            ny: 1,
        };

        let mut field = ptr::null_mut();
        let code = unsafe { heat_source_evaluate(handle, 0.0, &raw const grid, &raw mut field) };
        assert_eq!(code, HeatSourceErrorCode::InvalidGrid);
        assert!(field.is_null());

        let mut max = -1.0;
        let code = unsafe { heat_source_reference_max(handle, &raw const grid, &raw mut max) };
        assert_eq!(code, HeatSourceErrorCode::InvalidGrid);
        assert_eq!(max, -1.0);
        assert_eq!(heat_source_get_last_error_code(), HeatSourceErrorCode::InvalidGrid);

        unsafe { heat_source_destroy(handle) };
    }

    #[test]
    fn test_degenerate_field_status() {
        let mut handle = ptr::null_mut();
        let code = unsafe {
            heat_source_gaussian_cone_new(100.0, 1.0, 20.0, 30.0, 20.0, 5.0, &raw mut handle)
        };
        assert_eq!(code, HeatSourceErrorCode::Ok);

        let mut field = ptr::null_mut();
        let code = unsafe { heat_source_evaluate(handle, 20.0, ptr::null(), &raw mut field) };
        assert_eq!(code, HeatSourceErrorCode::Ok);
        let data = unsafe { &*field };
        assert_eq!(data.status, FieldStatusCode::DegenerateProfile);

        unsafe {
            heat_source_free_field(field);
            heat_source_destroy(handle);
        }
    }

    #[test]
    fn test_peak_queries() {
        let handle = conical_handle();
        let mut peak = -1.0;
        let code = unsafe { heat_source_peak_at_depth(handle, 50.0, &raw mut peak) };
        assert_eq!(code, HeatSourceErrorCode::Ok);
        assert_relative_eq!(peak, 1.0);

        let depths = [0.0, 50.0, -1000.0];
        let mut peaks = [f64::NAN; 3];
        let code = unsafe {
            heat_source_peak_over_depth(handle, depths.as_ptr(), depths.len(), peaks.as_mut_ptr())
        };
        assert_eq!(code, HeatSourceErrorCode::Ok);
        assert_eq!(peaks, [1.0, 1.0, 0.0]);

        let mut max = 0.0;
        let code = unsafe { heat_source_reference_max(handle, ptr::null(), &raw mut max) };
        assert_eq!(code, HeatSourceErrorCode::Ok);
        assert!(max > 0.0 && max <= 1.0);

        unsafe { heat_source_destroy(handle) };
    }

    #[test]
    fn test_null_handle() {
        let mut peak = 0.0;
        let code = unsafe { heat_source_peak_at_depth(ptr::null(), 0.0, &raw mut peak) };
        assert_eq!(code, HeatSourceErrorCode::NullPointer);
    }
}
