use heat_source_core::{
    ConicalLinear, ExponentialCone, GaussianCone, HeatSourceModel, IntensityFormula, Micrometers,
    SuperGaussian, Watts,
};
use std::ptr;
use tracing::info;

use crate::error::{DefaultFfiError, HeatSourceErrorCode};
use crate::helpers::{clear_last_error, track_error, track_result};
use crate::profile::RadiusProfileSpec;

/// Opaque handle to an immutable heat source model.
///
/// A handle never changes after construction, so it can be shared freely
/// between threads. Changing a parameter means creating a new handle and
/// destroying the old one with `heat_source_destroy`.
pub struct HeatSourceHandle {
    pub(crate) model: HeatSourceModel,
}

impl HeatSourceHandle {
    fn boxed(model: HeatSourceModel) -> Box<Self> {
        Box::new(Self { model })
    }
}

/// Write a freshly built handle (or null on failure) to `out_handle`.
///
/// # Safety
/// `out_handle` must be null or valid for writes.
unsafe fn create(
    out_handle: *mut *mut HeatSourceHandle,
    build: impl FnOnce() -> Result<HeatSourceModel, DefaultFfiError>,
) -> HeatSourceErrorCode {
    if out_handle.is_null() {
        return track_error(&DefaultFfiError::null_pointer("out_handle"));
    }

    match track_result(build()) {
        Ok(model) => {
            info!("Created {} heat source handle", model.formula().name());
            clear_last_error();
            // SAFETY: checked non-null above, caller guarantees writability
            unsafe {
                *out_handle = Box::into_raw(HeatSourceHandle::boxed(model));
            }
            HeatSourceErrorCode::Ok
        }
        Err(code) => {
            // SAFETY: as above; null on error per the documented contract
            unsafe {
                *out_handle = ptr::null_mut();
            }
            code
        }
    }
}

/// Create a conical-linear source `I0 * (1 - r/r0)` inside the cone.
///
/// Returns
/// - `HeatSourceErrorCode::Ok` (0) with a valid handle in `out_handle`
/// - `HeatSourceErrorCode::NullPointer` if `out_handle` is null
/// - `HeatSourceErrorCode::InvalidParameter` if `peak_intensity` is negative or
///   the profile is out of range; `out_handle` is set to null
///
/// # Safety
///
/// - `out_handle` must be a valid, non-null pointer to writable memory.
/// - The caller owns the returned handle and MUST call `heat_source_destroy`
///   exactly once.
#[no_mangle]
pub unsafe extern "C" fn heat_source_conical_new(
    peak_intensity: f64,
    profile: RadiusProfileSpec,
    out_handle: *mut *mut HeatSourceHandle,
) -> HeatSourceErrorCode {
    unsafe {
        create(out_handle, || {
            Ok(HeatSourceModel::new(
                ConicalLinear::new(peak_intensity)?,
                profile.to_profile()?,
            )?)
        })
    }
}

/// Create a power-normalized exponential cone `P*eta/(pi*r0^2) * exp(-C*r/r0)`.
///
/// `power` is in watts. `efficiency` must be >= 0 and `decay` > 0.
///
/// # Safety
///
/// Same contract as `heat_source_conical_new`.
#[no_mangle]
pub unsafe extern "C" fn heat_source_exponential_new(
    power: f64,
    efficiency: f64,
    decay: f64,
    profile: RadiusProfileSpec,
    out_handle: *mut *mut HeatSourceHandle,
) -> HeatSourceErrorCode {
    unsafe {
        create(out_handle, || {
            Ok(HeatSourceModel::new(
                ExponentialCone::new(Watts::new(power), efficiency, decay)?,
                profile.to_profile()?,
            )?)
        })
    }
}

/// Create a volumetric Gaussian cone between the anchors `(z_e, r_e)` and `(z_i, r_i)`.
///
/// The radius follows the anchors, so no profile is passed. `z_e == z_i` is
/// accepted and yields a handle whose fields are all zero and flagged
/// `DegenerateProfile`; `z_e > z_i` is rejected with `InvalidParameter`.
///
/// # Safety
///
/// Same contract as `heat_source_conical_new`.
#[no_mangle]
pub unsafe extern "C" fn heat_source_gaussian_cone_new(
    power: f64,
    efficiency: f64,
    z_e: f64,
    r_e: f64,
    z_i: f64,
    r_i: f64,
    out_handle: *mut *mut HeatSourceHandle,
) -> HeatSourceErrorCode {
    let um = Micrometers::new;
    unsafe {
        create(out_handle, || {
            let source = GaussianCone::new(
                Watts::new(power),
                efficiency,
                (um(z_e), um(r_e)),
                (um(z_i), um(r_i)),
            )?;
            Ok(HeatSourceModel::gaussian_cone(source))
        })
    }
}

/// Create a super-Gaussian source with amplitude `A` and shape exponent `k`.
///
/// # Safety
///
/// Same contract as `heat_source_conical_new`.
#[no_mangle]
pub unsafe extern "C" fn heat_source_super_gaussian_new(
    amplitude: f64,
    k: f64,
    power: f64,
    efficiency: f64,
    decay: f64,
    profile: RadiusProfileSpec,
    out_handle: *mut *mut HeatSourceHandle,
) -> HeatSourceErrorCode {
    unsafe {
        create(out_handle, || {
            Ok(HeatSourceModel::new(
                SuperGaussian::new(amplitude, k, Watts::new(power), efficiency, decay)?,
                profile.to_profile()?,
            )?)
        })
    }
}

/// Destroys a handle created by one of the `heat_source_*_new` functions.
///
/// If `ptr` is null, this function is a no-op.
///
/// # Safety
/// - The pointer MUST have been created by a `heat_source_*_new` function.
/// - The pointer MUST NOT have been freed already.
/// - After this call the caller must not use the pointer again.
#[no_mangle]
pub unsafe extern "C" fn heat_source_destroy(ptr: *mut HeatSourceHandle) {
    if ptr.is_null() {
        return;
    }

    // SAFETY: the pointer came from `Box::into_raw` in `create` and is freed once
    unsafe {
        drop(Box::from_raw(ptr));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::heat_source_get_last_error_code;

    const PROFILE: RadiusProfileSpec = RadiusProfileSpec::Constant { radius: 25.0 };

    #[test]
    fn test_create_and_destroy() {
        let mut handle = ptr::null_mut();
        let code = unsafe { heat_source_exponential_new(250.0, 1.0, 2.0, PROFILE, &raw mut handle) };
        assert_eq!(code, HeatSourceErrorCode::Ok);
        assert!(!handle.is_null());
        assert_eq!(heat_source_get_last_error_code(), HeatSourceErrorCode::Ok);
        unsafe { heat_source_destroy(handle) };
    }

    #[test]
    fn test_invalid_parameter_nulls_out_handle() {
        let mut handle = ptr::null_mut();
        let code =
            unsafe { heat_source_super_gaussian_new(2.0, 0.0, 100.0, 0.8, 2.0, PROFILE, &raw mut handle) };
        assert_eq!(code, HeatSourceErrorCode::InvalidParameter);
        assert!(handle.is_null());
        assert_eq!(heat_source_get_last_error_code(), HeatSourceErrorCode::InvalidParameter);
    }

    #[test]
    fn test_null_out_handle() {
        let code = unsafe { heat_source_conical_new(1.0, PROFILE, ptr::null_mut()) };
        assert_eq!(code, HeatSourceErrorCode::NullPointer);
    }

    #[test]
    fn test_gaussian_cone_anchor_order() {
        let mut handle = ptr::null_mut();
        let code = unsafe {
            heat_source_gaussian_cone_new(100.0, 1.0, 50.0, 30.0, 10.0, 5.0, &raw mut handle)
        };
        assert_eq!(code, HeatSourceErrorCode::InvalidParameter);

        let code = unsafe {
            heat_source_gaussian_cone_new(100.0, 1.0, 20.0, 30.0, 20.0, 5.0, &raw mut handle)
        };
        assert_eq!(code, HeatSourceErrorCode::Ok);
        unsafe { heat_source_destroy(handle) };
    }
}
