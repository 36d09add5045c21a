use crate::error::{with_last_error_mut, DefaultFfiError, FfiError, HeatSourceErrorCode};
use crate::instance::HeatSourceHandle;
use heat_source_core::HeatSourceModel;
use std::ffi::CString;
use tracing::debug;

/// Set the thread-local error message and code.
/// Accepts any type implementing `FfiError` trait.
pub(crate) fn set_last_error(error: &impl FfiError) {
    debug!("FFI call failed ({:?}): {}", error.code(), error.msg());
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Track an error by setting it in thread-local storage and returning its code.
#[inline]
pub(crate) fn track_error(error: &impl FfiError) -> HeatSourceErrorCode {
    set_last_error(error);
    error.code()
}

/// Record the error of a failed result, passing successes through.
pub(crate) fn track_result<T>(result: Result<T, DefaultFfiError>) -> Result<T, HeatSourceErrorCode> {
    result.map_err(|error| track_error(&error))
}

/// Clear the thread-local error message and code.
/// Called on successful operations.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = HeatSourceErrorCode::Ok;
    });
}

/// Run an FFI body, recording its error or clearing the last error on success.
pub(crate) fn complete(result: Result<(), DefaultFfiError>) -> HeatSourceErrorCode {
    match track_result(result) {
        Ok(()) => {
            clear_last_error();
            HeatSourceErrorCode::Ok
        }
        Err(code) => code,
    }
}

/// Borrow the model behind a handle pointer.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by one of the
/// `heat_source_*_new` constructors.
pub(crate) unsafe fn model_from_ptr<'a>(
    ptr: *const HeatSourceHandle,
) -> Result<&'a HeatSourceModel, DefaultFfiError> {
    // SAFETY: the caller guarantees `ptr` is null or valid; null is rejected here
    unsafe { ptr.as_ref() }
        .map(|handle| &handle.model)
        .ok_or_else(|| DefaultFfiError::null_pointer("handle"))
}
