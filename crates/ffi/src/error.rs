use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

use heat_source_core::HeatSourceError;

/// Common interface for errors crossing the FFI boundary.
///
/// - `code()` - Returns the error code returned to the caller
/// - `msg()` - Returns the message stored for `heat_source_get_last_error`
pub(crate) trait FfiError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> HeatSourceErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Default implementation of `FfiError` for the FFI entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultFfiError {
    code: HeatSourceErrorCode,
    msg: String,
}

impl DefaultFfiError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_handle"`, `"depths"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: HeatSourceErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for an out-of-range model or profile parameter.
    pub fn invalid_parameter(message: String) -> Self {
        Self {
            code: HeatSourceErrorCode::InvalidParameter,
            msg: message,
        }
    }

    /// Create error for an unusable sampling grid or depth array.
    pub fn invalid_grid(message: String) -> Self {
        Self {
            code: HeatSourceErrorCode::InvalidGrid,
            msg: message,
        }
    }
}

impl From<HeatSourceError> for DefaultFfiError {
    fn from(error: HeatSourceError) -> Self {
        match error {
            HeatSourceError::InvalidGrid(_) => Self::invalid_grid(error.to_string()),
            HeatSourceError::InvalidParameter { .. }
            | HeatSourceError::Config { .. }
            | HeatSourceError::Parse(_) => Self::invalid_parameter(error.to_string()),
        }
    }
}

impl FfiError for DefaultFfiError {
    fn code(&self) -> HeatSourceErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

/// FFI error codes returned by heat source functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatSourceErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// A model or radius profile parameter is outside its documented bounds.
    InvalidParameter = 2,

    /// Sampling grid or depth array is empty, non-finite or too large.
    InvalidGrid = 3,
}

impl From<DefaultFfiError> for HeatSourceErrorCode {
    fn from(error: DefaultFfiError) -> Self {
        error.code
    }
}

thread_local! {
    /// Most recent FFI error on this thread (C string, error code).
    /// The `CString` is owned here so the pointer handed out stays valid.
    static LAST_ERROR: RefCell<(Option<CString>, HeatSourceErrorCode)> = const { RefCell::new((None, HeatSourceErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, HeatSourceErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, HeatSourceErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if the last call on this thread failed.
/// - `null` if the last call succeeded.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```c
/// HeatSourceHandle* handle = NULL;
/// HeatSourceErrorCode err = heat_source_conical_new(1.0, profile, &handle);
/// if (err != Ok) {
///     const char* error = heat_source_get_last_error();
///     if (error) {
///         printf("Model creation failed: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn heat_source_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code on this thread.
///
/// Returns `HeatSourceErrorCode::Ok` (0) if the last call succeeded.
#[no_mangle]
pub extern "C" fn heat_source_get_last_error_code() -> HeatSourceErrorCode {
    with_last_error(|(_cstring, code)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use heat_source_core::ConicalLinear;
    use std::ffi::CStr;

    #[test]
    fn test_core_errors_map_to_codes() {
        let err = ConicalLinear::new(-1.0).unwrap_err();
        let ffi: DefaultFfiError = err.into();
        assert_eq!(ffi.code(), HeatSourceErrorCode::InvalidParameter);
        assert!(ffi.msg().contains("peak_intensity"));

        let grid: DefaultFfiError = HeatSourceError::InvalidGrid("empty".to_string()).into();
        assert_eq!(HeatSourceErrorCode::from(grid), HeatSourceErrorCode::InvalidGrid);
    }

    #[test]
    fn test_last_error_round_trip() {
        with_last_error_mut(|(cstring, code)| {
            *cstring = CString::new("boom").ok();
            *code = HeatSourceErrorCode::InvalidGrid;
        });
        let msg = unsafe { CStr::from_ptr(heat_source_get_last_error()) };
        assert_eq!(msg.to_str().unwrap(), "boom");
        assert_eq!(heat_source_get_last_error_code(), HeatSourceErrorCode::InvalidGrid);
    }
}
