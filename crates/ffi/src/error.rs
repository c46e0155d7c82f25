use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

/// Common interface for FFI error types.
///
/// - `code()` - Returns the error code to be passed across FFI boundary
/// - `msg()` - Returns the error message for diagnostic purposes
pub(crate) trait StormChaseError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> StormChaseErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Default implementation of `StormChaseError` for the common failure cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultStormChaseError {
    code: StormChaseErrorCode,
    msg: String,
}

impl DefaultStormChaseError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_targets"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: StormChaseErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for a non-finite or out-of-range numeric argument.
    ///
    /// # Arguments
    /// * `param_name` - The name of the invalid parameter (e.g., `"radius_miles"`)
    /// * `value` - The invalid value
    pub fn invalid_parameter(param_name: &str, value: f64) -> Self {
        Self {
            code: StormChaseErrorCode::InvalidParameter,
            msg: format!("Parameter '{param_name}' is invalid, got {value}"),
        }
    }
}

impl StormChaseError for DefaultStormChaseError {
    fn code(&self) -> StormChaseErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

/// FFI error codes returned by storm chase functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StormChaseErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// Invalid parameter: a numeric argument was non-finite or out of range.
    InvalidParameter = 2,
}

impl From<DefaultStormChaseError> for StormChaseErrorCode {
    fn from(error: DefaultStormChaseError) -> Self {
        error.code
    }
}

thread_local! {
    /// Most recent FFI error on this thread (C string, error code).
    /// The `CString` is kept here so the pointer handed to C stays valid.
    static LAST_ERROR: RefCell<(Option<CString>, StormChaseErrorCode)> = const { RefCell::new((None, StormChaseErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, StormChaseErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, StormChaseErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if an error occurred.
/// - `null` if the last call on this thread succeeded.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```cpp
/// StormChaseIndices indices;
/// if (storm_chase_composite_indices(&params, &indices) != StormChaseErrorCode::Ok) {
///     const char* error = storm_chase_get_last_error();
///     if (error) {
///         printf("Index computation failed: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn storm_chase_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code.
///
/// Returns `StormChaseErrorCode::Ok` (0) if the last call on this thread
/// succeeded.
#[no_mangle]
pub extern "C" fn storm_chase_get_last_error_code() -> StormChaseErrorCode {
    with_last_error(|(_cstring, code)| *code)
}
