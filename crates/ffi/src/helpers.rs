use crate::error::{
    with_last_error_mut, DefaultStormChaseError, StormChaseError, StormChaseErrorCode,
};
use std::ffi::CString;

/// Set the thread-local error message and code.
pub(crate) fn set_last_error(error: &impl StormChaseError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Track an error by setting it in thread-local storage and returning its code.
#[inline]
pub(crate) fn track_error(error: &impl StormChaseError) -> StormChaseErrorCode {
    set_last_error(error);
    error.code()
}

/// Clear the thread-local error message and code.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = StormChaseErrorCode::Ok;
    });
}

/// Run `f`, recording its error or clearing the last error on success.
pub(crate) fn handle_ffi_result<F>(f: F) -> StormChaseErrorCode
where
    F: FnOnce() -> Result<(), DefaultStormChaseError>,
{
    match f() {
        Ok(()) => {
            clear_last_error();
            StormChaseErrorCode::Ok
        }
        Err(e) => track_error(&e),
    }
}

/// Reject non-finite numeric arguments.
pub(crate) fn require_finite(param_name: &str, value: f64) -> Result<f64, DefaultStormChaseError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DefaultStormChaseError::invalid_parameter(param_name, value))
    }
}

/// Borrow a non-null input pointer.
///
/// # Safety
/// `ptr` must be null or point to a valid, initialized `T`.
pub(crate) unsafe fn ref_from_ptr<'a, T>(
    ptr: *const T,
    param_name: &str,
) -> Result<&'a T, DefaultStormChaseError> {
    unsafe { ptr.as_ref() }.ok_or_else(|| DefaultStormChaseError::null_pointer(param_name))
}

/// Borrow a non-null output pointer.
///
/// # Safety
/// `ptr` must be null or point to memory valid for writes of `T`.
pub(crate) unsafe fn mut_from_ptr<'a, T>(
    ptr: *mut T,
    param_name: &str,
) -> Result<&'a mut T, DefaultStormChaseError> {
    unsafe { ptr.as_mut() }.ok_or_else(|| DefaultStormChaseError::null_pointer(param_name))
}

/// Copy `text` into a fixed C buffer, truncating at a UTF-8 boundary and
/// always null-terminating.
pub(crate) fn write_c_string(text: &str, buffer: &mut [std::os::raw::c_char]) {
    let Some(max) = buffer.len().checked_sub(1) else {
        return;
    };
    let mut end = text.len().min(max);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    for (dst, &src) in buffer.iter_mut().zip(&text.as_bytes()[..end]) {
        *dst = src as std::os::raw::c_char;
    }
    buffer[end] = 0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;
    use std::os::raw::c_char;

    #[test]
    fn c_string_is_truncated_on_char_boundary() {
        let mut buffer = [1 as c_char; 6];
        write_c_string("ab•cd", &mut buffer);
        // "•" is 3 bytes: "ab•" fills 5 of 6 bytes, the null takes the last
        let text = unsafe { CStr::from_ptr(buffer.as_ptr()) };
        assert_eq!(text.to_str().unwrap(), "ab•");

        let mut small = [1 as c_char; 4];
        write_c_string("ab•cd", &mut small);
        let text = unsafe { CStr::from_ptr(small.as_ptr()) };
        assert_eq!(text.to_str().unwrap(), "ab");
    }

    #[test]
    fn errors_are_recorded_and_cleared() {
        let code = handle_ffi_result(|| Err(DefaultStormChaseError::null_pointer("out")));
        assert_eq!(code, StormChaseErrorCode::NullPointer);
        assert!(!crate::error::storm_chase_get_last_error().is_null());

        let code = handle_ffi_result(|| Ok(()));
        assert_eq!(code, StormChaseErrorCode::Ok);
        assert!(crate::error::storm_chase_get_last_error().is_null());
    }
}
