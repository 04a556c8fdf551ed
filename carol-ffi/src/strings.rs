//! Strings handed to the host

use std::ffi::{CString, c_char};

/// Move `text` to the heap as a NUL-terminated string owned by the host
///
/// Interior NUL bytes are dropped. The host releases the string with
/// [`carol_free_string`].
pub(crate) fn into_host_string(text: &str) -> *mut c_char {
    CString::new(text.replace('\0', ""))
        .unwrap_or_default()
        .into_raw()
}

/// Release a string returned by this library
///
/// # Safety
///
/// `text` must be null or a pointer returned by this library that has not
/// been released yet.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn carol_free_string(text: *mut c_char) {
    if !text.is_null() {
        drop(unsafe { CString::from_raw(text) });
    }
}
