//! Event pump exports

use std::ffi::c_int;

use carol_native::sdl2::sys::SDL_Event;

use crate::{ffi_guard, state};

/// Pump the OS queue and capture up to 128 events
///
/// Returns the number of events captured. The events, and the state returned
/// by the other input exports, stay valid until the next pump.
#[unsafe(no_mangle)]
pub extern "C" fn carol_pump_events() -> c_int {
    ffi_guard("carol_pump_events", 0, || {
        unsafe { state::pump() }.pump_events() as c_int
    })
}

/// Start of the event array; `count` receives the number of valid events
///
/// # Safety
///
/// `count` must be null or point to writable memory.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn carol_events(count: *mut c_int) -> *const SDL_Event {
    ffi_guard("carol_events", std::ptr::null(), || {
        let buffer = unsafe { state::pump() }.buffer();
        if !count.is_null() {
            unsafe { *count = buffer.len() as c_int };
        }
        buffer.as_ptr()
    })
}

/// SDL's key array, indexed by scancode; `len` receives its length
///
/// # Safety
///
/// `len` must be null or point to writable memory.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn carol_keyboard_state(len: *mut c_int) -> *const u8 {
    ffi_guard("carol_keyboard_state", std::ptr::null(), || {
        let keys = unsafe { state::pump() }.keyboard();
        if !len.is_null() {
            unsafe { *len = keys.len() as c_int };
        }
        keys.as_ptr()
    })
}

/// Modifier mask captured by the last pump
#[unsafe(no_mangle)]
pub extern "C" fn carol_modifiers() -> u32 {
    ffi_guard("carol_modifiers", 0, || unsafe { state::pump() }.modifiers())
}

/// Mouse button mask captured by the last pump
#[unsafe(no_mangle)]
pub extern "C" fn carol_mouse_buttons() -> u32 {
    ffi_guard("carol_mouse_buttons", 0, || {
        unsafe { state::pump() }.mouse_buttons()
    })
}

/// Mouse position captured by the last pump, in window coordinates
///
/// # Safety
///
/// `x` and `y` must each be null or point to writable memory.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn carol_mouse_position(x: *mut c_int, y: *mut c_int) {
    ffi_guard("carol_mouse_position", (), || {
        let (mx, my) = unsafe { state::pump() }.mouse_position();
        if !x.is_null() {
            unsafe { *x = mx };
        }
        if !y.is_null() {
            unsafe { *y = my };
        }
    })
}
