//! Forwarding of OpenGL debug output to the host

use std::ffi::{CString, c_char};
use std::sync::Mutex;

use carol_native::debug::{self, DebugMessage, DebugSink};

/// Host function receiving driver diagnostics
///
/// Arguments are the driver's `(source, type, id, severity, length, message)`
/// unchanged; `message` is NUL-terminated and only valid during the call.
pub type GlErrorHook = unsafe extern "C" fn(
    source: u32,
    kind: u32,
    id: u32,
    severity: u32,
    length: i32,
    message: *const c_char,
);

static HOOK: Mutex<Option<GlErrorHook>> = Mutex::new(None);

fn load_hook() -> Option<GlErrorHook> {
    match HOOK.lock() {
        Ok(g) => *g,
        Err(poison) => *poison.into_inner(),
    }
}

fn store_hook(hook: Option<GlErrorHook>) {
    let mut g = match HOOK.lock() {
        Ok(g) => g,
        Err(poison) => poison.into_inner(),
    };
    *g = hook;
}

/// Register the host's debug-output hook, or clear it with `NULL`
///
/// Without a hook, messages are logged through `tracing`. The hook can be
/// changed at any time, before or after `carol_init_graphics`.
#[unsafe(no_mangle)]
pub extern "C" fn carol_set_gl_error_hook(hook: Option<GlErrorHook>) {
    store_hook(hook);
}

/// Sink installed by `carol_init_graphics` when debug output is requested
pub(crate) fn host_sink() -> DebugSink {
    debug::sink(forward)
}

fn forward(m: &DebugMessage<'_>) {
    let Some(hook) = load_hook() else {
        debug::log_message(m);
        return;
    };
    let text = CString::new(m.text.replace('\0', "")).unwrap_or_default();
    unsafe { hook(m.source, m.kind, m.id, m.severity, m.length, text.as_ptr()) };
}
