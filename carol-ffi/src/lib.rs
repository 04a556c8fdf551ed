//! # carol
//!
//! C ABI over [`carol_native`] for a host language that drives the game loop
//! itself. The host initializes SDL and creates the window; this library
//! owns the per-frame event buffer, the loaded OpenGL context, and forwards
//! driver diagnostics to a host hook.
//!
//! All exports must be called from the thread that owns the window. Every
//! export catches panics and returns its failure value instead (`0` handles,
//! `-1` status, `NULL` strings).
//!
//! The matching declarations live in `include/carol.h`.

#![deny(rust_2018_idioms)]

use std::panic::{AssertUnwindSafe, catch_unwind};

mod events;
mod graphics;
mod hook;
mod state;
mod strings;

pub use self::events::*;
pub use self::graphics::*;
pub use self::hook::{GlErrorHook, carol_set_gl_error_hook};
pub use self::strings::carol_free_string;

/// Run `f`, returning `fallback` if it panics
pub(crate) fn ffi_guard<T>(export: &'static str, fallback: T, f: impl FnOnce() -> T) -> T {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(v) => v,
        Err(_) => {
            tracing::error!(export, "panic in exported function");
            fallback
        }
    }
}

/// Install a `tracing` subscriber filtered by `RUST_LOG`
///
/// Does nothing if one is already installed.
#[unsafe(no_mangle)]
pub extern "C" fn carol_init_logging() {
    ffi_guard("carol_init_logging", (), carol_native::init_tracing);
}
