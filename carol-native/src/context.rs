//! OpenGL context loading and the fixed initial render state

use std::ffi::{CString, c_void};

use sdl2::sys;

use crate::debug::DebugSink;
use crate::driver::{GlDriver, GlowDriver};
use crate::error::{ContextError, ContextResult};

/// The render state applied once after the context is loaded
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState {
    pub clear_color: [f32; 4],
    pub clear_depth: f64,
    pub depth_func: u32,
    pub cull_face: u32,
    pub blend_func: (u32, u32),
    /// Capabilities switched on, in the order they are enabled
    pub enabled: &'static [u32],
}

pub const RENDER_STATE: RenderState = RenderState {
    clear_color: [0.45, 0.31, 0.59, 1.0],
    clear_depth: 1.0,
    depth_func: glow::LEQUAL,
    cull_face: glow::BACK,
    blend_func: (glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA),
    enabled: &[
        glow::DEPTH_TEST,
        glow::CULL_FACE,
        glow::BLEND,
        glow::FRAMEBUFFER_SRGB,
    ],
};

/// Capabilities switched on when debug output is requested
pub const DEBUG_CAPABILITIES: [u32; 2] = [glow::DEBUG_OUTPUT, glow::DEBUG_OUTPUT_SYNCHRONOUS];

/// Apply [`RENDER_STATE`] and, when a sink is given, route debug output to it
///
/// Calling this again re-applies the same state and replaces the sink.
pub fn configure<D: GlDriver + ?Sized>(gl: &mut D, debug: Option<DebugSink>) {
    let state = RENDER_STATE;
    gl.clear_color(state.clear_color);
    gl.clear_depth(state.clear_depth);
    for &capability in state.enabled {
        gl.enable(capability);
    }
    gl.depth_func(state.depth_func);
    gl.cull_face(state.cull_face);
    gl.blend_func(state.blend_func.0, state.blend_func.1);

    if let Some(sink) = debug {
        for capability in DEBUG_CAPABILITIES {
            gl.enable(capability);
        }
        gl.install_debug_callback(sink);
        tracing::debug!("OpenGL debug output enabled");
    }
}

fn proc_address(name: &str) -> *const c_void {
    let Ok(name) = CString::new(name) else {
        return std::ptr::null();
    };
    unsafe { sys::SDL_GL_GetProcAddress(name.as_ptr()) as *const c_void }
}

/// Resolve the OpenGL function table against the context current on this
/// thread
///
/// # Safety
///
/// SDL's video subsystem must be initialized. The returned context is only
/// valid while the SDL context it was loaded from stays current.
pub unsafe fn load_current_context() -> ContextResult<glow::Context> {
    if unsafe { sys::SDL_GL_GetCurrentContext() }.is_null() {
        return Err(ContextError::NoCurrentContext);
    }
    if proc_address("glGetString").is_null() {
        return Err(ContextError::MissingEntryPoint("glGetString"));
    }
    Ok(unsafe { glow::Context::from_loader_function(proc_address) })
}

/// Load the current context and apply the initial render state
///
/// With `debug` set, driver diagnostics are forwarded synchronously to the
/// sink (see [`crate::debug`]).
///
/// # Safety
///
/// Same contract as [`load_current_context`].
pub unsafe fn init_graphics(debug: Option<DebugSink>) -> ContextResult<GlowDriver> {
    let gl = unsafe { load_current_context() }?;
    let mut driver = GlowDriver::new(gl);

    let version = driver.version();
    tracing::info!(%version, "OpenGL context loaded");
    if version.major != 0 && !version.supports_core_45() {
        return Err(ContextError::UnsupportedVersion(version.to_string()));
    }

    configure(&mut driver, debug);
    Ok(driver)
}
