//! OpenGL exports
//!
//! Handles cross the boundary as raw `u32` names. A `0` return means the
//! driver refused the allocation, or that the context is not loaded yet;
//! both are logged.

use std::ffi::{CStr, c_char, c_int, c_void};

use carol_native::sdl2::sys::SDL_Window;
use carol_native::{
    BufferHandle, BufferStorageFlags, ComponentType, DrawCall, GlErrorCode, GlowDriver,
    ProgramHandle, RawWindow, ShaderHandle, ShaderStage, VertexArrayHandle, VertexAttribute,
    geometry, shaders,
};

use crate::hook::host_sink;
use crate::strings::into_host_string;
use crate::{ffi_guard, state};

fn with_gl<R: Copy>(export: &'static str, fallback: R, f: impl FnOnce(&GlowDriver) -> R) -> R {
    ffi_guard(export, fallback, || match unsafe { state::gl() } {
        Some(gl) => f(gl),
        None => {
            tracing::error!(export, "OpenGL is not initialized");
            fallback
        }
    })
}

fn handle<H>(export: &'static str, raw: u32, from_raw: fn(u32) -> Option<H>) -> Option<H> {
    let h = from_raw(raw);
    if h.is_none() {
        tracing::warn!(export, "Zero handle passed");
    }
    h
}

fn allocated<H: Into<u32>>(export: &'static str, result: carol_native::ResourceResult<H>) -> u32 {
    match result {
        Ok(h) => h.into(),
        Err(e) => {
            tracing::error!(export, error = %e, "Allocation failed");
            0
        }
    }
}

/// Load the current context and apply the initial render state
///
/// With `debug`, driver messages go to the hook registered with
/// `carol_set_gl_error_hook`. Returns 0 on success, -1 on failure.
///
/// Once a context is loaded, later calls re-apply the render state to it
/// instead of loading a second function table.
#[unsafe(no_mangle)]
pub extern "C" fn carol_init_graphics(debug: bool) -> c_int {
    ffi_guard("carol_init_graphics", -1, || {
        if let Some(driver) = unsafe { state::gl_mut() } {
            carol_native::configure(driver, debug.then(host_sink));
            tracing::debug!("OpenGL render state re-applied");
            return 0;
        }
        match unsafe { carol_native::init_graphics(debug.then(host_sink)) } {
            Ok(driver) => {
                unsafe { state::set_gl(driver) };
                0
            }
            Err(e) => {
                tracing::error!(error = %e, "Impossible to initialize OpenGL");
                -1
            }
        }
    })
}

/// Create and compile a shader stage; returns 0 if the object could not be
/// created
///
/// # Safety
///
/// `source` must be a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn carol_compile_shader(source: *const c_char, stage: u32) -> u32 {
    const EXPORT: &str = "carol_compile_shader";
    if source.is_null() {
        tracing::error!(export = EXPORT, "Null shader source");
        return 0;
    }
    let source = unsafe { CStr::from_ptr(source) }.to_string_lossy();
    with_gl(EXPORT, 0, |gl| {
        let Some(stage) = ShaderStage::from_gl(stage) else {
            tracing::error!(export = EXPORT, stage, "Unknown shader stage");
            return 0;
        };
        allocated(EXPORT, shaders::compile_shader(gl, &source, stage))
    })
}

/// Compile diagnostic of `shader`, or NULL if it compiled
///
/// Release the returned string with `carol_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn carol_compile_error(shader: u32) -> *mut c_char {
    const EXPORT: &str = "carol_compile_error";
    with_gl(EXPORT, std::ptr::null_mut(), |gl| {
        handle(EXPORT, shader, ShaderHandle::from_raw)
            .and_then(|s| shaders::check_compile_error(gl, s))
            .map_or(std::ptr::null_mut(), |log| into_host_string(&log))
    })
}

/// Create a program from two stages and link it; returns 0 if the object
/// could not be created
#[unsafe(no_mangle)]
pub extern "C" fn carol_link_program(vertex: u32, fragment: u32) -> u32 {
    const EXPORT: &str = "carol_link_program";
    with_gl(EXPORT, 0, |gl| {
        let (Some(vs), Some(fs)) = (
            handle(EXPORT, vertex, ShaderHandle::from_raw),
            handle(EXPORT, fragment, ShaderHandle::from_raw),
        ) else {
            return 0;
        };
        allocated(EXPORT, shaders::link_program(gl, vs, fs))
    })
}

/// Link diagnostic of `program`, or NULL if it linked
///
/// Release the returned string with `carol_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn carol_link_error(program: u32) -> *mut c_char {
    const EXPORT: &str = "carol_link_error";
    with_gl(EXPORT, std::ptr::null_mut(), |gl| {
        handle(EXPORT, program, ProgramHandle::from_raw)
            .and_then(|p| shaders::check_link_error(gl, p))
            .map_or(std::ptr::null_mut(), |log| into_host_string(&log))
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn carol_release_shader(shader: u32) {
    const EXPORT: &str = "carol_release_shader";
    with_gl(EXPORT, (), |gl| {
        if let Some(s) = handle(EXPORT, shader, ShaderHandle::from_raw) {
            shaders::release_shader(gl, s);
        }
    })
}

/// Bind a program and a vertex array for the following draws
#[unsafe(no_mangle)]
pub extern "C" fn carol_use_pipeline(program: u32, vao: u32) {
    const EXPORT: &str = "carol_use_pipeline";
    with_gl(EXPORT, (), |gl| {
        if let (Some(p), Some(v)) = (
            handle(EXPORT, program, ProgramHandle::from_raw),
            handle(EXPORT, vao, VertexArrayHandle::from_raw),
        ) {
            shaders::use_pipeline(gl, p, v);
        }
    })
}

/// Delete a vertex array and a program
#[unsafe(no_mangle)]
pub extern "C" fn carol_destroy_pipeline(program: u32, vao: u32) {
    const EXPORT: &str = "carol_destroy_pipeline";
    with_gl(EXPORT, (), |gl| {
        if let (Some(p), Some(v)) = (
            handle(EXPORT, program, ProgramHandle::from_raw),
            handle(EXPORT, vao, VertexArrayHandle::from_raw),
        ) {
            shaders::destroy_pipeline(gl, p, v);
        }
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn carol_create_vertex_array() -> u32 {
    const EXPORT: &str = "carol_create_vertex_array";
    with_gl(EXPORT, 0, |gl| {
        allocated(EXPORT, geometry::create_vertex_array(gl))
    })
}

/// Declare an attribute format, bind it to `binding` and enable it
#[unsafe(no_mangle)]
pub extern "C" fn carol_vertex_attribute(
    vao: u32,
    index: u32,
    binding: u32,
    count: i32,
    component_type: u32,
    normalized: bool,
    offset: u32,
) {
    const EXPORT: &str = "carol_vertex_attribute";
    with_gl(EXPORT, (), |gl| {
        let Some(vao) = handle(EXPORT, vao, VertexArrayHandle::from_raw) else {
            return;
        };
        let Some(component) = ComponentType::from_gl(component_type) else {
            tracing::error!(export = EXPORT, component_type, "Unknown component type");
            return;
        };
        geometry::bind_attribute(
            gl,
            vao,
            &VertexAttribute {
                index,
                binding,
                count,
                component,
                normalized,
                offset,
            },
        );
    })
}

/// Allocate `size` bytes of immutable storage, zero-filled when `data` is
/// NULL; returns 0 on failure
///
/// # Safety
///
/// `data` must be null or point to `size` readable bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn carol_create_buffer(size: usize, data: *const c_void, flags: u32) -> u32 {
    const EXPORT: &str = "carol_create_buffer";
    let data = (!data.is_null())
        .then(|| unsafe { std::slice::from_raw_parts(data.cast::<u8>(), size) });
    with_gl(EXPORT, 0, |gl| {
        let flags = BufferStorageFlags::from_bits_retain(flags);
        allocated(EXPORT, geometry::create_buffer(gl, size, data, flags))
    })
}

/// Attach a buffer to a binding slot of a vertex array
#[unsafe(no_mangle)]
pub extern "C" fn carol_vertex_buffer(vao: u32, binding: u32, buffer: u32, offset: i32, stride: i32) {
    const EXPORT: &str = "carol_vertex_buffer";
    with_gl(EXPORT, (), |gl| {
        if let (Some(v), Some(b)) = (
            handle(EXPORT, vao, VertexArrayHandle::from_raw),
            handle(EXPORT, buffer, BufferHandle::from_raw),
        ) {
            geometry::vertex_buffer(gl, v, binding, b, offset, stride);
        }
    })
}

/// Bind a buffer to an indexed uniform block slot
#[unsafe(no_mangle)]
pub extern "C" fn carol_uniform_buffer(binding: u32, buffer: u32) {
    const EXPORT: &str = "carol_uniform_buffer";
    with_gl(EXPORT, (), |gl| {
        if let Some(b) = handle(EXPORT, buffer, BufferHandle::from_raw) {
            geometry::uniform_buffer(gl, binding, b);
        }
    })
}

/// Copy `len` bytes of a buffer, starting at `offset`, into `out`
///
/// # Safety
///
/// `out` must point to `len` writable bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn carol_read_buffer(buffer: u32, offset: usize, out: *mut u8, len: usize) {
    const EXPORT: &str = "carol_read_buffer";
    if out.is_null() {
        return;
    }
    let out = unsafe { std::slice::from_raw_parts_mut(out, len) };
    with_gl(EXPORT, (), |gl| {
        if let Some(b) = handle(EXPORT, buffer, BufferHandle::from_raw) {
            geometry::read_buffer(gl, b, offset, out);
        }
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn carol_draw(mode: u32, first: i32, count: i32) {
    with_gl("carol_draw", (), |gl| carol_native::draw(gl, mode, first, count))
}

/// Clear color and depth; hosts that draw themselves call this first
#[unsafe(no_mangle)]
pub extern "C" fn carol_clear() {
    with_gl("carol_clear", (), |gl| carol_native::clear(gl))
}

/// Present the back buffer of `window`
///
/// # Safety
///
/// `window` must be null or a live SDL window.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn carol_present(window: *mut SDL_Window) {
    ffi_guard("carol_present", (), || {
        if let Some(w) = unsafe { RawWindow::new(window) } {
            carol_native::present(&w);
        }
    })
}

/// Clear, issue `draw` when it is not NULL, then present
///
/// # Safety
///
/// `window` must be null or a live SDL window; `draw` must be null or point
/// to a valid `CarolDrawCall`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn carol_render(window: *mut SDL_Window, draw: *const DrawCall) {
    const EXPORT: &str = "carol_render";
    let Some(window) = (unsafe { RawWindow::new(window) }) else {
        tracing::error!(export = EXPORT, "Null window");
        return;
    };
    let draw = unsafe { draw.as_ref() }.copied();
    with_gl(EXPORT, (), |gl| carol_native::render(gl, &window, draw))
}

/// Raw `glGetError`
#[unsafe(no_mangle)]
pub extern "C" fn carol_get_error() -> u32 {
    with_gl("carol_get_error", glow::NO_ERROR, |gl| {
        let code = carol_native::get_last_error(gl);
        if code != glow::NO_ERROR {
            tracing::debug!(error = %GlErrorCode(code), "OpenGL error");
        }
        code
    })
}
