//! Per-frame clear, draw and present

use std::fmt;
use std::ptr::NonNull;

use sdl2::sys;

use crate::driver::GlDriver;

/// Something that can present the back buffer
pub trait Presenter {
    fn swap(&self);
}

impl Presenter for sdl2::video::Window {
    fn swap(&self) {
        self.gl_swap_window();
    }
}

/// A window created and owned by the host
#[derive(Debug, Clone, Copy)]
pub struct RawWindow(NonNull<sys::SDL_Window>);

impl RawWindow {
    /// # Safety
    ///
    /// `window` must be a live SDL window with an OpenGL context, and must
    /// outlive every use of the returned value.
    pub unsafe fn new(window: *mut sys::SDL_Window) -> Option<Self> {
        NonNull::new(window).map(Self)
    }

    pub fn as_ptr(self) -> *mut sys::SDL_Window {
        self.0.as_ptr()
    }
}

impl Presenter for RawWindow {
    fn swap(&self) {
        unsafe { sys::SDL_GL_SwapWindow(self.0.as_ptr()) }
    }
}

/// One non-indexed draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct DrawCall {
    /// Primitive mode, e.g. `glow::TRIANGLES`
    pub mode: u32,
    pub first: i32,
    pub count: i32,
}

impl DrawCall {
    pub const fn triangles(first: i32, count: i32) -> Self {
        Self {
            mode: glow::TRIANGLES,
            first,
            count,
        }
    }
}

/// Issue `glDrawArrays` with the currently bound pipeline
pub fn draw<D: GlDriver + ?Sized>(gl: &D, mode: u32, first: i32, count: i32) {
    gl.draw_arrays(mode, first, count);
}

/// Clear the color and depth buffers
pub fn clear<D: GlDriver + ?Sized>(gl: &D) {
    gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
}

/// Swap the back buffer to the screen; may block on vsync
pub fn present<P: Presenter + ?Sized>(window: &P) {
    window.swap();
}

/// Clear color and depth, optionally draw, then present
///
/// Hosts that submit their own draws call [`clear`], draw, then
/// [`present`]; `render` covers the single-draw case.
pub fn render<D, P>(gl: &D, window: &P, draw_call: Option<DrawCall>)
where
    D: GlDriver + ?Sized,
    P: Presenter + ?Sized,
{
    clear(gl);
    if let Some(call) = draw_call {
        draw(gl, call.mode, call.first, call.count);
    }
    present(window);
}

/// Raw `glGetError`, without interpretation
pub fn get_last_error<D: GlDriver + ?Sized>(gl: &D) -> u32 {
    gl.get_error()
}

/// A `glGetError` code, for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlErrorCode(pub u32);

impl GlErrorCode {
    pub const NO_ERROR: GlErrorCode = GlErrorCode(glow::NO_ERROR);

    pub fn is_error(self) -> bool {
        self != Self::NO_ERROR
    }

    pub fn describe(self) -> &'static str {
        match self.0 {
            glow::NO_ERROR => "NO_ERROR",
            glow::INVALID_ENUM => "INVALID_ENUM",
            glow::INVALID_VALUE => "INVALID_VALUE",
            glow::INVALID_OPERATION => "INVALID_OPERATION",
            glow::STACK_OVERFLOW => "STACK_OVERFLOW",
            glow::STACK_UNDERFLOW => "STACK_UNDERFLOW",
            glow::OUT_OF_MEMORY => "OUT_OF_MEMORY",
            glow::INVALID_FRAMEBUFFER_OPERATION => "INVALID_FRAMEBUFFER_OPERATION",
            _ => "unknown error",
        }
    }
}

impl fmt::Display for GlErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:04X})", self.describe(), self.0)
    }
}
