//! Game window and OpenGL context creation

use sdl2::VideoSubsystem;
use sdl2::sys;
use sdl2::video::{GLContext, GLProfile, SwapInterval, Window};

use crate::config::{FullscreenMode, InitConfig};
use crate::error::{WindowError, WindowResult};
use crate::versions::GlVersion;

/// Multisample count requested for the default framebuffer
pub const MSAA_SAMPLES: u8 = 8;

/// The game window and its OpenGL context
///
/// The context is current on the creating thread once this is returned, and
/// stays valid as long as this value lives.
pub struct GameWindow {
    pub window: Window,
    pub gl_context: GLContext,
}

/// Open the window described by `config` with a 4.5 core context
///
/// A resize event with the initial size is queued so the first pump reports
/// the window dimensions.
pub fn open_window(video: &VideoSubsystem, config: &InitConfig) -> WindowResult<GameWindow> {
    let gl_attr = video.gl_attr();
    gl_attr.set_context_profile(GLProfile::Core);
    gl_attr.set_context_version(
        GlVersion::REQUESTED.major as u8,
        GlVersion::REQUESTED.minor as u8,
    );
    gl_attr.set_double_buffer(true);
    gl_attr.set_multisample_buffers(1);
    gl_attr.set_multisample_samples(MSAA_SAMPLES);
    if config.debug {
        gl_attr.set_context_flags().debug().set();
    }

    let centered = (sys::SDL_WINDOWPOS_CENTERED_MASK | config.display) as i32;
    let mut builder = video.window(&config.title, config.width(), config.height());
    builder.opengl().resizable().position(centered, centered);
    if config.fullscreen {
        match config.fullscreen_mode {
            FullscreenMode::Desktop => builder.fullscreen_desktop(),
            FullscreenMode::Exclusive => builder.fullscreen(),
        };
    }

    let window = builder
        .build()
        .map_err(|e| WindowError::CreateWindow(e.to_string()))?;
    let gl_context = window
        .gl_create_context()
        .map_err(WindowError::CreateContext)?;

    let interval = if config.vsync {
        SwapInterval::VSync
    } else {
        SwapInterval::Immediate
    };
    if let Err(e) = video.gl_set_swap_interval(interval) {
        tracing::warn!(error = %e, "Could not set swap interval");
    }

    tracing::info!(
        title = %config.title,
        width = config.width(),
        height = config.height(),
        fullscreen = config.fullscreen,
        vsync = config.vsync,
        debug = config.debug,
        "Window opened"
    );

    queue_initial_resize(&window, config);
    Ok(GameWindow { window, gl_context })
}

fn queue_initial_resize(window: &Window, config: &InitConfig) {
    unsafe {
        let mut event: sys::SDL_Event = std::mem::zeroed();
        event.window.type_ = sys::SDL_EventType::SDL_WINDOWEVENT as u32;
        event.window.windowID = window.id();
        event.window.event = sys::SDL_WindowEventID::SDL_WINDOWEVENT_RESIZED as u8;
        event.window.data1 = config.width() as i32;
        event.window.data2 = config.height() as i32;
        if sys::SDL_PushEvent(&mut event) < 0 {
            tracing::warn!("Could not queue initial resize event");
        }
    }
}
