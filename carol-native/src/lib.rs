//! # carol-native
//!
//! The native layer of the carol game engine: a thin binding over SDL2 and
//! OpenGL 4.5 core for a host that drives the game loop itself.
//!
//! - [`events`]: pumps the OS queue into a fixed 128-slot buffer and keeps a
//!   snapshot of keyboard, modifier and mouse state.
//! - [`context`]: loads the GL function table and applies the fixed initial
//!   render state, optionally routing driver debug output through [`debug`].
//! - [`shaders`] and [`geometry`]: two-phase shader/program building, vertex
//!   arrays and immutable buffers.
//! - [`frame`]: clear, draw, present, raw error passthrough.
//! - [`window`] and [`config`]: opening the window described by `init.json`.
//!
//! Every GL call goes through the [`GlDriver`] trait, implemented by
//! [`GlowDriver`] for real contexts.
//!
//! ## Quick Start
//!
//! ```no_run
//! use carol_native::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! init_tracing();
//! let config = InitConfig::load_default()?;
//! let sdl = sdl2::init()?;
//! let video = sdl.video()?;
//! let game = open_window(&video, &config)?;
//! let gl = unsafe { init_graphics(config.debug.then(tracing_sink)) }?;
//! let mut pump = EventPump::new(SdlEventSource::new(&sdl)?);
//!
//! loop {
//!     pump.pump_events();
//!     if pump.events().iter().any(|e| unsafe { e.type_ } == sdl2::sys::SDL_EventType::SDL_QUIT as u32) {
//!         break;
//!     }
//!     render(&gl, &game.window, None);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(rust_2018_idioms)]

pub mod config;
pub mod context;
pub mod debug;
pub mod driver;
pub mod error;
pub mod events;
pub mod frame;
pub mod geometry;
pub mod handles;
pub mod logging;
pub mod shaders;
pub mod versions;
pub mod window;

pub use self::config::{FullscreenMode, InitConfig};
pub use self::context::{RENDER_STATE, RenderState, configure, init_graphics, load_current_context};
pub use self::debug::{DebugMessage, DebugSink, tracing_sink};
pub use self::driver::{GlDriver, GlowDriver};
pub use self::error::*;
pub use self::events::{
    EVENT_CAPACITY, EventBuffer, EventPump, EventRecord, EventSource, Flow, InputSnapshot,
    SdlEventSource,
};
pub use self::frame::{
    DrawCall, GlErrorCode, Presenter, RawWindow, clear, draw, get_last_error, present, render,
};
pub use self::geometry::{
    BufferStorageFlags, ComponentType, VertexAttribute, bind_attribute, create_buffer,
    create_buffer_from, create_vertex_array, read_buffer, uniform_buffer, vertex_buffer,
};
pub use self::handles::{BufferHandle, ProgramHandle, ShaderHandle, VertexArrayHandle};
pub use self::logging::{init_tracing, init_tracing_with_filter};
pub use self::shaders::{
    ShaderStage, check_compile_error, check_link_error, compile_shader, destroy_pipeline,
    link_program, link_stages, release_shader, use_pipeline,
};
pub use self::versions::GlVersion;
pub use self::window::{GameWindow, open_window};

// Re-exported so hosts can name the driver types without a direct dependency
pub use glow;
pub use sdl2;
