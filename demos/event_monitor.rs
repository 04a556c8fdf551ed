//! Logs what the event pump captures each frame
//!
//! Uses the fixed 128-slot pump the host ABI exposes, drained until the OS
//! queue is empty, and prints the input snapshot whenever it changes.

use carol_native::sdl2::sys::{SDL_Event, SDL_EventType};
use carol_native::*;

fn event_type(e: &SDL_Event) -> u32 {
    unsafe { e.type_ }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing_with_filter("event_monitor=info,carol_native=debug,warn");

    let config = InitConfig {
        title: "Event monitor".to_string(),
        resolution: [640, 360],
        ..InitConfig::load_default()?
    };
    let sdl = sdl2::init()?;
    let video = sdl.video()?;
    let game = open_window(&video, &config)?;
    let gl = unsafe { init_graphics(None) }?;
    let mut pump = EventPump::new(SdlEventSource::new(&sdl)?);

    let mut last = InputSnapshot::default();
    let mut quit = false;
    while !quit {
        let handled = pump.drain(|e| {
            let kind = event_type(e);
            tracing::info!("Event 0x{kind:04x}");
            if kind == SDL_EventType::SDL_QUIT as u32 {
                quit = true;
                Flow::Stop
            } else {
                Flow::Continue
            }
        });
        if handled > 0 {
            tracing::debug!(handled, "Drained events");
        }

        let input = pump.input();
        if input != last {
            let pressed = pump.keyboard().iter().filter(|&&k| k != 0).count();
            tracing::info!(?input, pressed, "Input changed");
            last = input;
        }

        render(&gl, &game.window, None);
    }
    Ok(())
}
