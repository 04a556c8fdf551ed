//! Event pump and input snapshot
//!
//! Each call to [`EventPump::pump_events`] pumps the OS queue once, moves at
//! most [`EVENT_CAPACITY`] events into a fixed buffer, and refreshes the
//! modifier mask and mouse state. The buffer and the snapshot are overwritten
//! by the next pump: read them right after pumping.
//!
//! The OS side is abstracted by [`EventSource`]; [`SdlEventSource`] is the
//! SDL2 implementation.

use std::marker::PhantomData;
use std::os::raw::c_int;

use sdl2::sys;

use crate::error::{WindowError, WindowResult};

/// Number of events captured by one pump cycle
pub const EVENT_CAPACITY: usize = 128;

/// An opaque, plain-data event record
pub trait EventRecord: Copy {
    /// The value stored in slots that no pump has written yet
    fn empty() -> Self;
}

impl EventRecord for sys::SDL_Event {
    fn empty() -> Self {
        // SDL_Event is a C union of plain integers; all-zero is a valid value.
        unsafe { std::mem::zeroed() }
    }
}

/// Fixed-capacity buffer of the events captured by the last pump
#[derive(Clone)]
pub struct EventBuffer<E: EventRecord> {
    slots: [E; EVENT_CAPACITY],
    len: usize,
}

impl<E: EventRecord> EventBuffer<E> {
    pub fn new() -> Self {
        Self {
            slots: [E::empty(); EVENT_CAPACITY],
            len: 0,
        }
    }

    /// Valid events, in queue order
    pub fn as_slice(&self) -> &[E] {
        &self.slots[..self.len]
    }

    /// Start of the slot array, for hosts that read the buffer directly
    pub fn as_ptr(&self) -> *const E {
        self.slots.as_ptr()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn fill_from<S>(&mut self, source: &mut S) -> usize
    where
        S: EventSource<Event = E> + ?Sized,
    {
        let n = source.peep(&mut self.slots);
        self.len = usize::try_from(n).unwrap_or(0).min(EVENT_CAPACITY);
        self.len
    }
}

impl<E: EventRecord> Default for EventBuffer<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Modifier, mouse button and pointer state captured with the last pump
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub modifiers: u32,
    pub mouse_buttons: u32,
    pub mouse_x: i32,
    pub mouse_y: i32,
}

/// The OS event queue and input state
pub trait EventSource {
    type Event: EventRecord;

    /// Gather pending OS events into the queue
    fn pump(&mut self);

    /// Remove up to `out.len()` events from the queue into `out`
    ///
    /// Returns the driver's count, which may be negative on error.
    fn peep(&mut self, out: &mut [Self::Event; EVENT_CAPACITY]) -> i32;

    /// Key states indexed by scancode
    fn keyboard_state(&self) -> &[u8];

    fn modifiers(&self) -> u32;

    /// Button mask and pointer position, in window coordinates
    fn mouse_state(&self) -> (u32, i32, i32);
}

/// [`EventSource`] reading SDL2's event queue
///
/// SDL must stay initialized while this value lives. Only the thread that
/// created the window may use it.
pub struct SdlEventSource {
    _events: Option<sdl2::EventSubsystem>,
    _not_send: PhantomData<*const ()>,
}

impl SdlEventSource {
    /// Use the event subsystem of an SDL context owned by Rust
    pub fn new(sdl: &sdl2::Sdl) -> WindowResult<Self> {
        let events = sdl.event().map_err(WindowError::Sdl)?;
        Ok(Self {
            _events: Some(events),
            _not_send: PhantomData,
        })
    }

    /// Use an SDL instance initialized by the host
    ///
    /// # Safety
    ///
    /// The host must have initialized SDL's event subsystem and keep it alive
    /// for as long as the returned value is used.
    pub unsafe fn from_host() -> Self {
        Self {
            _events: None,
            _not_send: PhantomData,
        }
    }
}

impl EventSource for SdlEventSource {
    type Event = sys::SDL_Event;

    fn pump(&mut self) {
        unsafe { sys::SDL_PumpEvents() }
    }

    fn peep(&mut self, out: &mut [Self::Event; EVENT_CAPACITY]) -> i32 {
        unsafe {
            sys::SDL_PeepEvents(
                out.as_mut_ptr(),
                EVENT_CAPACITY as c_int,
                sys::SDL_eventaction::SDL_GETEVENT,
                sys::SDL_EventType::SDL_FIRSTEVENT as u32,
                sys::SDL_EventType::SDL_LASTEVENT as u32,
            )
        }
    }

    fn keyboard_state(&self) -> &[u8] {
        let mut len: c_int = 0;
        let keys = unsafe { sys::SDL_GetKeyboardState(&mut len) };
        if keys.is_null() || len <= 0 {
            return &[];
        }
        // The array is owned by SDL and lives until SDL_Quit.
        unsafe { std::slice::from_raw_parts(keys, len as usize) }
    }

    fn modifiers(&self) -> u32 {
        unsafe { sys::SDL_GetModState() as u32 }
    }

    fn mouse_state(&self) -> (u32, i32, i32) {
        let (mut x, mut y): (c_int, c_int) = (0, 0);
        let buttons = unsafe { sys::SDL_GetMouseState(&mut x, &mut y) };
        (buttons, x, y)
    }
}

/// Whether [`EventPump::drain`] should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Event buffer, input snapshot and the source that fills them
pub struct EventPump<S: EventSource> {
    source: S,
    buffer: EventBuffer<S::Event>,
    input: InputSnapshot,
}

impl<S: EventSource> EventPump<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            buffer: EventBuffer::new(),
            input: InputSnapshot::default(),
        }
    }

    /// Run one pump cycle and return the number of events captured
    ///
    /// Never more than [`EVENT_CAPACITY`]; a driver error counts as zero.
    pub fn pump_events(&mut self) -> usize {
        self.source.pump();
        let n = self.buffer.fill_from(&mut self.source);
        let (mouse_buttons, mouse_x, mouse_y) = self.source.mouse_state();
        self.input = InputSnapshot {
            modifiers: self.source.modifiers(),
            mouse_buttons,
            mouse_x,
            mouse_y,
        };
        n
    }

    /// Events captured by the last pump
    pub fn events(&self) -> &[S::Event] {
        self.buffer.as_slice()
    }

    pub fn buffer(&self) -> &EventBuffer<S::Event> {
        &self.buffer
    }

    /// Key states indexed by scancode, nonzero when pressed
    pub fn keyboard(&self) -> &[u8] {
        self.source.keyboard_state()
    }

    pub fn input(&self) -> InputSnapshot {
        self.input
    }

    pub fn modifiers(&self) -> u32 {
        self.input.modifiers
    }

    pub fn mouse_buttons(&self) -> u32 {
        self.input.mouse_buttons
    }

    pub fn mouse_position(&self) -> (i32, i32) {
        (self.input.mouse_x, self.input.mouse_y)
    }

    /// Pump until the queue is empty, handing every event to `handler`
    ///
    /// A cycle that fills the whole buffer is followed by another one, so
    /// events beyond the first [`EVENT_CAPACITY`] are delivered too, in queue
    /// order. Returns the number of events handled.
    pub fn drain<F>(&mut self, mut handler: F) -> usize
    where
        F: FnMut(&S::Event) -> Flow,
    {
        let mut handled = 0;
        loop {
            let n = self.pump_events();
            for event in self.buffer.as_slice() {
                handled += 1;
                if handler(event) == Flow::Stop {
                    return handled;
                }
            }
            if n < EVENT_CAPACITY {
                return handled;
            }
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
