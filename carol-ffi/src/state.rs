//! Process-wide state owned by the C ABI
//!
//! The host calls every export from the thread that owns the window and the
//! GL context. Nothing here is synchronized: calling exports from several
//! threads at once is undefined behavior.

use std::cell::UnsafeCell;

use carol_native::{EventPump, GlowDriver, SdlEventSource};

/// A global that is only ever touched from the host's main thread
pub(crate) struct HostCell<T>(UnsafeCell<T>);

// SAFETY: access is restricted to a single thread by the ABI contract.
unsafe impl<T> Sync for HostCell<T> {}

impl<T> HostCell<T> {
    pub(crate) const fn new(value: T) -> Self {
        Self(UnsafeCell::new(value))
    }

    /// # Safety
    ///
    /// Must be called from the host's main thread, and the returned reference
    /// must not outlive the export that obtained it.
    #[allow(clippy::mut_from_ref)]
    pub(crate) unsafe fn get_mut(&self) -> &mut T {
        unsafe { &mut *self.0.get() }
    }
}

static PUMP: HostCell<Option<EventPump<SdlEventSource>>> = HostCell::new(None);
static GL: HostCell<Option<GlowDriver>> = HostCell::new(None);

/// The event pump, created on first use
///
/// # Safety
///
/// See [`HostCell::get_mut`]. SDL's event subsystem must be initialized.
pub(crate) unsafe fn pump() -> &'static mut EventPump<SdlEventSource> {
    let slot = unsafe { PUMP.get_mut() };
    slot.get_or_insert_with(|| EventPump::new(unsafe { SdlEventSource::from_host() }))
}

/// # Safety
///
/// See [`HostCell::get_mut`].
pub(crate) unsafe fn set_gl(driver: GlowDriver) {
    unsafe { *GL.get_mut() = Some(driver) };
}

/// Mutable access to the loaded GL context, for re-initialization
///
/// # Safety
///
/// See [`HostCell::get_mut`].
pub(crate) unsafe fn gl_mut() -> Option<&'static mut GlowDriver> {
    unsafe { GL.get_mut() }.as_mut()
}

/// The loaded GL context, if `carol_init_graphics` succeeded
///
/// # Safety
///
/// See [`HostCell::get_mut`].
pub(crate) unsafe fn gl() -> Option<&'static GlowDriver> {
    unsafe { GL.get_mut() }.as_ref()
}
