//! Typed wrappers around OpenGL object names
//!
//! The driver names every object with a `u32`, and `0` is never a valid name.
//! Each object kind gets its own newtype so a shader cannot be passed where a
//! program is expected. None of them track lifetime: deleting an object is
//! always an explicit call, and using a handle afterwards is undefined.

use std::num::NonZeroU32;

macro_rules! gl_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(transparent)]
        pub struct $name(NonZeroU32);

        impl $name {
            /// Wrap a raw driver name; `0` yields `None`
            #[inline]
            pub const fn from_raw(raw: u32) -> Option<Self> {
                match NonZeroU32::new(raw) {
                    Some(v) => Some(Self(v)),
                    None => None,
                }
            }

            /// The raw driver name
            #[inline]
            pub const fn raw(self) -> u32 {
                self.0.get()
            }

            #[inline]
            pub(crate) const fn non_zero(self) -> NonZeroU32 {
                self.0
            }
        }

        impl From<$name> for u32 {
            #[inline]
            fn from(h: $name) -> u32 {
                h.raw()
            }
        }
    };
}

gl_handle!(
    /// A compiled (or compiling) shader stage
    ShaderHandle
);
gl_handle!(
    /// A program object linking one or more stages
    ProgramHandle
);
gl_handle!(
    /// A vertex array object
    VertexArrayHandle
);
gl_handle!(
    /// An immutable-storage buffer object
    BufferHandle
);
