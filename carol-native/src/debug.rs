//! OpenGL debug-output bridge
//!
//! The driver reports diagnostics through a callback with the signature
//! `(source, type, id, severity, length, message)`. The bridge forwards each
//! message synchronously and unchanged to a [`DebugSink`]: no filtering, no
//! buffering, no state. A sink must not call back into GL functions that
//! change the error state being reported.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

/// One driver diagnostic, exactly as delivered by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebugMessage<'a> {
    /// `DEBUG_SOURCE_*`
    pub source: u32,
    /// `DEBUG_TYPE_*`
    pub kind: u32,
    /// Implementation-defined message id
    pub id: u32,
    /// `DEBUG_SEVERITY_*`
    pub severity: u32,
    /// Length of `text` in bytes
    ///
    /// The driver's message reaches us already decoded as UTF-8, with invalid
    /// sequences replaced, so this is the length of the decoded text. It
    /// differs from the driver's own count only for malformed messages.
    pub length: i32,
    pub text: &'a str,
}

/// Receiver for forwarded debug messages
pub type DebugSink = Arc<dyn Fn(&DebugMessage<'_>) + Send + Sync>;

/// Build a sink from a closure
pub fn sink<F>(f: F) -> DebugSink
where
    F: Fn(&DebugMessage<'_>) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// The sink used when the host does not provide one: logs through `tracing`
pub fn tracing_sink() -> DebugSink {
    sink(log_message)
}

/// Hand one driver message to `sink`
///
/// This runs inside the driver's C callback, so a panicking sink is caught
/// and logged instead of unwinding into the driver.
pub fn forward(sink: &DebugSink, source: u32, kind: u32, id: u32, severity: u32, text: &str) {
    let message = DebugMessage {
        source,
        kind,
        id,
        severity,
        length: i32::try_from(text.len()).unwrap_or(i32::MAX),
        text,
    };
    if catch_unwind(AssertUnwindSafe(|| (**sink)(&message))).is_err() {
        tracing::error!(id, "OpenGL debug sink panicked");
    }
}

/// Log a debug message at the level matching its severity
pub fn log_message(m: &DebugMessage<'_>) {
    let source = source_name(m.source);
    let kind = type_suffix(m.kind);
    match m.severity {
        glow::DEBUG_SEVERITY_HIGH => {
            tracing::error!(target: "carol_native::gl", id = m.id, "{source}{kind}: {}", m.text)
        }
        glow::DEBUG_SEVERITY_MEDIUM | glow::DEBUG_SEVERITY_LOW => {
            tracing::warn!(target: "carol_native::gl", id = m.id, "{source}{kind}: {}", m.text)
        }
        glow::DEBUG_SEVERITY_NOTIFICATION => {
            tracing::info!(target: "carol_native::gl", id = m.id, "{source}{kind}: {}", m.text)
        }
        _ => tracing::debug!(target: "carol_native::gl", id = m.id, "{source}{kind}: {}", m.text),
    }
}

/// Human-readable name of a `DEBUG_SOURCE_*` value
pub fn source_name(source: u32) -> &'static str {
    match source {
        glow::DEBUG_SOURCE_API => "OpenGL",
        glow::DEBUG_SOURCE_WINDOW_SYSTEM => "Window-system API",
        glow::DEBUG_SOURCE_SHADER_COMPILER => "Shader compiler",
        glow::DEBUG_SOURCE_THIRD_PARTY => "Third party",
        glow::DEBUG_SOURCE_APPLICATION => "Application",
        _ => "Other source",
    }
}

/// Suffix describing a `DEBUG_TYPE_*` value, empty for `DEBUG_TYPE_OTHER`
pub fn type_suffix(kind: u32) -> &'static str {
    match kind {
        glow::DEBUG_TYPE_ERROR => " (error)",
        glow::DEBUG_TYPE_DEPRECATED_BEHAVIOR => " (deprecated behavior)",
        glow::DEBUG_TYPE_UNDEFINED_BEHAVIOR => " (undefined behavior)",
        glow::DEBUG_TYPE_PORTABILITY => " (portability)",
        glow::DEBUG_TYPE_PERFORMANCE => " (performance)",
        glow::DEBUG_TYPE_MARKER => " (marker)",
        glow::DEBUG_TYPE_PUSH_GROUP => " (push group)",
        glow::DEBUG_TYPE_POP_GROUP => " (pop group)",
        _ => "",
    }
}
