//! Logging setup
//!
//! Everything in this crate logs through `tracing`. These helpers install a
//! `fmt` subscriber for applications that do not bring their own.

use tracing_subscriber::{EnvFilter, fmt};

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "carol_native=info,carol=info,carol_ffi=info,warn";

/// Initialize a tracing subscriber filtered by `RUST_LOG`
///
/// Does nothing if a global subscriber is already installed.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    install(filter);
}

/// Initialize a tracing subscriber with an explicit filter
pub fn init_tracing_with_filter(filter: &str) {
    install(EnvFilter::new(filter));
}

fn install(filter: EnvFilter) {
    let result = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
    if result.is_ok() {
        tracing::debug!("Tracing initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_ignored() {
        init_tracing_with_filter("carol_native=debug");
        init_tracing();
        tracing::info!("still logging");
    }
}
