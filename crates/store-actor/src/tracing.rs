use tracing_subscriber::EnvFilter;

/// Initializes the tracing/logging infrastructure for a binary.
///
/// Sets up structured logging using the `tracing` crate with:
/// - **Environment-based filtering**: `RUST_LOG` wins when set
/// - **Fallback directive**: `default_directive` is used otherwise
/// - **Compact formatting**: one line per event, no module targets
///
/// # Environment Variables
///
/// - `RUST_LOG=info` - Show info, warn, and error messages
/// - `RUST_LOG=debug` - Show every request the store actor receives
/// - `RUST_LOG=store_actor=debug` - Debug only for the store runtime
///
/// Calling this twice is harmless; the second call leaves the first
/// subscriber in place.
///
/// # Example
///
/// ```ignore
/// store_actor::tracing::setup_tracing("info");
/// tracing::info!("Application started");
/// ```
pub fn setup_tracing(default_directive: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
