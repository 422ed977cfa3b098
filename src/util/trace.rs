//! Logging bootstrap for binaries, benchmarks and integration harnesses.
//!
//! The library itself only emits through the `log` facade (and, with the
//! `tracing` feature, `tracing` spans). Nothing is printed unless one of the
//! initialisers below is called. Verbosity is read from the environment:
//!
//! ```bash
//! RUST_LOG=commute=debug
//! ```

/// Installs `env_logger` as the `log` backend.
///
/// Safe to call more than once; later calls are ignored.
pub fn initialize_logger() {
    let _ = env_logger::Builder::from_default_env()
        .format_timestamp_millis()
        .try_init();
}

/// Initialises the tracer, using tracing subscription.
/// This is optional, not calling this function will simply
/// not log traces.
#[cfg(feature = "tracing")]
pub fn initialize_tracer() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let fmt_layer = tracing_subscriber::fmt::layer();

    // Initialise tracing with subscribers and environment filter
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(fmt_layer)
        .try_init();
}
