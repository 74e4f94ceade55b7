use tracing_subscriber::EnvFilter;

/// Installs the fmt subscriber used by every demo binary.
///
/// The filter comes from `RUST_LOG` and falls back to `warn`, so that the
/// cache hits and adapter conversions logged at `debug` only show up on
/// request (`RUST_LOG=structural_patterns=debug cargo run --bin flyweight`).
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // A second call (e.g. from tests) must not abort the demo.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
