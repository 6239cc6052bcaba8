use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber. Output goes to stderr because stdout
/// carries the JSON-RPC stream.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
