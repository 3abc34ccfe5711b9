use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "info";

/// Reads filters from `RUST_LOG`, defaulting to `info`.
///
/// Logs go to stderr so stdout stays clean for JSON and report output.
pub fn setup_logging() {
    let filter = build_filter(std::env::var("RUST_LOG").ok().as_deref());

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!("logging initialized");
}

/// An unset or unparseable directive falls back to the default level.
fn build_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}
