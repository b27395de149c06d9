pub mod entities;

// Re-export tracing for use in this crate
pub use tracing;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` is used
/// (e.g. `"socialite=debug,tower_http=debug"`).
#[cfg(not(test))]
pub fn init_tracing(default_filter: &str) {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt::format::FmtSpan;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .init();
}
