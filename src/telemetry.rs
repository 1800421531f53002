//! Tracing setup for hosts embedding `chart-geometry`.
//!
//! The engine only emits `tracing` events; installing a subscriber is the
//! host's call. With the `telemetry` feature these helpers install a compact
//! `fmt` subscriber.

/// Installs a compact subscriber filtered by `RUST_LOG`, falling back to `info`.
///
/// Returns `false` when the feature is disabled or a global subscriber is
/// already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter("info")
}

/// Installs a compact subscriber, using `fallback_filter` when `RUST_LOG`
/// is unset or unparsable.
///
/// `fallback_filter` uses `EnvFilter` directive syntax, e.g.
/// `"chart_geometry=trace"`.
#[must_use]
pub fn init_tracing_with_filter(fallback_filter: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(fallback_filter))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_filter;
        false
    }
}
