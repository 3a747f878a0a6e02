//! Opt-in `tracing` subscriber setup for the `racechart` binary and for
//! applications embedding the crate.
//!
//! Library code only emits events. Nothing is printed unless a subscriber is
//! installed, either through this module or by the host application.

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "racechart=info";

/// Installs a compact stderr subscriber filtered by `RUST_LOG`, falling back
/// to [`DEFAULT_FILTER`].
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber was already set.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing(DEFAULT_FILTER)
}

/// Same as [`init_default_tracing`] with a caller-chosen fallback filter.
#[must_use]
pub fn init_tracing(fallback_filter: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_filter));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
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
