//! Telemetry helpers for applications embedding `xy-chart`.
//!
//! The crate only emits `tracing` events; installing a subscriber is left to
//! the host. `init_default_tracing` is a convenience for demos and tests.

/// Initializes a compact `tracing` subscriber when the `telemetry` feature is enabled.
///
/// The filter comes from `RUST_LOG` and falls back to `default_directive`.
/// Returns `false` when the feature is disabled or a global subscriber is
/// already installed.
#[must_use]
pub fn init_tracing_with_default(default_directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = default_directive;
        false
    }
}

/// Same as [`init_tracing_with_default`] with `xy_chart=info`.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_default("xy_chart=info")
}
