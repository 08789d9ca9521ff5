//! ## lossim-telemetry::logging
//! Structured logging with tracing and OpenTelemetry key/values.

use opentelemetry::KeyValue;
use tracing::info_span;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Clone)]
pub struct EventLogger;

impl EventLogger {
    /// Installs the global subscriber. `RUST_LOG` takes precedence over `level`.
    ///
    /// A second call is a no-op.
    pub fn init(level: &str) {
        let _ = fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
            )
            .with_target(false)
            .try_init();
    }

    /// Emits a run-level event carrying OpenTelemetry attributes.
    pub fn log_event(event_type: &str, metadata: Vec<KeyValue>) {
        let span = info_span!(
            "simulation_event",
            event_type = event_type,
            otel.kind = "INTERNAL"
        );
        let _entered = span.enter();
        tracing::info!(metadata = ?metadata, "Simulation event recorded");
    }
}
