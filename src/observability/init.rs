//! Subscriber setup.

use super::exporter;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service and instrumentation scope name.
pub(super) const SERVICE_NAME: &str = "zsplash";

/// Name of the OTLP trace file inside the data directory.
const TRACE_FILE_NAME: &str = "zsplash-otlp.json";

/// Installs the global tracing subscriber.
///
/// Filters with `config.trace_level` (default `"info"`) and exports every
/// closed span to the trace file. Observability is best effort: if the data
/// directory cannot be created nothing is installed. Calling it twice is
/// harmless, only the first subscriber wins.
///
/// # Example
///
/// ```rust,no_run
/// use zsplash::observability::init_tracing;
/// use zsplash::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");

    let Ok(data_dir) = crate::infrastructure::ensure_data_dir() else {
        return;
    };

    let resource = Resource::new(vec![
        opentelemetry::KeyValue::new("service.name", SERVICE_NAME),
        opentelemetry::KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let provider = exporter::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer)
        .try_init();
}
