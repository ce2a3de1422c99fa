//! Tracing initialization and subscriber setup.

use super::otlp::OtlpFileExporter;
use super::rotating::{RotatingFile, DEFAULT_BACKUPS, DEFAULT_MAX_BYTES};
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::Path;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Name of the trace file inside the data directory.
pub const TRACE_FILE_NAME: &str = "skatemap-otlp.json";

const SERVICE_NAME: &str = "skatemap";

fn tracer_provider(trace_file: &Path) -> TracerProvider {
    let resource = Resource::new(vec![
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let file = RotatingFile::new(trace_file.to_path_buf(), DEFAULT_MAX_BYTES, DEFAULT_BACKUPS);
    let exporter = OtlpFileExporter::new(file, resource.clone());

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

/// Installs the global tracing subscriber.
///
/// The pipeline is:
/// 1. An `EnvFilter` from `RUST_LOG`, else `config.trace_level`, else `"info"`
/// 2. An OpenTelemetry layer exporting spans to `skatemap-otlp.json` in the data
///    directory (10 MB rotation, 3 backups)
/// 3. A compact human-readable layer on stderr
///
/// If the data directory cannot be created, spans are not exported but stderr logging
/// still works. Calling this more than once has no effect after the first call.
///
/// # Example
///
/// ```no_run
/// use skatemap::observability::init_tracing;
/// use skatemap::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let data_dir = crate::infrastructure::data_dir();
    let otel_layer = match std::fs::create_dir_all(&data_dir) {
        Ok(()) => {
            let provider = tracer_provider(&data_dir.join(TRACE_FILE_NAME));
            Some(OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME)))
        }
        Err(e) => {
            eprintln!("skatemap: span export disabled, cannot create {}: {e}", data_dir.display());
            None
        }
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .with(fmt_layer)
        .try_init();
}
