//! OpenTelemetry-based observability with file-based trace export.
//!
//! # Architecture
//!
//! ```text
//! tracing macros → tracing-opentelemetry → OpenTelemetry SDK → OtlpFileExporter → JSON lines
//!               └→ fmt layer → stderr
//! ```
//!
//! # Features
//!
//! - **File-Based Export**: Spans written to `skatemap-otlp.json` in the data directory
//! - **Automatic Rotation**: Files rotate at 10MB with 3 numbered backups
//! - **OTLP Format**: Standard OpenTelemetry Protocol JSON, one batch per line
//! - **Trace Propagation**: Outgoing HTTP requests carry a `traceparent` header
//!
//! # Configuration
//!
//! Trace level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` in the configuration file or `--trace-level`
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - `init`: Subscriber setup
//! - `otlp`: Span exporter and OTLP JSON encoding
//! - `rotating`: Size-capped file with numbered backups

mod init;
mod otlp;
mod rotating;

pub use init::{init_tracing, TRACE_FILE_NAME};
