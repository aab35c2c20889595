//! OpenTelemetry tracing with file-based OTLP export.
//!
//! Spans emitted through `tracing` are bridged into OpenTelemetry and written as
//! OTLP JSON lines to a rotating file, since a sandboxed plugin has no collector
//! to talk to:
//!
//! ```text
//! tracing spans → tracing-opentelemetry → SDK TracerProvider → OtlpFileExporter → zsplash-otlp.json
//! ```
//!
//! The trace file lives at `~/.local/share/zellij/zsplash/zsplash-otlp.json`
//! (seen as `/host/.local/share/zellij/zsplash` from inside the sandbox).
//!
//! Trace level comes from the `trace_level` plugin option, default `"info"`.
//!
//! A web request leaves the plugin and comes back as a separate event; the
//! [`TraceContext`] stored in the request context map stitches both halves
//! into one trace.
//!
//! # Modules
//!
//! - `init`: subscriber setup
//! - `exporter`: `SpanExporter` writing OTLP batches to disk
//! - `otlp`: OTLP JSON encoding of span data
//! - `rotating_file`: size-capped append-only file with backups
//! - `context`: trace context propagation through request context maps

mod context;
mod exporter;
mod init;
mod otlp;
mod rotating_file;

pub use context::TraceContext;
pub use init::init_tracing;
