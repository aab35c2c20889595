//! File-backed OpenTelemetry span exporter.

use super::otlp::OtlpEncoder;
use super::rotating_file::RotatingFile;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;

/// Writes each exported batch as one OTLP JSON line.
#[derive(Debug)]
struct OtlpFileExporter {
    file: RotatingFile,
    encoder: OtlpEncoder,
    stopped: bool,
}

impl SpanExporter for OtlpFileExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.stopped {
            Err(TraceError::from("exporter already shut down"))
        } else {
            let line = self.encoder.encode(&batch).to_string();
            self.file
                .append_line(&line)
                .map_err(|e| TraceError::from(e.to_string()))
        };
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.stopped = true;
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.encoder = OtlpEncoder::new(resource.clone());
    }
}

/// Builds a tracer provider that exports synchronously to `file_path`.
///
/// Spans are exported as they close; there is no runtime to flush batches.
pub fn create_tracer_provider(file_path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = OtlpFileExporter {
        file: RotatingFile::new(file_path),
        encoder: OtlpEncoder::new(resource.clone()),
        stopped: false,
    };

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
