//! Tracer provider exporting finished spans to a rotating JSON-lines file.

use super::file_writer::RotatingFile;
use super::span_formatter::encode_batch;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::{Config, TracerProvider};
use std::future::ready;
use std::path::PathBuf;

/// Instrumentation scope written into every batch.
pub const SCOPE_NAME: &str = "ReproInventory";

/// Writes each exported batch as one OTLP/JSON line.
#[derive(Debug)]
struct JsonLinesExporter {
    file: RotatingFile,
    resource: Resource,
    closed: bool,
}

impl SpanExporter for JsonLinesExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.closed {
            return Box::pin(ready(Err(TraceError::from("trace exporter is closed"))));
        }

        let line = encode_batch(&self.resource, SCOPE_NAME, &batch).to_string();
        let result = self
            .file
            .append_line(&line)
            .map_err(|e| TraceError::from(format!("{}: {e}", self.file.path().display())));
        Box::pin(ready(result))
    }

    fn shutdown(&mut self) {
        self.closed = true;
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.resource = resource.clone();
    }
}

/// Builds a provider that exports every span as soon as it closes.
#[must_use]
pub fn file_tracer_provider(path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = JsonLinesExporter {
        file: RotatingFile::new(path),
        resource: resource.clone(),
        closed: false,
    };

    TracerProvider::builder()
        .with_config(Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
