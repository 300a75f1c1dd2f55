//! Catalog worker.
//!
//! [`CatalogWorker`] runs on the Zellij worker thread and performs the one
//! blocking operation of the plugin: reading the catalog file. It is free of
//! Zellij host calls; the binary wraps it in a `ZellijWorker` and posts the
//! encoded responses back to the plugin.

use crate::domain::error::{CatalogError, Result};
use crate::storage::{EntryStore, JsonFileSource};
use crate::worker::{WorkerMessage, WorkerResponse};
use crate::Config;

/// Installs a tracing subscriber for the given configuration.
pub type TracingInstaller = fn(&Config);

/// Owns the entry store for the lifetime of the worker thread.
#[derive(Default)]
pub struct CatalogWorker {
    store: Option<(String, EntryStore)>,

    /// Taken on the first request. A worker runs in its own wasm instance and
    /// does not share the plugin's subscriber.
    install_tracing: Option<TracingInstaller>,
}

impl CatalogWorker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A worker that installs [`observability::init_tracing`](crate::observability::init_tracing)
    /// on its first request, at the level carried by that request.
    #[must_use]
    pub fn with_tracing() -> Self {
        Self::with_tracing_installer(crate::observability::init_tracing)
    }

    #[must_use]
    pub fn with_tracing_installer(install: TracingInstaller) -> Self {
        Self {
            store: None,
            install_tracing: Some(install),
        }
    }

    /// Handles one decoded request.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);
        let _guard = span.entered();

        match message {
            WorkerMessage::LoadCatalog { path, .. } => self.handle_load_catalog(path),
        }
    }

    /// Decodes a JSON request, handles it and encodes the response.
    ///
    /// Returns `None` only if the response itself cannot be encoded.
    pub fn handle_payload(&mut self, payload: &str) -> Option<String> {
        let request = decode(payload);
        if let Some(install) = self.install_tracing.take() {
            install(&tracing_config(request.as_ref().ok()));
            tracing::debug!("worker tracing initialized");
        }

        let response = match request {
            Ok(message) => self.handle_message(message),
            Err(e) => {
                tracing::warn!(error = %e, "dropping undecodable worker message");
                WorkerResponse::Error {
                    message: e.to_string(),
                }
            }
        };

        match serde_json::to_string(&response) {
            Ok(encoded) => Some(encoded),
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize worker response");
                None
            }
        }
    }

    // The store for a path is built once; later requests replay its outcome.
    fn handle_load_catalog(&mut self, path: String) -> WorkerResponse {
        let reuse = matches!(&self.store, Some((current, _)) if *current == path);
        if !reuse {
            tracing::debug!(path = %path, "opening catalog store");
            let source = JsonFileSource::new(path.clone());
            self.store = Some((path, EntryStore::new(Box::new(source))));
        }

        let Some((_, store)) = self.store.as_mut() else {
            return WorkerResponse::Error {
                message: "catalog store missing".to_string(),
            };
        };

        match store.load() {
            Ok(entries) => WorkerResponse::CatalogLoaded {
                entries: entries.to_vec(),
            },
            Err(e) => WorkerResponse::LoadFailed {
                message: e.to_string(),
            },
        }
    }
}

/// Worker-side tracing configuration; the level follows the plugin's.
fn tracing_config(message: Option<&WorkerMessage>) -> Config {
    Config {
        trace_level: message.and_then(WorkerMessage::trace_level).map(str::to_string),
        ..Config::default()
    }
}

fn decode(payload: &str) -> Result<WorkerMessage> {
    serde_json::from_str(payload).map_err(|e| CatalogError::Worker(format!("bad request: {e}")))
}

/// Makes the sender's span the parent of spans created while the guard lives.
fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
    use opentelemetry::trace::{
        SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
    };

    let trace_context = message.trace_context()?;
    let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
    let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

    let span_context = SpanContext::new(
        trace_id,
        span_id,
        TraceFlags::SAMPLED,
        true,
        TraceState::default(),
    );

    Some(
        opentelemetry::Context::current()
            .with_remote_span_context(span_context)
            .attach(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    fn load(path: &str) -> WorkerMessage {
        WorkerMessage::LoadCatalog {
            path: path.to_string(),
            trace_level: None,
            trace_context: None,
        }
    }

    #[test]
    fn test_load_catalog_returns_entries() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": "1"}}, {{"id": "2"}}]"#).unwrap();
        let path = file.path().to_string_lossy().to_string();

        let mut worker = CatalogWorker::new();
        match worker.handle_message(load(&path)) {
            WorkerResponse::CatalogLoaded { entries } => {
                let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
                assert_eq!(ids, ["1", "2"]);
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_reports_load_failed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json").to_string_lossy().to_string();

        let mut worker = CatalogWorker::new();
        let response = worker.handle_message(load(&path));
        assert!(matches!(response, WorkerResponse::LoadFailed { message } if message.contains("unavailable")));
    }

    #[test]
    fn test_second_request_does_not_reread() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": "1"}}]"#).unwrap();
        let path = file.path().to_string_lossy().to_string();

        let mut worker = CatalogWorker::new();
        let first = worker.handle_message(load(&path));

        std::fs::write(file.path(), "not json").unwrap();
        let second = worker.handle_message(load(&path));
        assert_eq!(first, second);
    }

    #[test]
    fn test_undecodable_payload_yields_error_response() {
        let mut worker = CatalogWorker::new();
        let encoded = worker.handle_payload("{garbage").unwrap();
        let response: WorkerResponse = serde_json::from_str(&encoded).unwrap();
        assert!(matches!(response, WorkerResponse::Error { .. }));
    }

    #[test]
    fn test_payload_round_trip() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[]").unwrap();
        let payload = serde_json::to_string(&load(&file.path().to_string_lossy())).unwrap();

        let mut worker = CatalogWorker::new();
        let encoded = worker.handle_payload(&payload).unwrap();
        let response: WorkerResponse = serde_json::from_str(&encoded).unwrap();
        assert_eq!(response, WorkerResponse::CatalogLoaded { entries: vec![] });
    }

    static INSTALLS: AtomicUsize = AtomicUsize::new(0);
    static LAST_LEVEL: Mutex<Option<String>> = Mutex::new(None);

    fn record_install(config: &Config) {
        INSTALLS.fetch_add(1, Ordering::SeqCst);
        *LAST_LEVEL.lock().unwrap() = config.trace_level.clone();
    }

    #[test]
    fn test_tracing_installed_once_at_request_level() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[]").unwrap();
        let message = WorkerMessage::load_catalog(
            file.path().to_string_lossy().to_string(),
            Some("debug".to_string()),
        );
        let payload = serde_json::to_string(&message).unwrap();

        let mut worker = CatalogWorker::with_tracing_installer(record_install);
        worker.handle_payload(&payload).unwrap();
        worker.handle_payload(&payload).unwrap();

        assert_eq!(INSTALLS.load(Ordering::SeqCst), 1);
        assert_eq!(LAST_LEVEL.lock().unwrap().as_deref(), Some("debug"));
    }

    #[test]
    fn test_tracing_config_defaults_without_request() {
        assert_eq!(tracing_config(None).trace_level, None);
        assert_eq!(tracing_config(None).data_path, Config::default().data_path);
    }
}
