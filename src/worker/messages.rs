//! Worker message protocol.
//!
//! Requests from the plugin thread to the background worker, the worker's
//! responses, and the trace context that links worker spans to the plugin span
//! that sent the request.

use crate::domain::Entry;
use serde::{Deserialize, Serialize};

/// Name under which plugin and worker exchange catalog messages.
pub const CATALOG_WORKER: &str = "catalog";

/// OpenTelemetry ids of the span that posted a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// Trace id as 32 hex digits.
    pub trace_id: String,

    /// Id of the sending span as 16 hex digits.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the ids of the current tracing span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the span
    /// context is invalid.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            tracing::trace!("no valid span context to propagate");
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Generates constructors that attach the current [`TraceContext`].
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    load_catalog(LoadCatalog { path: String, trace_level: Option<String> }),
}

/// Requests from the plugin thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Read the catalog file at `path` (sandbox path).
    LoadCatalog {
        path: String,

        /// `EnvFilter` directive for the worker's own subscriber.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_level: Option<String>,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    #[must_use]
    pub fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::LoadCatalog { trace_context, .. } => trace_context.as_ref(),
        }
    }

    #[must_use]
    pub fn trace_level(&self) -> Option<&str> {
        match self {
            Self::LoadCatalog { trace_level, .. } => trace_level.as_deref(),
        }
    }
}

/// Responses sent back to the plugin thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The catalog was read; entries are in file order.
    CatalogLoaded { entries: Vec<Entry> },

    /// The catalog could not be read. Terminal for the session.
    LoadFailed { message: String },

    /// A request could not be decoded.
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_without_tracer_has_no_context() {
        let message =
            WorkerMessage::load_catalog("/host/catalog.json".to_string(), Some("debug".to_string()));
        assert_eq!(message.trace_level(), Some("debug"));
        assert_eq!(
            message,
            WorkerMessage::LoadCatalog {
                path: "/host/catalog.json".to_string(),
                trace_level: Some("debug".to_string()),
                trace_context: None,
            }
        );
    }

    #[test]
    fn test_missing_trace_context_is_not_serialized() {
        let message = WorkerMessage::LoadCatalog {
            path: "x".to_string(),
            trace_level: None,
            trace_context: None,
        };
        let json = serde_json::to_string(&message).unwrap();
        assert_eq!(json, r#"{"LoadCatalog":{"path":"x"}}"#);

        let back: WorkerMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, message);
    }
}
