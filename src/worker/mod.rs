//! Background worker for loading the catalog.
//!
//! Reading the catalog file is the only blocking operation of the plugin. It
//! runs on a Zellij worker thread so the pane can show a loading state while
//! the file is read.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: The host-free [`CatalogWorker`]

pub mod handler;
pub mod messages;

pub use handler::CatalogWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse, CATALOG_WORKER};
