//! Span export to a local OTLP/JSON file.
//!
//! ```text
//! tracing → tracing-opentelemetry → TracerProvider → JsonLinesExporter → RotatingFile
//! ```
//!
//! Spans land in `~/.local/share/zellij/reproinventory/reproinventory-otlp.json`
//! (seen as `/host/...` from inside the sandbox), one batch per line. The file
//! rotates at 10 MiB and keeps three timestamped backups.
//!
//! The level comes from the `trace_level` plugin option and defaults to `info`.
//!
//! ```rust,no_run
//! use reproinventory::observability::init_tracing;
//! use reproinventory::Config;
//!
//! init_tracing(&Config::default());
//! tracing::debug!("plugin initialized");
//! ```

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, TRACE_FILE_NAME};
