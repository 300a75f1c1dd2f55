//! Sandbox filesystem conventions.
//!
//! Inside the Zellij sandbox the host filesystem is reachable under `/host`.

pub mod paths;

pub use paths::{default_catalog_path, expand_tilde, get_data_dir, CATALOG_FILE_NAME};
