//! Storage layer for the catalog.
//!
//! The catalog is read-only: it is read once from a source at startup and kept
//! in memory for the session.
//!
//! # Modules
//!
//! - `source`: The [`EntrySource`] trait abstracting where the catalog lives
//! - `json`: JSON file source and the catalog parser
//! - `store`: The load-once [`EntryStore`]

pub mod json;
pub mod source;
pub mod store;

pub use json::{parse_catalog, JsonFileSource};
pub use source::EntrySource;
pub use store::{unknown_option_counts, EntryStore, StoreStatus};
