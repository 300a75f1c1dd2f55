//! Faceted filtering of the catalog.
//!
//! - [`state`]: The mutable query owned by the UI
//! - [`engine`]: The pure function from entries and query to the visible subset

pub mod engine;
pub mod state;

pub use engine::{apply, haystack, matches, matching_indices};
pub use state::FilterState;
