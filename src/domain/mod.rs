//! Domain layer for the ReproInventory plugin.
//!
//! Holds the catalog data model and its closed option enumerations, independent
//! of Zellij and of how the catalog is stored.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`facet`]: Filterable attributes and their option lists
//! - [`entry`]: The catalog entry model and its permissive JSON decoding
//!
//! # Examples
//!
//! ```
//! use reproinventory::domain::{Entry, SetFacet};
//!
//! let mut entry = Entry::new("42");
//! entry.level = Some(vec!["Beginner".to_string()]);
//! assert_eq!(entry.tags(SetFacet::Level), Some(&["Beginner".to_string()][..]));
//! ```

pub mod entry;
pub mod error;
pub mod facet;

pub use entry::Entry;
pub use error::{CatalogError, Result};
pub use facet::{Facet, ScalarFacet, SetFacet};
