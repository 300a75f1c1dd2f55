//! Catalog source abstraction.
//!
//! This module defines the [`EntrySource`] trait, the boundary between the entry
//! store and wherever the catalog physically lives. The store reads a source at
//! most once per session.

use crate::domain::{Entry, Result};

/// Somewhere a complete catalog can be read from.
///
/// # Implementations
///
/// - [`JsonFileSource`](crate::storage::JsonFileSource): A JSON array on disk
///
/// # Examples
///
/// ```
/// use reproinventory::domain::{Entry, Result};
/// use reproinventory::storage::EntrySource;
///
/// struct Fixed(Vec<Entry>);
///
/// impl EntrySource for Fixed {
///     fn read(&self) -> Result<Vec<Entry>> {
///         Ok(self.0.clone())
///     }
/// }
///
/// let source = Fixed(vec![Entry::new("1")]);
/// assert_eq!(source.read()?.len(), 1);
/// # Ok::<(), reproinventory::CatalogError>(())
/// ```
pub trait EntrySource: Send {
    /// Reads every entry, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DataUnavailable`](crate::CatalogError::DataUnavailable)
    /// when the source cannot be read or is not a sequence of entries.
    fn read(&self) -> Result<Vec<Entry>>;

    /// Short human-readable description used in logs.
    fn describe(&self) -> String {
        "catalog source".to_string()
    }
}
