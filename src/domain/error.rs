//! Error types for the ReproInventory plugin.
//!
//! This module defines the centralized error type [`CatalogError`] and a type alias
//! [`Result`] used throughout the crate. Filtering itself cannot fail, so the
//! variants here only cover the catalog boundary, theme loading, and the worker
//! message channel.

use thiserror::Error;

/// The main error type for ReproInventory operations.
///
/// # Examples
///
/// ```
/// use reproinventory::CatalogError;
///
/// let err = CatalogError::DataUnavailable("catalog.json: not found".to_string());
/// assert_eq!(err.to_string(), "Catalog data unavailable: catalog.json: not found");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The catalog source could not be read or is not a JSON array of entries.
    ///
    /// This is the only failure the browser surfaces to the user. It is terminal
    /// for the session: the store never retries a failed load.
    #[error("Catalog data unavailable: {0}")]
    DataUnavailable(String),

    /// A theme file could not be read or parsed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// A worker payload could not be decoded or a response could not be encoded.
    #[error("Worker communication error: {0}")]
    Worker(String),
}

/// A specialized `Result` type for ReproInventory operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
