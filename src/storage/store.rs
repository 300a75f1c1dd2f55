//! Load-once entry store.
//!
//! [`EntryStore`] wraps an [`EntrySource`] and reads it at most once. A
//! successful load is cached for the rest of the session; a failed load is
//! terminal and replayed to every later caller without touching the source.

use crate::domain::error::{CatalogError, Result};
use crate::domain::{Entry, Facet, ScalarFacet, SetFacet};
use crate::storage::source::EntrySource;
use std::collections::BTreeMap;

/// Where the store is in its one-shot lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreStatus {
    Unloaded,
    Ready,
    Failed,
}

#[derive(Debug)]
enum Loaded {
    Unloaded,
    Ready(Vec<Entry>),
    Failed(CatalogError),
}

/// Immutable catalog for the session.
///
/// # Examples
///
/// ```no_run
/// use reproinventory::storage::{EntryStore, JsonFileSource};
///
/// let mut store = EntryStore::new(Box::new(JsonFileSource::new("/tmp/catalog.json")));
/// let entries = store.load()?;
/// println!("{} entries", entries.len());
/// # Ok::<(), reproinventory::CatalogError>(())
/// ```
pub struct EntryStore {
    source: Box<dyn EntrySource>,
    loaded: Loaded,
}

impl EntryStore {
    #[must_use]
    pub fn new(source: Box<dyn EntrySource>) -> Self {
        Self {
            source,
            loaded: Loaded::Unloaded,
        }
    }

    /// Returns the catalog, reading the source on the first call only.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DataUnavailable`] if the source could not be read.
    /// The same error is returned by every later call.
    pub fn load(&mut self) -> Result<&[Entry]> {
        if matches!(self.loaded, Loaded::Unloaded) {
            let _span =
                tracing::debug_span!("store_load", source = %self.source.describe()).entered();

            self.loaded = match self.source.read() {
                Ok(entries) => {
                    log_unknown_options(&entries);
                    tracing::info!(count = entries.len(), "catalog loaded");
                    Loaded::Ready(entries)
                }
                Err(e) => {
                    tracing::error!(error = %e, "catalog load failed");
                    Loaded::Failed(e)
                }
            };
        }

        match &self.loaded {
            Loaded::Ready(entries) => Ok(entries),
            Loaded::Failed(e) => Err(e.clone()),
            Loaded::Unloaded => Err(CatalogError::DataUnavailable(
                "catalog was not loaded".to_string(),
            )),
        }
    }

    #[must_use]
    pub fn status(&self) -> StoreStatus {
        match self.loaded {
            Loaded::Unloaded => StoreStatus::Unloaded,
            Loaded::Ready(_) => StoreStatus::Ready,
            Loaded::Failed(_) => StoreStatus::Failed,
        }
    }
}

/// Counts, per facet, the values that fall outside the facet's enumeration.
///
/// Facets without unknown values are left out.
#[must_use]
pub fn unknown_option_counts(entries: &[Entry]) -> BTreeMap<Facet, usize> {
    let mut counts = BTreeMap::new();

    for entry in entries {
        for facet in SetFacet::ALL {
            let unknown = entry
                .tags(facet)
                .unwrap_or_default()
                .iter()
                .filter(|value| !Facet::Set(facet).is_known_option(value))
                .count();
            if unknown > 0 {
                *counts.entry(Facet::Set(facet)).or_insert(0) += unknown;
            }
        }
        for facet in ScalarFacet::ALL {
            if let Some(value) = entry.scalar(facet) {
                if !Facet::Scalar(facet).is_known_option(value) {
                    *counts.entry(Facet::Scalar(facet)).or_insert(0) += 1;
                }
            }
        }
    }

    counts
}

fn log_unknown_options(entries: &[Entry]) {
    for (facet, count) in unknown_option_counts(entries) {
        tracing::debug!(facet = facet.key(), count, "values outside option list");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingSource {
        reads: Arc<AtomicUsize>,
        result: Result<Vec<Entry>>,
    }

    impl EntrySource for CountingSource {
        fn read(&self) -> Result<Vec<Entry>> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    fn store_with(result: Result<Vec<Entry>>) -> (EntryStore, Arc<AtomicUsize>) {
        let reads = Arc::new(AtomicUsize::new(0));
        let source = CountingSource {
            reads: Arc::clone(&reads),
            result,
        };
        (EntryStore::new(Box::new(source)), reads)
    }

    #[test]
    fn test_loads_once_and_caches() {
        let (mut store, reads) = store_with(Ok(vec![Entry::new("1"), Entry::new("2")]));
        assert_eq!(store.status(), StoreStatus::Unloaded);

        assert_eq!(store.load().unwrap().len(), 2);
        assert_eq!(store.load().unwrap().len(), 2);

        assert_eq!(reads.load(Ordering::SeqCst), 1);
        assert_eq!(store.status(), StoreStatus::Ready);
    }

    #[test]
    fn test_failure_is_terminal() {
        let err = CatalogError::DataUnavailable("boom".to_string());
        let (mut store, reads) = store_with(Err(err.clone()));

        assert_eq!(store.load().unwrap_err(), err);
        assert_eq!(store.load().unwrap_err(), err);

        assert_eq!(reads.load(Ordering::SeqCst), 1);
        assert_eq!(store.status(), StoreStatus::Failed);
    }

    #[test]
    fn test_unknown_option_counts() {
        let mut entry = Entry::new("1");
        entry.level = Some(vec!["Beginner".to_string(), "Expert".to_string()]);
        entry.open_dataset = Some("yes".to_string());
        entry.course_length = Some("1 day".to_string());

        let counts = unknown_option_counts(&[entry.clone(), entry]);
        assert_eq!(counts.get(&Facet::Set(SetFacet::Level)), Some(&2));
        assert_eq!(counts.get(&Facet::Scalar(ScalarFacet::OpenDataset)), Some(&2));
        assert!(!counts.contains_key(&Facet::Scalar(ScalarFacet::CourseLength)));
    }
}
