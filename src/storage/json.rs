//! JSON file catalog source.
//!
//! The catalog is a single JSON array of objects, the output of the
//! TSV to JSON conversion scripts. Only the outer shape is enforced: anything
//! other than an array is [`CatalogError::DataUnavailable`], while malformed
//! elements decode permissively through [`Entry::from_json`].

use crate::domain::error::{CatalogError, Result};
use crate::domain::Entry;
use crate::storage::source::EntrySource;
use serde_json::Value;
use std::collections::HashSet;
use std::path::PathBuf;

/// Reads the catalog from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl EntrySource for JsonFileSource {
    fn read(&self) -> Result<Vec<Entry>> {
        let _span = tracing::debug_span!("json_read_catalog", path = ?self.path).entered();

        let contents = std::fs::read_to_string(&self.path).map_err(|e| {
            CatalogError::DataUnavailable(format!("{}: {e}", self.path.display()))
        })?;

        let entries = parse_catalog(&contents)?;
        tracing::debug!(count = entries.len(), "catalog file parsed");
        Ok(entries)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Parses catalog text into entries.
///
/// # Errors
///
/// Returns [`CatalogError::DataUnavailable`] if the text is not JSON or its top
/// level is not an array.
///
/// # Examples
///
/// ```
/// use reproinventory::storage::parse_catalog;
///
/// let entries = parse_catalog(r#"[{"id": "1"}, 42]"#)?;
/// assert_eq!(entries[0].id, "1");
/// assert_eq!(entries[1].id, "#1");
///
/// assert!(parse_catalog(r#"{"id": "1"}"#).is_err());
/// # Ok::<(), reproinventory::CatalogError>(())
/// ```
pub fn parse_catalog(contents: &str) -> Result<Vec<Entry>> {
    let value: Value = serde_json::from_str(contents)
        .map_err(|e| CatalogError::DataUnavailable(format!("failed to parse JSON: {e}")))?;

    let Value::Array(items) = value else {
        return Err(CatalogError::DataUnavailable(
            "catalog is not a JSON array".to_string(),
        ));
    };

    let mut taken: HashSet<String> = items.iter().filter_map(Entry::json_id).collect();

    Ok(items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let mut entry = Entry::from_json(index, item);
            if Entry::json_id(item).is_none() {
                entry.id = unused_id(&entry.id, &mut taken);
            }
            entry
        })
        .collect())
}

/// `base`, or `base-1`, `base-2`, ... when a real id already uses it.
fn unused_id(base: &str, taken: &mut HashSet<String>) -> String {
    let mut candidate = base.to_string();
    let mut suffix = 0;
    while taken.contains(&candidate) {
        suffix += 1;
        candidate = format!("{base}-{suffix}");
    }
    tracing::trace!(id = %candidate, "assigned synthetic id");
    taken.insert(candidate.clone());
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_reads_catalog_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": "a", "course_name": "Intro"}}, {{"id": "b", "level": ["Advanced"]}}]"#
        )
        .unwrap();

        let source = JsonFileSource::new(file.path());
        let entries = source.read().unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title.as_deref(), Some("Intro"));
        assert_eq!(entries[1].level, Some(vec!["Advanced".to_string()]));
    }

    #[test]
    fn test_missing_file_is_data_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonFileSource::new(dir.path().join("missing.json"));

        let err = source.read().unwrap_err();
        assert!(matches!(err, CatalogError::DataUnavailable(_)));
    }

    #[test]
    fn test_invalid_json_is_data_unavailable() {
        let err = parse_catalog("[{").unwrap_err();
        assert!(matches!(err, CatalogError::DataUnavailable(msg) if msg.contains("parse")));
    }

    #[test]
    fn test_non_array_is_data_unavailable() {
        for text in [r#"{"entries": []}"#, "null", "\"x\""] {
            assert!(parse_catalog(text).is_err(), "{text} should be rejected");
        }
    }

    #[test]
    fn test_synthetic_ids_skip_real_ones() {
        let entries = parse_catalog(
            r##"[{"id": "#1"}, {"course_name": "no id"}, {"id": "#1-1"}, {"course_name": "x"}]"##,
        )
        .unwrap();
        let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();

        assert_eq!(ids, ["#1", "#1-2", "#1-1", "#3"]);
    }

    #[test]
    fn test_empty_array_is_empty_catalog() {
        assert!(parse_catalog("[]").unwrap().is_empty());
    }
}
