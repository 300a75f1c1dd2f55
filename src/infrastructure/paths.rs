//! Path helpers for the plugin sandbox.

use std::path::PathBuf;

/// File name of the bundled catalog inside the data directory.
pub const CATALOG_FILE_NAME: &str = "reproinventory_data.json";

/// Where the plugin keeps its catalog and trace files.
///
/// `/host` maps to the directory Zellij was started from (normally the home
/// directory), so this is usually `~/.local/share/zellij/reproinventory`.
///
/// ```
/// use reproinventory::infrastructure::get_data_dir;
///
/// assert_eq!(
///     get_data_dir().to_str(),
///     Some("/host/.local/share/zellij/reproinventory")
/// );
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("reproinventory")
}

/// Catalog location used when no `data_path` option is configured.
#[must_use]
pub fn default_catalog_path() -> PathBuf {
    get_data_dir().join(CATALOG_FILE_NAME)
}

/// Rewrites a leading `~` to the sandbox's `/host` mount.
///
/// ```
/// use reproinventory::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/catalog.json"), "/host/catalog.json");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/data/catalog.json"), "/data/catalog.json");
/// assert_eq!(expand_tilde("~alice/catalog.json"), "~alice/catalog.json");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => "/host".to_string(),
        Some(rest) if rest.starts_with('/') => format!("/host{rest}"),
        _ => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_path() {
        assert_eq!(
            default_catalog_path(),
            PathBuf::from("/host/.local/share/zellij/reproinventory/reproinventory_data.json")
        );
    }
}
