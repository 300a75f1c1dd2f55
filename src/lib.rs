//! ReproInventory: a Zellij plugin for browsing a catalog of reproducible
//! neuroimaging training resources.
//!
//! The catalog is a JSON array of entries (courses, tutorials, datasets)
//! tagged along eleven facets. The plugin narrows it with a free-text search,
//! per-facet selections and an "assessment only" switch, and shows the
//! matches as a table with a detail card per entry.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← host calls
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling, actions, view model              │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI (ui/)      │   │ Filter        │   │ Worker        │
//! │ - Components  │   │ (filter/)     │   │ (worker/)     │
//! │ - Theming     │   │ - FilterState │   │ - Catalog load│
//! └───────────────┘   │ - apply       │   └───────────────┘
//!                     └───────────────┘           │
//!                                         ┌───────────────┐
//!                                         │ Storage       │
//!                                         │ (storage/)    │
//!                                         └───────────────┘
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (Entry, Facet, errors) · Infrastructure     │
//! │  Observability (OTLP file export)                   │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/reproinventory.wasm" {
//!         data_path "~/.local/share/zellij/reproinventory/reproinventory_data.json"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!         open_command "xdg-open"
//!     }
//! }
//! ```
//!
//! # Flow
//!
//! 1. `load` parses [`Config`], installs tracing and builds the [`AppState`].
//! 2. Once file access is granted the plugin posts `LoadCatalog` to the
//!    catalog worker, which reads the file through [`storage::EntryStore`].
//! 3. The worker's `CatalogLoaded` (or `LoadFailed`) response moves the
//!    catalog to ready (or unavailable).
//! 4. Every key press becomes an [`Event`]; [`handle_event`] updates the
//!    state, re-runs [`filter::apply`] and returns [`Action`]s for the shim.
//!
//! # Example
//!
//! ```rust
//! use reproinventory::{handle_event, initialize, Config, Entry, Event};
//!
//! let mut state = initialize(&Config::default());
//! let mut entry = Entry::new("1");
//! entry.title = Some("Intro to fMRI".to_string());
//! state.catalog_loaded(vec![entry]);
//!
//! for event in [Event::SearchMode, Event::Char('f'), Event::Char('m')] {
//!     let (_should_render, _actions) = handle_event(&mut state, &event)?;
//! }
//! assert_eq!(state.visible.len(), 1);
//! # Ok::<(), reproinventory::CatalogError>(())
//! ```

pub mod app;
pub mod domain;
pub mod filter;
pub mod infrastructure;
pub mod observability;
pub mod storage;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event, InputMode, SearchFocus};
pub use domain::{CatalogError, Entry, Facet, Result, ScalarFacet, SetFacet};
pub use filter::{apply, matches, matching_indices, FilterState};
pub use ui::Theme;

use std::collections::BTreeMap;

/// Command used to open entry URLs when none is configured.
pub const DEFAULT_OPEN_COMMAND: &str = "xdg-open";

/// Plugin configuration from the Zellij plugin block.
///
/// ```kdl
/// plugin location="file:/path/to/reproinventory.wasm" {
///     data_path "~/catalogs/reproinventory_data.json"
///     theme "catppuccin-latte"
///     theme_file "/path/to/theme.toml"
///     trace_level "debug"
///     open_command "open"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Catalog file, already tilde-expanded.
    pub data_path: String,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive, `"info"` when unset.
    pub trace_level: Option<String>,

    /// Program that receives the entry URL as its only argument.
    pub open_command: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: infrastructure::default_catalog_path()
                .to_string_lossy()
                .into_owned(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
            open_command: DEFAULT_OPEN_COMMAND.to_string(),
        }
    }
}

impl Config {
    /// Reads the Zellij configuration map. Never fails: missing or blank
    /// values fall back to the defaults.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use reproinventory::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("data_path".to_string(), "~/catalog.json".to_string());
    /// map.insert("open_command".to_string(), " ".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.data_path, "/host/catalog.json");
    /// assert_eq!(config.open_command, "xdg-open");
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let value = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };
        let defaults = Self::default();

        Self {
            data_path: value("data_path").map_or(defaults.data_path, |p| {
                infrastructure::expand_tilde(&p)
            }),
            theme_name: value("theme"),
            theme_file: value("theme_file").map(|p| infrastructure::expand_tilde(&p)),
            trace_level: value("trace_level"),
            open_command: value("open_command").unwrap_or(defaults.open_command),
        }
    }

    /// Resolves the theme: `theme_file`, then `theme`, then the default.
    /// Failures are logged and fall through to the default.
    #[must_use]
    pub fn theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            match Theme::from_file(theme_file) {
                Ok(theme) => return theme,
                Err(e) => {
                    tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                }
            }
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Builds the initial state: themed, catalog still loading.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(data_path = %config.data_path, "initializing reproinventory plugin");

    let mut state = AppState::new(config.theme(), config.data_path.clone());
    state.trace_level.clone_from(&config.trace_level);
    state
}
