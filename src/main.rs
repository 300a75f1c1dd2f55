//! Zellij plugin wrapper and entry point.
//!
//! The only place that talks to the host. Zellij events become library
//! [`Event`]s, library [`Action`]s become host calls, and the catalog worker
//! runs [`CatalogWorker`] on a background thread.
//!
//! ```text
//! ┌─────────────────────────┐
//! │   Zellij Main Thread    │
//! │  ┌──────────────────┐   │
//! │  │  State (plugin)  │   │  ← UI state, event handling
//! │  └──────────────────┘   │
//! │          │ LoadCatalog  │
//! │          ▼              │
//! │  ┌──────────────────┐   │
//! │  │  CatalogWorker   │   │  ← reads and parses the catalog file
//! │  │ (worker thread)  │   │
//! │  └──────────────────┘   │
//! └─────────────────────────┘
//! ```
//!
//! # Lifecycle
//!
//! 1. **Load**: parse config, install tracing, build `AppState`, request
//!    `FullHdAccess` and `RunCommands`, subscribe to events
//! 2. **Permissions granted**: the library asks for `LoadCatalog`
//! 3. **Worker response**: `CatalogLoaded` or `LoadFailed` arrives as a
//!    `CustomMessage` named after the worker
//! 4. **Update / Render**: delegated to the library
//!
//! # Keybindings
//!
//! Global: `Ctrl+n` / `Ctrl+p` move the selection.
//!
//! Normal mode: `j`/`k` move, `/` search, `f` filters, `a` assessment only,
//! `c` clear all, `Enter` details, `o` open URL, `q` hide, `Esc` clear search.
//!
//! Search mode: typing edits the query, `Enter` focuses the results, `/`
//! returns to the query, `Esc` leaves search.
//!
//! Filter panel: `h`/`l`/`Tab` switch facet, `j`/`k` move, `Space`/`Enter`
//! toggle, `x` clear facet, `a`/`c` as in normal mode, `Esc`/`f` back.
//!
//! Detail card: `o` open URL, `Esc`/`Enter`/`q` back.

#![allow(clippy::multiple_crate_versions)]

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::shim::{post_message_to, post_message_to_plugin};

use reproinventory::worker::{CatalogWorker, WorkerMessage, WorkerResponse, CATALOG_WORKER};
use reproinventory::{handle_event, Action, Config, Event, InputMode, SearchFocus};

register_plugin!(State);
register_worker!(WorkerShim, catalog_worker, CATALOG_WORKER_INSTANCE);

/// Plugin state wrapper.
struct State {
    app: reproinventory::AppState,

    /// Program that receives entry URLs.
    open_command: String,
}

impl Default for State {
    fn default() -> Self {
        let config = Config::default();
        Self {
            app: reproinventory::initialize(&config),
            open_command: config.open_command,
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        reproinventory::observability::init_tracing(&config);

        let _guard = tracing::debug_span!("plugin_load").entered();

        tracing::debug!(data_path = %config.data_path, open_command = %config.open_command, "parsed configuration");
        self.app = reproinventory::initialize(&config);
        self.open_command.clone_from(&config.open_command);

        request_permission(&[PermissionType::FullHdAccess, PermissionType::RunCommands]);
        subscribe(&[
            EventType::Key,
            EventType::CustomMessage,
            EventType::PermissionRequestResult,
            EventType::RunCommandResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let _guard = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name)
            .entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match Self::map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                Event::PermissionsResult {
                    granted: matches!(status, PermissionStatus::Granted),
                }
            }
            zellij_tile::prelude::Event::RunCommandResult(exit_code, _stdout, stderr, _context) => {
                if exit_code != Some(0) {
                    tracing::warn!(
                        exit_code = ?exit_code,
                        stderr = %String::from_utf8_lossy(&stderr),
                        "open command failed"
                    );
                }
                return false;
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in &actions {
                    self.execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        reproinventory::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            zellij_tile::prelude::Event::RunCommandResult(..) => "RunCommandResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    /// Maps a key press to an application event according to the input mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, mode = ?self.app.input_mode, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                _ => None,
            };
        }

        match self.app.input_mode {
            InputMode::Normal => Self::map_normal_key(&key.bare_key),
            InputMode::Search(SearchFocus::Typing) => Self::map_typing_key(&key.bare_key),
            InputMode::Search(SearchFocus::Navigating) => Self::map_results_key(&key.bare_key),
            InputMode::Filter => Self::map_filter_key(&key.bare_key),
            InputMode::Detail => Self::map_detail_key(&key.bare_key),
        }
    }

    fn map_normal_key(key: &BareKey) -> Option<Event> {
        Some(match key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Char('/') => Event::SearchMode,
            BareKey::Char('f') => Event::OpenFilters,
            BareKey::Char('a') => Event::ToggleAssessmentOnly,
            BareKey::Char('c') => Event::ClearAll,
            BareKey::Enter => Event::ShowDetail,
            BareKey::Char('o') => Event::OpenUrl,
            BareKey::Char('q') => Event::CloseFocus,
            BareKey::Esc => Event::Escape,
            _ => return None,
        })
    }

    fn map_typing_key(key: &BareKey) -> Option<Event> {
        Some(match key {
            BareKey::Down => Event::KeyDown,
            BareKey::Up => Event::KeyUp,
            BareKey::Enter => Event::FocusResults,
            BareKey::Esc => Event::ExitSearch,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(*c),
            _ => return None,
        })
    }

    fn map_results_key(key: &BareKey) -> Option<Event> {
        Some(match key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Char('/') => Event::FocusSearchBar,
            BareKey::Enter => Event::ShowDetail,
            BareKey::Char('o') => Event::OpenUrl,
            BareKey::Esc => Event::ExitSearch,
            _ => return None,
        })
    }

    fn map_filter_key(key: &BareKey) -> Option<Event> {
        Some(match key {
            BareKey::Left | BareKey::Char('h') => Event::FacetPrev,
            BareKey::Right | BareKey::Tab | BareKey::Char('l') => Event::FacetNext,
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Char(' ') | BareKey::Enter => Event::ToggleOption,
            BareKey::Char('x') => Event::ClearFacet,
            BareKey::Char('a') => Event::ToggleAssessmentOnly,
            BareKey::Char('c') => Event::ClearAll,
            BareKey::Esc | BareKey::Char('f') => Event::Escape,
            _ => return None,
        })
    }

    fn map_detail_key(key: &BareKey) -> Option<Event> {
        Some(match key {
            BareKey::Char('o') => Event::OpenUrl,
            BareKey::Esc | BareKey::Enter | BareKey::Char('q') => Event::Escape,
            _ => return None,
        })
    }

    /// Decodes a worker response; messages from anyone else are ignored.
    fn map_custom_message_event(message: &str, payload: &str) -> Option<Event> {
        if message != CATALOG_WORKER {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }

        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => Some(Event::WorkerResponse(response)),
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    fn post_worker_message(message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(CATALOG_WORKER.to_string()),
                    name: CATALOG_WORKER.to_string(),
                    payload,
                });
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to serialize worker message");
            }
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::CloseFocus => hide_self(),
            Action::PostToWorker(message) => Self::post_worker_message(message),
            Action::OpenUrl { url } => {
                tracing::debug!(url = %url, command = %self.open_command, "opening url");
                run_command(&[self.open_command.as_str(), url.as_str()], BTreeMap::new());
            }
        }
    }
}

/// Host-facing wrapper running [`CatalogWorker`] on the worker thread.
///
/// Tracing is installed on the first message; the worker's wasm instance has
/// no subscriber of its own until then.
#[derive(Serialize, Deserialize)]
struct WorkerShim {
    #[serde(skip, default = "CatalogWorker::with_tracing")]
    inner: CatalogWorker,
}

impl Default for WorkerShim {
    fn default() -> Self {
        Self {
            inner: CatalogWorker::with_tracing(),
        }
    }
}

impl ZellijWorker<'_> for WorkerShim {
    fn on_message(&mut self, message: String, payload: String) {
        let _guard = tracing::debug_span!("worker_message", message_name = %message).entered();

        if message != CATALOG_WORKER {
            tracing::debug!(message_name = %message, "worker ignoring unknown message");
            return;
        }

        if let Some(response) = self.inner.handle_payload(&payload) {
            post_message_to_plugin(PluginMessage {
                name: CATALOG_WORKER.to_string(),
                payload: response,
                worker_name: None,
            });
        }
    }
}
