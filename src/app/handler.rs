//! Event handling and state transitions.
//!
//! [`handle_event`] is the single entry point through which user input, host
//! notifications and worker responses change [`AppState`]. It returns whether
//! the pane needs a re-render together with the [`Action`]s the runtime must
//! execute.
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `ShowDetail`, `CloseFocus`
//! - **Search**: `SearchMode`, `FocusSearchBar`, `FocusResults`, `ExitSearch`, `Char`, `Backspace`
//! - **Filters**: `OpenFilters`, `FacetNext`, `FacetPrev`, `ToggleOption`, `ClearFacet`,
//!   `ToggleAssessmentOnly`, `ClearAll`
//! - **System**: `PermissionsResult`, `WorkerResponse`
//!
//! # Example
//!
//! ```rust
//! use reproinventory::app::{handle_event, AppState, Event};
//! use reproinventory::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default(), "/host/catalog.json".to_string());
//! let (render, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true })?;
//! assert!(!render);
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), reproinventory::CatalogError>(())
//! ```

use crate::app::modes::{InputMode, SearchFocus};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Events triggered by user input, the host, or the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the selection (or the option cursor in the filter panel) down.
    KeyDown,
    /// Moves the selection (or the option cursor in the filter panel) up.
    KeyUp,
    /// Hides the plugin pane.
    CloseFocus,
    /// Enters search mode with typing focus, keeping the current query.
    SearchMode,
    /// Returns from result navigation to typing.
    FocusSearchBar,
    /// Moves focus from the query to the results; leaves search if the query is empty.
    FocusResults,
    /// Leaves search mode, clearing the query.
    ExitSearch,
    /// Appends a character to the query.
    Char(char),
    /// Removes the last character of the query.
    Backspace,
    /// Returns to normal mode; in normal mode clears the query.
    Escape,

    /// Opens the facet panel.
    OpenFilters,
    /// Moves the panel cursor to the next facet.
    FacetNext,
    /// Moves the panel cursor to the previous facet.
    FacetPrev,
    /// Toggles the option under the panel cursor.
    ToggleOption,
    /// Clears the facet under the panel cursor.
    ClearFacet,
    /// Flips the assessment-only predicate.
    ToggleAssessmentOnly,
    /// Resets every predicate.
    ClearAll,

    /// Opens the detail card of the selected entry.
    ShowDetail,
    /// Opens the selected entry's URL.
    OpenUrl,

    /// Outcome of the host permission prompt.
    PermissionsResult {
        granted: bool,
    },

    /// A decoded response from the catalog worker.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates state, and returns `(should_render, actions)`.
///
/// # Errors
///
/// Currently infallible; the `Result` leaves room for handlers that validate
/// worker payloads.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::KeyDown => {
            if state.input_mode == InputMode::Filter {
                state.move_option_down();
            } else {
                state.move_selection_down();
            }
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            if state.input_mode == InputMode::Filter {
                state.move_option_up();
            } else {
                state.move_selection_up();
            }
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::SearchMode => {
            if !state.is_ready() {
                return Ok((false, vec![]));
            }
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusSearchBar => {
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            if state.filter.search_text().is_empty() {
                state.input_mode = InputMode::Normal;
            } else {
                state.input_mode = InputMode::Search(SearchFocus::Navigating);
            }
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            tracing::debug!(query = %state.filter.search_text(), "exiting search mode");
            state.input_mode = InputMode::Normal;
            state.filter.set_search_text("");
            state.apply_filter();
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if !state.input_mode.is_typing() {
                return Ok((false, vec![]));
            }
            state.filter.push_search_char(*c);
            tracing::trace!(query = %state.filter.search_text(), char = %c, "search query updated");
            state.apply_filter();
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if !state.input_mode.is_typing() {
                return Ok((false, vec![]));
            }
            state.filter.pop_search_char();
            state.apply_filter();
            Ok((true, vec![]))
        }
        Event::Escape => {
            match state.input_mode {
                InputMode::Filter | InputMode::Detail => {
                    state.input_mode = InputMode::Normal;
                }
                InputMode::Normal | InputMode::Search(_) => {
                    state.input_mode = InputMode::Normal;
                    if state.filter.search_text().is_empty() {
                        return Ok((false, vec![]));
                    }
                    state.filter.set_search_text("");
                    state.apply_filter();
                }
            }
            Ok((true, vec![]))
        }
        Event::OpenFilters => {
            if !state.is_ready() {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Filter;
            Ok((true, vec![]))
        }
        Event::FacetNext => {
            state.next_facet();
            Ok((true, vec![]))
        }
        Event::FacetPrev => {
            state.prev_facet();
            Ok((true, vec![]))
        }
        Event::ToggleOption => {
            state.toggle_current_option();
            Ok((true, vec![]))
        }
        Event::ClearFacet => {
            let facet = state.current_facet();
            if !state.filter.is_facet_active(facet) {
                return Ok((false, vec![]));
            }
            tracing::debug!(facet = facet.key(), "clearing facet");
            state.filter.clear_facet(facet);
            state.apply_filter();
            Ok((true, vec![]))
        }
        Event::ToggleAssessmentOnly => {
            state.filter.toggle_assessment_only();
            tracing::debug!(on = state.filter.assessment_only(), "assessment-only toggled");
            state.apply_filter();
            Ok((true, vec![]))
        }
        Event::ClearAll => {
            if state.filter.is_default() {
                return Ok((false, vec![]));
            }
            tracing::debug!(active = state.filter.active_count(), "clearing all filters");
            state.filter.clear_all();
            state.apply_filter();
            Ok((true, vec![]))
        }
        Event::ShowDetail => {
            if state.selected_entry().is_none() {
                tracing::debug!("no entry selected");
                if state.input_mode.is_search() {
                    state.input_mode = InputMode::Normal;
                    return Ok((true, vec![]));
                }
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Detail;
            Ok((true, vec![]))
        }
        Event::OpenUrl => {
            let Some(entry) = state.selected_entry() else {
                return Ok((false, vec![]));
            };
            match entry.url.as_deref().map(str::trim).filter(|url| !url.is_empty()) {
                Some(url) => {
                    tracing::debug!(entry_id = %entry.id, url = %url, "opening url");
                    Ok((false, vec![Action::OpenUrl { url: url.to_string() }]))
                }
                None => {
                    tracing::debug!(entry_id = %entry.id, "entry has no url");
                    Ok((false, vec![]))
                }
            }
        }
        Event::PermissionsResult { granted } => {
            if !granted {
                tracing::warn!("permissions denied, catalog cannot be read");
                let changed = state.catalog_failed("permission to read the catalog was denied".to_string());
                return Ok((changed, vec![]));
            }
            if state.load_requested {
                return Ok((false, vec![]));
            }
            state.load_requested = true;
            tracing::debug!(path = %state.data_path, "requesting catalog load");
            Ok((
                false,
                vec![Action::PostToWorker(WorkerMessage::load_catalog(
                    state.data_path.clone(),
                    state.trace_level.clone(),
                ))],
            ))
        }
        Event::WorkerResponse(response) => match response {
            WorkerResponse::CatalogLoaded { entries } => {
                Ok((state.catalog_loaded(entries.clone()), vec![]))
            }
            WorkerResponse::LoadFailed { message } => {
                Ok((state.catalog_failed(message.clone()), vec![]))
            }
            WorkerResponse::Error { message } => {
                tracing::error!(message = %message, "worker error");
                Ok((state.catalog_failed(message.clone()), vec![]))
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::modes::CatalogStatus;
    use crate::domain::{Entry, Facet, SetFacet};
    use crate::ui::Theme;

    fn entry(id: &str, title: &str, level: &str) -> Entry {
        let mut entry = Entry::new(id);
        entry.title = Some(title.to_string());
        entry.level = Some(vec![level.to_string()]);
        entry
    }

    fn ready() -> AppState {
        let mut state = AppState::new(Theme::default(), "/host/catalog.json".to_string());
        let entries = vec![
            entry("1", "Image Processing with Python", "Beginner"),
            entry("2", "Statistics in R", "Advanced"),
        ];
        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::CatalogLoaded { entries }),
        )
        .unwrap();
        state
    }

    fn send(state: &mut AppState, events: &[Event]) {
        for event in events {
            handle_event(state, event).unwrap();
        }
    }

    #[test]
    fn test_permission_grant_requests_load_once() {
        let mut state = AppState::new(Theme::default(), "/host/c.json".to_string());
        state.trace_level = Some("debug".to_string());
        let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
        assert_eq!(
            actions,
            vec![Action::PostToWorker(WorkerMessage::LoadCatalog {
                path: "/host/c.json".to_string(),
                trace_level: Some("debug".to_string()),
                trace_context: None,
            })]
        );

        let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn test_permission_denied_fails_catalog() {
        let mut state = AppState::new(Theme::default(), "/host/c.json".to_string());
        let (render, _) = handle_event(&mut state, &Event::PermissionsResult { granted: false }).unwrap();
        assert!(render);
        assert!(matches!(state.catalog, CatalogStatus::Failed(_)));
    }

    #[test]
    fn test_load_failure_is_terminal() {
        let mut state = AppState::new(Theme::default(), "/host/c.json".to_string());
        send(
            &mut state,
            &[
                Event::WorkerResponse(WorkerResponse::LoadFailed {
                    message: "Catalog data unavailable: missing".to_string(),
                }),
                Event::WorkerResponse(WorkerResponse::CatalogLoaded {
                    entries: vec![Entry::new("1")],
                }),
            ],
        );
        assert!(state.entries.is_empty());
        assert!(matches!(state.catalog, CatalogStatus::Failed(ref m) if m.contains("missing")));
    }

    #[test]
    fn test_live_search_narrows_and_exit_restores() {
        let mut state = ready();
        send(
            &mut state,
            &[Event::SearchMode, Event::Char('p'), Event::Char('y'), Event::Char('t')],
        );
        assert_eq!(state.visible, vec![0]);

        send(&mut state, &[Event::Backspace, Event::Backspace, Event::Backspace]);
        assert_eq!(state.visible, vec![0, 1]);

        send(&mut state, &[Event::Char('r'), Event::ExitSearch]);
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.filter.search_text(), "");
        assert_eq!(state.visible, vec![0, 1]);
    }

    #[test]
    fn test_chars_ignored_outside_typing() {
        let mut state = ready();
        let (render, _) = handle_event(&mut state, &Event::Char('x')).unwrap();
        assert!(!render);
        assert_eq!(state.filter.search_text(), "");
    }

    #[test]
    fn test_focus_results_with_empty_query_leaves_search() {
        let mut state = ready();
        send(&mut state, &[Event::SearchMode, Event::FocusResults]);
        assert_eq!(state.input_mode, InputMode::Normal);

        send(&mut state, &[Event::SearchMode, Event::Char('r'), Event::FocusResults]);
        assert_eq!(state.input_mode, InputMode::Search(SearchFocus::Navigating));
    }

    #[test]
    fn test_filter_panel_toggles_and_clears() {
        let mut state = ready();
        send(&mut state, &[Event::OpenFilters, Event::KeyDown, Event::KeyDown, Event::ToggleOption]);
        assert_eq!(state.current_option(), Some("Advanced"));
        assert_eq!(state.visible, vec![1]);

        send(&mut state, &[Event::ClearFacet]);
        assert!(!state.filter.is_facet_active(Facet::Set(SetFacet::Level)));
        assert_eq!(state.visible, vec![0, 1]);

        send(&mut state, &[Event::Escape]);
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_assessment_only_and_clear_all() {
        let mut state = ready();
        send(&mut state, &[Event::ToggleAssessmentOnly]);
        assert!(state.visible.is_empty());

        let (render, _) = handle_event(&mut state, &Event::ClearAll).unwrap();
        assert!(render);
        assert!(state.filter.is_default());
        assert_eq!(state.visible, vec![0, 1]);

        let (render, _) = handle_event(&mut state, &Event::ClearAll).unwrap();
        assert!(!render);
    }

    #[test]
    fn test_open_url_requires_url() {
        let mut state = ready();
        let (_, actions) = handle_event(&mut state, &Event::OpenUrl).unwrap();
        assert!(actions.is_empty());

        state.entries[0].url = Some(" https://example.org ".to_string());
        let (_, actions) = handle_event(&mut state, &Event::OpenUrl).unwrap();
        assert_eq!(
            actions,
            vec![Action::OpenUrl {
                url: "https://example.org".to_string()
            }]
        );
    }

    #[test]
    fn test_detail_round_trip() {
        let mut state = ready();
        send(&mut state, &[Event::KeyDown, Event::ShowDetail]);
        assert_eq!(state.input_mode, InputMode::Detail);
        assert_eq!(state.selected_entry().map(|e| e.id.as_str()), Some("2"));

        send(&mut state, &[Event::Escape]);
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_modes_wait_for_catalog() {
        let mut state = AppState::new(Theme::default(), "/host/c.json".to_string());
        send(&mut state, &[Event::SearchMode, Event::OpenFilters]);
        assert_eq!(state.input_mode, InputMode::Normal);
    }
}
