//! Application state and view model computation.
//!
//! [`AppState`] is the single source of truth for the plugin's transient UI
//! state: the loaded catalog, the current [`FilterState`], the visible subset,
//! cursors and the input mode. It is mutated by the event handler and turned
//! into a [`UIViewModel`] on every render.
//!
//! # State Components
//!
//! - **Entries**: The catalog, set once when the worker answers
//! - **Visible**: Indices of entries passing the filter, recomputed on every change
//! - **Selection**: Cursor within the visible subset
//! - **Facet cursor**: Current facet and option in the filter panel
//!
//! # Example
//!
//! ```rust
//! use reproinventory::app::AppState;
//! use reproinventory::domain::Entry;
//! use reproinventory::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default(), "/host/catalog.json".to_string());
//! state.catalog_loaded(vec![Entry::new("1"), Entry::new("2")]);
//! assert_eq!(state.visible.len(), 2);
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert_eq!(viewmodel.display_items.len(), 2);
//! ```

use super::modes::{CatalogStatus, InputMode, SearchFocus};
use crate::domain::{Entry, Facet, ScalarFacet, SetFacet};
use crate::filter::{matching_indices, FilterState};
use crate::ui::helpers::{
    join_tags, substring_ranges, truncate, LENGTH_COLUMN_WIDTH, LEVEL_COLUMN_WIDTH,
    MARK_COLUMN_WIDTH,
};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DetailCard, DisplayItem, EmptyState, FacetRow, FacetsPanel, FooterInfo, HeaderInfo, Layout,
    OptionRow, SearchBarInfo, UIViewModel,
};

/// Shown in the header before the counts.
const APP_TITLE: &str = "ReproInventory";

/// Minimum width of the title column.
const MIN_TITLE_WIDTH: usize = 12;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The catalog in file order. Empty until the worker answers.
    pub entries: Vec<Entry>,

    pub catalog: CatalogStatus,

    /// Current query. Every change must be followed by [`apply_filter`](Self::apply_filter).
    pub filter: FilterState,

    /// Indices into `entries` passing `filter`, ascending.
    pub visible: Vec<usize>,

    /// Zero-based index of the selected row within `visible`.
    pub selected_index: usize,

    pub input_mode: InputMode,

    /// Index into [`Facet::ALL`] of the facet under the panel cursor.
    pub facet_index: usize,

    /// Index into the current facet's options of the option under the cursor.
    pub option_index: usize,

    pub theme: Theme,

    /// Sandbox path of the catalog file.
    pub data_path: String,

    /// Set once the load request has been posted to the worker.
    pub load_requested: bool,

    /// Tracing directive forwarded to the worker with the load request.
    pub trace_level: Option<String>,
}

impl AppState {
    #[must_use]
    pub fn new(theme: Theme, data_path: String) -> Self {
        Self {
            entries: Vec::new(),
            catalog: CatalogStatus::Loading,
            filter: FilterState::default(),
            visible: Vec::new(),
            selected_index: 0,
            input_mode: InputMode::Normal,
            facet_index: 0,
            option_index: 0,
            theme,
            data_path,
            load_requested: false,
            trace_level: None,
        }
    }

    /// Installs the loaded catalog.
    ///
    /// Only the first answer counts: returns `false` and leaves the state alone
    /// once the catalog is ready or has failed.
    pub fn catalog_loaded(&mut self, entries: Vec<Entry>) -> bool {
        if self.catalog != CatalogStatus::Loading {
            tracing::debug!(count = entries.len(), "ignoring catalog after first load");
            return false;
        }

        tracing::debug!(count = entries.len(), "catalog ready");
        self.entries = entries;
        self.catalog = CatalogStatus::Ready;
        self.apply_filter();
        true
    }

    /// Records a terminal load failure. Ignored unless still loading.
    pub fn catalog_failed(&mut self, reason: String) -> bool {
        if self.catalog != CatalogStatus::Loading {
            return false;
        }

        tracing::warn!(reason = %reason, "catalog unavailable");
        self.catalog = CatalogStatus::Failed(reason);
        true
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.catalog == CatalogStatus::Ready
    }

    /// Recomputes the visible subset and clamps the selection into it.
    pub fn apply_filter(&mut self) {
        self.visible = matching_indices(&self.entries, &self.filter);

        if self.visible.is_empty() {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(self.visible.len() - 1);
        }

        tracing::debug!(
            visible = self.visible.len(),
            total = self.entries.len(),
            active_filters = self.filter.active_count(),
            "filter applied"
        );
    }

    /// Moves the selection down, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.visible.len();
    }

    /// Moves the selection up, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.visible.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    #[must_use]
    pub fn selected_entry(&self) -> Option<&Entry> {
        self.visible
            .get(self.selected_index)
            .and_then(|&i| self.entries.get(i))
    }

    #[must_use]
    pub fn current_facet(&self) -> Facet {
        Facet::ALL[self.facet_index % Facet::ALL.len()]
    }

    /// The option under the panel cursor.
    #[must_use]
    pub fn current_option(&self) -> Option<&'static str> {
        self.current_facet().options().get(self.option_index).copied()
    }

    pub fn next_facet(&mut self) {
        self.facet_index = (self.facet_index + 1) % Facet::ALL.len();
        self.option_index = 0;
    }

    pub fn prev_facet(&mut self) {
        self.facet_index = (self.facet_index + Facet::ALL.len() - 1) % Facet::ALL.len();
        self.option_index = 0;
    }

    pub fn move_option_down(&mut self) {
        let count = self.current_facet().options().len();
        if count > 0 {
            self.option_index = (self.option_index + 1) % count;
        }
    }

    pub fn move_option_up(&mut self) {
        let count = self.current_facet().options().len();
        if count > 0 {
            self.option_index = (self.option_index + count - 1) % count;
        }
    }

    /// Toggles the option under the panel cursor and refilters.
    pub fn toggle_current_option(&mut self) {
        let facet = self.current_facet();
        if let Some(option) = self.current_option() {
            tracing::debug!(facet = facet.key(), option, "toggling option");
            self.filter.toggle_option(facet, option);
            self.apply_filter();
        }
    }

    /// One-line description of every active predicate, `None` if there are none.
    #[must_use]
    pub fn active_filter_summary(&self) -> Option<String> {
        let mut parts = Vec::new();

        if !self.filter.search_text().is_empty() {
            parts.push(format!("search: \"{}\"", self.filter.search_text()));
        }
        for facet in Facet::ALL {
            match facet {
                Facet::Set(set) => {
                    if let Some(values) = self.filter.selected(set) {
                        let joined: Vec<&str> = values.iter().map(String::as_str).collect();
                        parts.push(format!("{}: {}", set.label(), joined.join(", ")));
                    }
                }
                Facet::Scalar(scalar) => {
                    if let Some(value) = self.filter.scalar(scalar) {
                        parts.push(format!("{}: {value}", scalar.label()));
                    }
                }
            }
        }
        if self.filter.assessment_only() {
            parts.push("assessment only".to_string());
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" | "))
        }
    }

    /// Computes the view model for a `rows` x `cols` pane.
    ///
    /// # Windowing
    ///
    /// The table shows at most as many rows as fit between the chrome lines,
    /// centred on the selection and pinned to the end of the list when the
    /// selection is near it.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let header = self.compute_header();
        let footer = self.compute_footer();

        let mut vm = UIViewModel {
            layout: Layout::Normal,
            display_items: vec![],
            selected_index: 0,
            header,
            footer,
            empty_state: None,
            search_bar: None,
            facets_panel: None,
            detail: None,
        };

        match &self.catalog {
            CatalogStatus::Loading => {
                vm.layout = Layout::Status;
                vm.empty_state = Some(EmptyState {
                    message: "Loading catalog...".to_string(),
                    subtitle: self.data_path.clone(),
                });
                return vm;
            }
            CatalogStatus::Failed(reason) => {
                vm.layout = Layout::Status;
                vm.empty_state = Some(EmptyState {
                    message: "Catalog unavailable".to_string(),
                    subtitle: reason.clone(),
                });
                return vm;
            }
            CatalogStatus::Ready => {}
        }

        match self.input_mode {
            InputMode::Filter => {
                vm.layout = Layout::Filters;
                vm.facets_panel = Some(self.compute_facets_panel());
                return vm;
            }
            InputMode::Detail => {
                if let Some(entry) = self.selected_entry() {
                    vm.layout = Layout::Detail;
                    vm.detail = Some(Self::compute_detail(entry));
                    return vm;
                }
            }
            InputMode::Search(focus) => {
                vm.layout = Layout::Search;
                vm.search_bar = Some(SearchBarInfo {
                    query: self.filter.search_text().to_string(),
                    is_typing: focus == SearchFocus::Typing,
                });
            }
            InputMode::Normal => {}
        }

        if self.visible.is_empty() {
            vm.empty_state = Some(self.compute_no_results());
            return vm;
        }

        let available_rows = self.calculate_available_rows(rows, vm.header.filters.is_some());

        let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(self.visible.len());

        let actual_count = visible_end - visible_start;
        if actual_count < available_rows && self.visible.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let title_width = title_column_width(cols);
        let needle = self.filter.search_text();

        vm.display_items = self.visible[visible_start..visible_end]
            .iter()
            .enumerate()
            .filter_map(|(relative_idx, &entry_idx)| {
                let entry = self.entries.get(entry_idx)?;
                let is_selected = visible_start + relative_idx == self.selected_index;
                Some(Self::compute_display_item(entry, is_selected, title_width, needle))
            })
            .collect();
        vm.selected_index = self.selected_index.saturating_sub(visible_start);

        vm
    }

    fn compute_display_item(
        entry: &Entry,
        is_selected: bool,
        title_width: usize,
        needle: &str,
    ) -> DisplayItem {
        let title = truncate(entry.display_title(), title_width);
        let highlight_ranges = substring_ranges(&title, needle);

        DisplayItem {
            level: truncate(
                &join_tags(entry.tags(SetFacet::Level).unwrap_or_default()),
                LEVEL_COLUMN_WIDTH - 1,
            ),
            length: truncate(
                entry.scalar(ScalarFacet::CourseLength).unwrap_or(""),
                LENGTH_COLUMN_WIDTH - 1,
            ),
            title,
            has_assessment: entry.has_assessment(),
            is_selected,
            highlight_ranges,
        }
    }

    fn compute_no_results(&self) -> EmptyState {
        if self.entries.is_empty() {
            return EmptyState {
                message: "The catalog is empty".to_string(),
                subtitle: self.data_path.clone(),
            };
        }

        let subtitle = if self.input_mode.is_typing() {
            "Edit the query or press Esc to clear it"
        } else {
            "Press c to clear all filters"
        };

        EmptyState {
            message: "No matching entries".to_string(),
            subtitle: subtitle.to_string(),
        }
    }

    fn compute_facets_panel(&self) -> FacetsPanel {
        let current = self.current_facet();

        let facets = Facet::ALL
            .into_iter()
            .map(|facet| FacetRow {
                label: facet.label().to_string(),
                selected_count: match facet {
                    Facet::Set(set) => self.filter.selected(set).map_or(0, |values| values.len()),
                    Facet::Scalar(scalar) => usize::from(self.filter.scalar(scalar).is_some()),
                },
                is_current: facet == current,
            })
            .collect();

        let options = current
            .options()
            .iter()
            .enumerate()
            .map(|(i, option)| OptionRow {
                label: (*option).to_string(),
                is_checked: self.filter.is_selected(current, option),
                is_cursor: i == self.option_index,
            })
            .collect();

        FacetsPanel {
            facets,
            options,
            assessment_only: self.filter.assessment_only(),
        }
    }

    fn compute_detail(entry: &Entry) -> DetailCard {
        let mut fields: Vec<(String, String)> = vec![("ID".to_string(), entry.id.clone())];
        if let Some(url) = &entry.url {
            fields.push(("URL".to_string(), url.clone()));
        }

        for facet in Facet::ALL {
            let value = match facet {
                Facet::Set(set) => entry.tags(set).map(join_tags),
                Facet::Scalar(scalar) => entry.scalar(scalar).map(str::to_string),
            };
            if let Some(value) = value {
                fields.push((facet.label().to_string(), value));
            }
        }

        let extras = [
            ("Keywords", entry.keywords.as_deref().map(join_tags)),
            ("Assessment", entry.assessment.clone()),
            ("Prerequisite", entry.prerequisite.clone()),
            ("Review", entry.review.clone()),
            ("Notes", entry.notes.clone()),
            ("Tag Team", entry.tag_team.as_deref().map(join_tags)),
            ("Source", entry.source.clone()),
            ("Last Updated", entry.last_updated.clone()),
        ];
        fields.extend(
            extras
                .into_iter()
                .filter_map(|(label, value)| value.map(|v| (label.to_string(), v))),
        );

        DetailCard {
            title: entry.display_title().to_string(),
            fields,
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = match self.catalog {
            CatalogStatus::Ready => format!(
                " {APP_TITLE} ({}/{}) ",
                self.visible.len(),
                self.entries.len()
            ),
            _ => format!(" {APP_TITLE} "),
        };

        HeaderInfo {
            title,
            filters: self.active_filter_summary(),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (&self.catalog, self.input_mode) {
            (CatalogStatus::Loading | CatalogStatus::Failed(_), _) => "q: quit",
            (_, InputMode::Search(SearchFocus::Typing)) => {
                "Esc: clear search  Enter: results  Ctrl+n/p: navigate  Type to filter"
            }
            (_, InputMode::Search(SearchFocus::Navigating)) => {
                "Esc: clear search  /: edit query  j/k: navigate  Enter: details  o: open"
            }
            (_, InputMode::Filter) => {
                "h/l: facet  j/k: option  Space: toggle  x: clear facet  a: assessment  c: clear all  Esc: back"
            }
            (_, InputMode::Detail) => "o: open url  Esc: back",
            (_, InputMode::Normal) => {
                "j/k: navigate  /: search  f: filters  a: assessment  c: clear  Enter: details  o: open  q: quit"
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    /// Rows left for the table after header, borders, column titles and footer.
    fn calculate_available_rows(&self, total_rows: usize, has_summary: bool) -> usize {
        let chrome = match self.input_mode {
            InputMode::Search(_) => 9,
            _ => 6,
        } + usize::from(has_summary);

        total_rows.saturating_sub(chrome).max(1)
    }
}

fn title_column_width(cols: usize) -> usize {
    cols.saturating_sub(LEVEL_COLUMN_WIDTH + LENGTH_COLUMN_WIDTH + MARK_COLUMN_WIDTH + 1)
        .max(MIN_TITLE_WIDTH)
}
