//! Top-level rendering coordinator.
//!
//! Computes the view model from [`AppState`] and hands it to the layout
//! function matching [`Layout`]. Output goes to stdout; the host clears the
//! pane between renders.

use crate::app::{AppState, CatalogStatus};
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Layout, UIViewModel};

/// Renders the plugin UI to stdout for a `rows` x `cols` pane.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);
    let is_error = matches!(state.catalog, CatalogStatus::Failed(_));

    render_viewmodel(&viewmodel, &state.theme, rows, cols, is_error);
}

fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize, is_error: bool) {
    match vm.layout {
        Layout::Status => components::render_status_mode(vm, theme, cols, rows, is_error),
        Layout::Normal => components::render_normal_mode(vm, theme, cols, rows),
        Layout::Search => match &vm.search_bar {
            Some(search) => components::render_search_mode(vm, search, theme, cols, rows),
            None => components::render_normal_mode(vm, theme, cols, rows),
        },
        Layout::Filters => match &vm.facets_panel {
            Some(panel) => components::render_filters_mode(vm, panel, theme, cols, rows),
            None => components::render_normal_mode(vm, theme, cols, rows),
        },
        Layout::Detail => match &vm.detail {
            Some(card) => components::render_detail_mode(vm, card, theme, cols, rows),
            None => components::render_normal_mode(vm, theme, cols, rows),
        },
    }
}
