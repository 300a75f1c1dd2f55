//! Composable UI component renderers.
//!
//! Each component prints one part of the screen at a given row and returns
//! the next free row.
//!
//! # Components
//!
//! - [`header`]: Title with counts and the active filter summary
//! - [`footer`]: Keybinding hints
//! - [`search`]: Search input box
//! - [`table`]: Result table (TITLE, LEVEL, LENGTH, assessment marker)
//! - [`facets`]: Facet list and option check boxes
//! - [`detail`]: Every field of one entry
//! - [`empty`]: Centred message for loading, failure and no results
//!
//! # Layouts
//!
//! One function per [`Layout`](crate::ui::viewmodel::Layout) variant:
//!
//! - [`render_status_mode`]: Message only
//! - [`render_normal_mode`]: Header + Table + Footer
//! - [`render_search_mode`]: Header + `SearchBar` + Table + Footer
//! - [`render_filters_mode`]: Header + Facets + Footer
//! - [`render_detail_mode`]: Header + Detail + Footer

mod detail;
mod empty;
mod facets;
mod footer;
mod header;
mod search;
mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DetailCard, FacetsPanel, SearchBarInfo, UIViewModel};

use detail::render_detail_card;
use empty::render_empty_state;
use facets::render_facets_panel;
use footer::render_footer;
use header::render_header;
use search::render_search_bar;
use table::{render_table_headers, render_table_rows};

/// Renders a horizontal border line. Returns the next free row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Header and its border, starting on row 2.
fn render_top(vm: &UIViewModel, theme: &Theme, cols: usize) -> usize {
    let current_row = render_header(2, &vm.header, theme, cols);
    render_border(current_row, &theme.colors.border, cols)
}

/// Bottom border and footer on the last two rows.
fn render_bottom(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_start, &vm.footer, theme, cols);
}

/// Either the table or, when nothing matches, the empty state message.
fn render_results(row: usize, vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    if let Some(empty) = &vm.empty_state {
        let body_rows = rows.saturating_sub(row + 2);
        render_empty_state(row + body_rows / 2, empty, theme, cols, false);
        return;
    }

    let current_row = render_table_headers(row, theme, cols);
    render_table_rows(current_row, &vm.display_items, theme, cols);
}

/// Renders the loading or unavailable screen.
///
/// Only the header, message and footer are drawn. `is_error` selects the
/// error color for the message.
pub fn render_status_mode(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize, is_error: bool) {
    let current_row = render_top(vm, theme, cols);
    if let Some(status) = &vm.empty_state {
        let body_rows = rows.saturating_sub(current_row + 2);
        render_empty_state(current_row + body_rows / 2, status, theme, cols, is_error);
    }
    render_bottom(vm, theme, cols, rows);
}

/// Renders the normal mode layout.
///
/// ```text
/// [blank line]
/// [Header]
/// [Filter summary, when filters are active]
/// [Border]
/// [Table Headers]
/// [Table Rows]
/// [Border]
/// [Footer]
/// ```
pub fn render_normal_mode(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let current_row = render_top(vm, theme, cols);
    render_results(current_row, vm, theme, cols, rows);
    render_bottom(vm, theme, cols, rows);
}

/// Renders the search mode layout: normal mode with the 3-line search bar
/// between the top border and the table.
pub fn render_search_mode(
    vm: &UIViewModel,
    search: &SearchBarInfo,
    theme: &Theme,
    cols: usize,
    rows: usize,
) {
    let mut current_row = render_top(vm, theme, cols);
    current_row = render_search_bar(current_row, search, theme, cols);
    render_results(current_row, vm, theme, cols, rows);
    render_bottom(vm, theme, cols, rows);
}

/// Renders the filter panel layout.
pub fn render_filters_mode(
    vm: &UIViewModel,
    panel: &FacetsPanel,
    theme: &Theme,
    cols: usize,
    rows: usize,
) {
    let current_row = render_top(vm, theme, cols);
    let max_rows = rows.saturating_sub(current_row + 2);
    render_facets_panel(current_row, panel, theme, cols, max_rows);
    render_bottom(vm, theme, cols, rows);
}

/// Renders the detail card layout.
pub fn render_detail_mode(
    vm: &UIViewModel,
    card: &DetailCard,
    theme: &Theme,
    cols: usize,
    rows: usize,
) {
    let current_row = render_top(vm, theme, cols);
    let max_rows = rows.saturating_sub(current_row + 2);
    render_detail_card(current_row, card, theme, cols, max_rows);
    render_bottom(vm, theme, cols, rows);
}
