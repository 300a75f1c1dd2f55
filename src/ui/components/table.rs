//! Result table component renderer.
//!
//! Four columns: TITLE (flexible), LEVEL, LENGTH and an assessment marker.

use crate::ui::helpers::{
    self, char_len, pad, position_cursor, LENGTH_COLUMN_WIDTH, LEVEL_COLUMN_WIDTH,
    MARK_COLUMN_WIDTH,
};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

/// Width left for the title column on a `cols`-wide pane.
fn title_width(cols: usize) -> usize {
    cols.saturating_sub(LEVEL_COLUMN_WIDTH + LENGTH_COLUMN_WIDTH + MARK_COLUMN_WIDTH + 1)
}

/// Renders the column titles. Returns the next free row.
pub fn render_table_headers(row: usize, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!(" {}", pad("TITLE", title_width(cols)));
    print!("{}", pad("LEVEL", LEVEL_COLUMN_WIDTH));
    print!("{}", pad("LENGTH", LENGTH_COLUMN_WIDTH));
    print!("{}", pad("A", MARK_COLUMN_WIDTH));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders every row. Returns the next free row.
pub fn render_table_rows(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, theme, cols);
    }
    current_row
}

/// Renders one row, padded to the full width so the selection background spans it.
fn render_table_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    if item.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }

    print!(" ");
    helpers::render_highlighted_text(&item.title, &item.highlight_ranges, theme, item.is_selected);
    print!("{}", " ".repeat(title_width(cols).saturating_sub(char_len(&item.title))));

    print!("{}", pad(&item.level, LEVEL_COLUMN_WIDTH));
    print!("{}", pad(&item.length, LENGTH_COLUMN_WIDTH));

    if item.has_assessment {
        if !item.is_selected {
            print!("{}", Theme::fg(&theme.colors.facet_active_fg));
        }
        print!("{}", pad("✓", MARK_COLUMN_WIDTH));
    } else {
        print!("{}", " ".repeat(MARK_COLUMN_WIDTH));
    }

    let used = 1 + title_width(cols).max(char_len(&item.title))
        + LEVEL_COLUMN_WIDTH
        + LENGTH_COLUMN_WIDTH
        + MARK_COLUMN_WIDTH;
    print!("{}", " ".repeat(cols.saturating_sub(used)));

    print!("{}", Theme::reset());
    row + 1
}
