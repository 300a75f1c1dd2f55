//! Filter panel component renderer.
//!
//! Facets are listed on the left with their selection counts; the options of
//! the facet under the cursor are listed on the right with check boxes.

use crate::ui::helpers::{char_len, pad, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FacetsPanel;

/// Width of the facet list column.
const FACET_COLUMN_WIDTH: usize = 28;

/// Renders the panel from `row`, using at most `max_rows` rows.
///
/// Returns the next free row.
pub fn render_facets_panel(
    row: usize,
    panel: &FacetsPanel,
    theme: &Theme,
    cols: usize,
    max_rows: usize,
) -> usize {
    let option_width = cols.saturating_sub(FACET_COLUMN_WIDTH + 1);
    let body_rows = panel.facets.len().max(panel.options.len()).min(max_rows.saturating_sub(2));

    // Keep the option cursor in view on short panes.
    let cursor = panel.options.iter().position(|o| o.is_cursor).unwrap_or(0);
    let option_offset = cursor.saturating_sub(body_rows.saturating_sub(1));

    for line in 0..body_rows {
        position_cursor(row + line, 1);

        match panel.facets.get(line) {
            Some(facet) => {
                let marker = if facet.is_current { "▸ " } else { "  " };
                let count = if facet.selected_count > 0 {
                    format!(" ({})", facet.selected_count)
                } else {
                    String::new()
                };
                let text = truncate(&format!("{marker}{}{count}", facet.label), FACET_COLUMN_WIDTH);

                if facet.is_current {
                    print!("{}", Theme::bold());
                    print!("{}", Theme::fg(&theme.colors.header_fg));
                } else if facet.selected_count > 0 {
                    print!("{}", Theme::fg(&theme.colors.facet_active_fg));
                } else {
                    print!("{}", Theme::fg(&theme.colors.text_normal));
                }
                print!("{}", pad(&text, FACET_COLUMN_WIDTH));
                print!("{}", Theme::reset());
            }
            None => print!("{}", " ".repeat(FACET_COLUMN_WIDTH)),
        }

        print!("{}", Theme::fg(&theme.colors.border));
        print!("│");
        print!("{}", Theme::reset());

        match panel.options.get(line + option_offset) {
            Some(option) => {
                let check = if option.is_checked { "[x]" } else { "[ ]" };
                let text = truncate(&format!(" {check} {}", option.label), option_width);

                if option.is_cursor {
                    print!("{}", Theme::fg(&theme.colors.selection_fg));
                    print!("{}", Theme::bg(&theme.colors.selection_bg));
                } else if option.is_checked {
                    print!("{}", Theme::fg(&theme.colors.facet_active_fg));
                } else {
                    print!("{}", Theme::fg(&theme.colors.text_dim));
                }
                print!("{}", pad(&text, option_width));
                print!("{}", Theme::reset());
            }
            None => print!("{}", " ".repeat(option_width)),
        }
    }

    let assessment_row = row + body_rows + 1;
    let check = if panel.assessment_only { "[x]" } else { "[ ]" };
    let text = truncate(&format!("  {check} Assessment only (a)"), cols);
    position_cursor(assessment_row, 1);
    if panel.assessment_only {
        print!("{}", Theme::fg(&theme.colors.facet_active_fg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(char_len(&text))));
    print!("{}", Theme::reset());

    assessment_row + 1
}
