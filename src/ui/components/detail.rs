//! Detail card component renderer.

use crate::ui::helpers::{char_len, pad, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailCard;

/// Width of the field label column.
const LABEL_WIDTH: usize = 24;

/// Renders the entry title followed by one `label  value` line per field.
///
/// Values wider than the pane are truncated; fields that do not fit in
/// `max_rows` are dropped. Returns the next free row.
pub fn render_detail_card(
    row: usize,
    card: &DetailCard,
    theme: &Theme,
    cols: usize,
    max_rows: usize,
) -> usize {
    let title = truncate(&format!(" {}", card.title), cols);
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{title}");
    print!("{}", " ".repeat(cols.saturating_sub(char_len(&title))));
    print!("{}", Theme::reset());

    let value_width = cols.saturating_sub(LABEL_WIDTH + 1);
    let mut current_row = row + 2;

    for (label, value) in card.fields.iter().take(max_rows.saturating_sub(2)) {
        position_cursor(current_row, 1);
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!(" {}", pad(&truncate(label, LABEL_WIDTH - 1), LABEL_WIDTH));
        print!("{}", Theme::fg(&theme.colors.text_normal));
        let value = truncate(value, value_width);
        print!("{value}");
        print!("{}", " ".repeat(value_width.saturating_sub(char_len(&value))));
        print!("{}", Theme::reset());
        current_row += 1;
    }

    current_row
}
