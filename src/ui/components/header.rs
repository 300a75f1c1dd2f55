//! Header component renderer.

use crate::ui::helpers::{char_len, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the centred title and, when filters are active, their summary below it.
///
/// Returns the next free row.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title = truncate(&header.title, cols);
    let title_len = char_len(&title);
    let padding = cols.saturating_sub(title_len) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{}", " ".repeat(padding));
    print!("{title}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + title_len)));
    print!("{}", Theme::reset());

    let Some(filters) = &header.filters else {
        return row + 1;
    };

    let summary = truncate(&format!(" Filters: {filters}"), cols);
    position_cursor(row + 1, 1);
    print!("{}", Theme::fg(&theme.colors.facet_active_fg));
    print!("{summary}");
    print!("{}", " ".repeat(cols.saturating_sub(char_len(&summary))));
    print!("{}", Theme::reset());
    row + 2
}
