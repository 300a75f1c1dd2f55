//! Shared rendering utilities.
//!
//! Cursor positioning, char-safe truncation, search match ranges and the
//! highlighted-text writer used by the table. All text measurements are in
//! chars, never bytes.

use crate::ui::theme::Theme;

/// Width of the LEVEL column, separator included.
pub const LEVEL_COLUMN_WIDTH: usize = 16;

/// Width of the LENGTH column, separator included.
pub const LENGTH_COLUMN_WIDTH: usize = 10;

/// Width of the assessment marker column.
pub const MARK_COLUMN_WIDTH: usize = 3;

/// Moves the cursor to a 1-indexed `row` and `col`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of chars in `text`.
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to at most `width` chars, ending in "..." when shortened.
///
/// ```
/// use reproinventory::ui::helpers::truncate;
///
/// assert_eq!(truncate("Neuroimaging", 8), "Neuro...");
/// assert_eq!(truncate("fMRI", 8), "fMRI");
/// ```
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if char_len(text) <= width {
        return text.to_string();
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }
    let mut out: String = text.chars().take(width - 3).collect();
    out.push_str("...");
    out
}

/// Pads `text` with spaces up to `width` chars.
#[must_use]
pub fn pad(text: &str, width: usize) -> String {
    let len = char_len(text);
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}

/// Joins tags for display.
#[must_use]
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}

/// Non-overlapping, case-insensitive occurrences of `needle` in `text`.
///
/// Ranges are `(start, end)` char indices, end exclusive. An empty needle
/// yields no ranges.
///
/// ```
/// use reproinventory::ui::helpers::substring_ranges;
///
/// assert_eq!(substring_ranges("fMRI and MRI", "mri"), vec![(1, 4), (9, 12)]);
/// assert!(substring_ranges("EEG", "").is_empty());
/// ```
#[must_use]
pub fn substring_ranges(text: &str, needle: &str) -> Vec<(usize, usize)> {
    let fold = |c: char| c.to_lowercase().next().unwrap_or(c);
    let hay: Vec<char> = text.chars().map(fold).collect();
    let pattern: Vec<char> = needle.chars().map(fold).collect();

    let mut ranges = Vec::new();
    if pattern.is_empty() || pattern.len() > hay.len() {
        return ranges;
    }

    let mut i = 0;
    while i + pattern.len() <= hay.len() {
        if hay[i..i + pattern.len()] == pattern[..] {
            ranges.push((i, i + pattern.len()));
            i += pattern.len();
        } else {
            i += 1;
        }
    }
    ranges
}

/// Prints `text` with `ranges` highlighted.
///
/// Selected rows skip match highlighting so the selection colors stay intact.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start > current_pos {
            let normal: String = chars[current_pos..start].iter().collect();
            print!("{normal}");
        }

        let highlighted: String = chars[start.max(current_pos)..end].iter().collect();
        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        print!("{highlighted}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_normal));

        current_pos = current_pos.max(end);
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}
